use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::Rng;

use crate::secrets;

/// Query-value encode set matching JavaScript's `encodeURIComponent`:
/// everything except ASCII alphanumerics and `-_.!~*'()` is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const ROOM_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ROOM_ID_SEGMENT_LENGTH: usize = 4;

/// Fresh room identifier: two short lowercase-alphanumeric segments, e.g.
/// `x7kq-09fm`. Usable as a single path segment as-is.
pub fn generate_room_id() -> String {
    let mut rng = rand::thread_rng();
    let mut segment = || -> String {
        (0..ROOM_ID_SEGMENT_LENGTH)
            .map(|_| ROOM_ID_ALPHABET[rng.gen_range(0..ROOM_ID_ALPHABET.len())] as char)
            .collect()
    };
    let head = segment();
    let tail = segment();
    format!("{head}-{tail}")
}

/// Navigation collaborator: performs the client-side transition to a
/// target. Fragments never leave the client through this layer.
pub trait Router {
    fn push(&mut self, target: &str);
}

/// One join submission, normalized from raw form state.
pub struct JoinRequest {
    pub room_id: String,
    pub display_name: String,
    pub e2ee_enabled: bool,
    pub passphrase: String,
}

impl JoinRequest {
    /// Normalize raw form input. Room input that trims to empty takes a
    /// fresh identifier from `generate` instead; the room id is never
    /// empty.
    pub fn from_form(
        room_input: &str,
        name_input: &str,
        e2ee_enabled: bool,
        passphrase: &str,
        generate: impl FnOnce() -> String,
    ) -> Self {
        let trimmed_room = room_input.trim();
        let room_id = if trimmed_room.is_empty() {
            generate()
        } else {
            trimmed_room.to_string()
        };
        Self {
            room_id,
            display_name: name_input.trim().to_string(),
            e2ee_enabled,
            passphrase: passphrase.to_string(),
        }
    }

    /// The navigation target: `/rooms/<id>?name=<encoded>[#<passphrase>]`.
    ///
    /// The passphrase rides exclusively in the fragment, which navigation
    /// layers do not transmit to servers; with E2EE off no secret material
    /// exists in the target at all.
    pub fn target(&self) -> String {
        let name = utf8_percent_encode(&self.display_name, QUERY_VALUE);
        let base = format!("/rooms/{}?name={}", self.room_id, name);
        if self.e2ee_enabled {
            format!("{base}#{}", secrets::encode_passphrase(&self.passphrase))
        } else {
            base
        }
    }
}

/// Build a navigation target from raw form state in one step. Total over
/// its input domain; never fails.
pub fn build_target(
    room_input: &str,
    name_input: &str,
    e2ee_enabled: bool,
    passphrase: &str,
    generate: impl FnOnce() -> String,
) -> String {
    JoinRequest::from_form(room_input, name_input, e2ee_enabled, passphrase, generate).target()
}

/// Strip the fragment from a target. Anything that ends up in a log line
/// goes through here first so the passphrase never does.
pub fn redact_fragment(target: &str) -> &str {
    match target.find('#') {
        Some(i) => &target[..i],
        None => target,
    }
}
