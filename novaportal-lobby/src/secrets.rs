use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of the per-session E2EE passphrase. 64 alphanumeric characters
/// (~381 bits) is ample seed material for a symmetric key.
pub const PASSPHRASE_LENGTH: usize = 64;

/// Random alphanumeric string of the given length. `thread_rng` is a
/// CSPRNG, so the output is usable as secret material.
pub fn random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Encode a passphrase for transport in a URL fragment. URL-safe base64
/// without padding: nothing in the output needs further escaping, and
/// [`decode_passphrase`] recovers the input losslessly.
pub fn encode_passphrase(passphrase: &str) -> String {
    URL_SAFE_NO_PAD.encode(passphrase.as_bytes())
}

/// Inverse of [`encode_passphrase`]. Decoding is the room view's job at
/// navigation time; it lives here so the pair stays in one place.
pub fn decode_passphrase(encoded: &str) -> Result<String, String> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| format!("invalid passphrase encoding: {e}"))?;
    String::from_utf8(bytes).map_err(|e| format!("passphrase is not valid UTF-8: {e}"))
}
