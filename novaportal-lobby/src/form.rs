use crate::join::{self, Router};
use crate::secrets;

/// Which form field currently receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFocus {
    DisplayName,
    RoomName,
    E2ee,
}

impl FieldFocus {
    pub fn next(self) -> Self {
        match self {
            FieldFocus::DisplayName => FieldFocus::RoomName,
            FieldFocus::RoomName => FieldFocus::E2ee,
            FieldFocus::E2ee => FieldFocus::DisplayName,
        }
    }
}

/// Local state of the join form. Owns the per-view-session passphrase,
/// generated once at construction: toggling E2EE off and back on reuses
/// the same secret for the life of the view.
pub struct LobbyForm {
    pub display_name: String,
    pub room_name: String,
    pub e2ee_enabled: bool,
    pub focus: FieldFocus,
    passphrase: String,
}

impl LobbyForm {
    pub fn new() -> Self {
        Self::with_passphrase(secrets::random_string(secrets::PASSPHRASE_LENGTH))
    }

    /// Construct with a caller-supplied passphrase. Test seam; production
    /// code goes through [`LobbyForm::new`].
    pub fn with_passphrase(passphrase: String) -> Self {
        Self {
            display_name: String::new(),
            room_name: String::new(),
            e2ee_enabled: false,
            focus: FieldFocus::DisplayName,
            passphrase,
        }
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    pub fn toggle_e2ee(&mut self) {
        self.e2ee_enabled = !self.e2ee_enabled;
    }

    /// Required-field validation: the display name must be non-blank
    /// before submission is possible.
    pub fn can_submit(&self) -> bool {
        !self.display_name.trim().is_empty()
    }

    /// Submit the form: build the navigation target and hand it to the
    /// router. Returns the pushed target, or `None` when validation
    /// blocked the submission.
    pub fn submit(&mut self, router: &mut impl Router) -> Option<String> {
        self.submit_with(router, join::generate_room_id)
    }

    /// Like [`LobbyForm::submit`] with an explicit room-id generator.
    pub fn submit_with(
        &mut self,
        router: &mut impl Router,
        generate: impl FnOnce() -> String,
    ) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        let target = join::build_target(
            &self.room_name,
            &self.display_name,
            self.e2ee_enabled,
            &self.passphrase,
            generate,
        );
        router.push(&target);
        Some(target)
    }
}

impl Default for LobbyForm {
    fn default() -> Self {
        Self::new()
    }
}
