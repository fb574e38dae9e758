use crate::form::{FieldFocus, LobbyForm};

/// A keyboard action relevant to the join form. The windowing shell maps
/// host key events into these before handing them to [`apply_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    Char(char),
    Backspace,
    /// Cycle focus to the next field.
    NextField,
    Submit,
}

/// What the shell should do after a key was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Edited,
    SubmitRequested,
    Ignored,
}

/// Apply one key to the form. Character input goes to the focused text
/// field; on the E2EE checkbox, space toggles. Submission itself is the
/// shell's job (it owns the router), so `Submit` is only reported back.
pub fn apply_key(form: &mut LobbyForm, key: FormKey) -> FormAction {
    match key {
        FormKey::Char(c) => {
            if c.is_control() {
                return FormAction::Ignored;
            }
            match form.focus {
                FieldFocus::DisplayName => form.display_name.push(c),
                FieldFocus::RoomName => form.room_name.push(c),
                FieldFocus::E2ee => {
                    if c != ' ' {
                        return FormAction::Ignored;
                    }
                    form.toggle_e2ee();
                }
            }
            FormAction::Edited
        }
        FormKey::Backspace => match form.focus {
            FieldFocus::DisplayName => {
                form.display_name.pop();
                FormAction::Edited
            }
            FieldFocus::RoomName => {
                form.room_name.pop();
                FormAction::Edited
            }
            FieldFocus::E2ee => FormAction::Ignored,
        },
        FormKey::NextField => {
            form.focus = form.focus.next();
            FormAction::Edited
        }
        FormKey::Submit => FormAction::SubmitRequested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> LobbyForm {
        LobbyForm::with_passphrase("p4ss".to_string())
    }

    // ── apply_key ──

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = form();
        for c in "Ada Lovelace".chars() {
            assert_eq!(apply_key(&mut form, FormKey::Char(c)), FormAction::Edited);
        }
        assert_eq!(form.display_name, "Ada Lovelace");
        assert!(form.room_name.is_empty());
    }

    #[test]
    fn test_focus_cycles_through_all_fields() {
        let mut form = form();
        apply_key(&mut form, FormKey::NextField);
        apply_key(&mut form, FormKey::Char('s'));
        assert_eq!(form.focus, FieldFocus::RoomName);
        assert_eq!(form.room_name, "s");
        apply_key(&mut form, FormKey::NextField);
        assert_eq!(form.focus, FieldFocus::E2ee);
        apply_key(&mut form, FormKey::NextField);
        assert_eq!(form.focus, FieldFocus::DisplayName);
    }

    #[test]
    fn test_space_toggles_e2ee_when_focused() {
        let mut form = form();
        form.focus = FieldFocus::E2ee;
        apply_key(&mut form, FormKey::Char(' '));
        assert!(form.e2ee_enabled);
        apply_key(&mut form, FormKey::Char(' '));
        assert!(!form.e2ee_enabled);
    }

    #[test]
    fn test_other_chars_ignored_on_e2ee_field() {
        let mut form = form();
        form.focus = FieldFocus::E2ee;
        assert_eq!(apply_key(&mut form, FormKey::Char('x')), FormAction::Ignored);
        assert!(!form.e2ee_enabled);
    }

    #[test]
    fn test_backspace_edits_text_fields_only() {
        let mut form = form();
        form.display_name = "Bob".to_string();
        apply_key(&mut form, FormKey::Backspace);
        assert_eq!(form.display_name, "Bo");
        form.focus = FieldFocus::E2ee;
        assert_eq!(apply_key(&mut form, FormKey::Backspace), FormAction::Ignored);
    }

    #[test]
    fn test_submit_is_reported_not_applied() {
        let mut form = form();
        form.display_name = "Bo".to_string();
        assert_eq!(
            apply_key(&mut form, FormKey::Submit),
            FormAction::SubmitRequested
        );
        // State untouched
        assert_eq!(form.display_name, "Bo");
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let mut form = form();
        assert_eq!(
            apply_key(&mut form, FormKey::Char('\u{7}')),
            FormAction::Ignored
        );
        assert!(form.display_name.is_empty());
    }
}
