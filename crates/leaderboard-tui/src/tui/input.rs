// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// orchestrator, or into local ViewState mutations (sorting, selection,
// host toggle, uploader text entry).

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use leaderboard_core::cookies::CookieSource;
use leaderboard_core::protocol::UserCommand;
use leaderboard_core::view::SortKey;

use super::{Notice, Screen, UploaderField, ViewState};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// orchestrator. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // On Windows crossterm reports both Press and Release; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits, even while typing in the uploader.
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.uploader.open {
        return handle_uploader_key(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char('q') => Some(UserCommand::Quit),

        KeyCode::Char('r') => request_refresh(view_state),

        KeyCode::Esc => {
            if view_state.error.is_some() {
                view_state.error_dismissed = true;
            }
            None
        }

        KeyCode::Char('u') => {
            view_state.uploader.open = true;
            None
        }

        KeyCode::Char('l') => set_sort(view_state, SortKey::Likes),
        KeyCode::Char('c') => set_sort(view_state, SortKey::Comments),
        KeyCode::Char('s') => set_sort(view_state, SortKey::EngagementScore),

        KeyCode::Down | KeyCode::Char('j') => {
            if view_state.selected + 1 < view_state.leaderboard.len() {
                view_state.selected += 1;
            }
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.selected = view_state.selected.saturating_sub(1);
            None
        }
        KeyCode::Home | KeyCode::Char('g') => {
            view_state.selected = 0;
            None
        }

        KeyCode::Char('h') => {
            if !view_state.host_articles.is_empty() {
                view_state.show_host = !view_state.show_host;
            }
            None
        }

        _ => None,
    }
}

/// Bracketed paste: route the text into the focused uploader field.
pub fn handle_paste(text: &str, view_state: &mut ViewState) {
    if !view_state.uploader.open {
        return;
    }
    match view_state.uploader.focus {
        UploaderField::Paste => view_state.uploader.paste_text.push_str(text),
        // A path is a single line; drop the trailing newline many terminals add.
        UploaderField::FilePath => view_state
            .uploader
            .path_text
            .push_str(text.trim_end_matches(['\r', '\n'])),
    }
}

/// Manual refresh. Ignored while a cycle is running or before the cookies
/// have been accepted.
fn request_refresh(view_state: &ViewState) -> Option<UserCommand> {
    if view_state.refreshing || !view_state.auth.is_valid() {
        return None;
    }
    match view_state.screen() {
        Screen::Dashboard | Screen::Error => Some(UserCommand::Refresh),
        _ => None,
    }
}

fn set_sort(view_state: &mut ViewState, key: SortKey) -> Option<UserCommand> {
    if view_state.sort_key != key {
        view_state.sort_key = key;
        view_state.selected = 0;
    }
    None
}

/// Keys while the cookie uploader is open.
///
/// - Tab / BackTab switch between the path and paste fields
/// - Enter submits the focused field
/// - Esc closes the uploader, keeping the entered text
/// - Backspace deletes, other characters are typed into the focused field
fn handle_uploader_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let uploader = &mut view_state.uploader;
    match key_event.code {
        KeyCode::Esc => {
            uploader.open = false;
            None
        }
        KeyCode::Tab | KeyCode::BackTab => {
            uploader.focus = match uploader.focus {
                UploaderField::FilePath => UploaderField::Paste,
                UploaderField::Paste => UploaderField::FilePath,
            };
            None
        }
        KeyCode::Enter => {
            if uploader.submitting {
                return None;
            }
            let source = match uploader.focus {
                UploaderField::FilePath => {
                    let path = uploader.path_text.trim();
                    if path.is_empty() {
                        uploader.notice =
                            Some(Notice::Error("Enter the path to a cookies.json file".into()));
                        return None;
                    }
                    CookieSource::File(PathBuf::from(path))
                }
                UploaderField::Paste => {
                    if uploader.paste_text.trim().is_empty() {
                        uploader.notice =
                            Some(Notice::Error("Paste the exported cookies JSON first".into()));
                        return None;
                    }
                    CookieSource::Paste(uploader.paste_text.clone())
                }
            };
            uploader.submitting = true;
            uploader.notice = Some(Notice::Info("Uploading cookies...".into()));
            Some(UserCommand::UploadCookies(source))
        }
        KeyCode::Backspace => {
            focused_text(uploader).pop();
            None
        }
        KeyCode::Char(c) => {
            focused_text(uploader).push(c);
            None
        }
        _ => None,
    }
}

fn focused_text(uploader: &mut super::UploaderState) -> &mut String {
    match uploader.focus {
        UploaderField::FilePath => &mut uploader.path_text,
        UploaderField::Paste => &mut uploader.paste_text,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::test_util::article;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use leaderboard_core::auth::AuthState;

    /// Helper to create a KeyEvent with no modifiers.
    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn loaded_state() -> ViewState {
        let mut state = ViewState::new("t");
        state.auth = AuthState::Valid { message: None };
        state.loading = false;
        state.leaderboard = vec![
            article("1", "A", None, 10, 1, 30.0),
            article("2", "B", None, 30, 5, 20.0),
            article("3", "C", None, 20, 9, 10.0),
        ];
        state
    }

    fn type_str(state: &mut ViewState, text: &str) {
        for c in text.chars() {
            handle_key(key(KeyCode::Char(c)), state);
        }
    }

    // -- Quit --

    #[test]
    fn q_quits() {
        let mut state = loaded_state();
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), Some(UserCommand::Quit));
    }

    #[test]
    fn ctrl_c_quits_even_in_uploader() {
        let mut state = loaded_state();
        state.uploader.open = true;
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn q_in_uploader_is_typed() {
        let mut state = loaded_state();
        state.uploader.open = true;
        assert!(handle_key(key(KeyCode::Char('q')), &mut state).is_none());
        assert_eq!(state.uploader.path_text, "q");
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = loaded_state();
        let mut ev = key(KeyCode::Char('q'));
        ev.kind = KeyEventKind::Release;
        assert!(handle_key(ev, &mut state).is_none());
    }

    // -- Refresh --

    #[test]
    fn r_refreshes_when_idle() {
        let mut state = loaded_state();
        assert_eq!(handle_key(key(KeyCode::Char('r')), &mut state), Some(UserCommand::Refresh));
    }

    #[test]
    fn r_ignored_while_refreshing() {
        let mut state = loaded_state();
        state.refreshing = true;
        assert!(handle_key(key(KeyCode::Char('r')), &mut state).is_none());
    }

    #[test]
    fn r_ignored_without_valid_cookies() {
        let mut state = loaded_state();
        state.auth = AuthState::Invalid {
            status: "invalid".into(),
            message: None,
        };
        assert!(handle_key(key(KeyCode::Char('r')), &mut state).is_none());
    }

    #[test]
    fn r_retries_from_error_view() {
        let mut state = loaded_state();
        state.error = Some("Failed to fetch stats: boom".into());
        assert_eq!(state.screen(), Screen::Error);
        assert_eq!(handle_key(key(KeyCode::Char('r')), &mut state), Some(UserCommand::Refresh));
    }

    #[test]
    fn esc_dismisses_error_view() {
        let mut state = loaded_state();
        state.error = Some("Failed to fetch stats: boom".into());
        handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(state.screen(), Screen::Dashboard);
    }

    // -- Sorting and selection --

    #[test]
    fn sort_keys_switch_and_reset_selection() {
        let mut state = loaded_state();
        state.selected = 2;
        handle_key(key(KeyCode::Char('l')), &mut state);
        assert_eq!(state.sort_key, SortKey::Likes);
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_article().unwrap().content_id, "2");

        handle_key(key(KeyCode::Char('c')), &mut state);
        assert_eq!(state.sort_key, SortKey::Comments);
        assert_eq!(state.selected_article().unwrap().content_id, "3");

        handle_key(key(KeyCode::Char('s')), &mut state);
        assert_eq!(state.sort_key, SortKey::EngagementScore);
        assert_eq!(state.selected_article().unwrap().content_id, "1");
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = loaded_state();
        handle_key(key(KeyCode::Char('k')), &mut state);
        assert_eq!(state.selected, 0);
        for _ in 0..5 {
            handle_key(key(KeyCode::Char('j')), &mut state);
        }
        assert_eq!(state.selected, 2);
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn h_toggles_only_with_host_articles() {
        let mut state = loaded_state();
        handle_key(key(KeyCode::Char('h')), &mut state);
        assert!(!state.show_host);

        state.host_articles = vec![article("h", "Host", Some("Ben Fowler"), 1, 1, 1.0)];
        handle_key(key(KeyCode::Char('h')), &mut state);
        assert!(state.show_host);
        handle_key(key(KeyCode::Char('h')), &mut state);
        assert!(!state.show_host);
    }

    // -- Uploader --

    #[test]
    fn u_opens_uploader() {
        let mut state = loaded_state();
        handle_key(key(KeyCode::Char('u')), &mut state);
        assert!(state.uploader.open);
        handle_key(key(KeyCode::Esc), &mut state);
        assert!(!state.uploader.open);
    }

    #[test]
    fn enter_submits_file_path() {
        let mut state = loaded_state();
        state.uploader.open = true;
        type_str(&mut state, "/tmp/cookies.json");
        let cmd = handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(
            cmd,
            Some(UserCommand::UploadCookies(CookieSource::File(
                "/tmp/cookies.json".into()
            )))
        );
        assert!(state.uploader.submitting);
    }

    #[test]
    fn enter_ignored_while_submitting() {
        let mut state = loaded_state();
        state.uploader.open = true;
        state.uploader.submitting = true;
        state.uploader.path_text = "c.json".into();
        assert!(handle_key(key(KeyCode::Enter), &mut state).is_none());
    }

    #[test]
    fn empty_field_is_not_submitted() {
        let mut state = loaded_state();
        state.uploader.open = true;
        assert!(handle_key(key(KeyCode::Enter), &mut state).is_none());
        assert!(matches!(state.uploader.notice, Some(Notice::Error(_))));
        assert!(!state.uploader.submitting);
    }

    #[test]
    fn tab_switches_field_and_paste_is_submitted_verbatim() {
        let mut state = loaded_state();
        state.uploader.open = true;
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.uploader.focus, UploaderField::Paste);

        let text = "[{\"name\":\"a\",\"value\":\"b\",\"domain\":\"c\"}]\n";
        handle_paste(text, &mut state);
        assert_eq!(state.uploader.paste_text, text);

        let cmd = handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(
            cmd,
            Some(UserCommand::UploadCookies(CookieSource::Paste(text.into())))
        );
    }

    #[test]
    fn paste_into_path_field_drops_newline() {
        let mut state = loaded_state();
        state.uploader.open = true;
        handle_paste("/home/me/cookies.json\n", &mut state);
        assert_eq!(state.uploader.path_text, "/home/me/cookies.json");
    }

    #[test]
    fn paste_ignored_when_uploader_closed() {
        let mut state = loaded_state();
        handle_paste("[]", &mut state);
        assert!(state.uploader.paste_text.is_empty());
        assert!(state.uploader.path_text.is_empty());
    }

    #[test]
    fn backspace_edits_focused_field() {
        let mut state = loaded_state();
        state.uploader.open = true;
        state.uploader.focus = UploaderField::Paste;
        type_str(&mut state, "[]x");
        handle_key(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.uploader.paste_text, "[]");
        assert!(state.uploader.path_text.is_empty());
    }
}
