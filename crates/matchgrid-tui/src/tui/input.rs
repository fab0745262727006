// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the
// application task, or into local ViewState changes (cursor movement,
// prompt and score dialog editing).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Prompt, ScoreEditor, ViewState};
use crate::protocol::{Notice, UserCommand};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// application task, `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm reports releases too on some platforms.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }
    if view_state.score_editor.is_some() {
        return handle_score_editor(key_event, view_state);
    }
    if view_state.prompt.is_some() {
        return handle_prompt(key_event, view_state);
    }

    view_state.notice = None;
    let player_count = view_state.snapshot.players.len();

    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.cursor_row = view_state.cursor_row.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if view_state.cursor_row + 1 < player_count {
                view_state.cursor_row += 1;
            }
            None
        }
        KeyCode::Left | KeyCode::Char('h') => {
            view_state.cursor_col = view_state.cursor_col.saturating_sub(1);
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if view_state.cursor_col + 1 < player_count {
                view_state.cursor_col += 1;
            }
            None
        }
        KeyCode::Home => {
            view_state.cursor_col = 0;
            None
        }
        KeyCode::End => {
            view_state.cursor_col = player_count.saturating_sub(1);
            None
        }

        KeyCode::Enter | KeyCode::Char('e') => {
            if view_state.on_diagonal() {
                view_state.notice = Some(diagonal_notice());
                return None;
            }
            view_state.score_editor = ScoreEditor::open(
                &view_state.snapshot,
                view_state.cursor_row,
                view_state.cursor_col,
            );
            None
        }

        // Clear the selected result without opening the dialog
        KeyCode::Char('x') => {
            if view_state.on_diagonal() {
                return None;
            }
            let (player_a, player_b) = view_state.selected_pair()?;
            Some(UserCommand::SubmitResult {
                player_a: player_a.to_string(),
                player_b: player_b.to_string(),
                raw: String::new(),
            })
        }

        KeyCode::Char('r') => {
            let name = view_state.snapshot.players.get(view_state.cursor_row)?;
            view_state.prompt = Some(Prompt::Rename {
                index: view_state.cursor_row,
                buffer: name.clone(),
            });
            None
        }
        KeyCode::Char('a') => {
            view_state.prompt = Some(Prompt::AddPlayer {
                buffer: String::new(),
            });
            None
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if view_state.cursor_row < player_count {
                Some(UserCommand::Remove {
                    index: view_state.cursor_row,
                })
            } else {
                None
            }
        }

        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// `y`/`q` confirm, `n`/Esc cancel, everything else is swallowed.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Edit the score draft. Enter forwards the text exactly as typed.
fn handle_score_editor(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let editor = view_state.score_editor.as_mut()?;
    match key_event.code {
        KeyCode::Esc => {
            view_state.score_editor = None;
            None
        }
        KeyCode::Enter => {
            let editor = view_state.score_editor.take()?;
            Some(UserCommand::SubmitResult {
                player_a: editor.player_a,
                player_b: editor.player_b,
                raw: editor.draft,
            })
        }
        KeyCode::Backspace => {
            editor.draft.pop();
            None
        }
        KeyCode::Char(c) => {
            editor.draft.push(c);
            None
        }
        _ => None,
    }
}

/// Edit the rename / add-player prompt.
fn handle_prompt(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let prompt = view_state.prompt.as_mut()?;
    let buffer = match prompt {
        Prompt::Rename { buffer, .. } | Prompt::AddPlayer { buffer } => buffer,
    };
    match key_event.code {
        KeyCode::Esc => {
            view_state.prompt = None;
            None
        }
        KeyCode::Backspace => {
            buffer.pop();
            None
        }
        KeyCode::Char(c) => {
            buffer.push(c);
            None
        }
        KeyCode::Enter => match view_state.prompt.take()? {
            Prompt::Rename { index, buffer } => {
                let unchanged = view_state
                    .snapshot
                    .players
                    .get(index)
                    .is_some_and(|current| *current == buffer);
                if unchanged {
                    None
                } else {
                    Some(UserCommand::Rename {
                        index,
                        name: buffer,
                    })
                }
            }
            Prompt::AddPlayer { buffer } => {
                let trimmed = buffer.trim();
                let name = (!trimmed.is_empty()).then(|| trimmed.to_string());
                Some(UserCommand::AddPlayer { name })
            }
        },
        _ => None,
    }
}

/// Why Enter on a diagonal cell opened nothing.
fn diagonal_notice() -> Notice {
    Notice::info("A player cannot play themselves")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::state_with;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

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

    fn type_text(state: &mut ViewState, text: &str) {
        for c in text.chars() {
            assert!(handle_key(key(KeyCode::Char(c)), state).is_none());
        }
    }

    fn abcd() -> ViewState {
        state_with(&["A", "B", "C", "D"], &[("A", "C", "3 - 2")])
    }

    // -- Cursor --

    #[test]
    fn arrows_move_cursor_within_bounds() {
        let mut state = abcd();
        handle_key(key(KeyCode::Up), &mut state);
        handle_key(key(KeyCode::Left), &mut state);
        assert_eq!((state.cursor_row, state.cursor_col), (0, 0));
        for _ in 0..10 {
            handle_key(key(KeyCode::Down), &mut state);
            handle_key(key(KeyCode::Right), &mut state);
        }
        assert_eq!((state.cursor_row, state.cursor_col), (3, 3));
    }

    #[test]
    fn vim_keys_move_cursor() {
        let mut state = abcd();
        handle_key(key(KeyCode::Char('j')), &mut state);
        handle_key(key(KeyCode::Char('l')), &mut state);
        handle_key(key(KeyCode::Char('l')), &mut state);
        assert_eq!((state.cursor_row, state.cursor_col), (1, 2));
        handle_key(key(KeyCode::Char('k')), &mut state);
        handle_key(key(KeyCode::Char('h')), &mut state);
        assert_eq!((state.cursor_row, state.cursor_col), (0, 1));
    }

    #[test]
    fn home_and_end_jump_columns() {
        let mut state = abcd();
        handle_key(key(KeyCode::End), &mut state);
        assert_eq!(state.cursor_col, 3);
        handle_key(key(KeyCode::Home), &mut state);
        assert_eq!(state.cursor_col, 0);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut state = abcd();
        let mut release = key(KeyCode::Down);
        release.kind = KeyEventKind::Release;
        assert!(handle_key(release, &mut state).is_none());
        assert_eq!(state.cursor_row, 0);
    }

    // -- Score dialog --

    #[test]
    fn enter_on_diagonal_opens_nothing() {
        let mut state = abcd();
        assert!(handle_key(key(KeyCode::Enter), &mut state).is_none());
        assert!(state.score_editor.is_none());
        assert!(state.notice.is_some());
    }

    #[test]
    fn enter_opens_prefilled_dialog_and_submits_verbatim() {
        let mut state = abcd();
        state.cursor_col = 2;
        handle_key(key(KeyCode::Enter), &mut state);
        let editor = state.score_editor.as_ref().unwrap();
        assert_eq!(editor.draft, "3 - 2");

        for _ in 0..5 {
            handle_key(key(KeyCode::Backspace), &mut state);
        }
        type_text(&mut state, " 4-x ");
        let cmd = handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(
            cmd,
            Some(UserCommand::SubmitResult {
                player_a: "A".into(),
                player_b: "C".into(),
                raw: " 4-x ".into(),
            })
        );
        assert!(state.score_editor.is_none());
    }

    #[test]
    fn dialog_keys_do_not_move_cursor_or_quit() {
        let mut state = abcd();
        state.cursor_col = 1;
        handle_key(key(KeyCode::Enter), &mut state);
        type_text(&mut state, "qjk");
        assert!(!state.confirm_quit);
        assert_eq!((state.cursor_row, state.cursor_col), (0, 1));
        assert_eq!(state.score_editor.as_ref().unwrap().draft, "qjk");
    }

    #[test]
    fn esc_cancels_dialog_without_command() {
        let mut state = abcd();
        state.cursor_col = 1;
        handle_key(key(KeyCode::Enter), &mut state);
        type_text(&mut state, "1 - 0");
        assert!(handle_key(key(KeyCode::Esc), &mut state).is_none());
        assert!(state.score_editor.is_none());
    }

    #[test]
    fn x_clears_selected_result() {
        let mut state = abcd();
        state.cursor_row = 2;
        let cmd = handle_key(key(KeyCode::Char('x')), &mut state);
        assert_eq!(
            cmd,
            Some(UserCommand::SubmitResult {
                player_a: "C".into(),
                player_b: "A".into(),
                raw: String::new(),
            })
        );
    }

    #[test]
    fn backspace_in_grid_keeps_result() {
        let mut state = abcd();
        state.cursor_col = 2;
        assert!(handle_key(key(KeyCode::Backspace), &mut state).is_none());
        assert!(state.score_editor.is_none());
    }

    #[test]
    fn same_name_crossing_cannot_be_edited() {
        let mut state = state_with(&["A", "B", "A"], &[]);
        state.cursor_col = 2;
        assert!(handle_key(key(KeyCode::Enter), &mut state).is_none());
        assert!(state.score_editor.is_none());
        assert!(state.notice.is_some());
        assert!(handle_key(key(KeyCode::Char('x')), &mut state).is_none());
    }

    #[test]
    fn x_on_diagonal_does_nothing() {
        let mut state = abcd();
        assert!(handle_key(key(KeyCode::Char('x')), &mut state).is_none());
    }

    // -- Rename / add / remove --

    #[test]
    fn rename_prompt_prefills_and_sends_new_name() {
        let mut state = abcd();
        state.cursor_row = 1;
        handle_key(key(KeyCode::Char('r')), &mut state);
        assert_eq!(
            state.prompt,
            Some(Prompt::Rename {
                index: 1,
                buffer: "B".into()
            })
        );
        handle_key(key(KeyCode::Backspace), &mut state);
        type_text(&mut state, "Bea");
        let cmd = handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(
            cmd,
            Some(UserCommand::Rename {
                index: 1,
                name: "Bea".into()
            })
        );
        assert!(state.prompt.is_none());
    }

    #[test]
    fn rename_to_same_name_sends_nothing() {
        let mut state = abcd();
        handle_key(key(KeyCode::Char('r')), &mut state);
        assert!(handle_key(key(KeyCode::Enter), &mut state).is_none());
        assert!(state.prompt.is_none());
    }

    #[test]
    fn add_prompt_trims_name() {
        let mut state = abcd();
        handle_key(key(KeyCode::Char('a')), &mut state);
        type_text(&mut state, "  Eve ");
        let cmd = handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(
            cmd,
            Some(UserCommand::AddPlayer {
                name: Some("Eve".into())
            })
        );
    }

    #[test]
    fn add_prompt_empty_requests_generated_name() {
        let mut state = abcd();
        handle_key(key(KeyCode::Char('a')), &mut state);
        type_text(&mut state, "   ");
        let cmd = handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(cmd, Some(UserCommand::AddPlayer { name: None }));
    }

    #[test]
    fn esc_cancels_prompt() {
        let mut state = abcd();
        handle_key(key(KeyCode::Char('a')), &mut state);
        type_text(&mut state, "Eve");
        assert!(handle_key(key(KeyCode::Esc), &mut state).is_none());
        assert!(state.prompt.is_none());
    }

    #[test]
    fn d_removes_cursor_row() {
        let mut state = abcd();
        state.cursor_row = 3;
        let cmd = handle_key(key(KeyCode::Char('d')), &mut state);
        assert_eq!(cmd, Some(UserCommand::Remove { index: 3 }));
    }

    #[test]
    fn d_on_empty_grid_does_nothing() {
        let mut state = state_with(&[], &[]);
        assert!(handle_key(key(KeyCode::Char('d')), &mut state).is_none());
        assert!(handle_key(key(KeyCode::Char('r')), &mut state).is_none());
        assert!(state.prompt.is_none());
    }

    // -- Quit --

    #[test]
    fn q_asks_for_confirmation() {
        let mut state = abcd();
        assert!(handle_key(key(KeyCode::Char('q')), &mut state).is_none());
        assert!(state.confirm_quit);
        assert_eq!(
            handle_key(key(KeyCode::Char('y')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn n_cancels_quit_and_blocks_other_keys() {
        let mut state = abcd();
        handle_key(key(KeyCode::Char('q')), &mut state);
        assert!(handle_key(key(KeyCode::Char('d')), &mut state).is_none());
        assert!(handle_key(key(KeyCode::Char('n')), &mut state).is_none());
        assert!(!state.confirm_quit);
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut state = abcd();
        state.cursor_col = 1;
        handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn key_press_clears_notice() {
        let mut state = abcd();
        state.notice = Some(Notice::info("Added E"));
        handle_key(key(KeyCode::Down), &mut state);
        assert!(state.notice.is_none());
    }
}
