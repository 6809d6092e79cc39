use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, AppMode, DialogKind};

/// Handle a key event, dispatching on the current mode.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.mode.clone() {
        AppMode::Normal => handle_normal(app, key),
        AppMode::Search => handle_search(app, key),
        AppMode::Dialog(kind) => handle_dialog(app, &kind, key),
        AppMode::Detail { .. } => handle_detail(app, key),
    }
}

fn handle_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('a') => app.open_dialog(DialogKind::AddItem),
        KeyCode::Char('e') => app.toggle_editing(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Enter => app.activate_selected(),
        KeyCode::Esc if app.table.is_editing() => app.toggle_editing(),
        _ => {}
    }
}

fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Down => app.stop_search(),
        KeyCode::Backspace => app.search_delete_char(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.clear_search(),
        KeyCode::Char(c) if is_text(key) => app.search_input_char(c),
        _ => {}
    }
}

fn handle_dialog(app: &mut App, kind: &DialogKind, key: KeyEvent) {
    match kind {
        DialogKind::Alert { .. } => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                app.close_dialog();
            }
        }
        DialogKind::DeleteConfirm { .. } => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_dialog(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
        DialogKind::AddItem | DialogKind::Rename { .. } => match key.code {
            KeyCode::Enter => app.confirm_dialog(),
            KeyCode::Esc => app.close_dialog(),
            KeyCode::Backspace => app.dialog_delete_char(),
            KeyCode::Left => app.dialog_move_cursor_left(),
            KeyCode::Right => app.dialog_move_cursor_right(),
            KeyCode::Home => app.dialog_cursor_home(),
            KeyCode::End => app.dialog_cursor_end(),
            KeyCode::Char(c) if is_text(key) => app.dialog_input_char(c),
            _ => {}
        },
    }
}

/// Plain or shifted characters; Ctrl/Alt chords are not typed.
fn is_text(key: KeyEvent) -> bool {
    !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn handle_detail(app: &mut App, key: KeyEvent) {
    if matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace | KeyCode::Left
    ) {
        app.close_detail();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use searchable_table::DateFormat;

    fn setup_app() -> App {
        App::new(&AppConfig::default(), DateFormat::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn q_quits_in_normal_mode() {
        let mut app = setup_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut app = setup_app();
        press(&mut app, KeyCode::Char('a'));
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn q_is_text_while_searching() {
        let mut app = setup_app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.table.search_text(), "q");
    }

    #[test]
    fn search_then_clear_with_ctrl_u() {
        let mut app = setup_app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "item 3");
        assert_eq!(app.table.len(), 1);
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.table.len(), 10);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn modifier_chords_are_not_typed() {
        let mut app = setup_app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "it");
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
        );
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('E'), KeyModifiers::SHIFT),
        );
        assert_eq!(app.table.search_text(), "itE");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('a'));
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT));
        type_str(&mut app, "ok");
        assert_eq!(app.dialog_state.input, "ok");
    }

    #[test]
    fn add_flow_via_keys() {
        let mut app = setup_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Eggs");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.table.len(), 11);
        assert_eq!(app.table.name_at(app.selected), Some("Eggs"));
    }

    #[test]
    fn escape_cancels_prompt_silently() {
        let mut app = setup_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "nope");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.table.len(), 10);
    }

    #[test]
    fn empty_add_shows_alert_dismissed_by_enter() {
        let mut app = setup_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        assert!(matches!(
            app.mode,
            AppMode::Dialog(DialogKind::Alert { .. })
        ));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn delete_confirm_with_y() {
        let mut app = setup_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.table.len(), 9);
        assert_eq!(app.table.name_at(1), Some("Item 2"));
    }

    #[test]
    fn delete_cancel_with_n() {
        let mut app = setup_app();
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.table.len(), 10);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn edit_mode_enter_renames() {
        let mut app = setup_app();
        press(&mut app, KeyCode::Char('e'));
        assert!(app.table.is_editing());
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::End);
        type_str(&mut app, "!");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.table.name_at(0), Some("Item 0!"));
        press(&mut app, KeyCode::Esc);
        assert!(!app.table.is_editing());
    }

    #[test]
    fn enter_opens_detail_and_escape_returns() {
        let mut app = setup_app();
        press(&mut app, KeyCode::Char('G'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Detail { index: 9 });
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
    }
}
