use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode, View};

/// Top-level key dispatch for the TUI.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Any keypress clears a transient status message
    app.status = None;

    match app.mode {
        Mode::Search => handle_search_key(app, key),
        Mode::Navigate => handle_navigate_key(app, key),
    }
}

fn handle_navigate_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        // View switching
        KeyCode::Tab => {
            app.view = match app.view {
                View::Cabinet => View::Due,
                View::Due => View::Costs,
                View::Costs => View::Cabinet,
            };
        }
        KeyCode::BackTab => {
            app.view = match app.view {
                View::Cabinet => View::Costs,
                View::Due => View::Cabinet,
                View::Costs => View::Due,
            };
        }
        KeyCode::Char('1') => app.view = View::Cabinet,
        KeyCode::Char('2') => app.view = View::Due,
        KeyCode::Char('3') => app.view = View::Costs,

        // Cursor movement
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => set_cursor(app, 0),
        KeyCode::Char('G') | KeyCode::End => set_cursor(app, usize::MAX),

        // Toggle a dose on the selected medicine
        KeyCode::Char(' ') => {
            let id = match app.view {
                View::Due => app.due_list().get(app.due_cursor).map(|m| m.id),
                View::Cabinet => app.visible_medicines().get(app.cabinet_cursor).map(|m| m.id),
                View::Costs => None,
            };
            if let Some(id) = id {
                app.toggle_dose(id);
                app.clamp_cursors();
            }
        }

        // Cycle the cabinet tag filter through the registered tags
        KeyCode::Char('f') => cycle_tag_filter(app, 1),
        KeyCode::Char('F') => cycle_tag_filter(app, -1),

        // Search
        KeyCode::Char('/') => {
            app.mode = Mode::Search;
            app.search_input.clear();
        }

        // Clear search and tag filter
        KeyCode::Esc => {
            app.last_search = None;
            app.tag_filter = None;
            app.clamp_cursors();
        }

        // Manual reload
        KeyCode::Char('r') => app.reload(),

        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
            app.search_input.clear();
        }
        KeyCode::Enter => {
            app.last_search = if app.search_input.is_empty() {
                None
            } else {
                Some(app.search_input.clone())
            };
            app.mode = Mode::Navigate;
            app.search_input.clear();
            app.view = View::Cabinet;
            app.cabinet_cursor = 0;
            app.clamp_cursors();
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => app.search_input.push(c),
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let (current, len) = match app.view {
        View::Cabinet => (app.cabinet_cursor, app.visible_medicines().len()),
        View::Due => (app.due_cursor, app.due_list().len()),
        View::Costs => return,
    };
    if len == 0 {
        return;
    }
    let next = if delta < 0 {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        (current + delta as usize).min(len - 1)
    };
    match app.view {
        View::Cabinet => app.cabinet_cursor = next,
        View::Due => app.due_cursor = next,
        View::Costs => {}
    }
}

/// Step the tag filter through dose-time tags, then purpose tags, then
/// back to show-all. Lands in the cabinet view with the cursor reset.
fn cycle_tag_filter(app: &mut App, delta: isize) {
    let names: Vec<String> = app
        .store
        .cabinet
        .time_tags
        .iter()
        .chain(&app.store.cabinet.purpose_tags)
        .map(|t| t.name.clone())
        .collect();
    if names.is_empty() {
        return;
    }

    let current = app
        .tag_filter
        .as_ref()
        .and_then(|tag| names.iter().position(|n| n == tag));
    let next = match (current, delta < 0) {
        (None, false) => Some(0),
        (None, true) => Some(names.len() - 1),
        (Some(i), false) if i + 1 < names.len() => Some(i + 1),
        (Some(_), false) => None,
        (Some(0), true) => None,
        (Some(i), true) => Some(i - 1),
    };

    app.tag_filter = next.map(|i| names[i].clone());
    app.view = View::Cabinet;
    app.cabinet_cursor = 0;
    app.clamp_cursors();
}

fn set_cursor(app: &mut App, position: usize) {
    let len = match app.view {
        View::Cabinet => app.visible_medicines().len(),
        View::Due => app.due_list().len(),
        View::Costs => return,
    };
    let clamped = position.min(len.saturating_sub(1));
    match app.view {
        View::Cabinet => app.cabinet_cursor = clamped,
        View::Due => app.due_cursor = clamped,
        View::Costs => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store_io::sample_cabinet;
    use crate::model::cabinet::Store;
    use crate::model::settings::StoreConfig;
    use std::path::PathBuf;

    fn test_app() -> App {
        let store = Store {
            root: PathBuf::from("/tmp/x"),
            dosette_dir: PathBuf::from("/tmp/x/dosette"),
            config: StoreConfig::default(),
            cabinet: sample_cabinet(),
        };
        App::new(store)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn tab_cycles_views() {
        let mut app = test_app();
        assert_eq!(app.view, View::Cabinet);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Due);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Costs);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Cabinet);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.view, View::Costs);
    }

    #[test]
    fn cursor_moves_and_clamps() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cabinet_cursor, 1);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.cabinet_cursor, 3);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cabinet_cursor, 3); // stays at end
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.cabinet_cursor, 0);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cabinet_cursor, 0); // stays at start
    }

    #[test]
    fn search_commits_on_enter() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.last_search.as_deref(), Some("asp"));
        assert_eq!(app.visible_medicines().len(), 1);
    }

    #[test]
    fn escape_cancels_search_input() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.last_search.is_none());
    }

    #[test]
    fn escape_clears_filters_in_navigate() {
        let mut app = test_app();
        app.last_search = Some("asp".to_string());
        app.tag_filter = Some("Allergy".to_string());
        press(&mut app, KeyCode::Esc);
        assert!(app.last_search.is_none());
        assert!(app.tag_filter.is_none());
    }

    #[test]
    fn f_cycles_tag_filter_through_registry() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.tag_filter.as_deref(), Some("Before breakfast"));
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.tag_filter.as_deref(), Some("After lunch"));

        // Five dose-time tags, then four purpose tags, then show-all
        for _ in 0..7 {
            press(&mut app, KeyCode::Char('f'));
        }
        assert_eq!(app.tag_filter.as_deref(), Some("Heart"));
        press(&mut app, KeyCode::Char('f'));
        assert!(app.tag_filter.is_none());
    }

    #[test]
    fn shift_f_cycles_filter_backwards() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('F'));
        assert_eq!(app.tag_filter.as_deref(), Some("Heart"));
        press(&mut app, KeyCode::Char('F'));
        assert_eq!(app.tag_filter.as_deref(), Some("Allergy"));
    }

    #[test]
    fn filter_key_jumps_to_cabinet_and_esc_clears() {
        let mut app = test_app();
        app.view = View::Costs;
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.view, View::Cabinet);
        assert_eq!(app.cabinet_cursor, 0);
        assert_eq!(app.tag_filter.as_deref(), Some("Before breakfast"));
        let names: Vec<&str> = app
            .visible_medicines()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["Aspirin", "Amoxicillin"]);

        press(&mut app, KeyCode::Esc);
        assert!(app.tag_filter.is_none());
        assert_eq!(app.visible_medicines().len(), 4);
    }

    #[test]
    fn quit_on_q() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
