use crossterm::event::{KeyCode, KeyModifiers};

use crate::app::App;

pub fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.move_to_first(),
        KeyCode::Char('G') | KeyCode::End => app.move_to_last(),
        KeyCode::Enter => app.activate_selected(),
        KeyCode::Char('o') => app.open_selected_link(),
        KeyCode::Char('y') => app.copy_selected_link(),
        KeyCode::Char('m') => app.toggle_main(),
        _ => {}
    }
}
