use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use contentai_core::ContentType;
use crate::app::{App, Focus, InputMode};
use crate::clipboard::copy_to_clipboard;
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => {
            app.status_message = None;
            handle_key(app, key);
        }
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Paste(text) => {
            app.focus = Focus::Prompt;
            app.input_mode = InputMode::Editing;
            app.insert_str(&text);
        }
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Tab => app.focus = app.focus.next(),

        KeyCode::Char('i') | KeyCode::Char('/') => {
            app.focus = Focus::Prompt;
            app.input_mode = InputMode::Editing;
        }

        // Direct tile shortcuts, in catalog order
        KeyCode::Char(c @ '1'..='6') => {
            let idx = c as usize - '1' as usize;
            app.focus = Focus::Tiles;
            app.submit_typed(ContentType::ALL[idx]);
        }

        KeyCode::Char('c') => copy_output(app),

        KeyCode::Enter => match app.focus {
            Focus::Prompt => app.input_mode = InputMode::Editing,
            Focus::Tiles => {
                let tile = app.selected_tile();
                app.submit_typed(tile);
            }
            Focus::Output => {}
        },

        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_down();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_up();
        }

        KeyCode::Char('h') | KeyCode::Left if app.focus == Focus::Tiles => app.tile_left(),
        KeyCode::Char('l') | KeyCode::Right if app.focus == Focus::Tiles => app.tile_right(),
        KeyCode::Char('k') | KeyCode::Up => match app.focus {
            Focus::Tiles => app.tile_up(),
            Focus::Output => app.scroll_up(),
            Focus::Prompt => {}
        },
        KeyCode::Char('j') | KeyCode::Down => match app.focus {
            Focus::Tiles => app.tile_down(),
            Focus::Output => app.scroll_down(),
            Focus::Prompt => app.focus = Focus::Tiles,
        },
        KeyCode::Char('g') if app.focus == Focus::Output => app.output_scroll = 0,
        KeyCode::Char('G') if app.focus == Focus::Output => {
            app.output_scroll = app.max_output_scroll();
        }

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    let newline = key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter if newline => app.insert_char('\n'),
        KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.insert_char('\n');
        }
        KeyCode::Enter => {
            if app.submit_freeform() {
                app.input_mode = InputMode::Normal;
                app.focus = Focus::Output;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_prompt();
        }
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Tab => {
            app.input_mode = InputMode::Normal;
            app.focus = Focus::Tiles;
        }
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

fn copy_output(app: &mut App) {
    let Some(text) = app.session.generated_text() else {
        return;
    };
    if copy_to_clipboard(text).is_some() {
        app.status_message = Some("Copied to clipboard".to_string());
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.status_message = None;

            let clicked_tile = app
                .tile_areas
                .iter()
                .position(|r| point_in_rect(x, y, *r));

            if let Some(idx) = clicked_tile {
                app.focus = Focus::Tiles;
                app.input_mode = InputMode::Normal;
                if let Some(tile) = ContentType::ALL.get(idx) {
                    app.submit_typed(*tile);
                }
            } else if app.prompt_area.is_some_and(|r| point_in_rect(x, y, r)) {
                app.focus = Focus::Prompt;
                app.input_mode = InputMode::Editing;
            } else if app.output_area.is_some_and(|r| point_in_rect(x, y, r)) {
                app.focus = Focus::Output;
                app.input_mode = InputMode::Normal;
            }
        }
        MouseEventKind::ScrollDown => {
            for _ in 0..3 {
                app.scroll_down();
            }
        }
        MouseEventKind::ScrollUp => {
            for _ in 0..3 {
                app.scroll_up();
            }
        }
        _ => {}
    }
}
