pub mod app;
pub mod card;
pub mod event;
pub mod keys;
pub mod tags;
pub mod theme;
pub mod ui;

use std::io;

use anyhow::Result;
use crossterm::ExecutableCommand;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use app::App;
use event::{AppEvent, EventHandler};

pub use card::{CardAction, PaperCard};
pub use theme::NordTheme;

/// Run the card list until the user quits.
pub fn run_tui(app: &mut App) -> Result<()> {
    let mouse = app.ui.mouse;

    // Restore the terminal before the panic message prints
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(DisableMouseCapture);
        let _ = io::stdout().execute(LeaveAlternateScreen);
        original_hook(info);
    }));

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    if mouse {
        io::stdout().execute(EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let event_handler = EventHandler::new(app.ui.tick_rate());
    tracing::info!(papers = app.papers.len(), mouse, "tui started");

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, app))?;

            match event_handler.next()? {
                AppEvent::Key(key) => keys::handle_key(app, key.code, key.modifiers),
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }

            if app.should_quit {
                return Ok(());
            }
        }
    })();

    if mouse {
        io::stdout().execute(DisableMouseCapture)?;
    }
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}
