use anyhow::Result;
use crossterm::{
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::constants::{UI_EVENT_CHANNEL_CAPACITY, UI_REFRESH_INTERVAL_MS, UI_SCROLL_LINES};
use crate::tui::input::{InputAction, InputHandler};
use crate::tui::render::{render_ui, result_lines};
use crate::tui::App;
use crate::utils::{log_error, log_info};
use crate::widget::{Command, Event, RequestOrchestrator};

/// Run the terminal UI
pub async fn run_ui(mut app: App, orchestrator: RequestOrchestrator) -> Result<()> {
    // Check if we have an interactive terminal
    if !crossterm::tty::IsTty::is_tty(&io::stdout()) {
        eprintln!("❌ Checkmate's interactive mode requires a terminal.");
        eprintln!("   Pass --text, --url, --image or --audio to verify without one.");
        return Err(anyhow::anyhow!("No interactive terminal available"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Settlements of background requests
    let (tx, mut rx) = mpsc::channel::<Event>(UI_EVENT_CHANNEL_CAPACITY);

    log_info("🖥️", format!("Interactive session started ({})", app.verifier_name));
    let res = run_app(&mut terminal, &mut app, &orchestrator, tx, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    report_loop_result(res)
}

/// Log a failed UI loop and hand the error back to the caller
fn report_loop_result(res: Result<()>) -> Result<()> {
    if let Err(err) = &res {
        log_error("❌", format!("UI loop failed: {:?}", err));
    }
    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    orchestrator: &RequestOrchestrator,
    tx: mpsc::Sender<Event>,
    rx: &mut mpsc::Receiver<Event>,
) -> Result<()> {
    let input = InputHandler::new();

    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(Duration::from_millis(UI_REFRESH_INTERVAL_MS))? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let command = handle_action(app, input.handle_key(key));
                    if let Some(Command::Verify(request)) = command {
                        orchestrator.spawn(request, tx.clone());
                    }
                }
            }
        }

        // Apply every settlement that arrived since the last frame
        while let Ok(event) = rx.try_recv() {
            app.dispatch(event);
        }

        app.tick();

        if !app.running {
            break;
        }
    }

    Ok(())
}

/// Apply one key action, returning a request to send if one was started
fn handle_action(app: &mut App, action: InputAction) -> Option<Command> {
    match action {
        InputAction::Quit => app.quit(),
        InputAction::NextMode => app.cycle_mode(),
        InputAction::PrevMode => app.cycle_mode_reverse(),
        InputAction::SelectMode(mode) => app.set_mode(mode),
        InputAction::Submit => return app.submit(),
        InputAction::LoadPath => {
            app.load_selected_path();
        }
        InputAction::Dismiss => app.dismiss(),
        InputAction::ScrollUp => app.scroll_up(UI_SCROLL_LINES),
        InputAction::ScrollDown => {
            let content = result_lines(app).len().min(u16::MAX as usize) as u16;
            app.scroll_down(UI_SCROLL_LINES, content);
        }
        InputAction::Insert(c) => app.insert_char(c),
        InputAction::Delete => app.delete_char(),
        InputAction::None => {}
    }
    None
}
