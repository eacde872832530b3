use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use todo_client::TaskController;
use todo_core::{Action, Event};
use tokio::sync::mpsc;

use crate::app::App;
use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Raw mode and the alternate screen, undone on drop so a panic in the loop
/// still hands the shell back a usable terminal.
struct TerminalGuard {
    restore: fn(),
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self {
            restore: restore_terminal,
        };
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        tracing::warn!(error = %e, "failed to leave raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        tracing::warn!(error = %e, "failed to leave alternate screen");
    }
}

pub async fn run(controller: TaskController) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    event_loop(&mut terminal, controller).await
}

/// Every action runs on its own task; finished chains report back through
/// the channel and are folded in whatever order they complete.
fn dispatch(controller: &TaskController, tx: &mpsc::UnboundedSender<Vec<Event>>, action: Action) {
    let controller = controller.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let events = controller.perform(action).await;
        if tx.send(events).is_err() {
            tracing::debug!("screen closed before action finished");
        }
    });
}

async fn event_loop<B: Backend>(terminal: &mut Terminal<B>, controller: TaskController) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(controller.service().backend(), *controller.policy());

    dispatch(&controller, &tx, Action::Refresh);

    loop {
        while let Ok(events) = rx.try_recv() {
            app.apply(events);
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(POLL_INTERVAL)? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = app.handle_key(key) {
                        dispatch(&controller, &tx, action);
                    }
                }
            }
        }

        if app.should_quit {
            tracing::info!("leaving task screen");
            return Ok(());
        }
        tokio::task::yield_now().await;
    }
}
