//! Terminal loop
//!
//! Draw, deliver finished commands, poll one key, repeat. Each command runs
//! on its own task and reports back over an unbounded channel, so the screen
//! keeps redrawing while requests are in flight.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use mesa_client::MesaApi;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use super::app::App;
use super::ui::ui;
use super::{Command, Completed};

/// Run the console until the user quits
pub async fn run(api: Arc<dyn MesaApi>, tick: Duration) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    tracing::info!("F1 restaurants, F2 reservations, q to quit");

    let res = run_app(&mut terminal, &mut app, api, tick).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    api: Arc<dyn MesaApi>,
    tick: Duration,
) -> io::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Completed>();

    loop {
        terminal.draw(|f| ui(f, app))?;

        while let Ok(completed) = rx.try_recv() {
            if let Some(cmd) = app.handle_completed(completed) {
                dispatch(&api, &tx, app.generation(), cmd);
            }
        }

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                let today = chrono::Local::now().date_naive();
                if let Some(cmd) = app.handle_key(key, today) {
                    dispatch(&api, &tx, app.generation(), cmd);
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Run `cmd` on its own task, tagged with the view generation that issued it
fn dispatch(
    api: &Arc<dyn MesaApi>,
    tx: &mpsc::UnboundedSender<Completed>,
    generation: u64,
    cmd: Command,
) {
    tracing::debug!(?cmd, generation, "dispatching");
    let api = Arc::clone(api);
    let tx = tx.clone();
    tokio::spawn(async move {
        let event = cmd.execute(api.as_ref()).await;
        if tx.send(Completed { generation, event }).is_err() {
            tracing::debug!("console closed before a request finished");
        }
    });
}
