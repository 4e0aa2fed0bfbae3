//! TUI Runner - main loop that owns the terminal and the session
//!
//! The TuiRunner is responsible for:
//! - Dispatching events to App for handling
//! - Executing pending actions against the Session (submit, reset, export)
//! - Mirroring the session phase and backdrop into AppState
//! - Rendering

use std::path::PathBuf;
use std::time::Duration;

use eyre::Result;
use tracing::{debug, info, warn};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::{AppState, FormState, PendingAction, ResultData};
use super::views;
use crate::config::Config;
use crate::session::{Phase, Session};

/// Redraw interval
const TICK_RATE: Duration = Duration::from_millis(100);

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    app: App,
    terminal: Tui,
    session: Session,
    event_handler: EventHandler,
    /// Where `d` writes the PDF
    export_dir: PathBuf,
}

impl TuiRunner {
    pub fn new(terminal: Tui, session: Session, config: &Config) -> Self {
        debug!(export_dir = ?config.export.dir, "TuiRunner::new: called");
        let mut state = AppState::new(
            FormState::from_defaults(&config.defaults),
            session.background().clone(),
        );
        state.generator = session.generator();

        Self {
            app: App::new(state),
            terminal,
            session,
            event_handler: EventHandler::new(TICK_RATE),
            export_dir: config.export.dir.clone(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: called");
        self.draw()?;
        self.session.start().await;
        self.sync_from_session();

        loop {
            self.draw()?;

            match self.event_handler.next().await? {
                Event::Key(key) => {
                    if self.app.handle_key(key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => debug!(width, height, "TuiRunner::run: resize"),
                Event::Tick => {}
            }

            if let Some(action) = self.app.take_pending_action() {
                // Show the overlay before blocking on the action
                self.draw()?;
                self.execute_action(action).await;
                self.event_handler.drain();
            }

            if self.app.state().should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        debug!("TuiRunner::run: exiting");
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        self.terminal.draw(|frame| views::render(self.app.state_mut(), frame))?;
        Ok(())
    }

    async fn execute_action(&mut self, action: PendingAction) {
        debug!(?action, "TuiRunner::execute_action: called");
        match action {
            PendingAction::Submit(request) => {
                let result = self.session.submit(&request).await;
                self.app.state_mut().stop_loading();
                match result {
                    Ok(()) => self.sync_from_session(),
                    Err(e) => {
                        debug!(error = %e, "TuiRunner::execute_action: submit failed");
                        self.app.state_mut().set_error(e.to_string());
                    }
                }
            }
            PendingAction::Reset => {
                self.session.reset().await;
                self.sync_from_session();
            }
            PendingAction::ExportPdf => match self.session.export_pdf(&self.export_dir) {
                Ok((path, bytes)) => {
                    info!(path = %path.display(), "TuiRunner: exported PDF");
                    self.app
                        .state_mut()
                        .set_notice(format!("📥 Saved {} ({} bytes)", path.display(), bytes.len()));
                }
                Err(e) => {
                    warn!(error = %e, "TuiRunner: PDF export failed");
                    self.app.state_mut().set_error(format!("PDF export failed: {}", e));
                }
            },
        }
    }

    /// Mirror the session phase and backdrop into the view state
    fn sync_from_session(&mut self) {
        let state = self.app.state_mut();
        state.background = self.session.background().clone();
        match self.session.phase() {
            Phase::Collecting => state.show_form(),
            Phase::Presenting(itinerary) => state.show_result(ResultData {
                destination: itinerary.destination.clone(),
                markdown: itinerary.markdown.clone(),
                per_person: format!("₹{}", itinerary.per_person()),
                truncated: itinerary.truncated,
            }),
        }
    }

    fn handle_mouse(&mut self, mouse: crossterm::event::MouseEvent) {
        use crossterm::event::MouseEventKind;

        let state = self.app.state_mut();
        match mouse.kind {
            MouseEventKind::ScrollUp => state.scroll_up(3),
            MouseEventKind::ScrollDown => state.scroll_down(3),
            _ => {}
        }
    }
}
