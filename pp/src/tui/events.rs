//! TUI event handling
//!
//! Crossterm is polled on a plain thread and events are forwarded over a
//! tokio channel, so the runner can await them alongside async work.

use std::time::Duration;

use crossterm::event::{self, KeyEvent, MouseEvent};
use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Terminal events
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Periodic redraw
    Tick,
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        debug!(?tick_rate, "EventHandler::new: called");
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            loop {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(event::Event::Key(key)) => Event::Key(key),
                        Ok(event::Event::Mouse(mouse)) => Event::Mouse(mouse),
                        Ok(event::Event::Resize(w, h)) => Event::Resize(w, h),
                        _ => continue,
                    }
                } else {
                    Event::Tick
                };

                if tx.send(event).is_err() {
                    debug!("EventHandler: channel closed, exiting loop");
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Result<Event> {
        let event = self.rx.recv().await.ok_or_else(|| eyre::eyre!("Event channel closed"))?;
        trace!(?event, "EventHandler::next: received event");
        Ok(event)
    }

    /// Drop everything queued, e.g. keys pressed during a blocking call
    pub fn drain(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }
}
