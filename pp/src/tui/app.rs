//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering - that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info, trace};

use super::state::{AppState, FormField, PendingAction, View};
use crate::session::MISSING_DESTINATION;

/// Lines moved by PageUp/PageDown
const PAGE: usize = 10;

/// TUI application
#[derive(Debug)]
pub struct App {
    state: AppState,
}

impl App {
    pub fn new(state: AppState) -> Self {
        debug!("App::new: called");
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        trace!("App::state: called");
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        trace!("App::state_mut: called");
        &mut self.state
    }

    /// Take the action queued by the last key press, if any
    pub fn take_pending_action(&mut self) -> Option<PendingAction> {
        self.state.pending_action.take()
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        if key.kind == KeyEventKind::Release {
            return false;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.state.should_quit = true;
            return true;
        }

        // Input is ignored while a plan is being generated
        if self.state.loading.is_some() {
            return false;
        }

        self.state.clear_messages();
        let quit = match self.state.view {
            View::Form => self.handle_form_key(key),
            View::Result => self.handle_result_key(key),
        };
        if quit {
            self.state.should_quit = true;
        }
        quit
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> bool {
        let focus = self.state.focus;
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::Down => self.state.focus_step(true),
            KeyCode::BackTab | KeyCode::Up => self.state.focus_step(false),
            KeyCode::Enter => self.handle_submit(),
            KeyCode::Backspace if focus.is_text() => {
                if let Some(text) = self.state.form.text_mut(focus) {
                    text.pop();
                }
            }
            KeyCode::Backspace if focus == FormField::Budget => {
                self.state.form.custom_budget = 0;
            }
            KeyCode::Char(c) if focus.is_text() => {
                if let Some(text) = self.state.form.text_mut(focus) {
                    text.push(c);
                }
            }
            KeyCode::Char(c) if focus == FormField::Budget && c.is_ascii_digit() => {
                let digit = u64::from(c.to_digit(10).unwrap_or(0));
                let budget = &mut self.state.form.custom_budget;
                *budget = budget.saturating_mul(10).saturating_add(digit);
            }
            KeyCode::Left => self.state.form.adjust(focus, -1),
            KeyCode::Right | KeyCode::Char(' ') => self.state.form.adjust(focus, 1),
            _ => {}
        }
        self.state.normalize_focus();
        false
    }

    /// Queue a submit, or show why it cannot be built
    ///
    /// A missing destination is reported before any date parsing.
    fn handle_submit(&mut self) {
        debug!("App::handle_submit: called");
        if self.state.form.destination.trim().is_empty() {
            self.state.set_error(MISSING_DESTINATION);
            return;
        }

        match self.state.form.to_request() {
            Ok(request) => {
                if let Some(dest) = request.destination() {
                    self.state.start_loading(dest);
                }
                info!(destination = %request.destination, "Submit queued");
                self.state.pending_action = Some(PendingAction::Submit(request));
            }
            Err(e) => self.state.set_error(e.to_string()),
        }
    }

    fn handle_result_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.state.scroll_down(PAGE),
            KeyCode::PageUp => self.state.scroll_up(PAGE),
            KeyCode::Home | KeyCode::Char('g') => self.state.result_scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.state.result_scroll = self.state.result_max_scroll,
            KeyCode::Char('d') => {
                info!("PDF export requested");
                self.state.pending_action = Some(PendingAction::ExportPdf);
            }
            KeyCode::Char('r') => {
                info!("Reset requested");
                self.state.pending_action = Some(PendingAction::Reset);
            }
            _ => {}
        }
        false
    }
}
