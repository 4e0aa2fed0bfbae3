//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here.

use rand::seq::IndexedRandom;
use tracing::debug;

use crate::background::Background;
use crate::config::FormDefaults;
use crate::trip::{
    BUDGET_STEP, DateError, DateWindow, MAX_DURATION_DAYS, MIN_DURATION_DAYS, MIN_GROUP_SIZE, TravelStyle,
    TravelerType, TripRequest, parse_date_field,
};

/// Lines shown under the loading message
pub const LOADING_TAGLINES: &[&str] = &[
    "Checking which Sleeper coach has a window seat...",
    "Hunting for the cheapest maggi point...",
    "Counting long weekends on the calendar...",
    "Bargaining with the hostel uncle...",
    "Finding the overnight train that saves a hotel night...",
    "Asking the chaiwala for the real local spots...",
];

/// Largest group the form allows
pub const MAX_GROUP_SIZE: u32 = 50;

/// Which screen is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Form,
    Result,
}

/// Focusable rows of the trip form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Origin,
    Destination,
    TravelerType,
    GroupSize,
    DatesMode,
    StartDate,
    EndDate,
    Duration,
    Budget,
    Style,
    Generate,
}

impl FormField {
    /// Row label
    pub fn label(self) -> &'static str {
        match self {
            Self::Origin => "📍 Starting From",
            Self::Destination => "🏁 Destination",
            Self::TravelerType => "👥 Traveling",
            Self::GroupSize => "🔢 Group Size",
            Self::DatesMode => "📅 Fixed Dates",
            Self::StartDate => "   Start (YYYY-MM-DD)",
            Self::EndDate => "   End (YYYY-MM-DD)",
            Self::Duration => "⏳ Trip Duration",
            Self::Budget => "💰 Custom Budget (₹)",
            Self::Style => "🎯 Travel Style",
            Self::Generate => "",
        }
    }

    /// Accepts typed characters
    pub fn is_text(self) -> bool {
        matches!(self, Self::Origin | Self::Destination | Self::StartDate | Self::EndDate)
    }
}

/// Current values of the trip form
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub origin: String,
    pub destination: String,
    pub traveler_type: TravelerType,
    pub group_size: u32,
    pub dates_mode: bool,
    pub start_date: String,
    pub end_date: String,
    pub duration: u32,
    pub custom_budget: u64,
    pub style: TravelStyle,
}

impl Default for FormState {
    fn default() -> Self {
        Self::from_defaults(&FormDefaults::default())
    }
}

impl FormState {
    pub fn from_defaults(defaults: &FormDefaults) -> Self {
        Self {
            origin: defaults.origin.clone(),
            destination: String::new(),
            traveler_type: TravelerType::Solo,
            group_size: defaults.group_size.max(MIN_GROUP_SIZE),
            dates_mode: false,
            start_date: String::new(),
            end_date: String::new(),
            duration: defaults.duration_days.clamp(MIN_DURATION_DAYS, MAX_DURATION_DAYS),
            custom_budget: 0,
            style: TravelStyle::Backpacker,
        }
    }

    /// Rows currently shown, in focus order
    pub fn visible_fields(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::Origin, FormField::Destination, FormField::TravelerType];
        if self.traveler_type == TravelerType::Group {
            fields.push(FormField::GroupSize);
        }
        fields.push(FormField::DatesMode);
        if self.dates_mode {
            fields.extend([FormField::StartDate, FormField::EndDate]);
        } else {
            fields.push(FormField::Duration);
        }
        fields.push(FormField::Budget);
        if self.custom_budget == 0 {
            fields.push(FormField::Style);
        }
        fields.push(FormField::Generate);
        fields
    }

    /// Text buffer behind a text field
    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Origin => Some(&mut self.origin),
            FormField::Destination => Some(&mut self.destination),
            FormField::StartDate => Some(&mut self.start_date),
            FormField::EndDate => Some(&mut self.end_date),
            _ => None,
        }
    }

    /// Step a non-text field left (`-1`) or right (`+1`)
    pub fn adjust(&mut self, field: FormField, delta: i8) {
        debug!(?field, delta, "FormState::adjust: called");
        let up = delta > 0;
        match field {
            FormField::TravelerType => self.traveler_type = self.traveler_type.toggle(),
            FormField::GroupSize => {
                self.group_size = if up {
                    (self.group_size + 1).min(MAX_GROUP_SIZE)
                } else {
                    self.group_size.saturating_sub(1).max(MIN_GROUP_SIZE)
                };
            }
            FormField::DatesMode => self.dates_mode = !self.dates_mode,
            FormField::Duration => {
                self.duration = if up {
                    (self.duration + 1).min(MAX_DURATION_DAYS)
                } else {
                    self.duration.saturating_sub(1).max(MIN_DURATION_DAYS)
                };
            }
            FormField::Budget => {
                self.custom_budget = if up {
                    self.custom_budget.saturating_add(BUDGET_STEP)
                } else {
                    self.custom_budget.saturating_sub(BUDGET_STEP)
                };
            }
            FormField::Style => self.style = if up { self.style.next() } else { self.style.prev() },
            _ => {}
        }
    }

    /// Build the request to submit
    pub fn to_request(&self) -> Result<TripRequest, DateError> {
        let window = if self.dates_mode {
            DateWindow::from_endpoints(parse_date_field(&self.start_date)?, parse_date_field(&self.end_date)?)
        } else {
            DateWindow::duration(self.duration)
        };

        Ok(TripRequest {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            traveler_type: self.traveler_type,
            group_size: self.group_size,
            window,
            custom_budget: self.custom_budget,
            style: self.style,
        })
    }
}

/// What the result screen shows
#[derive(Debug, Clone, PartialEq)]
pub struct ResultData {
    pub destination: String,
    pub markdown: String,
    /// Already formatted, e.g. `₹3000`
    pub per_person: String,
    /// Generation stopped at the token cap
    pub truncated: bool,
}

/// Generation in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loading {
    pub destination: String,
    pub tagline: String,
}

/// Work the runner performs on behalf of a key press
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    Submit(TripRequest),
    Reset,
    ExportPdf,
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub form: FormState,
    pub focus: FormField,
    pub result: Option<ResultData>,
    pub result_scroll: usize,
    /// Set by the renderer from the wrapped content height
    pub result_max_scroll: usize,
    pub loading: Option<Loading>,
    pub background: Background,
    /// Provider and model, shown in the footer
    pub generator: String,
    pub error_message: Option<String>,
    /// Transient success message (e.g. after export)
    pub notice: Option<String>,
    pub pending_action: Option<PendingAction>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(form: FormState, background: Background) -> Self {
        debug!("AppState::new: called");
        Self {
            view: View::Form,
            form,
            focus: FormField::Destination,
            result: None,
            result_scroll: 0,
            result_max_scroll: 0,
            loading: None,
            background,
            generator: String::new(),
            error_message: None,
            notice: None,
            pending_action: None,
            should_quit: false,
        }
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(%msg, "AppState::set_error: called");
        self.error_message = Some(msg);
        self.notice = None;
    }

    pub fn set_notice(&mut self, msg: impl Into<String>) {
        self.notice = Some(msg.into());
        self.error_message = None;
    }

    /// Clear transient messages
    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.notice = None;
    }

    /// Move focus through the visible rows
    pub fn focus_step(&mut self, forward: bool) {
        let fields = self.form.visible_fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (idx + 1) % fields.len()
        } else {
            (idx + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
        debug!(?self.focus, "AppState::focus_step: moved");
    }

    /// Keep focus on a visible row after the form layout changed
    pub fn normalize_focus(&mut self) {
        let fields = self.form.visible_fields();
        if !fields.contains(&self.focus) {
            self.focus = match self.focus {
                FormField::GroupSize => FormField::TravelerType,
                FormField::StartDate | FormField::EndDate | FormField::Duration => FormField::DatesMode,
                FormField::Style => FormField::Budget,
                _ => FormField::Destination,
            };
        }
    }

    /// Show the loading overlay with a random tagline
    pub fn start_loading(&mut self, destination: &str) {
        debug!(%destination, "AppState::start_loading: called");
        let mut rng = rand::rng();
        let tagline = LOADING_TAGLINES
            .choose(&mut rng)
            .unwrap_or(&"Packing the bags...")
            .to_string();
        self.loading = Some(Loading {
            destination: destination.to_string(),
            tagline,
        });
    }

    pub fn stop_loading(&mut self) {
        self.loading = None;
    }

    /// Switch to the result screen
    pub fn show_result(&mut self, result: ResultData) {
        debug!(destination = %result.destination, "AppState::show_result: called");
        self.result = Some(result);
        self.result_scroll = 0;
        self.result_max_scroll = 0;
        self.view = View::Result;
    }

    /// Back to the form; entered values are kept
    pub fn show_form(&mut self) {
        debug!("AppState::show_form: called");
        self.result = None;
        self.result_scroll = 0;
        self.view = View::Form;
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.result_scroll = self.result_scroll.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.result_scroll = (self.result_scroll + n).min(self.result_max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FALLBACK_COLOR, FALLBACK_IMAGE};

    fn state() -> AppState {
        AppState::new(FormState::default(), Background::new(FALLBACK_IMAGE, FALLBACK_COLOR))
    }

    #[test]
    fn test_visible_fields_follow_form() {
        let mut form = FormState::default();
        let fields = form.visible_fields();
        assert!(!fields.contains(&FormField::GroupSize));
        assert!(fields.contains(&FormField::Duration));
        assert!(fields.contains(&FormField::Style));

        form.traveler_type = TravelerType::Group;
        form.dates_mode = true;
        form.custom_budget = 5000;
        let fields = form.visible_fields();
        assert!(fields.contains(&FormField::GroupSize));
        assert!(fields.contains(&FormField::StartDate));
        assert!(!fields.contains(&FormField::Duration));
        assert!(!fields.contains(&FormField::Style));
        assert_eq!(fields.last(), Some(&FormField::Generate));
    }

    #[test]
    fn test_adjust_bounds() {
        let mut form = FormState::default();
        for _ in 0..20 {
            form.adjust(FormField::Duration, 1);
        }
        assert_eq!(form.duration, MAX_DURATION_DAYS);
        for _ in 0..20 {
            form.adjust(FormField::Duration, -1);
        }
        assert_eq!(form.duration, MIN_DURATION_DAYS);

        for _ in 0..10 {
            form.adjust(FormField::GroupSize, -1);
        }
        assert_eq!(form.group_size, MIN_GROUP_SIZE);

        form.adjust(FormField::Budget, -1);
        assert_eq!(form.custom_budget, 0);
        form.adjust(FormField::Budget, 1);
        form.adjust(FormField::Budget, 1);
        assert_eq!(form.custom_budget, 2000);
    }

    #[test]
    fn test_to_request_dates() {
        let mut form = FormState {
            destination: "Goa".to_string(),
            dates_mode: true,
            start_date: "2026-01-12".to_string(),
            end_date: "2026-01-10".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_request().unwrap().window.resolve().days, 3);

        form.end_date.clear();
        assert_eq!(form.to_request().unwrap().window, DateWindow::Incomplete);

        form.end_date = "12/01/2026".to_string();
        assert!(form.to_request().is_err());
    }

    #[test]
    fn test_focus_wraps() {
        let mut s = state();
        s.focus = FormField::Generate;
        s.focus_step(true);
        assert_eq!(s.focus, FormField::Origin);
        s.focus_step(false);
        assert_eq!(s.focus, FormField::Generate);
    }

    #[test]
    fn test_normalize_focus_after_hiding_style() {
        let mut s = state();
        s.focus = FormField::Style;
        s.form.custom_budget = 1000;
        s.normalize_focus();
        assert_eq!(s.focus, FormField::Budget);
    }

    #[test]
    fn test_loading_picks_tagline() {
        let mut s = state();
        s.start_loading("Goa");
        let loading = s.loading.clone().unwrap();
        assert_eq!(loading.destination, "Goa");
        assert!(LOADING_TAGLINES.contains(&loading.tagline.as_str()));
        s.stop_loading();
        assert!(s.loading.is_none());
    }

    #[test]
    fn test_result_and_scroll() {
        let mut s = state();
        s.show_result(ResultData {
            destination: "Goa".to_string(),
            markdown: "# Plan".to_string(),
            per_person: "₹3000".to_string(),
            truncated: false,
        });
        assert_eq!(s.view, View::Result);

        s.result_max_scroll = 5;
        s.scroll_down(10);
        assert_eq!(s.result_scroll, 5);
        s.scroll_up(2);
        assert_eq!(s.result_scroll, 3);

        s.show_form();
        assert_eq!(s.view, View::Form);
        assert!(s.result.is_none());
    }
}
