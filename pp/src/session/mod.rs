//! Planning session
//!
//! One traveler, one session. The session starts in [`Phase::Collecting`];
//! a successful submit moves it to [`Phase::Presenting`] with the generated
//! itinerary, and reset returns it to collecting from anywhere. The budget
//! and group size only exist inside the presenting phase.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Datelike;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::background::{Background, BackgroundQuery, BackgroundSelector};
use crate::export::{self, ExportError};
use crate::llm::{self, LlmClient, LlmError};
use crate::prompts::{PromptContext, PromptLoader};
use crate::trip::{BudgetPlan, DateWindow, ResolvedWindow, TripRequest, derive_budget, per_person_share};

/// Shown when submit is pressed without a destination
pub const MISSING_DESTINATION: &str = "Bhai, destination toh daal do!";

/// Errors from submitting the trip form
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(String),

    #[error("AI Error: {0}")]
    Generation(#[from] LlmError),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

/// A generated plan and the numbers behind it
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    /// Markdown as returned by the generator
    pub markdown: String,
    pub destination: String,
    pub actual_budget: f64,
    /// Travelers sharing the budget, at least 1
    pub group_size: u32,
    /// Generation stopped at the token cap
    pub truncated: bool,
}

impl Itinerary {
    /// Rounded per-person share of the budget
    pub fn per_person(&self) -> i64 {
        per_person_share(self.actual_budget, self.group_size)
    }
}

/// Which view the session is in
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Collecting,
    Presenting(Itinerary),
}

/// Everything derived from a request before the generator is called
#[derive(Debug, Clone)]
pub struct PreparedPrompt {
    pub prompt: String,
    pub destination: String,
    pub group_size: u32,
    pub budget: BudgetPlan,
    pub window: ResolvedWindow,
}

/// Validate a request and assemble its prompt, without any network call
pub fn prepare(prompts: &PromptLoader, request: &TripRequest) -> Result<PreparedPrompt, SubmitError> {
    debug!(?request, "prepare: called");
    let destination = request
        .destination()
        .ok_or_else(|| SubmitError::Validation(MISSING_DESTINATION.to_string()))?
        .to_string();

    let group_size = request.effective_group_size();
    let window = request.window.resolve();
    let budget = derive_budget(request.style, window.days, group_size, request.custom_budget);

    let year = match request.window {
        DateWindow::Range { start, .. } => start.year(),
        _ => chrono::Local::now().year(),
    };

    let context = PromptContext::new(
        request.origin.trim(),
        &destination,
        request.traveler_type.label(),
        group_size,
        &budget,
        &window,
        year,
    );
    let prompt = prompts
        .itinerary_prompt(&context)
        .map_err(|e| SubmitError::Prompt(e.to_string()))?;

    Ok(PreparedPrompt {
        prompt,
        destination,
        group_size,
        budget,
        window,
    })
}

/// Session state plus its collaborators
pub struct Session {
    phase: Phase,
    background: Background,
    llm: Arc<dyn LlmClient>,
    backgrounds: BackgroundSelector,
    prompts: PromptLoader,
    max_tokens: Option<u32>,
}

impl Session {
    /// New session in the collecting phase, showing the fallback backdrop
    pub fn new(
        llm: Arc<dyn LlmClient>,
        backgrounds: BackgroundSelector,
        prompts: PromptLoader,
        max_tokens: Option<u32>,
    ) -> Self {
        debug!(llm = %llm.describe(), ?max_tokens, "Session::new: called");
        Self {
            phase: Phase::Collecting,
            background: backgrounds.fallback().clone(),
            llm,
            backgrounds,
            prompts,
            max_tokens,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// The current itinerary, if presenting
    pub fn itinerary(&self) -> Option<&Itinerary> {
        match &self.phase {
            Phase::Presenting(itinerary) => Some(itinerary),
            Phase::Collecting => None,
        }
    }

    /// Provider and model behind the generator
    pub fn generator(&self) -> String {
        self.llm.describe()
    }

    /// Fetch the generic backdrop
    pub async fn start(&mut self) {
        debug!("Session::start: called");
        self.background = self.backgrounds.fetch(&BackgroundQuery::Generic).await;
    }

    /// Generate an itinerary for the request
    ///
    /// On any error the phase is left untouched.
    pub async fn submit(&mut self, request: &TripRequest) -> Result<(), SubmitError> {
        debug!(?request.destination, "Session::submit: called");
        let prepared = prepare(&self.prompts, request)?;

        info!(
            destination = %prepared.destination,
            days = prepared.window.days,
            group_size = prepared.group_size,
            budget = prepared.budget.actual_budget,
            "Generating itinerary"
        );

        let response = match llm::generate(&self.llm, &prepared.prompt, self.max_tokens).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, destination = %prepared.destination, "Itinerary generation failed");
                return Err(SubmitError::Generation(e));
            }
        };

        let truncated = response.is_truncated();
        if truncated {
            warn!(destination = %prepared.destination, "Itinerary was cut off at the token cap");
        }
        self.phase = Phase::Presenting(Itinerary {
            markdown: response.content,
            destination: prepared.destination.clone(),
            actual_budget: prepared.budget.actual_budget,
            group_size: prepared.group_size,
            truncated,
        });
        info!(destination = %prepared.destination, "Session: Collecting -> Presenting");

        self.background = self
            .backgrounds
            .fetch(&BackgroundQuery::Destination(prepared.destination))
            .await;
        Ok(())
    }

    /// Back to collecting, with a fresh generic backdrop
    pub async fn reset(&mut self) {
        debug!(phase = ?std::mem::discriminant(&self.phase), "Session::reset: called");
        self.phase = Phase::Collecting;
        info!("Session: reset to Collecting");
        self.background = self.backgrounds.fetch(&BackgroundQuery::Generic).await;
    }

    /// Per-person share, only while presenting
    pub fn per_person(&self) -> Option<i64> {
        self.itinerary().map(Itinerary::per_person)
    }

    /// Per-person share formatted as rupees
    pub fn per_person_label(&self) -> Option<String> {
        self.per_person().map(|n| format!("₹{}", n))
    }

    /// Write the current itinerary as a PDF into `dir`
    pub fn export_pdf(&self, dir: &Path) -> Result<(PathBuf, Vec<u8>), ExportError> {
        debug!(?dir, "Session::export_pdf: called");
        let itinerary = self.itinerary().ok_or(ExportError::NothingToExport)?;
        export::export_pdf(dir, &itinerary.markdown, &itinerary.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::ImageSearch;
    use crate::background::mock::MockImageSearch;
    use crate::config::BackgroundConfig;
    use crate::llm::client::mock::MockLlmClient;
    use crate::trip::{TravelStyle, TravelerType};
    use tempfile::TempDir;

    struct Harness {
        session: Session,
        llm: Arc<MockLlmClient>,
        search: Arc<MockImageSearch>,
    }

    fn harness(llm: MockLlmClient) -> Harness {
        let llm = Arc::new(llm);
        let search = Arc::new(MockImageSearch::returning(Background::new(
            "https://img.example/x.jpg",
            "#112233",
        )));
        let dyn_llm: Arc<dyn LlmClient> = llm.clone();
        let dyn_search: Arc<dyn ImageSearch> = search.clone();
        let backgrounds = BackgroundSelector::new(Some(dyn_search), &BackgroundConfig::default());
        let session = Session::new(dyn_llm, backgrounds, PromptLoader::embedded_only(), None);
        Harness { session, llm, search }
    }

    fn goa_group() -> TripRequest {
        TripRequest {
            destination: "Goa".to_string(),
            traveler_type: TravelerType::Group,
            group_size: 4,
            style: TravelStyle::Explorer,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_destination_is_rejected_without_calls() {
        let mut h = harness(MockLlmClient::replying("# plan"));

        for dest in ["", "   ", "\t"] {
            let request = TripRequest {
                destination: dest.to_string(),
                ..Default::default()
            };
            let err = h.session.submit(&request).await.unwrap_err();
            assert_eq!(err.to_string(), "Bhai, destination toh daal do!");
            assert_eq!(h.session.phase(), &Phase::Collecting);
        }

        assert_eq!(h.llm.call_count(), 0);
        assert!(h.search.queries().is_empty());
    }

    #[tokio::test]
    async fn test_submit_success_presents_itinerary() {
        let mut h = harness(MockLlmClient::replying("# Goa plan"));
        h.session.submit(&goa_group()).await.unwrap();

        let itinerary = h.session.itinerary().unwrap();
        assert_eq!(itinerary.markdown, "# Goa plan");
        assert_eq!(itinerary.destination, "Goa");
        assert_eq!(itinerary.group_size, 4);
        assert_eq!(itinerary.actual_budget, 32000.0);
        assert!(!itinerary.truncated);
        assert_eq!(h.session.per_person_label().as_deref(), Some("₹8000"));

        assert_eq!(h.search.queries(), vec!["Goa,landmark,landscape".to_string()]);
        assert_eq!(h.session.background().color, "#112233");

        let prompts = h.llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Mumbai to Goa"));
        assert!(prompts[0].contains("Group: 4"));
    }

    #[tokio::test]
    async fn test_truncated_output_is_flagged() {
        use crate::llm::client::mock::MockReply;

        let mut h = harness(MockLlmClient::new(vec![MockReply::Truncated("## Day 1\nBaga".to_string())]));
        h.session.submit(&goa_group()).await.unwrap();

        let itinerary = h.session.itinerary().unwrap();
        assert_eq!(itinerary.markdown, "## Day 1\nBaga");
        assert!(itinerary.truncated);
    }

    #[tokio::test]
    async fn test_generation_failure_stays_collecting() {
        let mut h = harness(MockLlmClient::failing("quota exhausted"));
        let err = h.session.submit(&goa_group()).await.unwrap_err();

        assert!(matches!(err, SubmitError::Generation(_)));
        assert!(err.to_string().starts_with("AI Error: "));
        assert!(err.to_string().contains("quota exhausted"));
        assert_eq!(h.session.phase(), &Phase::Collecting);
        assert_eq!(h.session.per_person(), None);
        assert!(h.search.queries().is_empty());
    }

    #[tokio::test]
    async fn test_reset_from_presenting() {
        let mut h = harness(MockLlmClient::replying("# plan"));
        h.session.submit(&goa_group()).await.unwrap();
        h.session.reset().await;

        assert_eq!(h.session.phase(), &Phase::Collecting);
        assert!(h.session.itinerary().is_none());
        assert_eq!(
            h.search.queries().last().map(String::as_str),
            Some("landscape,adventure,travel,mountains")
        );
    }

    #[tokio::test]
    async fn test_reset_from_collecting() {
        let mut h = harness(MockLlmClient::replying("# plan"));
        h.session.reset().await;
        assert_eq!(h.session.phase(), &Phase::Collecting);
        assert_eq!(h.search.queries().len(), 1);
    }

    #[tokio::test]
    async fn test_start_fetches_generic_backdrop() {
        let mut h = harness(MockLlmClient::replying("# plan"));
        assert_eq!(h.session.background(), &Background::new(crate::config::FALLBACK_IMAGE, crate::config::FALLBACK_COLOR));

        h.session.start().await;
        assert_eq!(h.search.queries(), vec!["landscape,adventure,travel,mountains".to_string()]);
        assert_eq!(h.session.background().image_url, "https://img.example/x.jpg");
    }

    #[test]
    fn test_per_person_twelve_thousand_by_four() {
        let itinerary = Itinerary {
            markdown: String::new(),
            destination: "Goa".to_string(),
            actual_budget: 12000.0,
            group_size: 4,
            truncated: false,
        };
        assert_eq!(itinerary.per_person(), 3000);
    }

    #[tokio::test]
    async fn test_solo_custom_budget_is_whole_share() {
        let mut h = harness(MockLlmClient::replying("# plan"));
        let request = TripRequest {
            destination: "Manali".to_string(),
            traveler_type: TravelerType::Solo,
            group_size: 6,
            custom_budget: 15000,
            ..Default::default()
        };
        h.session.submit(&request).await.unwrap();
        assert_eq!(h.session.per_person(), Some(15000));
        assert!(h.llm.prompts()[0].contains("Tier: Dynamic"));
    }

    #[test]
    fn test_prepare_uses_range_year() {
        let request = TripRequest {
            destination: "Jaipur".to_string(),
            window: DateWindow::from_endpoints(
                chrono::NaiveDate::from_ymd_opt(2027, 3, 1),
                chrono::NaiveDate::from_ymd_opt(2027, 3, 3),
            ),
            ..Default::default()
        };
        let prepared = prepare(&PromptLoader::embedded_only(), &request).unwrap();
        assert_eq!(prepared.window.days, 3);
        assert!(prepared.prompt.contains("2027"));
        assert!(prepared.prompt.contains("from 2027-03-01 to 2027-03-03 (3 days)"));
    }

    #[tokio::test]
    async fn test_export_requires_itinerary() {
        let mut h = harness(MockLlmClient::replying("# Day 1\n\nBeach"));
        let dir = TempDir::new().unwrap();

        assert!(matches!(h.session.export_pdf(dir.path()), Err(ExportError::NothingToExport)));

        h.session.submit(&goa_group()).await.unwrap();
        let (path, bytes) = h.session.export_pdf(dir.path()).unwrap();
        assert!(path.ends_with("Goa_Adventure.pdf"));
        assert!(bytes.starts_with(b"%PDF"));
        assert!(h.session.itinerary().is_some());
    }
}
