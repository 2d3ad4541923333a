//! Pipeline orchestrator: sequences summarization, suggestion fetching,
//! parsing, and image enrichment for one request, and defines what happens
//! on failure at each stage.
//!
//! The first two stages are gateway-backed and abort the request on
//! failure. Parsing and enrichment only ever degrade locally (dropped
//! paragraph, missing image), so once raw prose is in hand the request
//! always reaches `done`.

pub mod enrich;
pub mod stage;
pub mod suggest;
pub mod summarize;

use std::sync::Arc;

use thiserror::Error;

use crate::gateway::{Gateway, GatewayError};
use crate::parse::parse_suggestions;
use crate::record::MaterialRecordSet;

use self::stage::{Stage, StageTracker};
pub use self::suggest::Mode;

/// Default text-generation model.
pub const DEFAULT_TEXT_MODEL: &str = "gpt-3.5-turbo";

/// Default ceiling on concurrent image requests.
pub const DEFAULT_IMAGE_CONCURRENCY: usize = 4;

/// Per-pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Model used for the summarization and suggestion stages.
    pub text_model: String,
    /// Maximum number of image requests in flight during enrichment.
    pub image_concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_concurrency: DEFAULT_IMAGE_CONCURRENCY,
        }
    }
}

/// A request-level failure, reported verbatim to the invoking collaborator.
///
/// Record-level degradations (malformed paragraphs, missing images) are
/// absorbed inside the pipeline and never surface here.
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    /// Empty or whitespace-only description, rejected before any gateway
    /// call is made.
    #[error("project description must not be empty")]
    EmptyDescription,
    /// The summarizer could not produce a query sentence.
    #[error("summarization failed: {0}")]
    SummarizeFailed(GatewayError),
    /// The suggestion fetch produced no prose to parse.
    #[error("suggestion fetch failed: {0}")]
    FetchFailed(GatewayError),
}

impl RequestError {
    /// The stage the pipeline was in when the request failed.
    /// [`RequestError::EmptyDescription`] is rejected before the machine is
    /// entered, so it reports [`Stage::Idle`].
    pub fn failed_stage(&self) -> Stage {
        match self {
            RequestError::EmptyDescription => Stage::Idle,
            RequestError::SummarizeFailed(_) => Stage::Summarizing,
            RequestError::FetchFailed(_) => Stage::Fetching,
        }
    }
}

/// The outcome of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct ProjectSuggestions {
    /// The one-sentence canonical query, verbatim from the generator.
    pub summary: String,
    /// Parsed and enriched records, in the generator's order.
    pub records: MaterialRecordSet,
}

/// End-to-end suggestion pipeline over a generation gateway.
///
/// Each call to [`Pipeline::submit`] owns its own record set; there is no
/// shared mutable state across concurrent requests.
pub struct Pipeline {
    gateway: Arc<dyn Gateway>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(gateway: Arc<dyn Gateway>, config: PipelineConfig) -> Self {
        Self { gateway, config }
    }

    /// Run the full pipeline for one project description.
    ///
    /// Stages run strictly in order: summarize, fetch, parse, enrich. Only
    /// the enrichment stage fans out internally; see [`enrich`].
    pub async fn submit(
        &self,
        description: &str,
        mode: Mode,
    ) -> Result<ProjectSuggestions, RequestError> {
        // Validation short-circuits before the state machine is entered.
        if description.trim().is_empty() {
            return Err(RequestError::EmptyDescription);
        }

        let mut tracker = StageTracker::new();
        tracing::info!(%mode, "starting suggestion pipeline");

        tracker.advance(Stage::Summarizing);
        let summary =
            summarize::summarize(self.gateway.as_ref(), &self.config.text_model, description)
                .await
                .map_err(|e| {
                    tracker.advance(Stage::Failed);
                    RequestError::SummarizeFailed(e)
                })?;

        tracker.advance(Stage::Fetching);
        let raw = suggest::fetch_suggestions(
            self.gateway.as_ref(),
            &self.config.text_model,
            &summary,
            mode,
        )
        .await
        .map_err(|e| {
            tracker.advance(Stage::Failed);
            RequestError::FetchFailed(e)
        })?;

        // An empty record set is a valid traversal, not a failure.
        tracker.advance(Stage::Parsing);
        let mut records = parse_suggestions(&raw);

        tracker.advance(Stage::Enriching);
        enrich::enrich_images(
            self.gateway.as_ref(),
            &mut records,
            self.config.image_concurrency,
        )
        .await;

        tracker.advance(Stage::Done);
        tracing::info!(
            stage = %tracker.current(),
            records = records.len(),
            images = records.iter().filter(|r| r.image.is_available()).count(),
            "suggestion pipeline complete"
        );

        Ok(ProjectSuggestions { summary, records })
    }
}
