//! Topic aggregation handler.

use axum::{extract::State, Json};
use tracing::debug;

use favnotes_core::TopicSummary;

use crate::{ApiError, AppState};

/// Ranked frequency tables of primary topics, subtopics, intents and types.
///
/// GET /api/topics
pub async fn get_topics(State(state): State<AppState>) -> Result<Json<TopicSummary>, ApiError> {
    let summary = state
        .with_catalog(|catalog| catalog.aggregate_topics())
        .await?;
    debug!(
        op = "aggregate_topics",
        primary_labels = summary.primary.len(),
        subtopic_labels = summary.subtopics.len(),
        "Aggregated topics"
    );
    Ok(Json(summary))
}
