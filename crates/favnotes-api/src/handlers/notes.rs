//! Note handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use favnotes_core::EnrichedNote;

use crate::{ApiError, AppState};

/// List every note with its enrichment, in dataset order.
///
/// GET /api/notes
pub async fn list_notes(
    State(state): State<AppState>,
) -> Result<Json<Vec<EnrichedNote>>, ApiError> {
    let notes = state.with_catalog(|catalog| catalog.list_enriched()).await?;
    debug!(op = "list_enriched", result_count = notes.len(), "Listed notes");
    Ok(Json(notes))
}

/// Fetch one enriched note. The id is matched exactly; only a blank id is
/// rejected.
///
/// GET /api/notes/:id
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EnrichedNote>, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing id".to_string()));
    }

    let note_id = id.clone();
    let note = state
        .with_catalog(move |catalog| catalog.fetch_one(&note_id))
        .await??;
    debug!(op = "fetch_one", note_id = %id, "Fetched note");
    Ok(Json(note))
}
