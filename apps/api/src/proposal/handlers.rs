//! Axum route handlers for the Proposal API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::proposal::generator::compose_context;
use crate::proposal::models::{ProposalRequest, Slide};
use crate::proposal::validation::{validate_proposal_request, MISSING_CONTENT_MESSAGE};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateProposalResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<Slide>,
}

/// POST /api/proposals/generate
///
/// Validates the request, builds the context and returns the normalized deck.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<ProposalRequest>, JsonRejection>,
) -> Result<Json<GenerateProposalResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    validate_proposal_request(&request)?;

    let context = compose_context(
        request.description.as_deref(),
        request.extracted_text.as_deref(),
    )
    .ok_or_else(|| AppError::MissingContent(MISSING_CONTENT_MESSAGE.to_string()))?;

    let slides = state
        .proposals
        .generate(&context, request.customization.as_ref())
        .await?;

    Ok(Json(GenerateProposalResponse {
        success: true,
        message: "Proposal generated successfully".to_string(),
        data: slides,
    }))
}
