use crate::errors::AppError;
use crate::proposal::color::is_valid_color;
use crate::proposal::models::ProposalRequest;

pub const MISSING_CONTENT_MESSAGE: &str =
    "Please provide either a description or upload a document";

/// Boundary checks for a generate request. Runs before any model call.
///
/// FAIL conditions:
/// - neither `description` nor `extractedText` has non-blank text
/// - a customization colour is neither a hex code nor a known CSS name
pub fn validate_proposal_request(request: &ProposalRequest) -> Result<(), AppError> {
    let has_content = [&request.description, &request.extracted_text]
        .into_iter()
        .any(|part| part.as_deref().is_some_and(|t| !t.trim().is_empty()));

    if !has_content {
        return Err(AppError::MissingContent(MISSING_CONTENT_MESSAGE.to_string()));
    }

    if let Some(customization) = &request.customization {
        check_color("Background color", customization.background_color.as_deref())?;
        check_color("Text color", customization.text_color.as_deref())?;
    }

    Ok(())
}

fn check_color(label: &str, color: Option<&str>) -> Result<(), AppError> {
    match color {
        Some(c) if !c.is_empty() && !is_valid_color(c) => Err(AppError::Validation(format!(
            "{label} must be a valid hex color or CSS color name"
        ))),
        _ => Ok(()),
    }
}
