use crate::dtos::{NumberPreviewRequest, NumberPreviewResponse};
use crate::models::DocumentKind;
use crate::services::{format_document_number, next_counter};
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use validator::Validate;

/// Show the number the next invoice or quotation would receive.
pub async fn preview(
    State(state): State<AppState>,
    Json(payload): Json<NumberPreviewRequest>,
) -> Result<Json<NumberPreviewResponse>, AppError> {
    payload.validate()?;

    let settings = match payload.kind {
        DocumentKind::Invoice => &state.config.invoice_numbering,
        DocumentKind::Quotation => &state.config.quotation_numbering,
    };
    let date = payload
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let number = format_document_number(settings, payload.counter, date)?;

    Ok(Json(NumberPreviewResponse {
        number,
        next_counter: next_counter(payload.counter),
    }))
}
