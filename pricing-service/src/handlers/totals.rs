use crate::dtos::{DisplaySummary, TotalsResponse};
use crate::models::DocumentInput;
use crate::services::compute_totals;
use crate::services::metrics::{
    DOCUMENTS_COMPUTED_TOTAL, INPUT_WARNINGS_TOTAL, LINE_ITEMS_PER_DOCUMENT,
};
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use validator::Validate;

/// Price an invoice or quotation as the editing page currently holds it.
pub async fn compute(
    State(state): State<AppState>,
    Json(payload): Json<DocumentInput>,
) -> Result<Json<TotalsResponse>, AppError> {
    payload.validate()?;

    let settings = &state.config.pricing;
    let (document, warnings) = payload.into_document(
        settings.default_supplier_state.as_deref(),
        settings.rounding,
    );

    for warning in &warnings {
        tracing::debug!(
            line = ?warning.line,
            field = warning.field,
            value = %warning.value,
            "{}",
            warning.message
        );
        INPUT_WARNINGS_TOTAL
            .with_label_values(&[warning.field])
            .inc();
    }

    let totals = compute_totals(&document);

    DOCUMENTS_COMPUTED_TOTAL
        .with_label_values(&[document.kind.as_str()])
        .inc();
    LINE_ITEMS_PER_DOCUMENT.observe(document.line_items.len() as f64);

    let currency = &state.config.currency;
    let totals = totals.rounded(currency.decimal_places);
    let display = DisplaySummary::from_totals(&totals, currency);

    tracing::info!(
        kind = document.kind.as_str(),
        lines = document.line_items.len(),
        warnings = warnings.len(),
        grand_total = %totals.grand_total,
        "Document priced"
    );

    Ok(Json(TotalsResponse {
        totals,
        display,
        warnings,
    }))
}
