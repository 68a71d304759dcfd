//! Invoice/quotation document model for pricing-service.

use crate::models::coerce::{bound_amount, Coercer, InputWarning, RawNumber};
use crate::models::{Discount, LineItem, LineItemInput};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Kind of document being priced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    #[default]
    Invoice,
    Quotation,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Quotation => "quotation",
        }
    }

    /// Quotations are never paid against.
    pub fn accepts_payment(&self) -> bool {
        matches!(self, DocumentKind::Invoice)
    }
}

/// Whether GST is computed at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    NoTax,
    #[default]
    Breakdown,
}

/// Where currency figures are rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Full precision throughout; round only for display.
    #[default]
    PerDocument,
    /// Round every line figure to 2 dp before aggregating.
    PerLine,
}

/// An invoice or quotation being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub kind: DocumentKind,
    pub line_items: Vec<LineItem>,
    pub overall_discount: Discount,
    pub supplier_state: String,
    pub customer_state: String,
    pub tax_mode: TaxMode,
    pub amount_paid: Decimal,
    pub rounding: RoundingPolicy,
}

impl Document {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            line_items: Vec::new(),
            overall_discount: Discount::none(),
            supplier_state: String::new(),
            customer_state: String::new(),
            tax_mode: TaxMode::default(),
            amount_paid: Decimal::ZERO,
            rounding: RoundingPolicy::default(),
        }
    }

    pub fn with_states(mut self, supplier: impl Into<String>, customer: impl Into<String>) -> Self {
        self.supplier_state = supplier.into();
        self.customer_state = customer.into();
        self
    }

    pub fn with_line_item(mut self, item: LineItem) -> Self {
        self.line_items.push(item);
        self
    }

    pub fn with_overall_discount(mut self, discount: Discount) -> Self {
        self.overall_discount = discount;
        self
    }

    pub fn with_tax_mode(mut self, tax_mode: TaxMode) -> Self {
        self.tax_mode = tax_mode;
        self
    }

    pub fn with_amount_paid(mut self, amount_paid: Decimal) -> Self {
        self.amount_paid = amount_paid;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    /// Every line and amount held within the limits coercion applies.
    pub fn bounded(&self) -> Self {
        Self {
            kind: self.kind,
            line_items: self.line_items.iter().map(LineItem::bounded).collect(),
            overall_discount: self.overall_discount.bounded(),
            supplier_state: self.supplier_state.clone(),
            customer_state: self.customer_state.clone(),
            tax_mode: self.tax_mode,
            amount_paid: bound_amount(self.amount_paid),
            rounding: self.rounding,
        }
    }

    /// Amount paid as the engine sees it: always zero for quotations.
    pub fn effective_amount_paid(&self) -> Decimal {
        if self.kind.accepts_payment() {
            self.amount_paid
        } else {
            Decimal::ZERO
        }
    }
}

/// Document payload as posted by the invoice and quotation pages.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentInput {
    pub kind: DocumentKind,
    #[validate(length(max = 500))]
    pub line_items: Vec<LineItemInput>,
    pub overall_discount: RawNumber,
    pub supplier_state: Option<String>,
    pub customer_state: Option<String>,
    pub tax_mode: TaxMode,
    pub amount_paid: RawNumber,
    pub rounding: Option<RoundingPolicy>,
}

impl DocumentInput {
    /// Coerce into a typed [`Document`].
    ///
    /// `default_supplier_state` and `default_rounding` fill in fields the page
    /// left out.
    pub fn into_document(
        self,
        default_supplier_state: Option<&str>,
        default_rounding: RoundingPolicy,
    ) -> (Document, Vec<InputWarning>) {
        let mut coercer = Coercer::new();

        let line_items = self
            .line_items
            .iter()
            .enumerate()
            .map(|(index, input)| {
                coercer.at_line(Some(index));
                input.coerce(&mut coercer)
            })
            .collect();

        coercer.at_line(None);
        let overall_discount = coercer.discount("overallDiscount", &self.overall_discount);
        let amount_paid = coercer.amount("amountPaid", &self.amount_paid);

        let supplier_state = self
            .supplier_state
            .or_else(|| default_supplier_state.map(str::to_string))
            .unwrap_or_default();

        let document = Document {
            kind: self.kind,
            line_items,
            overall_discount,
            supplier_state,
            customer_state: self.customer_state.unwrap_or_default(),
            tax_mode: self.tax_mode,
            amount_paid,
            rounding: self.rounding.unwrap_or(default_rounding),
        };

        (document, coercer.into_warnings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn quotation_ignores_amount_paid() {
        let doc = Document::new(DocumentKind::Quotation).with_amount_paid(dec!(50));
        assert_eq!(doc.effective_amount_paid(), Decimal::ZERO);

        let doc = Document::new(DocumentKind::Invoice).with_amount_paid(dec!(50));
        assert_eq!(doc.effective_amount_paid(), dec!(50));
    }

    #[test]
    fn tax_mode_wire_names() {
        let mode: TaxMode = serde_json::from_str("\"no_tax\"").unwrap();
        assert_eq!(mode, TaxMode::NoTax);
        let mode: TaxMode = serde_json::from_str("\"breakdown\"").unwrap();
        assert_eq!(mode, TaxMode::Breakdown);
    }

    #[test]
    fn input_fills_defaults() {
        let input: DocumentInput = serde_json::from_str(
            r#"{
                "kind": "quotation",
                "lineItems": [{"quantity": 1, "rate": "abc"}],
                "overallDiscount": "10%",
                "customerState": "Kerala"
            }"#,
        )
        .unwrap();

        let (doc, warnings) = input.into_document(Some("Kerala"), RoundingPolicy::PerLine);

        assert_eq!(doc.kind, DocumentKind::Quotation);
        assert_eq!(doc.supplier_state, "Kerala");
        assert_eq!(doc.overall_discount, Discount::Percentage(dec!(10)));
        assert_eq!(doc.tax_mode, TaxMode::Breakdown);
        assert_eq!(doc.rounding, RoundingPolicy::PerLine);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, Some(0));
        assert_eq!(warnings[0].field, "rate");
    }

    #[test]
    fn explicit_supplier_state_wins_over_default() {
        let input = DocumentInput {
            supplier_state: Some("Goa".to_string()),
            ..Default::default()
        };
        let (doc, _) = input.into_document(Some("Kerala"), RoundingPolicy::PerDocument);
        assert_eq!(doc.supplier_state, "Goa");
    }
}
