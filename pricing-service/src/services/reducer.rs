//! Document reducer: `(document, action) -> document'`.
//!
//! Editing pages keep the document as an immutable value and replace it with
//! the reducer's output after every edit, then recompute totals from scratch.

use crate::error::PricingError;
use crate::models::coerce::{clamp_percent, Coercer};
use crate::models::{
    default_line_item_rate, Discount, Document, GstRate, LineItem, LineItemInput,
    RoundingPolicy, TaxMode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A line item being added, whose tax rate may come from the catalog default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemDraft {
    pub item: LineItem,
    /// `false` when the user left the tax rate unset.
    pub tax_rate_set: bool,
}

impl LineItemDraft {
    /// Draft from a posted line, leaving the tax rate to the catalog when blank.
    pub fn from_input(input: &LineItemInput, coercer: &mut Coercer) -> Self {
        Self {
            item: input.coerce(coercer),
            tax_rate_set: input.has_tax_rate(),
        }
    }
}

impl From<LineItem> for LineItemDraft {
    fn from(item: LineItem) -> Self {
        Self {
            item,
            tax_rate_set: true,
        }
    }
}

/// An edit applied to a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentAction {
    AddLineItem { draft: LineItemDraft },
    UpdateLineItem { index: usize, item: LineItem },
    RemoveLineItem { index: usize },
    ClearLineItems,
    SetOverallDiscount { discount: Discount },
    SetSupplierState { state: String },
    SetCustomerState { state: String },
    SetTaxMode { tax_mode: TaxMode },
    SetAmountPaid { amount: Decimal },
    SetRoundingPolicy { rounding: RoundingPolicy },
}

fn check_index(document: &Document, index: usize) -> Result<(), PricingError> {
    if index < document.line_items.len() {
        Ok(())
    } else {
        Err(PricingError::LineIndexOutOfRange {
            index,
            len: document.line_items.len(),
        })
    }
}

/// Apply `action` to `document`, returning the edited copy.
///
/// `rates` is the GST catalog used to default the tax rate of new lines.
pub fn reduce(
    document: &Document,
    action: DocumentAction,
    rates: &[GstRate],
) -> Result<Document, PricingError> {
    let mut next = document.clone();

    match action {
        DocumentAction::AddLineItem { draft } => {
            let mut item = draft.item;
            if !draft.tax_rate_set {
                item.tax_rate_percent =
                    clamp_percent(default_line_item_rate(rates).unwrap_or(Decimal::ZERO));
            }
            next.line_items.push(item);
        }
        DocumentAction::UpdateLineItem { index, item } => {
            check_index(document, index)?;
            next.line_items[index] = item;
        }
        DocumentAction::RemoveLineItem { index } => {
            check_index(document, index)?;
            next.line_items.remove(index);
        }
        DocumentAction::ClearLineItems => next.line_items.clear(),
        DocumentAction::SetOverallDiscount { discount } => next.overall_discount = discount,
        DocumentAction::SetSupplierState { state } => next.supplier_state = state,
        DocumentAction::SetCustomerState { state } => next.customer_state = state,
        DocumentAction::SetTaxMode { tax_mode } => next.tax_mode = tax_mode,
        DocumentAction::SetAmountPaid { amount } => {
            next.amount_paid = if next.kind.accepts_payment() {
                amount
            } else {
                Decimal::ZERO
            };
        }
        DocumentAction::SetRoundingPolicy { rounding } => next.rounding = rounding,
    }

    Ok(next)
}

/// Fold a sequence of actions over `document`, stopping at the first failure.
pub fn reduce_all(
    document: &Document,
    actions: impl IntoIterator<Item = DocumentAction>,
    rates: &[GstRate],
) -> Result<Document, PricingError> {
    actions
        .into_iter()
        .try_fold(document.clone(), |doc, action| reduce(&doc, action, rates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentKind;
    use crate::services::totals::compute_totals;
    use rust_decimal_macros::dec;

    fn catalog() -> Vec<GstRate> {
        vec![
            GstRate {
                id: "r5".to_string(),
                tax_name: "GST 5%".to_string(),
                tax_rate: dec!(5),
                is_default_line_item_tax: false,
            },
            GstRate {
                id: "r18".to_string(),
                tax_name: "GST 18%".to_string(),
                tax_rate: dec!(18),
                is_default_line_item_tax: true,
            },
        ]
    }

    fn widget() -> LineItem {
        LineItem::new("Widget", dec!(1), dec!(100))
    }

    #[test]
    fn add_uses_catalog_default_when_rate_unset() {
        let doc = Document::new(DocumentKind::Invoice);
        let action = DocumentAction::AddLineItem {
            draft: LineItemDraft {
                item: widget(),
                tax_rate_set: false,
            },
        };

        let next = reduce(&doc, action, &catalog()).unwrap();
        assert_eq!(next.line_items[0].tax_rate_percent, dec!(18));
    }

    #[test]
    fn catalog_default_is_clamped_like_posted_rates() {
        let mut rates = catalog();
        rates[1].tax_rate = dec!(180);
        let action = DocumentAction::AddLineItem {
            draft: LineItemDraft {
                item: widget(),
                tax_rate_set: false,
            },
        };

        let next = reduce(&Document::new(DocumentKind::Invoice), action, &rates).unwrap();
        assert_eq!(next.line_items[0].tax_rate_percent, dec!(100));
    }

    #[test]
    fn add_keeps_explicit_rate() {
        let doc = Document::new(DocumentKind::Invoice);
        let action = DocumentAction::AddLineItem {
            draft: widget().with_tax_rate(dec!(5)).into(),
        };
        let next = reduce(&doc, action, &catalog()).unwrap();
        assert_eq!(next.line_items[0].tax_rate_percent, dec!(5));
    }

    #[test]
    fn posted_line_without_rate_takes_catalog_default() {
        let input: LineItemInput =
            serde_json::from_str(r#"{"itemName": "Nut", "quantity": 4, "rate": "2.5", "taxRate": ""}"#)
                .unwrap();
        let mut coercer = Coercer::new();
        let draft = LineItemDraft::from_input(&input, &mut coercer);
        assert!(!draft.tax_rate_set);
        assert!(coercer.into_warnings().is_empty());

        let next = reduce(
            &Document::new(DocumentKind::Invoice),
            DocumentAction::AddLineItem { draft },
            &catalog(),
        )
        .unwrap();
        assert_eq!(next.line_items[0].tax_rate_percent, dec!(18));
        assert_eq!(next.line_items[0].gross_value(), dec!(10));
    }

    #[test]
    fn input_document_is_untouched() {
        let doc = Document::new(DocumentKind::Invoice).with_line_item(widget());
        let before = doc.clone();

        let next = reduce(&doc, DocumentAction::RemoveLineItem { index: 0 }, &[]).unwrap();

        assert_eq!(doc, before);
        assert!(next.line_items.is_empty());
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let doc = Document::new(DocumentKind::Invoice).with_line_item(widget());

        let err = reduce(&doc, DocumentAction::RemoveLineItem { index: 3 }, &[]).unwrap_err();
        assert_eq!(err, PricingError::LineIndexOutOfRange { index: 3, len: 1 });

        let err = reduce(
            &doc,
            DocumentAction::UpdateLineItem {
                index: 1,
                item: widget(),
            },
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::LineIndexOutOfRange { index: 1, .. }));
    }

    #[test]
    fn quotation_refuses_payment() {
        let doc = Document::new(DocumentKind::Quotation);
        let next = reduce(&doc, DocumentAction::SetAmountPaid { amount: dec!(10) }, &[]).unwrap();
        assert_eq!(next.amount_paid, Decimal::ZERO);
    }

    #[test]
    fn edit_session_recomputes_from_scratch() {
        let doc = Document::new(DocumentKind::Invoice);
        let actions = vec![
            DocumentAction::SetSupplierState {
                state: "Kerala".to_string(),
            },
            DocumentAction::SetCustomerState {
                state: "Karnataka".to_string(),
            },
            DocumentAction::AddLineItem {
                draft: widget().with_tax_rate(dec!(18)).into(),
            },
            DocumentAction::AddLineItem {
                draft: LineItem::new("Bolt", dec!(10), dec!(5)).with_tax_rate(dec!(18)).into(),
            },
            DocumentAction::UpdateLineItem {
                index: 1,
                item: LineItem::new("Bolt", dec!(20), dec!(5)).with_tax_rate(dec!(18)),
            },
            DocumentAction::SetOverallDiscount {
                discount: Discount::Percentage(dec!(10)),
            },
            DocumentAction::SetAmountPaid { amount: dec!(100) },
        ];

        let edited = reduce_all(&doc, actions, &catalog()).unwrap();
        let totals = compute_totals(&edited);

        // 200 gross, 20 off, 18% IGST on 180
        assert_eq!(totals.taxable_amount, dec!(180));
        assert_eq!(totals.total_igst, dec!(32.4));
        assert_eq!(totals.grand_total, dec!(212.4));
        assert_eq!(totals.balance_due, dec!(112.4));
    }

    #[test]
    fn reduce_all_stops_at_first_error() {
        let doc = Document::new(DocumentKind::Invoice);
        let actions = vec![
            DocumentAction::ClearLineItems,
            DocumentAction::RemoveLineItem { index: 0 },
            DocumentAction::SetTaxMode {
                tax_mode: TaxMode::NoTax,
            },
        ];
        assert!(reduce_all(&doc, actions, &[]).is_err());
    }

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let action: DocumentAction =
            serde_json::from_str(r#"{"type": "remove_line_item", "index": 2}"#).unwrap();
        assert_eq!(action, DocumentAction::RemoveLineItem { index: 2 });
    }
}
