//! Totals engine.
//!
//! Turns a [`Document`] into a [`CalculatedDocument`]: line discounts, the
//! overall discount prorated across lines, the CGST/SGST or IGST split, cess,
//! and the document totals. The computation is pure and never fails.

use crate::models::{
    round_currency, CalculatedDocument, CalculatedLine, Document, LineItem, RoundingPolicy,
    SupplyType, TaxMode, CURRENCY_SCALE,
};
use rust_decimal::Decimal;
use tracing::debug;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const TWO: Decimal = Decimal::TWO;

/// Applies the document's rounding policy to intermediate figures.
#[derive(Clone, Copy)]
struct Rounder(RoundingPolicy);

impl Rounder {
    fn fix(self, value: Decimal) -> Decimal {
        match self.0 {
            RoundingPolicy::PerDocument => value,
            RoundingPolicy::PerLine => round_currency(value, CURRENCY_SCALE),
        }
    }
}

/// First pass over a line: everything that does not depend on the overall discount.
struct LineDraft<'a> {
    item: &'a LineItem,
    gross_value: Decimal,
    line_discount: Decimal,
    taxable_before: Decimal,
}

#[derive(Default)]
struct Taxes {
    cgst: Decimal,
    sgst: Decimal,
    igst: Decimal,
}

fn split_tax(
    taxable: Decimal,
    rate_percent: Decimal,
    supply: SupplyType,
    tax_mode: TaxMode,
    round: Rounder,
) -> Taxes {
    if tax_mode == TaxMode::NoTax {
        return Taxes::default();
    }

    match supply {
        SupplyType::IntraState => {
            let half = round.fix(taxable * (rate_percent / TWO) / HUNDRED);
            Taxes {
                cgst: half,
                sgst: half,
                igst: Decimal::ZERO,
            }
        }
        SupplyType::InterState => Taxes {
            igst: round.fix(taxable * rate_percent / HUNDRED),
            ..Taxes::default()
        },
    }
}

/// Share of `overall` borne by a line worth `taxable` out of `sub_total`.
fn prorate(taxable: Decimal, sub_total: Decimal, overall: Decimal) -> Decimal {
    if sub_total.is_zero() {
        return Decimal::ZERO;
    }
    // Multiply first to keep precision; fall back to dividing first near the Decimal limit.
    match taxable.checked_mul(overall) {
        Some(product) => product / sub_total,
        None => taxable / sub_total * overall,
    }
}

/// Compute the full pricing breakdown of `document`.
pub fn compute_totals(document: &Document) -> CalculatedDocument {
    // Typed documents skip coercion, so hold them to the same limits here.
    let document = &document.bounded();
    let round = Rounder(document.rounding);
    let supply = SupplyType::between(&document.supplier_state, &document.customer_state);

    let mut sub_total = Decimal::ZERO;
    let mut total_line_discount = Decimal::ZERO;

    let drafts: Vec<LineDraft<'_>> = document
        .line_items
        .iter()
        .map(|item| {
            let gross_value = round.fix(item.gross_value());
            let line_discount = round.fix(item.discount.amount_on(gross_value));
            sub_total += gross_value;
            total_line_discount += line_discount;
            LineDraft {
                item,
                gross_value,
                line_discount,
                taxable_before: gross_value - line_discount,
            }
        })
        .collect();

    let sub_total_after_line_discounts = sub_total - total_line_discount;
    let overall_discount_amount = round.fix(
        document
            .overall_discount
            .amount_on(sub_total_after_line_discounts),
    );

    let mut total_cgst = Decimal::ZERO;
    let mut total_sgst = Decimal::ZERO;
    let mut total_igst = Decimal::ZERO;
    let mut total_cess = Decimal::ZERO;

    let lines: Vec<CalculatedLine> = drafts
        .into_iter()
        .map(|draft| {
            let item = draft.item;
            let prorated_discount = round.fix(prorate(
                draft.taxable_before,
                sub_total_after_line_discounts,
                overall_discount_amount,
            ));
            let taxable_value = draft.taxable_before - prorated_discount;

            let taxes = split_tax(
                taxable_value,
                item.tax_rate_percent,
                supply,
                document.tax_mode,
                round,
            );

            let ad_valorem_cess = taxable_value * item.cess_rate_percent / HUNDRED;
            let specific_cess = item.cess_fixed_per_unit * item.quantity;
            let cess = round.fix(ad_valorem_cess + specific_cess);

            let amount = taxable_value + taxes.cgst + taxes.sgst + taxes.igst + cess;

            total_cgst += taxes.cgst;
            total_sgst += taxes.sgst;
            total_igst += taxes.igst;
            total_cess += cess;

            CalculatedLine {
                description: item.description.clone(),
                quantity: item.quantity,
                rate: item.rate,
                gross_value: draft.gross_value,
                line_discount: draft.line_discount,
                taxable_before_overall_discount: draft.taxable_before,
                prorated_discount,
                taxable_value,
                tax_rate_percent: item.tax_rate_percent,
                cgst: taxes.cgst,
                sgst: taxes.sgst,
                igst: taxes.igst,
                cess,
                amount,
            }
        })
        .collect();

    let total_tax = total_cgst + total_sgst + total_igst;
    let taxable_amount = sub_total_after_line_discounts - overall_discount_amount;
    let grand_total = taxable_amount + total_tax + total_cess;
    let amount_paid = document.effective_amount_paid();

    debug!(
        kind = document.kind.as_str(),
        lines = lines.len(),
        supply = ?supply,
        grand_total = %grand_total,
        "Computed document totals"
    );

    CalculatedDocument {
        kind: document.kind,
        supply_type: supply,
        tax_mode: document.tax_mode,
        lines,
        sub_total,
        total_line_discount,
        sub_total_after_line_discounts,
        overall_discount_amount,
        taxable_amount,
        total_cgst,
        total_sgst,
        total_igst,
        total_tax,
        total_cess,
        total_discount: total_line_discount + overall_discount_amount,
        grand_total,
        amount_paid,
        balance_due: grand_total - amount_paid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Discount, DocumentKind};
    use rust_decimal_macros::dec;

    fn invoice() -> Document {
        Document::new(DocumentKind::Invoice).with_states("Kerala", "Kerala")
    }

    fn item(quantity: Decimal, rate: Decimal) -> LineItem {
        LineItem::new("Item", quantity, rate)
    }

    fn display(doc: &Document) -> CalculatedDocument {
        compute_totals(doc).rounded(CURRENCY_SCALE)
    }

    #[test]
    fn plain_line_totals_to_gross() {
        let doc = invoice().with_line_item(item(dec!(2), dec!(100)));
        let totals = display(&doc);
        assert_eq!(totals.grand_total, dec!(200.00));
        assert_eq!(totals.sub_total, dec!(200));
        assert_eq!(totals.total_tax, Decimal::ZERO);
        assert_eq!(totals.balance_due, dec!(200));
    }

    #[test]
    fn percentage_and_fixed_line_discounts_agree() {
        let pct = invoice().with_line_item(
            item(dec!(1), dec!(100)).with_discount(Discount::Percentage(dec!(10))),
        );
        let fixed = invoice()
            .with_line_item(item(dec!(1), dec!(100)).with_discount(Discount::Fixed(dec!(10))));

        let a = display(&pct);
        let b = display(&fixed);
        assert_eq!(a.lines[0].line_discount, dec!(10.00));
        assert_eq!(a.lines[0].line_discount, b.lines[0].line_discount);
        assert_eq!(a.grand_total, b.grand_total);
    }

    #[test]
    fn intra_state_splits_into_cgst_and_sgst() {
        let doc = invoice().with_line_item(item(dec!(1), dec!(100)).with_tax_rate(dec!(18)));
        let totals = display(&doc);
        let line = &totals.lines[0];
        assert_eq!(totals.supply_type, SupplyType::IntraState);
        assert_eq!(line.cgst, dec!(9.00));
        assert_eq!(line.sgst, dec!(9.00));
        assert_eq!(line.igst, Decimal::ZERO);
        assert_eq!(totals.total_tax, dec!(18.00));
        assert_eq!(totals.grand_total, dec!(118.00));
    }

    #[test]
    fn inter_state_levies_igst() {
        let doc = Document::new(DocumentKind::Invoice)
            .with_states("Kerala", "Tamil Nadu")
            .with_line_item(item(dec!(1), dec!(100)).with_tax_rate(dec!(18)));
        let totals = display(&doc);
        let line = &totals.lines[0];
        assert_eq!(totals.supply_type, SupplyType::InterState);
        assert_eq!(line.igst, dec!(18.00));
        assert_eq!(line.cgst, Decimal::ZERO);
        assert_eq!(line.sgst, Decimal::ZERO);
    }

    #[test]
    fn missing_customer_state_is_intra_state() {
        let doc = Document::new(DocumentKind::Invoice)
            .with_states("Kerala", "  ")
            .with_line_item(item(dec!(1), dec!(100)).with_tax_rate(dec!(12)));
        let totals = display(&doc);
        assert_eq!(totals.lines[0].cgst, dec!(6));
        assert_eq!(totals.lines[0].igst, Decimal::ZERO);
    }

    #[test]
    fn state_comparison_ignores_case_and_whitespace() {
        let doc = Document::new(DocumentKind::Invoice)
            .with_states(" KERALA", "kerala ")
            .with_line_item(item(dec!(1), dec!(100)).with_tax_rate(dec!(18)));
        assert_eq!(compute_totals(&doc).supply_type, SupplyType::IntraState);
    }

    #[test]
    fn overall_discount_prorates_by_share() {
        let doc = invoice()
            .with_line_item(item(dec!(1), dec!(100)))
            .with_line_item(item(dec!(2), dec!(50)))
            .with_overall_discount(Discount::Fixed(dec!(20)));
        let totals = compute_totals(&doc);

        assert_eq!(totals.lines[0].prorated_discount, dec!(10));
        assert_eq!(totals.lines[1].prorated_discount, dec!(10));

        let taxable_sum: Decimal = totals.lines.iter().map(|l| l.taxable_value).sum();
        assert_eq!(
            taxable_sum,
            totals.sub_total_after_line_discounts - dec!(20)
        );
        assert_eq!(totals.taxable_amount, dec!(180));
        assert_eq!(totals.total_discount, dec!(20));
    }

    #[test]
    fn uneven_proration_keeps_full_precision() {
        let doc = invoice()
            .with_line_item(item(dec!(1), dec!(100)))
            .with_line_item(item(dec!(1), dec!(100)))
            .with_line_item(item(dec!(1), dec!(100)))
            .with_overall_discount(Discount::Fixed(dec!(10)));
        let totals = compute_totals(&doc);

        let prorated: Decimal = totals.lines.iter().map(|l| l.prorated_discount).sum();
        assert_eq!(round_currency(prorated, 4), dec!(10));
        assert_eq!(totals.taxable_amount, dec!(290));
    }

    #[test]
    fn overall_percentage_applies_after_line_discounts() {
        let doc = invoice()
            .with_line_item(item(dec!(1), dec!(200)).with_discount(Discount::Fixed(dec!(100))))
            .with_overall_discount(Discount::Percentage(dec!(10)));
        let totals = compute_totals(&doc);
        assert_eq!(totals.sub_total_after_line_discounts, dec!(100));
        assert_eq!(totals.overall_discount_amount, dec!(10));
        assert_eq!(totals.total_discount, dec!(110));
        assert_eq!(totals.grand_total, dec!(90));
    }

    #[test]
    fn no_tax_mode_zeroes_gst() {
        let doc = Document::new(DocumentKind::Invoice)
            .with_states("Kerala", "Tamil Nadu")
            .with_tax_mode(TaxMode::NoTax)
            .with_line_item(item(dec!(1), dec!(100)).with_tax_rate(dec!(18)))
            .with_line_item(item(dec!(3), dec!(10)).with_tax_rate(dec!(28)));
        let totals = compute_totals(&doc);
        for line in &totals.lines {
            assert_eq!(line.cgst, Decimal::ZERO);
            assert_eq!(line.sgst, Decimal::ZERO);
            assert_eq!(line.igst, Decimal::ZERO);
        }
        assert_eq!(totals.total_tax, Decimal::ZERO);
        assert_eq!(totals.grand_total, dec!(130));
    }

    #[test]
    fn cess_combines_ad_valorem_and_specific() {
        let doc = invoice().with_line_item(
            item(dec!(4), dec!(25))
                .with_tax_rate(dec!(28))
                .with_cess(dec!(12), dec!(1.5)),
        );
        let totals = compute_totals(&doc);
        let line = &totals.lines[0];
        // 12% of 100 plus 1.5 per unit on 4 units
        assert_eq!(line.cess, dec!(18));
        assert_eq!(line.amount, dec!(146));
        assert_eq!(totals.total_cess, dec!(18));
        assert_eq!(totals.grand_total, dec!(146));
    }

    #[test]
    fn cess_is_levied_without_gst() {
        let doc = invoice()
            .with_tax_mode(TaxMode::NoTax)
            .with_line_item(item(dec!(1), dec!(100)).with_cess(dec!(5), Decimal::ZERO));
        assert_eq!(compute_totals(&doc).total_cess, dec!(5));
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let doc = invoice()
            .with_line_item(
                item(dec!(3), dec!(33.33))
                    .with_discount(Discount::Percentage(dec!(7)))
                    .with_tax_rate(dec!(18)),
            )
            .with_line_item(item(dec!(1), dec!(0.07)).with_tax_rate(dec!(5)))
            .with_overall_discount(Discount::Percentage(dec!(3)));
        assert_eq!(compute_totals(&doc), compute_totals(&doc));
    }

    #[test]
    fn zero_subtotal_does_not_divide() {
        let doc = invoice()
            .with_line_item(item(dec!(0), dec!(100)))
            .with_line_item(item(dec!(1), dec!(50)).with_discount(Discount::Fixed(dec!(50))))
            .with_overall_discount(Discount::Fixed(dec!(20)));
        let totals = compute_totals(&doc);
        assert_eq!(totals.sub_total_after_line_discounts, Decimal::ZERO);
        for line in &totals.lines {
            assert_eq!(line.prorated_discount, Decimal::ZERO);
        }
        assert_eq!(totals.grand_total, dec!(-20));
    }

    #[test]
    fn empty_document_is_all_zero() {
        let totals = compute_totals(&invoice());
        assert!(totals.lines.is_empty());
        assert_eq!(totals.grand_total, Decimal::ZERO);
        assert_eq!(totals.balance_due, Decimal::ZERO);
    }

    #[test]
    fn balance_due_subtracts_payment_on_invoices_only() {
        let line = item(dec!(1), dec!(500));
        let inv = invoice()
            .with_line_item(line.clone())
            .with_amount_paid(dec!(200));
        assert_eq!(compute_totals(&inv).balance_due, dec!(300));

        let quote = Document::new(DocumentKind::Quotation)
            .with_line_item(line)
            .with_amount_paid(dec!(200));
        let totals = compute_totals(&quote);
        assert_eq!(totals.amount_paid, Decimal::ZERO);
        assert_eq!(totals.balance_due, dec!(500));
    }

    #[test]
    fn per_line_rounding_can_differ_from_per_document() {
        // Each line carries 0.045 of CGST: per-line rounding lifts every one to 0.05.
        let build = |rounding| {
            let mut doc = invoice().with_rounding(rounding);
            for _ in 0..3 {
                doc = doc.with_line_item(item(dec!(1), dec!(1)).with_tax_rate(dec!(9)));
            }
            doc
        };

        let per_doc = compute_totals(&build(RoundingPolicy::PerDocument));
        let per_line = compute_totals(&build(RoundingPolicy::PerLine));

        assert_eq!(per_doc.total_cgst, dec!(0.135));
        assert_eq!(round_currency(per_doc.total_cgst, 2), dec!(0.14));
        assert_eq!(per_line.total_cgst, dec!(0.15));
        assert_eq!(per_line.lines[0].cgst, dec!(0.05));
    }

    #[test]
    fn per_line_rounding_rounds_gross() {
        let doc = invoice()
            .with_rounding(RoundingPolicy::PerLine)
            .with_line_item(item(dec!(1.5), dec!(0.33)));
        assert_eq!(compute_totals(&doc).sub_total, dec!(0.50));
    }

    #[test]
    fn oversized_typed_values_do_not_overflow() {
        let doc = invoice()
            .with_overall_discount(Discount::Fixed(Decimal::MAX))
            .with_amount_paid(Decimal::MAX)
            .with_line_item(
                LineItem::new("huge", Decimal::MAX, dec!(2))
                    .with_tax_rate(dec!(500))
                    .with_cess(dec!(18), Decimal::MAX),
            )
            .with_line_item(item(dec!(1), dec!(100)).with_tax_rate(dec!(250)));

        let totals = compute_totals(&doc);

        // Out-of-range amounts count as 0, rates clamp to 100%.
        assert_eq!(totals.sub_total, dec!(100));
        assert_eq!(totals.overall_discount_amount, Decimal::ZERO);
        assert_eq!(totals.total_cgst, dec!(50));
        assert_eq!(totals.total_sgst, dec!(50));
        assert_eq!(totals.grand_total, dec!(200));
        assert_eq!(totals.balance_due, dec!(200));
    }
}
