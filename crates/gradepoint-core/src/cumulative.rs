//! Cumulative combiner: merges prior totals with the current term.

use rust_decimal::Decimal;

use crate::model::{CumulativeTotals, PriorRecord, PriorSource, TermTotals};

/// Merge a prior record with one term's quality points and credits.
///
/// `explicit_prev_qp`, when present, is used as-is even if it disagrees
/// with `prev_gpa × prev_credits`. Sums and products saturate at the
/// `Decimal` bounds instead of panicking.
pub fn combine_cumulative(
    prev_gpa: Decimal,
    prev_credits: Decimal,
    term_qp: Decimal,
    term_credits: Decimal,
    explicit_prev_qp: Option<Decimal>,
) -> CumulativeTotals {
    let (previous_quality_points, prior_source) = match explicit_prev_qp {
        Some(qp) => (qp, PriorSource::Explicit),
        None => (prev_gpa.saturating_mul(prev_credits), PriorSource::Derived),
    };

    let new_total_credits = prev_credits.saturating_add(term_credits);
    let new_total_quality_points = previous_quality_points.saturating_add(term_qp);
    let cgpa = if new_total_credits > Decimal::ZERO {
        new_total_quality_points
            .checked_div(new_total_credits)
            .unwrap_or(if new_total_quality_points.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
    } else {
        Decimal::ZERO
    };

    CumulativeTotals {
        previous_credits: prev_credits,
        previous_quality_points,
        prior_source,
        new_total_credits,
        new_total_quality_points,
        cgpa,
    }
}

impl PriorRecord {
    /// Combine this prior record with an aggregated term.
    pub fn combine_with(&self, term: &TermTotals) -> CumulativeTotals {
        combine_cumulative(
            self.gpa,
            self.credits,
            term.total_quality_points,
            term.total_credits,
            self.quality_points,
        )
    }
}
