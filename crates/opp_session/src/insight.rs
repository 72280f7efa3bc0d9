//! crates/opp_session/src/insight.rs
//! The templated narrative shown beside the map.

use opp_algo::SelectionTotals;
use opp_core::Branch;

pub const NATIONAL_VIEW_TITLE: &str = "National View";

pub const EMPTY_INSIGHT: &str =
    "No opportunities match your specific criteria. Consider widening your filters to uncover more possibilities.";

/// `Analysis for {city}` or `Analysis for National View`.
pub fn insight_title(branch: Option<&Branch>) -> String {
    let place = branch.map_or(NATIONAL_VIEW_TITLE, |b| b.city.as_str());
    format!("Analysis for {place}")
}

pub fn insight_text(totals: &SelectionTotals) -> String {
    if totals.count == 0 {
        return EMPTY_INSIGHT.to_string();
    }
    format!(
        "Your selection targets {} sites with ~{} potential clients. Current overall penetration is {}%, indicating significant untapped market potential.",
        totals.count,
        totals.potential_grouped(),
        totals.rate_1dp(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_totals() {
        let t = SelectionTotals { count: 2, total_potential: 1500, total_penetration: 150 };
        let text = insight_text(&t);
        assert!(text.contains("2 sites with ~1,500 potential clients"));
        assert!(text.contains("penetration is 10.0%"));
        assert_eq!(insight_text(&SelectionTotals::default()), EMPTY_INSIGHT);
        assert_eq!(insight_title(None), "Analysis for National View");
    }
}
