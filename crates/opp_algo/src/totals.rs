//! Aggregates over a filtered selection, feeding the insight text.

use opp_core::rounding::{group_thousands, percent_1dp, percent_one_decimal_tenths};
use opp_core::Opportunity;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SelectionTotals {
    pub count: usize,
    pub total_potential: u64,
    pub total_penetration: u64,
}

impl SelectionTotals {
    pub fn from_opportunities<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Opportunity>,
    {
        items.into_iter().fold(Self::default(), |acc, o| Self {
            count: acc.count + 1,
            total_potential: acc.total_potential + u64::from(o.max_employees),
            total_penetration: acc.total_penetration + u64::from(o.current_penetration),
        })
    }

    /// Overall penetration in tenths of a percent; 0 when there is no potential.
    pub fn rate_tenths(&self) -> u64 {
        percent_one_decimal_tenths(self.total_penetration, self.total_potential)
    }

    /// `"10.0"` style one-decimal rate.
    pub fn rate_1dp(&self) -> String {
        percent_1dp(self.total_penetration, self.total_potential)
    }

    /// `"1,500"` style potential.
    pub fn potential_grouped(&self) -> String {
        group_thousands(self.total_potential)
    }
}
