// crates/opp_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Pure derivations over the catalog: which opportunities are visible and in
//! what order, which slice of them is on the current page, and how each one is
//! drawn on the map. Nothing here fails or panics on any input.

pub mod filter;
pub mod marker_style;
pub mod paginate;
pub mod totals;

pub use filter::{filter_indices, filter_opportunities, matches};
pub use marker_style::{
    branch_marker_style, marker_size, opportunity_marker_style, BranchMarkerStyle,
    OpportunityMarkerStyle, Tone,
};
pub use paginate::{clamp_page, paginate, total_pages, Page, PageCursor};
pub use totals::SelectionTotals;
