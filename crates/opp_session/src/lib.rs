//! opp_session: the single owner of dashboard state.
//!
//! `DashboardSession` holds the filter criteria, the ranked subset derived
//! from them, the page cursor, the opportunity selection and the debounced
//! insight. Every mutation goes through a named setter that swaps in a whole
//! new criteria value; readers only see derived values. Map wiring lives here
//! too, so a host needs one object to drive the dashboard.

#![forbid(unsafe_code)]

pub mod debounce;
pub mod insight;
pub mod session;

pub use debounce::{Clock, Debouncer, ManualClock, SystemClock, TimerHandle};
pub use insight::{insight_text, insight_title, EMPTY_INSIGHT};
pub use session::DashboardSession;
