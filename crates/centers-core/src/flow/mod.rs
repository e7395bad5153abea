// crates/centers-core/src/flow/mod.rs

//! # Drill-Down Flow
//!
//! The four-stage selector (`country → state → district → centers`) and
//! the bookkeeping for the lists each stage fetches.

mod lists;
mod machine;
mod step;

pub use lists::{FetchOutcome, FetchQuery, FetchRequest, FetchTicket, ListState, ListTarget};
pub use machine::{Applied, DrillDown, Notice, CENTERS_FETCH_FAILED};
pub use step::{BackTarget, FlowStep};
