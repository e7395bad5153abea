// crates/centers-core/src/handoff.rs

//! # Result Hand-off
//!
//! The terminal step shows a summary of the chosen district and a single
//! confirm action. Confirming loads the district's centers and passes the
//! list, untouched, to whoever displays results. Nothing is stored here.

use crate::client::LocationSource;
use crate::error::TransitionError;
use crate::flow::{Applied, DrillDown};
use crate::model::{Center, Country, District, State};
use serde::Serialize;
use tracing::info;

/// Summary panel for the terminal step, built from records already loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistrictSummary {
    pub country: String,
    pub state: String,
    pub district: String,
    pub district_centers: u32,
    pub state_centers: u32,
    pub country_centers: u32,
}

impl DistrictSummary {
    pub fn from_selection(country: &Country, state: &State, district: &District) -> Self {
        Self {
            country: country.country.clone(),
            state: state.state.clone(),
            district: district.district.clone(),
            district_centers: district.total_centers,
            state_centers: state.total_centers,
            country_centers: country.count,
        }
    }
}

/// Outcome of a confirm action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOff {
    /// The callback received this many centers.
    Delivered { count: usize },
    /// The fetch failed; the flow now carries a notice and stays put.
    Failed,
    /// The selection moved on while the request was out.
    Superseded,
}

/// Confirms the selected district: fetches its centers and forwards them to
/// `on_results`.
///
/// Fails with [`TransitionError`] unless the flow is at the terminal step.
pub fn confirm_district<S, F>(
    flow: &mut DrillDown,
    source: &S,
    on_results: F,
) -> Result<HandOff, TransitionError>
where
    S: LocationSource + ?Sized,
    F: FnOnce(Vec<Center>),
{
    let request = flow.begin_confirm()?;
    let outcome = request.execute(source);
    Ok(match flow.apply(request.ticket, outcome) {
        Applied::Centers(centers) => {
            let count = centers.len();
            info!(count, "handing off district centers");
            on_results(centers);
            HandOff::Delivered { count }
        }
        Applied::Stale => HandOff::Superseded,
        Applied::Failed { .. } | Applied::Listed { .. } => HandOff::Failed,
    })
}
