// crates/centers-core/src/page.rs

//! # Centers Page
//!
//! The locator page has three ways to produce a result list: a text
//! search, a "near me" search and the drill-down. Only one is active at a
//! time; switching to another source resets the drill-down in the same
//! step, so the page never shows a half-finished selection next to
//! results from somewhere else.

use crate::client::LocationSource;
use crate::error::TransitionError;
use crate::flow::{Applied, DrillDown, FetchOutcome, FetchTicket, ListTarget};
use crate::handoff::HandOff;
use crate::model::Center;
use tracing::{debug, info};

/// Where the result list currently on screen came from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsSource {
    #[default]
    None,
    Search {
        query: String,
    },
    Nearby {
        latitude: f64,
        longitude: f64,
    },
    DrillDown {
        country: String,
        state: String,
        district: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct CentersPage {
    flow: DrillDown,
    source: ResultsSource,
    results: Vec<Center>,
}

impl CentersPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flow(&self) -> &DrillDown {
        &self.flow
    }

    /// Mutable access for driving selections and fetches.
    pub fn flow_mut(&mut self) -> &mut DrillDown {
        &mut self.flow
    }

    pub fn source(&self) -> &ResultsSource {
        &self.source
    }

    pub fn results(&self) -> &[Center] {
        &self.results
    }

    /// Shows results of a text search, abandoning any drill-down progress.
    pub fn show_search_results(&mut self, query: impl Into<String>, results: Vec<Center>) {
        self.activate(
            ResultsSource::Search {
                query: query.into(),
            },
            results,
        );
    }

    /// Shows results of a nearby search, abandoning any drill-down progress.
    pub fn show_nearby_results(&mut self, latitude: f64, longitude: f64, results: Vec<Center>) {
        self.activate(
            ResultsSource::Nearby {
                latitude,
                longitude,
            },
            results,
        );
    }

    /// Confirms the drill-down; on success its centers become the results.
    ///
    /// The drill-down keeps its selection so the user can step back from
    /// the terminal step.
    pub fn confirm_drill_down<S>(&mut self, source: &S) -> Result<HandOff, TransitionError>
    where
        S: LocationSource + ?Sized,
    {
        let request = self.flow.begin_confirm()?;
        let outcome = request.execute(source);
        Ok(match self.apply(request.ticket, outcome) {
            Applied::Listed {
                target: ListTarget::Centers,
                count,
            } => HandOff::Delivered { count },
            Applied::Stale => HandOff::Superseded,
            _ => HandOff::Failed,
        })
    }

    /// Feeds a fetch result issued through [`CentersPage::flow_mut`] back
    /// into the page.
    ///
    /// A current center list becomes the page's results with the
    /// drill-down as source, and is reported as
    /// `Applied::Listed { target: ListTarget::Centers, .. }`; read it back
    /// via [`CentersPage::results`]. Everything else is passed through from
    /// [`DrillDown::apply`].
    pub fn apply(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> Applied {
        match self.flow.apply(ticket, outcome) {
            Applied::Centers(centers) => {
                let count = centers.len();
                if let Some(summary) = self.flow.summary() {
                    self.source = ResultsSource::DrillDown {
                        country: summary.country,
                        state: summary.state,
                        district: summary.district,
                    };
                }
                info!(count, "drill-down results shown");
                self.results = centers;
                Applied::Listed {
                    target: ListTarget::Centers,
                    count,
                }
            }
            other => other,
        }
    }

    /// Clears results and restarts the drill-down.
    pub fn clear(&mut self) {
        self.source = ResultsSource::None;
        self.results.clear();
        self.flow.back_to_countries();
    }

    fn activate(&mut self, source: ResultsSource, results: Vec<Center>) {
        debug!(?source, count = results.len(), "results source switched");
        self.flow.back_to_countries();
        self.source = source;
        self.results = results;
    }
}
