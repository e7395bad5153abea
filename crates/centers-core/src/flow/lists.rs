// crates/centers-core/src/flow/lists.rs

//! # Dependent Lists & Stale-Response Guard
//!
//! Each list the drill-down shows (countries, states, districts) and the
//! final center list is fetched on demand. Every fetch is identified by a
//! [`FetchTicket`]: the list it fills plus a generation number. The flow
//! keeps one monotonic counter per list and only applies a result whose
//! ticket is still the latest one issued, so a slow response for an old
//! selection can never overwrite a newer one.

use crate::client::LocationSource;
use crate::error::Result;
use crate::model::{Center, Country, District, State};

/// Which list a fetch fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListTarget {
    Countries,
    States,
    Districts,
    Centers,
}

/// Identifies one issued fetch. Only the most recent ticket per target is
/// honoured when the result comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    target: ListTarget,
    generation: u64,
}

impl FetchTicket {
    pub fn target(&self) -> ListTarget {
        self.target
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Load state of one dependent list.
///
/// `Failed` is kept apart from an empty `Ready` so "the API could not be
/// reached" is never rendered as "there are no districts here".
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    Idle,
    Loading,
    Ready(Vec<T>),
    Failed(String),
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        ListState::Idle
    }
}

impl<T> ListState<T> {
    /// Loaded items; empty unless `Ready`.
    pub fn items(&self) -> &[T] {
        match self {
            ListState::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ListState::Idle)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ListState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Per-target generation counters.
#[derive(Debug, Clone, Default)]
pub(crate) struct Generations {
    countries: u64,
    states: u64,
    districts: u64,
    centers: u64,
}

impl Generations {
    fn slot(&mut self, target: ListTarget) -> &mut u64 {
        match target {
            ListTarget::Countries => &mut self.countries,
            ListTarget::States => &mut self.states,
            ListTarget::Districts => &mut self.districts,
            ListTarget::Centers => &mut self.centers,
        }
    }

    fn current(&self, target: ListTarget) -> u64 {
        match target {
            ListTarget::Countries => self.countries,
            ListTarget::States => self.states,
            ListTarget::Districts => self.districts,
            ListTarget::Centers => self.centers,
        }
    }

    pub(crate) fn issue(&mut self, target: ListTarget) -> FetchTicket {
        let slot = self.slot(target);
        *slot += 1;
        FetchTicket {
            target,
            generation: *slot,
        }
    }

    /// Makes every outstanding ticket for `target` stale.
    pub(crate) fn invalidate(&mut self, target: ListTarget) {
        *self.slot(target) += 1;
    }

    pub(crate) fn is_current(&self, ticket: FetchTicket) -> bool {
        self.current(ticket.target) == ticket.generation
    }
}

/// The parameters of one fetch, owned so it can run anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchQuery {
    Countries,
    States {
        country: String,
    },
    Districts {
        country: String,
        state: String,
    },
    Centers {
        country: String,
        state: String,
        district: String,
    },
}

impl FetchQuery {
    pub fn target(&self) -> ListTarget {
        match self {
            FetchQuery::Countries => ListTarget::Countries,
            FetchQuery::States { .. } => ListTarget::States,
            FetchQuery::Districts { .. } => ListTarget::Districts,
            FetchQuery::Centers { .. } => ListTarget::Centers,
        }
    }

    pub fn run<S: LocationSource + ?Sized>(&self, source: &S) -> FetchOutcome {
        match self {
            FetchQuery::Countries => FetchOutcome::Countries(source.list_countries()),
            FetchQuery::States { country } => FetchOutcome::States(source.list_states(country)),
            FetchQuery::Districts { country, state } => {
                FetchOutcome::Districts(source.list_districts(country, state))
            }
            FetchQuery::Centers {
                country,
                state,
                district,
            } => FetchOutcome::Centers(source.list_centers_in_district(country, state, district)),
        }
    }
}

/// A fetch handed out by the flow: run `query`, then give the outcome back
/// together with `ticket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub query: FetchQuery,
}

impl FetchRequest {
    pub fn execute<S: LocationSource + ?Sized>(&self, source: &S) -> FetchOutcome {
        self.query.run(source)
    }
}

/// Result of running a [`FetchQuery`].
#[derive(Debug)]
pub enum FetchOutcome {
    Countries(Result<Vec<Country>>),
    States(Result<Vec<State>>),
    Districts(Result<Vec<District>>),
    Centers(Result<Vec<Center>>),
}

impl FetchOutcome {
    pub fn target(&self) -> ListTarget {
        match self {
            FetchOutcome::Countries(_) => ListTarget::Countries,
            FetchOutcome::States(_) => ListTarget::States,
            FetchOutcome::Districts(_) => ListTarget::Districts,
            FetchOutcome::Centers(_) => ListTarget::Centers,
        }
    }
}
