// crates/centers-core/src/flow/machine.rs
use super::lists::{
    FetchOutcome, FetchQuery, FetchRequest, FetchTicket, Generations, ListState, ListTarget,
};
use super::step::{BackTarget, FlowStep};
use crate::breadcrumb::{self, Crumb};
use crate::error::{FetchError, TransitionError};
use crate::handoff::DistrictSummary;
use crate::model::{Center, Country, District, State};
use tracing::{debug, warn};

/// Text of the notice raised when the final center list cannot be loaded.
pub const CENTERS_FETCH_FAILED: &str = "Error fetching centers. Please try again.";

/// An inline, dismissible message shown above the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    /// Detail of the underlying failure, for logs or an expandable view.
    pub detail: Option<String>,
    /// Retrying the same action later could succeed.
    pub retryable: bool,
}

impl Notice {
    fn centers_failed(error: &FetchError) -> Self {
        Self {
            message: CENTERS_FETCH_FAILED.to_string(),
            detail: Some(error.to_string()),
            retryable: error.is_transient(),
        }
    }
}

/// What happened to a fetch result handed back through [`DrillDown::apply`].
#[derive(Debug, PartialEq)]
pub enum Applied {
    /// A newer fetch was issued or the parent selection changed; ignored.
    Stale,
    /// A list was filled.
    Listed { target: ListTarget, count: usize },
    /// The fetch failed; the list (or notice) now shows the failure.
    Failed { target: ListTarget },
    /// The terminal center list arrived and must be handed off.
    Centers(Vec<Center>),
}

/// The country → state → district → centers selector.
///
/// Transitions are synchronous and never perform I/O. Entering a step with
/// an unloaded list marks it as needed ([`DrillDown::needs_fetch`]); the
/// caller runs the fetch via [`DrillDown::begin_fetch`] and feeds the
/// result back through [`DrillDown::apply`].
///
/// # Example
///
/// ```rust
/// use centers_core::{Country, DrillDown, FlowStep, ListTarget};
///
/// let mut flow = DrillDown::new();
/// assert_eq!(flow.needs_fetch(), Some(ListTarget::Countries));
///
/// flow.select_country(Country::new("India", 120)).unwrap();
/// assert_eq!(flow.step(), FlowStep::State);
/// assert_eq!(flow.progress_percent(), 50);
/// assert_eq!(flow.needs_fetch(), Some(ListTarget::States));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DrillDown {
    step: FlowStep,
    selected_country: Option<Country>,
    selected_state: Option<State>,
    selected_district: Option<District>,

    countries: ListState<Country>,
    states: ListState<State>,
    districts: ListState<District>,

    confirming: bool,
    notice: Option<Notice>,
    generations: Generations,
}

impl DrillDown {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // READ ACCESS
    // -----------------------------------------------------------------------

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn selected_country(&self) -> Option<&Country> {
        self.selected_country.as_ref()
    }

    pub fn selected_state(&self) -> Option<&State> {
        self.selected_state.as_ref()
    }

    pub fn selected_district(&self) -> Option<&District> {
        self.selected_district.as_ref()
    }

    pub fn countries(&self) -> &ListState<Country> {
        &self.countries
    }

    pub fn states(&self) -> &ListState<State> {
        &self.states
    }

    pub fn districts(&self) -> &ListState<District> {
        &self.districts
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// A center-list request is in flight.
    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    pub fn progress_percent(&self) -> u8 {
        breadcrumb::progress_percent(self.step)
    }

    pub fn breadcrumb(&self) -> Vec<Crumb> {
        breadcrumb::breadcrumb(
            self.step,
            self.selected_country.as_ref(),
            self.selected_state.as_ref(),
            self.selected_district.as_ref(),
        )
    }

    /// Summary panel for the terminal step; `None` before it.
    pub fn summary(&self) -> Option<DistrictSummary> {
        if self.step != FlowStep::Centers {
            return None;
        }
        match (
            &self.selected_country,
            &self.selected_state,
            &self.selected_district,
        ) {
            (Some(c), Some(s), Some(d)) => Some(DistrictSummary::from_selection(c, s, d)),
            _ => None,
        }
    }

    /// Every selection above the current step is set, none below it.
    pub fn selections_consistent(&self) -> bool {
        let set = [
            self.selected_country.is_some(),
            self.selected_state.is_some(),
            self.selected_district.is_some(),
        ];
        let depth = self.step.depth();
        set.iter()
            .enumerate()
            .all(|(level, &is_set)| is_set == (level < depth))
    }

    // -----------------------------------------------------------------------
    // FORWARD TRANSITIONS
    // -----------------------------------------------------------------------

    pub fn select_country(&mut self, country: Country) -> Result<(), TransitionError> {
        self.expect_step(FlowStep::Country, "select a country")?;
        debug!(country = %country.country, "country selected");
        self.selected_country = Some(country);
        self.discard_states();
        self.discard_districts();
        self.settle_terminal();
        self.step = FlowStep::State;
        Ok(())
    }

    pub fn select_state(&mut self, state: State) -> Result<(), TransitionError> {
        self.expect_step(FlowStep::State, "select a state")?;
        if self.selected_country.is_none() {
            return Err(self.wrong_step("select a state"));
        }
        debug!(state = %state.state, "state selected");
        self.selected_state = Some(state);
        self.discard_districts();
        self.settle_terminal();
        self.step = FlowStep::District;
        Ok(())
    }

    /// Enters the terminal step. The center list is *not* fetched here; it
    /// waits for an explicit [`DrillDown::begin_confirm`].
    pub fn select_district(&mut self, district: District) -> Result<(), TransitionError> {
        self.expect_step(FlowStep::District, "select a district")?;
        if self.selected_state.is_none() {
            return Err(self.wrong_step("select a district"));
        }
        debug!(district = %district.district, "district selected");
        self.selected_district = Some(district);
        self.settle_terminal();
        self.step = FlowStep::Centers;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // BACKWARD TRANSITIONS
    // -----------------------------------------------------------------------

    /// Always allowed and idempotent: returns to the initial state, keeping
    /// the already loaded country list.
    pub fn back_to_countries(&mut self) {
        self.selected_country = None;
        self.discard_states();
        self.discard_districts();
        self.settle_terminal();
        self.step = FlowStep::Country;
    }

    pub fn back_to_states(&mut self) -> Result<(), TransitionError> {
        if !matches!(self.step, FlowStep::District | FlowStep::Centers) {
            return Err(self.wrong_step("go back to the state list"));
        }
        self.selected_state = None;
        self.discard_districts();
        self.settle_terminal();
        self.step = FlowStep::State;
        Ok(())
    }

    pub fn back_to_districts(&mut self) -> Result<(), TransitionError> {
        self.expect_step(FlowStep::Centers, "go back to the district list")?;
        self.selected_district = None;
        self.settle_terminal();
        self.step = FlowStep::District;
        Ok(())
    }

    /// Dispatches a breadcrumb click.
    pub fn go_back(&mut self, target: BackTarget) -> Result<(), TransitionError> {
        match target {
            BackTarget::Countries => {
                self.back_to_countries();
                Ok(())
            }
            BackTarget::States => self.back_to_states(),
            BackTarget::Districts => self.back_to_districts(),
        }
    }

    /// Resets everything, including the country list.
    pub fn reset(&mut self) {
        self.back_to_countries();
        self.countries = ListState::Idle;
        self.generations.invalidate(ListTarget::Countries);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // -----------------------------------------------------------------------
    // FETCH ORCHESTRATION
    // -----------------------------------------------------------------------

    /// The list the current step shows but has not requested yet.
    pub fn needs_fetch(&self) -> Option<ListTarget> {
        match self.step {
            FlowStep::Country if self.countries.is_idle() => Some(ListTarget::Countries),
            FlowStep::State if self.states.is_idle() => Some(ListTarget::States),
            FlowStep::District if self.districts.is_idle() => Some(ListTarget::Districts),
            _ => None,
        }
    }

    /// Issues a ticket for `target` and marks the list as loading.
    ///
    /// Any earlier ticket for the same target becomes stale. Returns `None`
    /// when the selections the query needs are missing. Centers go through
    /// [`DrillDown::begin_confirm`] instead.
    pub fn begin_fetch(&mut self, target: ListTarget) -> Option<FetchRequest> {
        let query = match target {
            ListTarget::Countries => FetchQuery::Countries,
            ListTarget::States => FetchQuery::States {
                country: self.selected_country.as_ref()?.country.clone(),
            },
            ListTarget::Districts => FetchQuery::Districts {
                country: self.selected_country.as_ref()?.country.clone(),
                state: self.selected_state.as_ref()?.state.clone(),
            },
            ListTarget::Centers => return None,
        };
        let ticket = self.generations.issue(target);
        match target {
            ListTarget::Countries => self.countries = ListState::Loading,
            ListTarget::States => self.states = ListState::Loading,
            ListTarget::Districts => self.districts = ListState::Loading,
            ListTarget::Centers => {}
        }
        debug!(list = ?target, generation = ticket.generation(), "fetch issued");
        Some(FetchRequest { ticket, query })
    }

    /// The explicit confirm action at the terminal step.
    pub fn begin_confirm(&mut self) -> Result<FetchRequest, TransitionError> {
        self.expect_step(FlowStep::Centers, "load the center list")?;
        let (country, state, district) = match (
            &self.selected_country,
            &self.selected_state,
            &self.selected_district,
        ) {
            (Some(c), Some(s), Some(d)) => (c.country.clone(), s.state.clone(), d.district.clone()),
            _ => return Err(self.wrong_step("load the center list")),
        };
        let ticket = self.generations.issue(ListTarget::Centers);
        self.confirming = true;
        self.notice = None;
        debug!(%district, generation = ticket.generation(), "center list requested");
        Ok(FetchRequest {
            ticket,
            query: FetchQuery::Centers {
                country,
                state,
                district,
            },
        })
    }

    /// Applies a fetch result if `ticket` is still the latest for its list.
    pub fn apply(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> Applied {
        if !self.generations.is_current(ticket) || outcome.target() != ticket.target() {
            debug!(
                list = ?ticket.target(),
                generation = ticket.generation(),
                "dropping stale response"
            );
            return Applied::Stale;
        }
        let target = ticket.target();
        match outcome {
            FetchOutcome::Countries(result) => store(&mut self.countries, target, result),
            FetchOutcome::States(result) => store(&mut self.states, target, result),
            FetchOutcome::Districts(result) => store(&mut self.districts, target, result),
            FetchOutcome::Centers(result) => {
                self.confirming = false;
                match result {
                    Ok(centers) => Applied::Centers(centers),
                    Err(e) => {
                        warn!(error = %e, "fetching centers failed");
                        self.notice = Some(Notice::centers_failed(&e));
                        Applied::Failed { target }
                    }
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // INTERNAL HELPERS
    // -----------------------------------------------------------------------

    fn expect_step(&self, step: FlowStep, action: &'static str) -> Result<(), TransitionError> {
        if self.step == step {
            Ok(())
        } else {
            Err(self.wrong_step(action))
        }
    }

    fn wrong_step(&self, action: &'static str) -> TransitionError {
        TransitionError::WrongStep {
            action,
            step: self.step,
        }
    }

    /// Forgets the state selection and the state list (its country changed).
    fn discard_states(&mut self) {
        self.selected_state = None;
        self.states = ListState::Idle;
        self.generations.invalidate(ListTarget::States);
    }

    /// Forgets the district selection and the district list.
    fn discard_districts(&mut self) {
        self.selected_district = None;
        self.districts = ListState::Idle;
        self.generations.invalidate(ListTarget::Districts);
    }

    /// Any step change abandons a pending confirmation and its notice.
    fn settle_terminal(&mut self) {
        self.confirming = false;
        self.notice = None;
        self.generations.invalidate(ListTarget::Centers);
    }
}

fn store<T>(
    slot: &mut ListState<T>,
    target: ListTarget,
    result: crate::error::Result<Vec<T>>,
) -> Applied {
    match result {
        Ok(items) => {
            let count = items.len();
            debug!(list = ?target, count, "list loaded");
            *slot = ListState::Ready(items);
            Applied::Listed { target, count }
        }
        Err(e) => {
            warn!(list = ?target, error = %e, "list fetch failed");
            *slot = ListState::Failed(e.to_string());
            Applied::Failed { target }
        }
    }
}
