// crates/centers-core/src/navigator.rs
use crate::client::LocationSource;
use crate::error::TransitionError;
use crate::flow::{Applied, BackTarget, DrillDown, FlowStep, ListTarget};
use crate::handoff::{confirm_district, HandOff};
use crate::model::{Center, Country, District, State};

/// Runs a [`DrillDown`] against a [`LocationSource`], synchronously.
///
/// Each transition is followed by the fetch the new step needs, so after
/// any call the visible list is either loaded or failed. Front-ends that
/// fetch on another thread should drive the `DrillDown` ticket API
/// directly instead.
#[derive(Debug)]
pub struct Navigator<S> {
    source: S,
    flow: DrillDown,
}

impl<S: LocationSource> Navigator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            flow: DrillDown::new(),
        }
    }

    pub fn flow(&self) -> &DrillDown {
        &self.flow
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_parts(self) -> (S, DrillDown) {
        (self.source, self.flow)
    }

    /// Loads the country list if it has not been requested yet.
    pub fn load_countries(&mut self) -> Option<Applied> {
        if !self.flow.countries().is_idle() {
            return None;
        }
        self.run(ListTarget::Countries)
    }

    pub fn select_country(
        &mut self,
        country: Country,
    ) -> Result<Option<Applied>, TransitionError> {
        self.flow.select_country(country)?;
        Ok(self.sync())
    }

    pub fn select_state(&mut self, state: State) -> Result<Option<Applied>, TransitionError> {
        self.flow.select_state(state)?;
        Ok(self.sync())
    }

    pub fn select_district(&mut self, district: District) -> Result<(), TransitionError> {
        self.flow.select_district(district)
    }

    pub fn back_to_countries(&mut self) -> Option<Applied> {
        self.flow.back_to_countries();
        self.sync()
    }

    pub fn back_to_states(&mut self) -> Result<Option<Applied>, TransitionError> {
        self.flow.back_to_states()?;
        Ok(self.sync())
    }

    pub fn back_to_districts(&mut self) -> Result<Option<Applied>, TransitionError> {
        self.flow.back_to_districts()?;
        Ok(self.sync())
    }

    pub fn go_back(&mut self, target: BackTarget) -> Result<Option<Applied>, TransitionError> {
        self.flow.go_back(target)?;
        Ok(self.sync())
    }

    /// Re-requests the list of the current step, e.g. after a failure.
    pub fn retry(&mut self) -> Option<Applied> {
        let target = match self.flow.step() {
            FlowStep::Country => ListTarget::Countries,
            FlowStep::State => ListTarget::States,
            FlowStep::District => ListTarget::Districts,
            FlowStep::Centers => return None,
        };
        self.run(target)
    }

    /// Confirms the terminal step; see [`confirm_district`].
    pub fn confirm<F>(&mut self, on_results: F) -> Result<HandOff, TransitionError>
    where
        F: FnOnce(Vec<Center>),
    {
        confirm_district(&mut self.flow, &self.source, on_results)
    }

    pub fn dismiss_notice(&mut self) {
        self.flow.dismiss_notice();
    }

    fn sync(&mut self) -> Option<Applied> {
        let target = self.flow.needs_fetch()?;
        self.run(target)
    }

    fn run(&mut self, target: ListTarget) -> Option<Applied> {
        let request = self.flow.begin_fetch(target)?;
        let outcome = request.execute(&self.source);
        Some(self.flow.apply(request.ticket, outcome))
    }
}
