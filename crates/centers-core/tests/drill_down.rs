mod common;

use centers_core::{
    Applied, BackTarget, Country, District, DrillDown, FetchError, FetchOutcome, FlowStep,
    HandOff, ListState, ListTarget, Navigator, State, TransitionError, CENTERS_FETCH_FAILED,
};
use common::{bengaluru_centers, FakeSource};

fn india() -> Country {
    Country::new("India", 120)
}
fn karnataka() -> State {
    State::new("Karnataka", 40)
}
fn bengaluru() -> District {
    District::new("Bengaluru", 12)
}

/// Navigator parked at the terminal step on India / Karnataka / Bengaluru.
fn at_centers() -> Navigator<FakeSource> {
    let mut nav = Navigator::new(FakeSource::new());
    nav.load_countries();
    nav.select_country(india()).unwrap();
    nav.select_state(karnataka()).unwrap();
    nav.select_district(bengaluru()).unwrap();
    nav
}

#[test]
fn forward_steps_advance_one_level_and_fill_selections() {
    let mut flow = DrillDown::new();
    assert_eq!(flow.step(), FlowStep::Country);
    assert!(flow.selections_consistent());

    flow.select_country(india()).unwrap();
    assert_eq!(flow.step(), FlowStep::State);
    assert_eq!(flow.selected_country(), Some(&india()));
    assert!(flow.selections_consistent());

    flow.select_state(karnataka()).unwrap();
    assert_eq!(flow.step(), FlowStep::District);
    assert_eq!(flow.selected_state(), Some(&karnataka()));
    assert!(flow.selections_consistent());

    flow.select_district(bengaluru()).unwrap();
    assert_eq!(flow.step(), FlowStep::Centers);
    assert_eq!(flow.selected_district(), Some(&bengaluru()));
    assert!(flow.selections_consistent());
}

#[test]
fn backward_steps_clear_target_level_and_below() {
    let mut flow = DrillDown::new();
    flow.select_country(india()).unwrap();
    flow.select_state(karnataka()).unwrap();
    flow.select_district(bengaluru()).unwrap();

    flow.back_to_districts().unwrap();
    assert_eq!(flow.step(), FlowStep::District);
    assert_eq!(flow.selected_district(), None);
    assert_eq!(flow.selected_state(), Some(&karnataka()));
    assert!(flow.selections_consistent());

    flow.select_district(bengaluru()).unwrap();
    flow.back_to_states().unwrap();
    assert_eq!(flow.step(), FlowStep::State);
    assert_eq!(flow.selected_country(), Some(&india()));
    assert_eq!(flow.selected_state(), None);
    assert_eq!(flow.selected_district(), None);

    flow.back_to_countries();
    assert_eq!(flow.step(), FlowStep::Country);
    assert_eq!(flow.selected_country(), None);
    assert!(flow.selections_consistent());
}

#[test]
fn all_countries_twice_equals_once() {
    let mut nav = at_centers();
    nav.go_back(BackTarget::Countries).unwrap();
    let once = nav.flow().clone();
    nav.go_back(BackTarget::Countries).unwrap();
    let twice = nav.flow();

    assert_eq!(twice.step(), FlowStep::Country);
    assert_eq!(twice.step(), once.step());
    assert_eq!(twice.selected_country(), once.selected_country());
    assert_eq!(twice.selected_state(), None);
    assert_eq!(twice.selected_district(), None);
    assert_eq!(twice.countries(), once.countries());
}

#[test]
fn progress_depends_only_on_step() {
    let mut a = DrillDown::new();
    let mut b = DrillDown::new();
    assert_eq!(a.progress_percent(), 25);

    a.select_country(india()).unwrap();
    b.select_country(Country::new("Nepal", 8)).unwrap();
    assert_eq!(a.progress_percent(), 50);
    assert_eq!(a.progress_percent(), b.progress_percent());

    a.select_state(karnataka()).unwrap();
    assert_eq!(a.progress_percent(), 75);
    a.select_district(bengaluru()).unwrap();
    assert_eq!(a.progress_percent(), 100);
}

#[test]
fn transitions_from_the_wrong_step_are_rejected_without_change() {
    let mut flow = DrillDown::new();
    let err = flow.select_state(karnataka()).unwrap_err();
    assert_eq!(
        err,
        TransitionError::WrongStep {
            action: "select a state",
            step: FlowStep::Country
        }
    );
    assert!(flow.select_district(bengaluru()).is_err());
    assert!(flow.back_to_states().is_err());
    assert!(flow.back_to_districts().is_err());
    assert!(flow.begin_confirm().is_err());
    assert_eq!(flow.step(), FlowStep::Country);
    assert!(flow.selections_consistent());

    flow.select_country(india()).unwrap();
    assert!(flow.select_country(india()).is_err());
    assert!(flow.back_to_states().is_err());
}

#[test]
fn happy_path_forwards_centers_unchanged() {
    let mut nav = Navigator::new(FakeSource::new());
    nav.load_countries();
    assert_eq!(nav.flow().countries().items()[0], india());

    nav.select_country(india()).unwrap();
    assert_eq!(nav.flow().states().items()[0], karnataka());

    nav.select_state(karnataka()).unwrap();
    assert_eq!(nav.flow().districts().items()[0], bengaluru());

    nav.select_district(bengaluru()).unwrap();
    assert_eq!(nav.flow().step(), FlowStep::Centers);
    // reaching the terminal step does not fetch centers by itself
    assert!(!nav
        .source()
        .calls()
        .iter()
        .any(|c| c.starts_with("centers:")));

    let mut received = Vec::new();
    let outcome = nav.confirm(|centers| received = centers).unwrap();

    assert_eq!(outcome, HandOff::Delivered { count: 12 });
    assert_eq!(received, bengaluru_centers());
    assert_eq!(
        nav.source().calls(),
        vec![
            "countries",
            "states:India",
            "districts:India/Karnataka",
            "centers:India/Karnataka/Bengaluru",
        ]
    );
}

#[test]
fn summary_rolls_up_counts_from_loaded_records() {
    let nav = at_centers();
    let summary = nav.flow().summary().unwrap();
    assert_eq!(summary.district, "Bengaluru");
    assert_eq!(summary.district_centers, 12);
    assert_eq!(summary.state_centers, 40);
    assert_eq!(summary.country_centers, 120);
}

#[test]
fn back_to_states_discards_districts_and_refetches_on_next_state() {
    let mut nav = at_centers();
    nav.back_to_states().unwrap();

    let flow = nav.flow();
    assert_eq!(flow.step(), FlowStep::State);
    assert_eq!(flow.selected_country(), Some(&india()));
    assert_eq!(flow.selected_state(), None);
    assert_eq!(flow.selected_district(), None);
    assert_eq!(flow.districts(), &ListState::Idle);
    // the state list belongs to the unchanged country and is kept
    assert_eq!(flow.states().items().len(), 2);

    nav.select_state(karnataka()).unwrap();
    let district_calls = nav
        .source()
        .calls()
        .iter()
        .filter(|c| c.starts_with("districts:"))
        .count();
    assert_eq!(district_calls, 2);
}

#[test]
fn failed_center_fetch_raises_notice_and_keeps_selection() {
    let mut nav = at_centers();
    nav.source().fail_centers.set(true);

    let mut called = false;
    let outcome = nav.confirm(|_| called = true).unwrap();
    assert_eq!(outcome, HandOff::Failed);
    assert!(!called);

    let flow = nav.flow();
    assert_eq!(flow.step(), FlowStep::Centers);
    assert_eq!(flow.selected_district(), Some(&bengaluru()));
    assert!(!flow.is_confirming());
    let notice = flow.notice().unwrap();
    assert!(notice.message.contains("Error fetching centers"));
    assert_eq!(notice.message, CENTERS_FETCH_FAILED);
    // the fake answers 503
    assert!(notice.retryable);

    // retry succeeds once the backend recovers
    nav.source().fail_centers.set(false);
    let outcome = nav.confirm(|_| {}).unwrap();
    assert_eq!(outcome, HandOff::Delivered { count: 12 });
    assert!(nav.flow().notice().is_none());
}

#[test]
fn list_failure_is_distinct_from_empty_list() {
    let mut nav = Navigator::new(FakeSource::new());
    nav.load_countries();
    nav.source().fail_states.set(true);
    let applied = nav.select_country(india()).unwrap();

    assert_eq!(
        applied,
        Some(Applied::Failed {
            target: ListTarget::States
        })
    );
    assert!(nav.flow().states().error().is_some());

    nav.source().fail_states.set(false);
    nav.retry();
    assert_eq!(nav.flow().states().items().len(), 2);

    // an unknown country legitimately has no states
    nav.back_to_countries();
    nav.select_country(Country::new("Atlantis", 0)).unwrap();
    assert_eq!(nav.flow().states(), &ListState::Ready(vec![]));
    assert_eq!(nav.flow().states().error(), None);
}

#[test]
fn latest_request_wins_regardless_of_completion_order() {
    let mut flow = DrillDown::new();
    flow.select_country(india()).unwrap();

    let first = flow.begin_fetch(ListTarget::States).unwrap();
    let second = flow.begin_fetch(ListTarget::States).unwrap();
    assert!(flow.states().is_loading());

    // newer response lands first
    let applied = flow.apply(
        second.ticket,
        FetchOutcome::States(Ok(vec![State::new("Kerala", 18)])),
    );
    assert_eq!(
        applied,
        Applied::Listed {
            target: ListTarget::States,
            count: 1
        }
    );

    // the older one arrives late and is dropped
    let applied = flow.apply(
        first.ticket,
        FetchOutcome::States(Ok(vec![karnataka(), State::new("Goa", 2)])),
    );
    assert_eq!(applied, Applied::Stale);
    assert_eq!(flow.states().items(), &[State::new("Kerala", 18)]);
}

#[test]
fn response_for_abandoned_parent_is_dropped() {
    let mut flow = DrillDown::new();
    flow.select_country(india()).unwrap();
    flow.select_state(karnataka()).unwrap();
    let pending = flow.begin_fetch(ListTarget::Districts).unwrap();

    // user goes back and picks another state before the response arrives
    flow.back_to_states().unwrap();
    flow.select_state(State::new("Kerala", 18)).unwrap();

    let applied = flow.apply(
        pending.ticket,
        FetchOutcome::Districts(Ok(vec![bengaluru()])),
    );
    assert_eq!(applied, Applied::Stale);
    assert_eq!(flow.districts(), &ListState::Idle);
    assert_eq!(flow.needs_fetch(), Some(ListTarget::Districts));
}

#[test]
fn states_for_previous_country_are_dropped() {
    let mut flow = DrillDown::new();
    flow.select_country(india()).unwrap();
    let pending = flow.begin_fetch(ListTarget::States).unwrap();

    flow.back_to_countries();
    flow.select_country(Country::new("Nepal", 8)).unwrap();

    let applied = flow.apply(
        pending.ticket,
        FetchOutcome::States(Ok(vec![karnataka(), State::new("Kerala", 18)])),
    );
    assert_eq!(applied, Applied::Stale);
    assert_eq!(flow.states(), &ListState::Idle);
    assert_eq!(flow.needs_fetch(), Some(ListTarget::States));
}

#[test]
fn late_center_list_after_navigating_away_is_not_handed_off() {
    let mut flow = DrillDown::new();
    flow.select_country(india()).unwrap();
    flow.select_state(karnataka()).unwrap();
    flow.select_district(bengaluru()).unwrap();
    let pending = flow.begin_confirm().unwrap();
    assert!(flow.is_confirming());

    flow.back_to_districts().unwrap();
    assert!(!flow.is_confirming());

    let applied = flow.apply(pending.ticket, FetchOutcome::Centers(Ok(bengaluru_centers())));
    assert_eq!(applied, Applied::Stale);
}

#[test]
fn mismatched_outcome_is_ignored() {
    let mut flow = DrillDown::new();
    let pending = flow.begin_fetch(ListTarget::Countries).unwrap();
    let applied = flow.apply(
        pending.ticket,
        FetchOutcome::States(Err(FetchError::Api {
            message: "wrong list".into(),
        })),
    );
    assert_eq!(applied, Applied::Stale);
    assert!(flow.countries().is_loading());
}

#[test]
fn begin_fetch_needs_parent_selection() {
    let mut flow = DrillDown::new();
    assert!(flow.begin_fetch(ListTarget::States).is_none());
    assert!(flow.begin_fetch(ListTarget::Districts).is_none());
    assert!(flow.begin_fetch(ListTarget::Centers).is_none());
}

#[test]
fn reset_forgets_country_list_too() {
    let (_, mut flow) = at_centers().into_parts();
    flow.reset();
    assert_eq!(flow.step(), FlowStep::Country);
    assert_eq!(flow.countries(), &ListState::Idle);
    assert_eq!(flow.needs_fetch(), Some(ListTarget::Countries));
}

#[test]
fn flow_state_can_move_across_threads() {
    fn assert_send<T: Send>() {}
    assert_send::<DrillDown>();
    assert_send::<FetchOutcome>();
}
