// crates/centers-core/src/flow/step.rs
use std::fmt;

/// The stage of the drill-down. Exactly one is active at a time and the
/// order is strictly `Country → State → District → Centers`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlowStep {
    #[default]
    Country,
    State,
    District,
    Centers,
}

impl FlowStep {
    pub const ALL: [FlowStep; 4] = [
        FlowStep::Country,
        FlowStep::State,
        FlowStep::District,
        FlowStep::Centers,
    ];

    /// Zero-based depth in the hierarchy.
    pub fn depth(self) -> usize {
        match self {
            FlowStep::Country => 0,
            FlowStep::State => 1,
            FlowStep::District => 2,
            FlowStep::Centers => 3,
        }
    }

    /// Visual progress: 25, 50, 75, 100.
    pub fn progress_percent(self) -> u8 {
        (self.depth() as u8 + 1) * 25
    }

    pub fn label(self) -> &'static str {
        match self {
            FlowStep::Country => "country",
            FlowStep::State => "state",
            FlowStep::District => "district",
            FlowStep::Centers => "center list",
        }
    }

    /// The backward jump that leaves this step for the previous one.
    pub fn parent_target(self) -> Option<BackTarget> {
        match self {
            FlowStep::Country => None,
            FlowStep::State => Some(BackTarget::Countries),
            FlowStep::District => Some(BackTarget::States),
            FlowStep::Centers => Some(BackTarget::Districts),
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Destination of a backward navigation (breadcrumb click).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackTarget {
    Countries,
    States,
    Districts,
}

impl BackTarget {
    /// The step the flow lands on after the jump.
    pub fn step(self) -> FlowStep {
        match self {
            BackTarget::Countries => FlowStep::Country,
            BackTarget::States => FlowStep::State,
            BackTarget::Districts => FlowStep::District,
        }
    }
}
