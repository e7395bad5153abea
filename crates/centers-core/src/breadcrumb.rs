// crates/centers-core/src/breadcrumb.rs

//! Progress bar and breadcrumb trail, derived purely from the flow state.

use crate::flow::{BackTarget, FlowStep};
use crate::model::{Country, District, State};
use std::fmt;

pub const ALL_COUNTRIES: &str = "All Countries";

/// One entry of the trail. Crumbs with a `target` are clickable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub target: Option<BackTarget>,
}

impl Crumb {
    fn link(label: &str, target: BackTarget) -> Self {
        Self {
            label: label.to_string(),
            target: Some(target),
        }
    }

    fn text(label: &str) -> Self {
        Self {
            label: label.to_string(),
            target: None,
        }
    }

    pub fn is_link(&self) -> bool {
        self.target.is_some()
    }
}

impl fmt::Display for Crumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_link() {
            write!(f, "[{}]", self.label)
        } else {
            f.write_str(&self.label)
        }
    }
}

/// 25 / 50 / 75 / 100 for country / state / district / centers.
pub fn progress_percent(step: FlowStep) -> u8 {
    step.progress_percent()
}

/// Builds the trail for the given state.
///
/// "All Countries" always links back to the start. Each selected ancestor
/// follows it: the crumb of the list currently being chosen from is plain
/// text, earlier ones link back to their list. The district only appears
/// at the terminal step, as plain text.
pub fn breadcrumb(
    step: FlowStep,
    country: Option<&Country>,
    state: Option<&State>,
    district: Option<&District>,
) -> Vec<Crumb> {
    let mut crumbs = vec![Crumb::link(ALL_COUNTRIES, BackTarget::Countries)];

    if let Some(c) = country {
        crumbs.push(if step == FlowStep::State {
            Crumb::text(c.name())
        } else {
            Crumb::link(c.name(), BackTarget::States)
        });
    }
    if let Some(s) = state {
        crumbs.push(if step == FlowStep::District {
            Crumb::text(s.name())
        } else {
            Crumb::link(s.name(), BackTarget::Districts)
        });
    }
    if let (FlowStep::Centers, Some(d)) = (step, district) {
        crumbs.push(Crumb::text(d.name()));
    }
    crumbs
}

/// `[All Countries] › [India] › Karnataka`
pub fn render_trail(crumbs: &[Crumb]) -> String {
    crumbs
        .iter()
        .map(Crumb::to_string)
        .collect::<Vec<_>>()
        .join(" › ")
}

/// Text progress bar, e.g. `[#####-----] 50%`.
pub fn render_progress(step: FlowStep, width: usize) -> String {
    let pct = progress_percent(step) as usize;
    let filled = width * pct / 100;
    format!(
        "[{}{}] {pct}%",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    )
}
