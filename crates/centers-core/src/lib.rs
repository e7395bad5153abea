// crates/centers-core/src/lib.rs

//! centers-core
//! ============
//!
//! Client-side core of the center locator: a drill-down selector that walks
//! `country → state → district → centers` over the centers REST API.
//!
//! - [`client`]: the four HTTP reads behind the [`LocationSource`] trait.
//! - [`flow`]: the step state machine with its per-list stale-response guard.
//! - [`breadcrumb`]: progress percentage and breadcrumb trail.
//! - [`handoff`]: terminal-step summary and the confirm action.
//! - [`page`]: the page-level "one active results source" coordinator.
//! - [`navigator`]: glue that runs the flow against a source synchronously.
//!
//! Quick start
//! -----------
//!
//! ```no_run
//! use centers_core::{ClientConfig, HttpLocationClient, Navigator};
//!
//! let config = ClientConfig::from_env()?; // API_URL
//! let mut nav = Navigator::new(HttpLocationClient::new(config)?);
//! nav.load_countries();
//!
//! let india = nav.flow().countries().items()[0].clone();
//! nav.select_country(india)?;
//! for state in nav.flow().states().items() {
//!     println!("{} ({} centers)", state.state, state.total_centers);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod breadcrumb;
pub mod client;
pub mod config;
pub mod error;
pub mod flow;
pub mod handoff;
pub mod model;
pub mod navigator;
pub mod page;
pub mod text;
#[doc(hidden)]
pub mod wire;

// Re-exports
pub use crate::breadcrumb::{Crumb, ALL_COUNTRIES};
pub use crate::client::{HttpLocationClient, LocationSource};
pub use crate::config::ClientConfig;
pub use crate::error::{ConfigError, FetchError, Result, TransitionError};
pub use crate::flow::{
    Applied, BackTarget, DrillDown, FetchOutcome, FetchQuery, FetchRequest, FetchTicket,
    FlowStep, ListState, ListTarget, Notice, CENTERS_FETCH_FAILED,
};
pub use crate::handoff::{confirm_district, DistrictSummary, HandOff};
pub use crate::model::{Center, Country, District, State};
pub use crate::navigator::Navigator;
pub use crate::page::{CentersPage, ResultsSource};
pub use crate::text::NameMatch;
