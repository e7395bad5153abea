//! centers: command-line browser for the centers directory API
//!
//! One-shot commands print a single level of the hierarchy; `browse` walks
//! it interactively the way the locator page does.
//!
//! Usage examples
//! --------------
//!
//! - List countries
//!   $ centers --api-url https://example.org/api countries
//!
//! - List states or districts (names are case and accent insensitive)
//!   $ centers states india
//!   $ centers districts India Karnataka
//!
//! - Show the centers of a district, optionally as raw JSON
//!   $ centers centers India Karnataka Bengaluru
//!   $ centers centers India Karnataka Bengaluru --json
//!
//! - Interactive drill-down
//!   $ centers browse
//!
//! Configuration
//! -------------
//!
//! `--api-url` / `API_URL` sets the API base and is required.
//! `--timeout` / `API_TIMEOUT_SECS` sets the request timeout (default 15s).
//! Logs go to stderr; use `-v` or `RUST_LOG` to raise the level.
mod args;
mod browse;

use crate::args::{CliArgs, Commands};
use anyhow::{anyhow, bail, Context};
use centers_core::config::{API_TIMEOUT_ENV, API_URL_ENV};
use centers_core::text::find_named;
use centers_core::{
    ClientConfig, HandOff, HttpLocationClient, ListState, LocationSource, Navigator,
    CENTERS_FETCH_FAILED,
};
use clap::Parser;
use std::io;
use tracing::debug;
use tracing_subscriber::prelude::*;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let config = ClientConfig::from_lookup(|key| match key {
        API_URL_ENV => args.api_url.clone(),
        API_TIMEOUT_ENV => args.timeout.map(|secs| secs.to_string()),
        _ => None,
    })?;
    let client = HttpLocationClient::new(config).context("building the HTTP client")?;
    debug!(
        base_url = %client.config().base_url,
        timeout = ?client.config().timeout,
        "client configured"
    );
    let mut nav = Navigator::new(client);

    match args.command {
        Commands::Countries => {
            nav.load_countries();
            for c in loaded(nav.flow().countries(), "countries")? {
                println!("{} ({} centers)", c.country, c.count);
            }
        }

        Commands::States { country } => {
            enter_country(&mut nav, &country)?;
            let flow = nav.flow();
            let states = loaded(flow.states(), "states")?;
            if let Some(c) = flow.selected_country() {
                println!("States in {}:", c.country);
            }
            if states.is_empty() {
                println!("No states listed.");
            }
            for s in states {
                println!("- {} ({} centers)", s.state, s.total_centers);
            }
        }

        Commands::Districts { country, state } => {
            enter_country(&mut nav, &country)?;
            enter_state(&mut nav, &state)?;
            let flow = nav.flow();
            let districts = loaded(flow.districts(), "districts")?;
            if let Some(s) = flow.selected_state() {
                println!("Districts in {}:", s.state);
            }
            if districts.is_empty() {
                println!("No districts listed.");
            }
            for d in districts {
                println!("- {} ({} centers)", d.district, d.total_centers);
            }
        }

        Commands::Centers {
            country,
            state,
            district,
            json,
        } => {
            enter_country(&mut nav, &country)?;
            enter_state(&mut nav, &state)?;
            enter_district(&mut nav, &district)?;

            let mut centers = Vec::new();
            match nav.confirm(|list| centers = list)? {
                HandOff::Delivered { count } => debug!(count, "centers loaded"),
                HandOff::Failed | HandOff::Superseded => {
                    let detail = nav
                        .flow()
                        .notice()
                        .and_then(|n| n.detail.clone())
                        .unwrap_or_default();
                    bail!("{CENTERS_FETCH_FAILED} {detail}");
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&centers)?);
            } else {
                browse::write_centers(&mut io::stdout().lock(), &centers)?;
            }
        }

        Commands::Browse => {
            browse::run(&mut nav, io::stdin().lock(), io::stdout())?;
        }
    }

    Ok(())
}

/// `-v` raises the default level; `RUST_LOG` wins when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn loaded<'a, T>(list: &'a ListState<T>, what: &str) -> anyhow::Result<&'a [T]> {
    match list.error() {
        Some(err) => Err(anyhow!("could not load {what}: {err}")),
        None => Ok(list.items()),
    }
}

fn enter_country<S: LocationSource>(nav: &mut Navigator<S>, name: &str) -> anyhow::Result<()> {
    nav.load_countries();
    let country = find_named(loaded(nav.flow().countries(), "countries")?, name)
        .cloned()
        .ok_or_else(|| anyhow!("country {name:?} not found"))?;
    nav.select_country(country).with_context(|| format!("selecting country {name:?}"))?;
    Ok(())
}

fn enter_state<S: LocationSource>(nav: &mut Navigator<S>, name: &str) -> anyhow::Result<()> {
    let state = find_named(loaded(nav.flow().states(), "states")?, name)
        .cloned()
        .ok_or_else(|| anyhow!("state {name:?} not found"))?;
    nav.select_state(state)?;
    Ok(())
}

fn enter_district<S: LocationSource>(nav: &mut Navigator<S>, name: &str) -> anyhow::Result<()> {
    let district = find_named(loaded(nav.flow().districts(), "districts")?, name)
        .cloned()
        .ok_or_else(|| anyhow!("district {name:?} not found"))?;
    nav.select_district(district)?;
    Ok(())
}
