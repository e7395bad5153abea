//! Interactive drill-down session.
//!
//! Each round prints the progress bar, the breadcrumb trail, any notice and
//! the list for the current step, then reads one command.

use anyhow::Result;
use centers_core::breadcrumb::{render_progress, render_trail};
use centers_core::text::find_named;
use centers_core::{Center, FlowStep, HandOff, ListState, LocationSource, NameMatch, Navigator};
use std::io::{self, BufRead, Write};

const BAR_WIDTH: usize = 20;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// A 1-based list position or a name.
    Pick(String),
    Back,
    AllCountries,
    Confirm,
    Retry,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let command = match line.to_lowercase().as_str() {
        "" => return None,
        "b" | "back" => Command::Back,
        "a" | "all" => Command::AllCountries,
        "c" | "confirm" => Command::Confirm,
        "r" | "retry" => Command::Retry,
        "q" | "quit" | "exit" => Command::Quit,
        _ => Command::Pick(line.to_string()),
    };
    Some(command)
}

fn pick<'a, T: NameMatch>(items: &'a [T], choice: &str) -> Option<&'a T> {
    match choice.parse::<usize>() {
        Ok(n) => n.checked_sub(1).and_then(|i| items.get(i)),
        Err(_) => find_named(items, choice),
    }
}

/// Runs the session until `q` or end of input.
pub fn run<S, R, W>(nav: &mut Navigator<S>, input: R, mut out: W) -> Result<()>
where
    S: LocationSource,
    R: BufRead,
    W: Write,
{
    nav.load_countries();
    let mut lines = input.lines();
    loop {
        render(nav, &mut out)?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else { break };
        let Some(command) = parse_command(&line?) else {
            continue;
        };
        match command {
            Command::Quit => break,
            Command::Back => match nav.flow().step().parent_target() {
                Some(target) => {
                    nav.go_back(target)?;
                }
                None => writeln!(out, "Already at the country list.")?,
            },
            Command::AllCountries => {
                nav.back_to_countries();
            }
            Command::Confirm => confirm(nav, &mut out)?,
            Command::Retry if nav.flow().step() == FlowStep::Centers => confirm(nav, &mut out)?,
            Command::Retry => {
                nav.retry();
            }
            Command::Pick(choice) => select(nav, &choice, &mut out)?,
        }
    }
    writeln!(out)?;
    Ok(())
}

fn select<S, W>(nav: &mut Navigator<S>, choice: &str, out: &mut W) -> Result<()>
where
    S: LocationSource,
    W: Write,
{
    let step = nav.flow().step();
    let found = match step {
        FlowStep::Country => {
            let country = pick(nav.flow().countries().items(), choice).cloned();
            country.map(|c| nav.select_country(c).map(drop)).transpose()?
        }
        FlowStep::State => {
            let state = pick(nav.flow().states().items(), choice).cloned();
            state.map(|s| nav.select_state(s).map(drop)).transpose()?
        }
        FlowStep::District => {
            let district = pick(nav.flow().districts().items(), choice).cloned();
            district.map(|d| nav.select_district(d)).transpose()?
        }
        FlowStep::Centers => {
            writeln!(out, "Type c to show the centers or b to pick another district.")?;
            return Ok(());
        }
    };
    if found.is_none() {
        writeln!(out, "No {step} matches {choice:?}.")?;
    }
    Ok(())
}

fn confirm<S, W>(nav: &mut Navigator<S>, out: &mut W) -> Result<()>
where
    S: LocationSource,
    W: Write,
{
    let mut centers = Vec::new();
    match nav.confirm(|list| centers = list) {
        Ok(HandOff::Delivered { count }) => {
            writeln!(out, "\n{count} centers:")?;
            write_centers(out, &centers)?;
        }
        // the notice is shown on the next render
        Ok(HandOff::Failed | HandOff::Superseded) => {}
        Err(err) => writeln!(out, "{err}; pick a district first.")?,
    }
    Ok(())
}

fn render<S, W>(nav: &Navigator<S>, out: &mut W) -> Result<()>
where
    S: LocationSource,
    W: Write,
{
    let flow = nav.flow();
    writeln!(out)?;
    writeln!(out, "{}", render_progress(flow.step(), BAR_WIDTH))?;
    writeln!(out, "{}", render_trail(&flow.breadcrumb()))?;
    if let Some(notice) = flow.notice() {
        if notice.retryable {
            writeln!(out, "! {} (r to retry)", notice.message)?;
        } else {
            writeln!(out, "! {}", notice.message)?;
        }
    }

    match flow.step() {
        FlowStep::Country => write_list(out, FlowStep::Country, flow.countries(), |c| c.count)?,
        FlowStep::State => write_list(out, FlowStep::State, flow.states(), |s| s.total_centers)?,
        FlowStep::District => {
            write_list(out, FlowStep::District, flow.districts(), |d| d.total_centers)?
        }
        FlowStep::Centers => {
            if let Some(s) = flow.summary() {
                writeln!(out, "{}, {}, {}", s.district, s.state, s.country)?;
                writeln!(out, "  {} centers in this district", s.district_centers)?;
                writeln!(out, "  {} in {}", s.state_centers, s.state)?;
                writeln!(out, "  {} in {}", s.country_centers, s.country)?;
            }
            if flow.is_confirming() {
                writeln!(out, "Loading centers...")?;
            } else {
                writeln!(out, "Type c to show the centers.")?;
            }
        }
    }
    Ok(())
}

fn write_list<T, W, F>(out: &mut W, step: FlowStep, list: &ListState<T>, count: F) -> io::Result<()>
where
    T: NameMatch,
    W: Write,
    F: Fn(&T) -> u32,
{
    match list {
        ListState::Idle | ListState::Loading => writeln!(out, "Loading {step} list..."),
        ListState::Failed(err) => {
            writeln!(out, "Could not load the {step} list: {err}")?;
            writeln!(out, "Type r to retry.")
        }
        ListState::Ready(items) if items.is_empty() => writeln!(out, "No {step} entries found."),
        ListState::Ready(items) => {
            writeln!(out, "Select a {step}:")?;
            for (i, item) in items.iter().enumerate() {
                writeln!(out, "{:>3}. {} ({})", i + 1, item.name_str(), count(item))?;
            }
            Ok(())
        }
    }
}

/// Prints a center list in the short human form.
pub fn write_centers<W: Write>(out: &mut W, centers: &[Center]) -> io::Result<()> {
    if centers.is_empty() {
        writeln!(out, "No centers listed for this district.")?;
    }
    for (i, center) in centers.iter().enumerate() {
        writeln!(out, "{:>3}. {}", i + 1, center.name().unwrap_or("(unnamed)"))?;
        match (center.address(), center.city()) {
            (Some(address), Some(city)) => writeln!(out, "     {address}, {city}")?,
            (Some(line), None) | (None, Some(line)) => writeln!(out, "     {line}")?,
            (None, None) => {}
        }
        if let Some(contact) = center.contact() {
            writeln!(out, "     contact: {contact}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use centers_core::{Country, District, FetchError, State};
    use serde_json::json;
    use std::cell::Cell;

    #[derive(Default)]
    struct Scripted {
        fail_centers: Cell<bool>,
        reject_centers: Cell<bool>,
    }

    impl LocationSource for Scripted {
        fn list_countries(&self) -> centers_core::Result<Vec<Country>> {
            Ok(vec![Country::new("India", 20), Country::new("Nepal", 3)])
        }

        fn list_states(&self, country: &str) -> centers_core::Result<Vec<State>> {
            Ok(match country {
                "India" => vec![State::new("Karnataka", 15), State::new("Kerala", 5)],
                _ => vec![],
            })
        }

        fn list_districts(&self, _: &str, state: &str) -> centers_core::Result<Vec<District>> {
            Ok(match state {
                "Karnataka" => vec![District::new("Bengaluru", 2), District::new("Mysuru", 1)],
                _ => vec![],
            })
        }

        fn list_centers_in_district(
            &self,
            _: &str,
            _: &str,
            _: &str,
        ) -> centers_core::Result<Vec<Center>> {
            if self.fail_centers.get() {
                return Err(FetchError::Status {
                    status: 503,
                    url: "http://test/centers/district/center-list".into(),
                });
            }
            if self.reject_centers.get() {
                return Err(FetchError::Api {
                    message: "district closed".into(),
                });
            }
            Ok(vec![
                Center::from_value(json!({
                    "name": "Jayanagar",
                    "address": {"address": "4th Block", "city": "Bengaluru"},
                    "phone": "080-1234"
                })),
                Center::from_value(json!({"name": "Indiranagar"})),
            ])
        }
    }

    fn session(source: Scripted, script: &str) -> (Navigator<Scripted>, String) {
        let mut nav = Navigator::new(source);
        let mut out = Vec::new();
        run(&mut nav, script.as_bytes(), &mut out).unwrap();
        (nav, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("B"), Some(Command::Back));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command(" 2 "), Some(Command::Pick("2".into())));
        assert_eq!(
            parse_command("Karnataka"),
            Some(Command::Pick("Karnataka".into()))
        );
    }

    #[test]
    fn pick_by_position_or_name() {
        let states = vec![State::new("Karnataka", 1), State::new("Kerala", 1)];
        assert_eq!(pick(&states, "2").map(|s| s.name()), Some("Kerala"));
        assert_eq!(pick(&states, "0"), None);
        assert_eq!(pick(&states, "3"), None);
        assert_eq!(pick(&states, "karn").map(|s| s.name()), Some("Karnataka"));
        assert_eq!(pick(&states, "ker").map(|s| s.name()), Some("Kerala"));
    }

    #[test]
    fn full_walk_prints_centers_on_confirm() {
        let (nav, out) = session(Scripted::default(), "1\nkarnataka\n1\nc\nq\n");

        assert_eq!(nav.flow().step(), FlowStep::Centers);
        assert!(out.contains("25%"));
        assert!(out.contains("100%"));
        assert!(out.contains("[All Countries] › [India] › [Karnataka] › Bengaluru"));
        assert!(out.contains("2 centers in this district"));
        assert!(out.contains("2 centers:"));
        assert!(out.contains("Jayanagar"));
        assert!(out.contains("4th Block, Bengaluru"));
        assert!(out.contains("contact: 080-1234"));
    }

    #[test]
    fn back_and_all_countries_walk_up_the_trail() {
        let (nav, out) = session(Scripted::default(), "India\n1\n1\nb\nb\n");
        assert_eq!(nav.flow().step(), FlowStep::State);
        assert!(nav.flow().selected_state().is_none());
        assert!(out.contains("Select a district:"));

        let (nav, _) = session(Scripted::default(), "India\n1\n1\na\n");
        assert_eq!(nav.flow().step(), FlowStep::Country);
        assert!(nav.flow().selected_country().is_none());
    }

    #[test]
    fn failed_confirm_shows_notice_and_retry_recovers() {
        let source = Scripted::default();
        source.fail_centers.set(true);
        let mut nav = Navigator::new(source);
        let mut out = Vec::new();
        run(&mut nav, "1\n1\n1\nc\n".as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("! Error fetching centers. Please try again. (r to retry)"));
        assert_eq!(nav.flow().step(), FlowStep::Centers);

        nav.source().fail_centers.set(false);
        let mut out = Vec::new();
        run(&mut nav, "r\n".as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("2 centers:"));
        assert!(nav.flow().notice().is_none());
    }

    #[test]
    fn rejected_confirm_offers_no_retry_hint() {
        let source = Scripted::default();
        source.reject_centers.set(true);
        let (nav, out) = session(source, "1\n1\n1\nc\n");
        assert!(out.contains("! Error fetching centers. Please try again.\n"));
        assert!(!out.contains("(r to retry)"));
        assert!(nav.flow().notice().is_some_and(|n| !n.retryable));
    }

    #[test]
    fn unknown_choice_and_early_confirm_are_reported() {
        let (nav, out) = session(Scripted::default(), "Atlantis\nc\n");
        assert_eq!(nav.flow().step(), FlowStep::Country);
        assert!(out.contains("No country matches \"Atlantis\"."));
        assert!(out.contains("pick a district first"));
    }

    #[test]
    fn empty_list_is_not_an_error() {
        let (_, out) = session(Scripted::default(), "Nepal\n");
        assert!(out.contains("No state entries found."));
        assert!(!out.contains("Could not load"));
    }
}
