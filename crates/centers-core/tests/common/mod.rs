#![allow(dead_code)]

use centers_core::{Center, Country, District, FetchError, LocationSource, Result, State};
use serde_json::json;
use std::cell::{Cell, RefCell};

/// In-memory location source with the India → Karnataka → Bengaluru data
/// set, a call log and switchable failures.
#[derive(Default)]
pub struct FakeSource {
    pub calls: RefCell<Vec<String>>,
    pub fail_states: Cell<bool>,
    pub fail_districts: Cell<bool>,
    pub fail_centers: Cell<bool>,
}

pub fn bengaluru_centers() -> Vec<Center> {
    (1..=12)
        .map(|i| {
            Center::from_value(json!({
                "name": format!("Bengaluru Center {i}"),
                "address": {"address": format!("{i} MG Road"), "city": "Bengaluru"},
                "schedule": [{"day": "Sunday", "time": "10:00"}],
                "coordinators": [{"name": "Coordinator", "phone": "000"}],
                "location": {"type": "Point", "coordinates": [77.59, 12.97]}
            }))
        })
        .collect()
}

fn unavailable() -> FetchError {
    FetchError::Status {
        status: 503,
        url: "http://fake/centers".into(),
    }
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn log(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl LocationSource for FakeSource {
    fn list_countries(&self) -> Result<Vec<Country>> {
        self.log("countries".into());
        Ok(vec![Country::new("India", 120), Country::new("Nepal", 8)])
    }

    fn list_states(&self, country: &str) -> Result<Vec<State>> {
        self.log(format!("states:{country}"));
        if self.fail_states.get() {
            return Err(unavailable());
        }
        Ok(match country {
            "India" => vec![State::new("Karnataka", 40), State::new("Kerala", 18)],
            "Nepal" => vec![State::new("Bagmati", 8)],
            _ => vec![],
        })
    }

    fn list_districts(&self, country: &str, state: &str) -> Result<Vec<District>> {
        self.log(format!("districts:{country}/{state}"));
        if self.fail_districts.get() {
            return Err(unavailable());
        }
        Ok(match (country, state) {
            ("India", "Karnataka") => {
                vec![District::new("Bengaluru", 12), District::new("Mysuru", 5)]
            }
            ("India", "Kerala") => vec![District::new("Kochi", 7)],
            _ => vec![],
        })
    }

    fn list_centers_in_district(
        &self,
        country: &str,
        state: &str,
        district: &str,
    ) -> Result<Vec<Center>> {
        self.log(format!("centers:{country}/{state}/{district}"));
        if self.fail_centers.get() {
            return Err(unavailable());
        }
        Ok(match (country, state, district) {
            ("India", "Karnataka", "Bengaluru") => bengaluru_centers(),
            _ => vec![],
        })
    }
}
