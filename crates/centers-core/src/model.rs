// crates/centers-core/src/model.rs

//! # Location Records
//!
//! The records the drill-down moves through. Field names follow the API's
//! JSON exactly (`country`/`count`, `state`/`totalCenters`, ...), so the
//! structs deserialize straight from the response payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A country with its total number of centers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub country: String,
    #[serde(default)]
    pub count: u32,
}

/// A state/region inside a selected country.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub state: String,
    #[serde(default)]
    pub total_centers: u32,
}

/// A district inside a selected (country, state) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub district: String,
    #[serde(default)]
    pub total_centers: u32,
}

impl Country {
    pub fn new(country: impl Into<String>, count: u32) -> Self {
        Self {
            country: country.into(),
            count,
        }
    }

    pub fn name(&self) -> &str {
        &self.country
    }
}

impl State {
    pub fn new(state: impl Into<String>, total_centers: u32) -> Self {
        Self {
            state: state.into(),
            total_centers,
        }
    }

    pub fn name(&self) -> &str {
        &self.state
    }
}

impl District {
    pub fn new(district: impl Into<String>, total_centers: u32) -> Self {
        Self {
            district: district.into(),
            total_centers,
        }
    }

    pub fn name(&self) -> &str {
        &self.district
    }
}

/// A center record as returned by the district center-list endpoint.
///
/// The drill-down treats this as opaque: it is kept as the raw JSON value
/// and handed to the results display untouched. The accessors below only
/// *read* common fields for display purposes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Center(Value);

impl Center {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Top-level string field, if present.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.field("name").or_else(|| self.field("centerName"))
    }

    /// Address may be a plain string or an object with an `address` line.
    pub fn address(&self) -> Option<&str> {
        match self.0.get("address")? {
            Value::String(s) => Some(s),
            Value::Object(map) => map
                .get("address")
                .or_else(|| map.get("line1"))
                .and_then(Value::as_str),
            _ => None,
        }
    }

    pub fn city(&self) -> Option<&str> {
        self.field("city").or_else(|| {
            self.0
                .get("address")
                .and_then(|a| a.get("city"))
                .and_then(Value::as_str)
        })
    }

    pub fn contact(&self) -> Option<&str> {
        self.field("phone")
            .or_else(|| self.field("contactNumber"))
            .or_else(|| self.field("email"))
    }
}
