// crates/centers-core/src/wire.rs

//! Request bodies and the `{ success, data, message }` response envelope.

use crate::error::{FetchError, Result};
use crate::model::{Center, Country, District, State};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CountriesData {
    #[serde(default)]
    pub countries: Vec<Country>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatesData {
    #[serde(default)]
    pub states: Vec<State>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DistrictsData {
    #[serde(default)]
    pub districts: Vec<District>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CentersData {
    #[serde(default)]
    pub centers: Vec<Center>,
}

/// Body of `POST /centers/districts`.
#[derive(Debug, Serialize)]
pub struct DistrictsRequest<'a> {
    pub country: &'a str,
    pub state: &'a str,
}

/// Body of `POST /centers/district/center-list`.
#[derive(Debug, Serialize)]
pub struct CenterListRequest<'a> {
    pub country: &'a str,
    pub state: &'a str,
    pub district: &'a str,
}

/// Decodes an envelope and unwraps its payload.
///
/// `success: false` (or a missing flag) becomes [`FetchError::Api`]; a
/// successful envelope without `data` yields the payload's default, i.e.
/// an empty list.
pub fn decode_envelope<T>(body: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    if !envelope.success {
        return Err(FetchError::Api {
            message: envelope
                .message
                .unwrap_or_else(|| "request was not successful".to_string()),
        });
    }
    Ok(envelope.data.unwrap_or_default())
}
