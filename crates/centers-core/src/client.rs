// crates/centers-core/src/client.rs

//! # Location Data Fetcher
//!
//! The four read operations the drill-down needs, behind the
//! [`LocationSource`] trait. [`HttpLocationClient`] talks to the REST API;
//! tests and embedders can plug in anything else.
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | countries | GET | `/centers/countries` |
//! | states | GET | `/centers/countries-with-states/{country}` |
//! | districts | POST | `/centers/districts` |
//! | centers in district | POST | `/centers/district/center-list` |

use crate::config::ClientConfig;
use crate::error::{FetchError, Result};
use crate::model::{Center, Country, District, State};
use crate::wire::{
    decode_envelope, CenterListRequest, CentersData, CountriesData, DistrictsData,
    DistrictsRequest, StatesData,
};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

const COUNTRIES_PATH: &[&str] = &["centers", "countries"];
const STATES_PATH: &str = "countries-with-states";
const DISTRICTS_PATH: &[&str] = &["centers", "districts"];
const CENTER_LIST_PATH: &[&str] = &["centers", "district", "center-list"];

/// Read access to the location hierarchy.
pub trait LocationSource {
    fn list_countries(&self) -> Result<Vec<Country>>;

    /// Only meaningful once a country is selected.
    fn list_states(&self, country: &str) -> Result<Vec<State>>;

    fn list_districts(&self, country: &str, state: &str) -> Result<Vec<District>>;

    /// Called only on explicit confirmation at the terminal step.
    fn list_centers_in_district(
        &self,
        country: &str,
        state: &str,
        district: &str,
    ) -> Result<Vec<Center>>;
}

impl<T: LocationSource + ?Sized> LocationSource for Box<T> {
    fn list_countries(&self) -> Result<Vec<Country>> {
        (**self).list_countries()
    }

    fn list_states(&self, country: &str) -> Result<Vec<State>> {
        (**self).list_states(country)
    }

    fn list_districts(&self, country: &str, state: &str) -> Result<Vec<District>> {
        (**self).list_districts(country, state)
    }

    fn list_centers_in_district(
        &self,
        country: &str,
        state: &str,
        district: &str,
    ) -> Result<Vec<Center>> {
        (**self).list_centers_in_district(country, state, district)
    }
}

/// Blocking HTTP implementation of [`LocationSource`].
#[derive(Debug, Clone)]
pub struct HttpLocationClient {
    http: Client,
    config: ClientConfig,
}

impl HttpLocationClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http, config })
    }

    /// Uses a caller-built reqwest client (proxy, TLS or pooling settings).
    /// The config's timeout and user agent are then up to that client.
    pub fn with_http_client(http: Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn get<T>(&self, segments: &[&str]) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let url = self.config.endpoint(segments)?;
        debug!(%url, "GET");
        self.execute(self.http.get(url.clone()), url.as_str())
    }

    fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let url = self.config.endpoint(segments)?;
        debug!(%url, "POST");
        self.execute(self.http.post(url.clone()).json(body), url.as_str())
    }

    fn execute<T>(&self, request: RequestBuilder, url: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        decode_envelope(&body)
    }
}

impl LocationSource for HttpLocationClient {
    fn list_countries(&self) -> Result<Vec<Country>> {
        let data: CountriesData = self.get(COUNTRIES_PATH)?;
        Ok(data.countries)
    }

    fn list_states(&self, country: &str) -> Result<Vec<State>> {
        let data: StatesData = self.get(&["centers", STATES_PATH, country])?;
        Ok(data.states)
    }

    fn list_districts(&self, country: &str, state: &str) -> Result<Vec<District>> {
        let data: DistrictsData = self.post(DISTRICTS_PATH, &DistrictsRequest { country, state })?;
        Ok(data.districts)
    }

    fn list_centers_in_district(
        &self,
        country: &str,
        state: &str,
        district: &str,
    ) -> Result<Vec<Center>> {
        let body = CenterListRequest {
            country,
            state,
            district,
        };
        let data: CentersData = self.post(CENTER_LIST_PATH, &body)?;
        Ok(data.centers)
    }
}
