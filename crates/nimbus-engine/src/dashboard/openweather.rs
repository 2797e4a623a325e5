//! OpenWeather 2.5 REST client (`/weather` and `/forecast`).

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::provider::{CurrentReport, WeatherProvider};
use crate::api::config::DashboardConfig;
use crate::api::types::{Coordinates, LocationQuery};
use crate::core::astronomy::SunTimes;
use crate::core::session::WeatherSnapshot;
use crate::error::DashboardError;
use crate::systems::forecast::ForecastEntry;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    config: DashboardConfig,
}

impl OpenWeatherClient {
    pub fn new(config: DashboardConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: DashboardConfig) -> Self {
        Self { http, config }
    }

    fn params(&self, location: &LocationQuery) -> Vec<(&'static str, String)> {
        let mut params = match location {
            LocationQuery::City(name) => vec![("q", name.clone())],
            LocationQuery::Position(at) => vec![("lat", at.lat.to_string()), ("lon", at.lon.to_string())],
        };
        params.push(("appid", self.config.api_key.clone()));
        params.push(("units", self.config.units.clone()));
        params
    }

    async fn fetch(&self, path: &str, location: &LocationQuery) -> Result<String, DashboardError> {
        let res = self
            .http
            .get(self.config.endpoint(path))
            .query(&self.params(location))
            .send()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        check_status(res.status())?;
        res.text()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))
    }
}

#[async_trait(?Send)]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentReport, DashboardError> {
        let body = self.fetch("weather", query).await?;
        parse_current(&body)
    }

    async fn forecast(&self, at: Coordinates) -> Result<Vec<ForecastEntry>, DashboardError> {
        let body = self.fetch("forecast", &LocationQuery::Position(at)).await?;
        parse_forecast(&body)
    }
}

fn check_status(status: StatusCode) -> Result<(), DashboardError> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::NOT_FOUND {
        Err(DashboardError::NotFound)
    } else {
        Err(DashboardError::Lookup {
            status: status.as_u16(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
    #[serde(default)]
    visibility: u32,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn primary_condition(weather: &[OwWeather]) -> String {
    weather.first().map(|w| w.main.clone()).unwrap_or_default()
}

pub fn parse_current(body: &str) -> Result<CurrentReport, DashboardError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body).map_err(DashboardError::Parse)?;

    let mut snapshot = WeatherSnapshot::new(
        primary_condition(&parsed.weather),
        Coordinates::new(parsed.coord.lat, parsed.coord.lon),
    );
    snapshot.temperature_c = parsed.main.temp;
    snapshot.feels_like_c = parsed.main.feels_like;
    snapshot.humidity_pct = parsed.main.humidity;
    snapshot.pressure_hpa = parsed.main.pressure;
    snapshot.wind_speed_mps = parsed.wind.speed;
    snapshot.visibility_m = parsed.visibility;

    Ok(CurrentReport {
        name: parsed.name,
        country: parsed.sys.country,
        snapshot,
        sun_times: SunTimes::from_epoch_secs(parsed.sys.sunrise, parsed.sys.sunset),
    })
}

/// Entries with an out-of-range timestamp are dropped.
pub fn parse_forecast(body: &str) -> Result<Vec<ForecastEntry>, DashboardError> {
    let parsed: OwForecastResponse = serde_json::from_str(body).map_err(DashboardError::Parse)?;
    Ok(parsed
        .list
        .into_iter()
        .filter_map(|e| {
            Some(ForecastEntry {
                time: DateTime::from_timestamp(e.dt, 0)?,
                temp_min_c: e.main.temp_min,
                temp_max_c: e.main.temp_max,
                condition: primary_condition(&e.weather),
            })
        })
        .collect())
}
