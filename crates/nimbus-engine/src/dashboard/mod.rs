//! Fetch orchestration: search box and geolocation in, session and panels out.

pub mod openweather;
pub mod presentation;
pub mod provider;
pub mod view;

use std::cell::{Cell, RefCell};

use chrono::{DateTime, FixedOffset};

use crate::api::config::DashboardConfig;
use crate::api::types::{Coordinates, LocationQuery};
use crate::core::session::{RequestTicket, SharedSession};
use crate::core::time::{epoch_ms, Clock};
use crate::error::{DashboardError, GeolocationError};
use crate::extensions::counter::CountUp;
use crate::systems::forecast::forecast_cards;

pub use openweather::OpenWeatherClient;
pub use presentation::CurrentView;
pub use provider::{CurrentReport, GeolocationProvider, WeatherProvider};
pub use view::DashboardView;

/// Drives one page: every request runs to completion or error on its own,
/// and only the newest-issued request may update the session, clear the
/// loader or raise the error banner.
pub struct Dashboard<P, V, C> {
    provider: P,
    view: V,
    clock: C,
    session: SharedSession,
    config: DashboardConfig,
    counter: RefCell<Option<CountUp>>,
    shown_temperature: Cell<i32>,
}

impl<P, V, C> Dashboard<P, V, C>
where
    P: WeatherProvider,
    V: DashboardView,
    C: Clock,
{
    pub fn new(provider: P, view: V, clock: C, session: SharedSession, config: DashboardConfig) -> Self {
        Self {
            provider,
            view,
            clock,
            session,
            config,
            counter: RefCell::new(None),
            shown_temperature: Cell::new(0),
        }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Look up current conditions and forecast for a typed city name.
    pub async fn search_city(&self, query: &str) -> Result<(), DashboardError> {
        let city = query.trim();
        if city.is_empty() {
            let err = DashboardError::EmptyQuery;
            self.view.show_error(&err.user_message());
            return Err(err);
        }

        let ticket = self.begin();
        let result = self
            .load(ticket, LocationQuery::City(city.to_string()), false)
            .await;
        if let Err(err) = &result {
            log::info!("lookup for {city:?} failed: {err}");
        }
        self.finish(ticket, result)
    }

    /// Look up a known position. Any failure reads as a fetch failure and
    /// leaves the panels alone.
    pub async fn search_coordinates(&self, at: Coordinates) -> Result<(), DashboardError> {
        let ticket = self.begin();
        self.load_position(ticket, at).await
    }

    /// Ask `geo` for the visitor's position, then search there.
    pub async fn locate<G: GeolocationProvider>(&self, geo: &G) -> Result<(), DashboardError> {
        if !geo.is_supported() {
            let err = DashboardError::from(GeolocationError::Unsupported);
            self.view.show_error(&err.user_message());
            return Err(err);
        }

        let ticket = self.begin();
        match geo.locate().await {
            Ok(at) => self.load_position(ticket, at).await,
            Err(reason) => {
                log::info!("geolocation failed: {reason}");
                self.finish(ticket, Err(DashboardError::from(reason)))
            }
        }
    }

    /// Advance the temperature count-up. Called once per animation frame.
    pub fn tick_counter(&self, now_ms: f64) {
        let mut counter = self.counter.borrow_mut();
        let Some(count) = counter.as_ref() else {
            return;
        };
        let (value, done) = count.sample(now_ms);
        if value != self.shown_temperature.get() {
            self.shown_temperature.set(value);
            self.view.set_temperature(value);
        }
        if done {
            *counter = None;
        }
    }

    pub fn counting(&self) -> bool {
        self.counter.borrow().is_some()
    }

    /// Loader on, banner cleared, and a fresh ticket that supersedes every
    /// request still in flight.
    fn begin(&self) -> RequestTicket {
        self.view.set_loading(true);
        self.view.clear_error();
        self.session.borrow_mut().begin_request()
    }

    /// Loader off and failure shown, but only while `ticket` still owns the
    /// page. A superseded request ends silently.
    fn finish(
        &self,
        ticket: RequestTicket,
        result: Result<(), DashboardError>,
    ) -> Result<(), DashboardError> {
        if !self.session.borrow().is_latest(ticket) {
            if let Err(err) = &result {
                log::debug!("superseded request failed quietly: {err}");
            }
            return result;
        }
        self.view.set_loading(false);
        if let Err(err) = &result {
            self.report(err);
        }
        result
    }

    async fn load_position(&self, ticket: RequestTicket, at: Coordinates) -> Result<(), DashboardError> {
        let result = self
            .load(ticket, LocationQuery::Position(at), true)
            .await
            .map_err(|err| match err {
                e @ (DashboardError::Network(_) | DashboardError::Parse(_)) => e,
                other => DashboardError::Network(other.to_string()),
            });
        if let Err(err) = &result {
            log::info!("lookup at {:.3},{:.3} failed: {err}", at.lat, at.lon);
        }
        self.finish(ticket, result)
    }

    async fn load(
        &self,
        ticket: RequestTicket,
        query: LocationQuery,
        fill_input: bool,
    ) -> Result<(), DashboardError> {
        let report = self.provider.current(&query).await?;

        let accepted = self
            .session
            .borrow_mut()
            .accept(ticket, report.snapshot.clone(), report.sun_times);
        if !accepted {
            return Ok(());
        }
        log::info!(
            "weather for {}, {}: {}",
            report.name,
            report.country,
            report.snapshot.condition().unwrap_or("clear")
        );

        let now = self.clock.now();
        self.show_report(&report, &now);
        if fill_input {
            self.view.set_city_query(&report.name);
        }

        self.load_forecast(ticket, report.snapshot.coordinates, now.offset())
            .await;
        Ok(())
    }

    async fn load_forecast(&self, ticket: RequestTicket, at: Coordinates, offset: &FixedOffset) {
        match self.provider.forecast(at).await {
            Ok(entries) => {
                if !self.session.borrow().is_latest(ticket) {
                    log::debug!("discarding forecast for a superseded request");
                    return;
                }
                let cards = forecast_cards(&entries, offset, self.config.forecast_days);
                self.view.show_forecast(&cards);
                self.view.set_forecast_visible(true);
            }
            Err(err) => {
                log::warn!("forecast unavailable: {err}");
                if self.session.borrow().is_latest(ticket) {
                    self.view.set_forecast_visible(false);
                }
            }
        }
    }

    fn show_report(&self, report: &CurrentReport, now: &DateTime<FixedOffset>) {
        let current = CurrentView::new(report, now);
        self.view.show_current(&current);
        self.view.set_current_visible(true);

        if let Some(sun) = &report.sun_times {
            self.view.show_sun_times(
                &presentation::clock_label(&sun.sunrise, now.offset()),
                &presentation::clock_label(&sun.sunset, now.offset()),
            );
        }

        *self.counter.borrow_mut() = Some(CountUp::new(
            self.shown_temperature.get() as f32,
            current.temperature_c as f32,
            epoch_ms(now),
            self.config.counter_duration_ms,
            self.config.counter_easing,
        ));
    }

    fn report(&self, err: &DashboardError) {
        self.view.show_error(&err.user_message());
        if err.hides_panels() {
            self.view.set_current_visible(false);
            self.view.set_forecast_visible(false);
        }
    }
}
