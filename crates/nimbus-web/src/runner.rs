use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, KeyboardEvent, Window};

use nimbus_engine::{
    AnimationDriver, Dashboard, DashboardConfig, DashboardError, DashboardView, OpenWeatherClient,
    SkyApp, Surface, SystemClock, WeatherSession,
};

use crate::canvas::CanvasSurface;
use crate::dom::{BodyClasses, DomView};
use crate::geolocation::BrowserGeolocation;
use crate::raf::RafScheduler;
use crate::storage::LocalStoragePreferences;
use crate::{host_err, with_runner};

type WebDashboard = Dashboard<OpenWeatherClient, DomView, SystemClock>;
type WebSky = SkyApp<SystemClock, LocalStoragePreferences, BodyClasses>;

/// Owns every browser-side piece of the dashboard.
///
/// The dashboard sits behind an `Rc` so fetch futures can outlive the borrow
/// of the runner that spawned them.
pub struct WebRunner {
    config: DashboardConfig,
    window: Window,
    document: Document,
    sky: WebSky,
    dashboard: Rc<WebDashboard>,
    driver: AnimationDriver<RafScheduler>,
    canvas: Option<CanvasSurface>,
    listeners: Vec<Closure<dyn FnMut(Event)>>,
}

impl WebRunner {
    pub fn new(config: DashboardConfig) -> Result<Self, DashboardError> {
        let window = web_sys::window().ok_or_else(|| host_err("missing window"))?;
        let document = window
            .document()
            .ok_or_else(|| host_err("missing document"))?;

        let session = WeatherSession::shared();
        let sky = SkyApp::new(
            SystemClock,
            Rc::clone(&session),
            LocalStoragePreferences::new(&window),
            BodyClasses::new(&document)?,
        );
        let dashboard = Rc::new(Dashboard::new(
            OpenWeatherClient::new(config.clone()),
            DomView::new(document.clone()),
            SystemClock,
            session,
            config.clone(),
        ));
        let driver = AnimationDriver::new(RafScheduler::new(window.clone(), |_timestamp| {
            with_runner(|r| r.on_refresh());
        }));

        let mut runner = Self {
            config,
            window,
            document,
            sky,
            dashboard,
            driver,
            canvas: None,
            listeners: Vec::new(),
        };
        runner.attach_canvas();
        runner.listen()?;
        Ok(runner)
    }

    /// Apply the stored theme right away and start the frame loop.
    pub fn start(&mut self) -> Result<(), DashboardError> {
        self.sky.frame(None);
        self.driver.start()
    }

    pub fn stop(&mut self) {
        self.driver.stop();
    }

    pub fn on_refresh(&mut self) {
        if self.canvas.is_none() {
            self.attach_canvas();
        }
        let sky = &self.sky;
        let dashboard = &self.dashboard;
        let canvas = &mut self.canvas;
        let result = self.driver.on_refresh(|| {
            let surface = canvas.as_mut().map(|c| c as &mut dyn Surface);
            let report = sky.frame(surface);
            dashboard.tick_counter(report.time_ms);
        });
        if let Err(err) = result {
            log::error!("animation loop stopped: {err}");
        }
    }

    pub fn search(&self) {
        let query = self.dashboard.view().city_query();
        let dashboard = Rc::clone(&self.dashboard);
        spawn_local(async move {
            if let Err(err) = dashboard.search_city(&query).await {
                log::debug!("search ended with {err}");
            }
        });
    }

    pub fn locate(&self) {
        let geolocation = BrowserGeolocation::new(self.window.navigator());
        let dashboard = Rc::clone(&self.dashboard);
        spawn_local(async move {
            if let Err(err) = dashboard.locate(&geolocation).await {
                log::debug!("locate ended with {err}");
            }
        });
    }

    pub fn toggle_dark(&self) {
        if let Err(err) = self.sky.toggle_dark() {
            log::warn!("theme toggle not persisted: {err}");
            self.dashboard.view().show_error(&err.user_message());
        }
    }

    fn resize(&self) {
        if let Some(canvas) = &self.canvas {
            canvas.resize_to_window(&self.window);
        }
    }

    /// Find the canvas and size it. Retried every frame until it exists.
    fn attach_canvas(&mut self) {
        match CanvasSurface::find(&self.document, &self.config.canvas_id) {
            Ok(canvas) => {
                canvas.resize_to_window(&self.window);
                self.canvas = Some(canvas);
            }
            Err(err) => log::trace!("sky canvas not ready: {err}"),
        }
    }

    fn listen(&mut self) -> Result<(), DashboardError> {
        let on_resize = Closure::<dyn FnMut(Event)>::new(|_: Event| {
            with_runner(|r| r.resize());
        });
        self.window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(|_| host_err("could not listen for resize"))?;
        self.listeners.push(on_resize);

        if let Some(input) = self.document.get_element_by_id("city") {
            let on_key = Closure::<dyn FnMut(Event)>::new(|event: Event| {
                let enter = event
                    .dyn_ref::<KeyboardEvent>()
                    .is_some_and(|key| key.key() == "Enter");
                if enter {
                    with_runner(|r| r.search());
                }
            });
            input
                .add_event_listener_with_callback("keypress", on_key.as_ref().unchecked_ref())
                .map_err(|_| host_err("could not listen for Enter"))?;
            self.listeners.push(on_key);
        }
        Ok(())
    }
}
