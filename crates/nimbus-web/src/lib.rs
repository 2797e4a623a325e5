//! Browser bindings for the nimbus dashboard.
//!
//! wasm-bindgen cannot export generic structs, so the single `WebRunner` lives
//! in a `thread_local!` and every export is a free function that borrows it.

mod canvas;
mod dom;
mod geolocation;
mod raf;
mod runner;
mod storage;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use nimbus_engine::DashboardConfig;

pub use runner::WebRunner;

thread_local! {
    static RUNNER: RefCell<Option<WebRunner>> = const { RefCell::new(None) };
}

/// Borrow the runner. `None` (with a warning) before `dashboard_init`.
pub(crate) fn with_runner<R>(f: impl FnOnce(&mut WebRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("dashboard not initialized; call dashboard_init() first");
                None
            }
        }
    })
}

pub(crate) fn host_err(message: impl Into<String>) -> nimbus_engine::DashboardError {
    nimbus_engine::DashboardError::Host(message.into())
}

/// Build the dashboard from a JSON config and start the sky loop.
#[wasm_bindgen]
pub fn dashboard_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if RUNNER.with(|cell| cell.borrow().is_some()) {
        log::warn!("dashboard_init called twice; keeping the running dashboard");
        return Ok(());
    }

    let config = DashboardConfig::from_json(config_json).map_err(to_js)?;
    let locate = config.locate_on_start;

    let runner = WebRunner::new(config).map_err(to_js)?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    with_runner(|r| r.start())
        .transpose()
        .map_err(to_js)?;
    log::info!("nimbus: initialized");

    if locate {
        dashboard_locate();
    }
    Ok(())
}

/// Search for the city typed into the search box.
#[wasm_bindgen]
pub fn dashboard_search() {
    with_runner(|r| r.search());
}

/// Look up weather at the visitor's position.
#[wasm_bindgen]
pub fn dashboard_locate() {
    with_runner(|r| r.locate());
}

/// Flip manual dark mode.
#[wasm_bindgen]
pub fn dashboard_toggle_dark() {
    with_runner(|r| r.toggle_dark());
}

/// Stop the animation loop.
#[wasm_bindgen]
pub fn dashboard_stop() {
    with_runner(|r| r.stop());
}

fn to_js(err: nimbus_engine::DashboardError) -> JsValue {
    log::error!("{err}");
    JsValue::from_str(&err.to_string())
}
