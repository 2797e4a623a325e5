use async_trait::async_trait;
use js_sys::{Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{GeolocationPosition, GeolocationPositionError, Navigator};

use nimbus_engine::{Coordinates, GeolocationError, GeolocationProvider};

/// `navigator.geolocation.getCurrentPosition` as a future.
pub struct BrowserGeolocation {
    navigator: Navigator,
}

impl BrowserGeolocation {
    pub fn new(navigator: Navigator) -> Self {
        Self { navigator }
    }
}

#[async_trait(?Send)]
impl GeolocationProvider for BrowserGeolocation {
    fn is_supported(&self) -> bool {
        Reflect::has(&self.navigator, &JsValue::from_str("geolocation")).unwrap_or(false)
    }

    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        let geolocation = self
            .navigator
            .geolocation()
            .map_err(|_| GeolocationError::Unsupported)?;

        let mut request_failed = false;
        let promise = Promise::new(&mut |resolve, reject| {
            request_failed = geolocation
                .get_current_position_with_error_callback(&resolve, Some(&reject))
                .is_err();
        });
        if request_failed {
            return Err(GeolocationError::Unavailable);
        }

        match JsFuture::from(promise).await {
            Ok(value) => {
                let position = value
                    .dyn_into::<GeolocationPosition>()
                    .map_err(|_| GeolocationError::Unavailable)?;
                let coords = position.coords();
                Ok(Coordinates::new(coords.latitude(), coords.longitude()))
            }
            Err(err) => Err(match err.dyn_into::<GeolocationPositionError>() {
                Ok(e) if e.code() == GeolocationPositionError::PERMISSION_DENIED => {
                    GeolocationError::PermissionDenied
                }
                _ => GeolocationError::Unavailable,
            }),
        }
    }
}
