//! `navigator.geolocation` position watches returned as [`Teardown`] handles.

use platform_host::{GeolocationError, GeolocationOptions, GeolocationPosition, Teardown};

/// Watches the device position until the returned handle runs.
///
/// `on_position` receives every fix and `on_error` every failure the browser reports for the
/// watch. On non-wasm targets nothing is watched and a no-op handle is returned.
///
/// # Errors
///
/// Returns an [`Unsupported`](platform_host::GeolocationErrorCode::Unsupported) error when no
/// window or geolocation facility exists, or when `watchPosition` throws.
pub fn managed_geolocation_watch(
    on_position: impl FnMut(GeolocationPosition) + 'static,
    on_error: impl FnMut(GeolocationError) + 'static,
    options: GeolocationOptions,
) -> Result<Teardown, GeolocationError> {
    #[cfg(target_arch = "wasm32")]
    {
        use platform_host::GeolocationErrorCode;
        use wasm_bindgen::{closure::Closure, JsCast};

        let geolocation = web_sys::window()
            .ok_or_else(|| GeolocationError::unsupported("window unavailable"))?
            .navigator()
            .geolocation()
            .map_err(|e| GeolocationError::unsupported(format!("{e:?}")))?;

        let mut on_position = on_position;
        let success = Closure::<dyn FnMut(web_sys::Position)>::wrap(Box::new(
            move |position: web_sys::Position| on_position(read_position(&position)),
        ));
        let mut on_error = on_error;
        let failure = Closure::<dyn FnMut(web_sys::PositionError)>::wrap(Box::new(
            move |err: web_sys::PositionError| {
                on_error(GeolocationError::new(
                    GeolocationErrorCode::from_code(err.code()),
                    err.message(),
                ));
            },
        ));

        let js_options = web_sys::PositionOptions::new();
        js_options.set_enable_high_accuracy(options.enable_high_accuracy);
        if let Some(maximum_age) = options.maximum_age {
            js_options.set_maximum_age(u32::try_from(maximum_age.as_millis()).unwrap_or(u32::MAX));
        }
        if let Some(timeout) = options.timeout {
            js_options.set_timeout(u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX));
        }

        let watch_id = geolocation
            .watch_position_with_error_callback_and_options(
                success.as_ref().unchecked_ref(),
                Some(failure.as_ref().unchecked_ref()),
                &js_options,
            )
            .map_err(|e| GeolocationError::unsupported(format!("watchPosition failed: {e:?}")))?;

        Ok(Teardown::new(move || {
            geolocation.clear_watch(watch_id);
            drop((success, failure));
        }))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (on_position, on_error, options);
        Ok(Teardown::noop())
    }
}

#[cfg(target_arch = "wasm32")]
fn read_position(position: &web_sys::Position) -> GeolocationPosition {
    let coords = position.coords();
    GeolocationPosition {
        latitude: coords.latitude(),
        longitude: coords.longitude(),
        accuracy: coords.accuracy(),
        altitude: coords.altitude(),
        altitude_accuracy: coords.altitude_accuracy(),
        heading: coords.heading(),
        speed: coords.speed(),
        timestamp: position.timestamp(),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn native_watch_is_inert() {
        let fired = Rc::new(Cell::new(false));
        let on_fix = fired.clone();
        let on_failure = fired.clone();

        let watch = managed_geolocation_watch(
            move |_| on_fix.set(true),
            move |_| on_failure.set(true),
            GeolocationOptions::default(),
        )
        .expect("watch");
        watch.run();

        assert!(!fired.get());
    }
}
