//! Geolocation hook.

use leptos::*;
use platform_host::{GeolocationError, GeolocationOptions, GeolocationPosition};
use platform_host_web::managed_geolocation_watch;

use crate::subscription::use_reactive_subscription;

/// Latest reading of a geolocation watch.
pub type GeolocationReading = Option<Result<GeolocationPosition, GeolocationError>>;

/// Watches the device position while the owning scope is alive.
///
/// The signal is `None` until the first fix or failure arrives, which never happens without a
/// DOM. When reactive `options` change, the running watch is cleared before a new one starts.
/// Failures, including a missing geolocation facility, are logged and surfaced as `Some(Err(_))`.
pub fn use_geolocation(
    options: impl Into<MaybeSignal<GeolocationOptions>>,
) -> Signal<GeolocationReading> {
    let (reading, set_reading) = create_signal(None);
    let options = options.into();

    use_reactive_subscription(
        MaybeSignal::derive(move || Some(options.get())),
        move |options: GeolocationOptions| {
            let report = move |err: GeolocationError| {
                logging::warn!("geolocation watch failed: {err}");
                set_reading.set(Some(Err(err)));
            };
            managed_geolocation_watch(
                move |position| set_reading.set(Some(Ok(position))),
                report,
                options,
            )
            .map_err(report)
            .ok()
        },
    );

    reading.into()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn without_dom_never_reports_a_reading() {
        let _ = create_runtime();
        let position = use_geolocation(GeolocationOptions::default());
        assert_eq!(position.get_untracked(), None);
    }

    #[test]
    fn changing_options_without_dom_stays_empty() {
        let _ = create_runtime();
        let (options, set_options) = create_signal(GeolocationOptions::default());

        let position = use_geolocation(options);
        set_options.set(GeolocationOptions {
            enable_high_accuracy: true,
            maximum_age: Some(Duration::from_secs(30)),
            timeout: Some(Duration::from_secs(5)),
        });

        assert_eq!(position.get_untracked(), None);
    }
}
