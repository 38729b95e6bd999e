//! Interval hook with a reactive, pausable delay.

use std::time::Duration;

use leptos::*;
use platform_host_web::managed_interval;

use crate::{subscription::use_reactive_subscription, use_event_callback};

/// Calls `callback` every `delay` while the owning scope is alive.
///
/// A `None` delay pauses the interval. When a reactive delay changes, the running interval is
/// cleared before the next one starts; the callback itself is read through
/// [`crate::EventCallback`], so the latest closure always runs.
pub fn use_interval(
    callback: impl Fn() + 'static,
    delay: impl Into<MaybeSignal<Option<Duration>>>,
) -> crate::EventCallback<()> {
    let callback = use_event_callback(move |()| callback());

    use_reactive_subscription(delay.into(), move |delay| {
        managed_interval(move || callback.call(()), delay)
            .map_err(|err| logging::warn!("interval setup failed: {err}"))
            .ok()
    });

    callback
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn reactive_delay_changes_without_dom_never_fire() {
        let _ = create_runtime();
        let ticks = Rc::new(Cell::new(0));
        let (delay, set_delay) = create_signal(Some(Duration::from_millis(5)));

        let counter = ticks.clone();
        use_interval(move || counter.set(counter.get() + 1), delay);
        set_delay.set(None);
        set_delay.set(Some(Duration::from_secs(1)));
        use_interval(|| {}, None::<Duration>);

        assert_eq!(ticks.get(), 0);
    }

    #[test]
    fn returned_handle_runs_the_callback() {
        let _ = create_runtime();
        let ticks = Rc::new(Cell::new(0));

        let counter = ticks.clone();
        let tick = use_interval(move || counter.set(counter.get() + 1), None::<Duration>);
        tick.call(());

        assert_eq!(ticks.get(), 1);
    }
}
