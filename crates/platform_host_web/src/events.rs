//! Event listener and timer subscriptions returned as [`Teardown`] handles.
//!
//! Each function attaches exactly one browser subscription and hands back the matching
//! destructor. On non-wasm targets nothing is attached and a no-op handle is returned.

use std::time::Duration;

use platform_host::Teardown;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Options forwarded to `addEventListener`.
pub struct ListenerOptions {
    /// Dispatch during the capture phase.
    pub capture: bool,
    /// Remove the listener after the first event.
    pub once: bool,
    /// Promise not to call `preventDefault`.
    pub passive: bool,
}

/// Attaches `callback` for `event_type` on `target` and returns the handle that removes it.
///
/// # Errors
///
/// Returns an error when `addEventListener` throws.
pub fn managed_event_listener(
    target: &web_sys::EventTarget,
    event_type: &str,
    callback: impl FnMut(web_sys::Event) + 'static,
    options: ListenerOptions,
) -> Result<Teardown, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::{closure::Closure, JsCast};

        let closure = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(callback));
        let js_options = web_sys::AddEventListenerOptions::new();
        js_options.set_capture(options.capture);
        js_options.set_once(options.once);
        js_options.set_passive(options.passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event_type,
                closure.as_ref().unchecked_ref(),
                &js_options,
            )
            .map_err(|e| format!("addEventListener(`{event_type}`) failed: {e:?}"))?;

        let target = target.clone();
        let event_type = event_type.to_string();
        Ok(Teardown::new(move || {
            let _ = target.remove_event_listener_with_callback_and_bool(
                &event_type,
                closure.as_ref().unchecked_ref(),
                options.capture,
            );
            drop(closure);
        }))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (target, event_type, callback, options);
        Ok(Teardown::noop())
    }
}

/// Attaches `callback` for `event_type` on `window`.
///
/// # Errors
///
/// Returns an error when no window exists or `addEventListener` throws.
pub fn managed_window_event_listener(
    event_type: &str,
    callback: impl FnMut(web_sys::Event) + 'static,
    options: ListenerOptions,
) -> Result<Teardown, String> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        managed_event_listener(&window, event_type, callback, options)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (event_type, callback, options);
        Ok(Teardown::noop())
    }
}

/// Calls `callback` every `delay` until the returned handle runs.
///
/// # Errors
///
/// Returns an error when no window exists or `setInterval` throws.
pub fn managed_interval(
    callback: impl FnMut() + 'static,
    delay: Duration,
) -> Result<Teardown, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::{closure::Closure, JsCast};

        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let closure = Closure::<dyn FnMut()>::wrap(Box::new(callback));
        let timeout_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timeout_ms,
            )
            .map_err(|e| format!("setInterval failed: {e:?}"))?;

        Ok(Teardown::new(move || {
            window.clear_interval_with_handle(handle);
            drop(closure);
        }))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (callback, delay);
        Ok(Teardown::noop())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn native_subscriptions_are_inert() {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let listener = managed_window_event_listener(
            "online",
            move |_| flag.set(true),
            ListenerOptions::default(),
        )
        .expect("listener");
        let flag = fired.clone();
        let interval =
            managed_interval(move || flag.set(true), Duration::from_millis(10)).expect("interval");

        listener.run();
        interval.run();
        assert!(!fired.get());
    }
}
