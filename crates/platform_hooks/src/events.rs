//! Event listener hooks and the stable callback wrapper they share.

use std::rc::Rc;

use leptos::*;
use platform_host_web::{managed_event_listener, ListenerOptions};
use wasm_bindgen::JsCast;

use crate::subscription::use_reactive_subscription;

/// Stable handle that always invokes the most recently installed closure.
///
/// Subscriptions hold the handle rather than the closure, so swapping the closure with
/// [`EventCallback::replace`] takes effect without detaching and re-attaching anything.
pub struct EventCallback<In: 'static> {
    current: StoredValue<Rc<dyn Fn(In)>>,
}

impl<In: 'static> Clone for EventCallback<In> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<In: 'static> Copy for EventCallback<In> {}

impl<In: 'static> EventCallback<In> {
    /// Invokes the current closure. Does nothing once the owner is disposed.
    pub fn call(&self, input: In) {
        // Cloned out first so the closure may replace itself.
        if let Some(callback) = self.current.try_with_value(Rc::clone) {
            callback(input);
        }
    }

    /// Installs `callback` for every later [`EventCallback::call`].
    pub fn replace(&self, callback: impl Fn(In) + 'static) {
        self.current.set_value(Rc::new(callback));
    }
}

/// Wraps `callback` in an [`EventCallback`] owned by the current reactive scope.
pub fn use_event_callback<In: 'static>(callback: impl Fn(In) + 'static) -> EventCallback<In> {
    EventCallback {
        current: store_value(Rc::new(callback) as Rc<dyn Fn(In)>),
    }
}

/// Listens for `event_type` on `target` until the owning scope is disposed.
///
/// `target` may be reactive: when it changes, the listener is removed from the previous target
/// before it is attached to the new one, so an element that mounts after the component body ran
/// is picked up once its signal fills in. `None` targets and non-wasm builds attach nothing. The
/// returned handle can swap the callback without re-attaching.
pub fn use_event_listener(
    target: impl Into<MaybeSignal<Option<web_sys::EventTarget>>>,
    event_type: impl Into<String>,
    callback: impl Fn(web_sys::Event) + 'static,
    options: ListenerOptions,
) -> EventCallback<web_sys::Event> {
    let callback = use_event_callback(callback);
    let event_type = event_type.into();

    use_reactive_subscription(target.into(), move |target| {
        managed_event_listener(&target, &event_type, move |ev| callback.call(ev), options)
            .map_err(|err| logging::warn!("event listener `{event_type}` setup failed: {err}"))
            .ok()
    });
    callback
}

/// Listens for a typed `window` event until the owning scope is disposed.
pub fn use_window_event_listener<E>(
    event: E,
    callback: impl Fn(E::EventType) + 'static,
) -> EventCallback<E::EventType>
where
    E: ev::EventDescriptor + 'static,
    E::EventType: JsCast + 'static,
{
    let callback = use_event_callback(callback);

    #[cfg(target_arch = "wasm32")]
    {
        let listener = window_event_listener(event, move |ev| callback.call(ev));
        on_cleanup(move || listener.remove());
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = event;
    }

    callback
}
