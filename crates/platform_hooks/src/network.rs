//! Network availability hook.

use leptos::*;
use platform_host::TeardownSet;
use platform_host_web::{
    can_use_dom, managed_window_event_listener, navigator_on_line, ListenerOptions,
};

/// Tracks whether the user agent reports network access.
///
/// `false` means the user agent is definitely offline; `true` only means it might be online, since
/// a machine can be connected to a network without reaching the internet. Without a DOM the
/// value stays `true`.
pub fn use_network_availability() -> Signal<bool> {
    let has_dom = can_use_dom();
    let (online, set_online) = create_signal(!has_dom || navigator_on_line());
    if !has_dom {
        return online.into();
    }

    let listeners: TeardownSet = [("offline", false), ("online", true)]
        .into_iter()
        .filter_map(|(event_type, available)| {
            managed_window_event_listener(
                event_type,
                move |_| set_online.set(available),
                ListenerOptions::default(),
            )
            .map_err(|err| logging::warn!("network `{event_type}` listener failed: {err}"))
            .ok()
        })
        .collect();
    on_cleanup(move || listeners.run());

    online.into()
}
