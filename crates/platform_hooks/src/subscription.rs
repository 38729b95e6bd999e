//! Subscriptions that follow a reactive source.

use std::{cell::RefCell, rc::Rc};

use leptos::*;
use platform_host::Teardown;

/// Keeps one subscription alive for the current value of `source`.
///
/// Whenever `source` changes, the previous subscription is torn down before `subscribe` runs
/// for the new value; `None` leaves nothing subscribed. The active subscription is torn down
/// when the owning scope is disposed. `subscribe` runs untracked.
pub(crate) fn use_reactive_subscription<T>(
    source: MaybeSignal<Option<T>>,
    subscribe: impl Fn(T) -> Option<Teardown> + 'static,
) where
    T: Clone + 'static,
{
    let active: Rc<RefCell<Option<Teardown>>> = Rc::new(RefCell::new(None));

    create_effect({
        let active = active.clone();
        move |_| {
            let next = source.get();
            let previous = active.borrow_mut().take();
            if let Some(previous) = previous {
                previous.run();
            }
            let current = untrack(|| next.and_then(&subscribe));
            *active.borrow_mut() = current;
        }
    });

    on_cleanup(move || {
        let current = active.borrow_mut().take();
        if let Some(current) = current {
            current.run();
        }
    });
}
