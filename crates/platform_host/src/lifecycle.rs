//! Destructor handles for subscriptions bound to a component's lifetime.

use std::fmt;

/// Runs a destructor at most once: on [`Teardown::run`] or on drop, whichever comes first.
#[must_use = "dropping a Teardown runs it immediately"]
pub struct Teardown {
    destructor: Option<Box<dyn FnOnce()>>,
}

impl Teardown {
    /// Wraps `destructor`.
    pub fn new(destructor: impl FnOnce() + 'static) -> Self {
        Self {
            destructor: Some(Box::new(destructor)),
        }
    }

    /// Teardown with nothing to undo, used where the platform facility is absent.
    pub fn noop() -> Self {
        Self { destructor: None }
    }

    /// Runs the destructor now.
    pub fn run(mut self) {
        self.fire();
    }

    /// Drops the handle without running the destructor.
    pub fn forget(mut self) {
        self.destructor = None;
    }

    fn fire(&mut self) {
        if let Some(destructor) = self.destructor.take() {
            destructor();
        }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.fire();
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Teardown")
            .field("pending", &self.destructor.is_some())
            .finish()
    }
}

#[derive(Debug, Default)]
/// Ordered group of [`Teardown`]s run together.
pub struct TeardownSet {
    handles: Vec<Teardown>,
}

impl TeardownSet {
    /// Adds a handle to the group.
    pub fn push(&mut self, teardown: Teardown) {
        self.handles.push(teardown);
    }

    /// Number of pending handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Runs every handle in insertion order.
    pub fn run(self) {
        for teardown in self.handles {
            teardown.run();
        }
    }
}

impl FromIterator<Teardown> for TeardownSet {
    fn from_iter<I: IntoIterator<Item = Teardown>>(iter: I) -> Self {
        Self {
            handles: iter.into_iter().collect(),
        }
    }
}

impl Extend<Teardown> for TeardownSet {
    fn extend<I: IntoIterator<Item = Teardown>>(&mut self, iter: I) {
        self.handles.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Teardown) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let make = move |name: &'static str| {
            let sink = sink.clone();
            Teardown::new(move || sink.borrow_mut().push(name))
        };
        (log, make)
    }

    #[test]
    fn run_fires_once_and_drop_does_not_repeat() {
        let (log, make) = recorder();
        make("listener").run();
        assert_eq!(*log.borrow(), vec!["listener"]);
    }

    #[test]
    fn drop_fires_pending_destructor() {
        let (log, make) = recorder();
        {
            let _guard = make("interval");
        }
        assert_eq!(*log.borrow(), vec!["interval"]);
    }

    #[test]
    fn forget_skips_destructor() {
        let (log, make) = recorder();
        make("listener").forget();
        Teardown::noop().run();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn set_runs_in_insertion_order() {
        let (log, make) = recorder();
        let mut set: TeardownSet = [make("offline"), make("online")].into_iter().collect();
        set.push(make("interval"));
        assert_eq!(set.len(), 3);

        set.run();
        assert_eq!(*log.borrow(), vec!["offline", "online", "interval"]);
    }
}
