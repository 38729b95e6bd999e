//! Process-wide memoized capability checks.

use std::sync::OnceLock;

#[derive(Debug, Default)]
/// Boolean capability computed once at first use and held for the process lifetime.
///
/// Declared as a `static` next to the facility it guards:
///
/// ```rust
/// use platform_host::CapabilityProbe;
///
/// static CLIPBOARD: CapabilityProbe = CapabilityProbe::new();
///
/// assert!(CLIPBOARD.get_or_probe(|| true));
/// // Later probes are ignored; the first answer sticks.
/// assert!(CLIPBOARD.get_or_probe(|| false));
/// ```
pub struct CapabilityProbe {
    available: OnceLock<bool>,
}

impl CapabilityProbe {
    /// Creates an unprobed capability.
    pub const fn new() -> Self {
        Self {
            available: OnceLock::new(),
        }
    }

    /// Returns the memoized answer, running `probe` if this is the first call.
    pub fn get_or_probe(&self, probe: impl FnOnce() -> bool) -> bool {
        *self.available.get_or_init(probe)
    }

    /// Returns the memoized answer without probing.
    pub fn cached(&self) -> Option<bool> {
        self.available.get().copied()
    }
}
