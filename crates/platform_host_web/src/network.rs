//! Network availability as reported by the user agent.

/// Returns `true` when a DOM `window` is reachable from this context.
pub fn can_use_dom() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().is_some()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}

/// Reads `navigator.onLine`.
///
/// `false` means the user agent is definitely offline; `true` only means it might be online.
/// Without a DOM the answer is `true`.
pub fn navigator_on_line() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .map(|window| window.navigator().on_line())
            .unwrap_or(true)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        true
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn without_dom_reports_possibly_online() {
        assert!(!can_use_dom());
        assert!(navigator_on_line());
    }
}
