//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes apply identical redirect behavior: at most one navigation
//! per mount, never while the session is still restoring. Logout uses
//! a full page load so no protected view survives in memory.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::{GuardDecision, Navigator};

/// Full-page navigation through `window.location`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, target: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(target) {
                    log::warn!("navigation to {target} failed: {e:?}");
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = target;
        }
    }
}

/// Target to navigate to for `decision`, unless a redirect already fired.
fn pending_redirect(decision: &GuardDecision, already_redirected: bool) -> Option<&str> {
    match decision {
        GuardDecision::Redirect(target) if !already_redirected => Some(target.as_str()),
        _ => None,
    }
}

/// One-shot redirect for a single guard mount.
///
/// `redirected` latches on the first redirect; callers render nothing once
/// it is set.
#[derive(Clone)]
pub struct GuardRedirect<F> {
    redirected: RwSignal<bool>,
    navigate: F,
}

impl<F> GuardRedirect<F>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    pub fn new(navigate: F) -> Self {
        Self { redirected: RwSignal::new(false), navigate }
    }

    #[must_use]
    pub fn redirected(&self) -> RwSignal<bool> {
        self.redirected
    }

    /// Navigate for `decision` unless this mount already redirected.
    pub fn apply(&self, decision: &GuardDecision) {
        if let Some(target) = pending_redirect(decision, self.redirected.get_untracked()) {
            self.redirected.set(true);
            (self.navigate)(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    }
}

/// Re-apply `redirect` whenever `decision` changes.
pub fn install_guard_redirect<F>(decision: Memo<GuardDecision>, redirect: GuardRedirect<F>)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || redirect.apply(&decision.get()));
}
