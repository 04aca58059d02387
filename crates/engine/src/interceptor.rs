// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Navigation interceptor
//!
//! A decorator over a [`Navigator`]. While installed and guarding, every
//! navigation primitive and every internal link click is redirected to a
//! single attempt handler together with a one-shot [`Proceed`].

use dg_adapters::Navigator;
use dg_core::{Destination, LinkDisposition, LinkTarget};
use std::sync::{Arc, Mutex};

/// One-shot capability to perform a captured navigation
///
/// Running it consumes it. Dropping it discards the navigation.
pub struct Proceed {
    action: Box<dyn FnOnce() + Send>,
}

impl Proceed {
    pub(crate) fn new(action: impl FnOnce() + Send + 'static) -> Self {
        Self {
            action: Box::new(action),
        }
    }

    /// Perform the original navigation on the wrapped navigator
    pub fn run(self) {
        (self.action)()
    }
}

impl std::fmt::Debug for Proceed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proceed").finish_non_exhaustive()
    }
}

type AttemptHandler = Arc<dyn Fn(Destination, Proceed) + Send + Sync>;

#[derive(Default)]
struct InterceptorState {
    installed: bool,
    guarding: bool,
    handler: Option<AttemptHandler>,
}

enum Route {
    PassThrough,
    Capture(AttemptHandler),
}

/// Guarding decorator over a navigator
pub struct Interceptor<N> {
    inner: Arc<N>,
    state: Arc<Mutex<InterceptorState>>,
}

impl<N> Clone for Interceptor<N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            state: Arc::clone(&self.state),
        }
    }
}

impl<N: Navigator> Interceptor<N> {
    /// Wrap `inner`; starts uninstalled and not guarding
    pub fn new(inner: N) -> Self {
        Self {
            inner: Arc::new(inner),
            state: Arc::new(Mutex::new(InterceptorState::default())),
        }
    }

    /// Register the attempt handler, replacing any previous one
    pub fn on_attempt<F>(&self, handler: F)
    where
        F: Fn(Destination, Proceed) + Send + Sync + 'static,
    {
        self.lock().handler = Some(Arc::new(handler));
    }

    pub fn install(&self) {
        self.lock().installed = true;
        tracing::debug!("interceptor installed");
    }

    /// Restore pass-through behaviour; safe to call repeatedly
    pub fn uninstall(&self) {
        let mut state = self.lock();
        if state.installed {
            state.installed = false;
            state.guarding = false;
            tracing::debug!("interceptor uninstalled");
        }
    }

    #[cfg(test)]
    pub(crate) fn is_installed(&self) -> bool {
        self.lock().installed
    }

    pub fn enable(&self, guarding: bool) {
        self.lock().guarding = guarding;
        tracing::debug!(guarding, "interceptor guarding changed");
    }

    /// True while attempts are being captured
    pub fn is_guarding(&self) -> bool {
        let state = self.lock();
        state.installed && state.guarding
    }

    /// The wrapped navigator
    pub fn inner(&self) -> &N {
        &self.inner
    }

    /// Offer a link click to the interceptor
    ///
    /// External links are never captured. `Intercepted` means the caller
    /// must suppress its default action; the navigation now belongs to the
    /// attempt handler and proceeds as a push.
    pub fn click(&self, link: &LinkTarget) -> LinkDisposition {
        if link.is_external() {
            return LinkDisposition::PassThrough;
        }
        match self.route() {
            Route::PassThrough => LinkDisposition::PassThrough,
            Route::Capture(handler) => {
                self.capture(handler, Destination::Link(link.href.clone()));
                LinkDisposition::Intercepted
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InterceptorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn route(&self) -> Route {
        let state = self.lock();
        if !(state.installed && state.guarding) {
            return Route::PassThrough;
        }
        match &state.handler {
            Some(handler) => Route::Capture(Arc::clone(handler)),
            None => {
                tracing::warn!("guarding without an attempt handler, letting navigation through");
                Route::PassThrough
            }
        }
    }

    // Handler runs with no lock held so it may navigate or re-enter
    fn capture(&self, handler: AttemptHandler, destination: Destination) {
        tracing::debug!(%destination, "navigation captured");
        let inner = Arc::clone(&self.inner);
        let target = destination.clone();
        let proceed = Proceed::new(move || inner.navigate(&target));
        handler(destination, proceed);
    }

    fn intercept(&self, destination: Destination) {
        match self.route() {
            Route::PassThrough => self.inner.navigate(&destination),
            Route::Capture(handler) => self.capture(handler, destination),
        }
    }
}

impl<N: Navigator> Navigator for Interceptor<N> {
    fn push(&self, to: &str) {
        self.intercept(Destination::Push(to.to_string()));
    }

    fn replace(&self, to: &str) {
        self.intercept(Destination::Replace(to.to_string()));
    }

    fn back(&self) {
        self.intercept(Destination::Back);
    }

    fn forward(&self) {
        self.intercept(Destination::Forward);
    }
}

#[cfg(test)]
#[path = "interceptor_tests.rs"]
mod tests;
