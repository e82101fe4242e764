//! Per-widget request state: one lookup in flight, stale completions dropped.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;

use crate::error::LookupError;

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

/// Identifies one in-flight lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// State machine for a single widget.
///
/// Every `begin` issues a ticket carrying a monotonically increasing token.
/// `complete` only applies a result whose ticket matches the latest token, so
/// a lookup abandoned by `reset` can never overwrite a newer result.
#[derive(Debug)]
pub struct WidgetController<T> {
    state: WidgetState<T>,
    token: u64,
}

impl<T> Default for WidgetController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WidgetController<T> {
    pub fn new() -> Self {
        Self {
            state: WidgetState::Idle,
            token: 0,
        }
    }

    pub fn state(&self) -> &WidgetState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, WidgetState::Loading)
    }

    /// Moves to `Loading`. Returns `None` while a lookup is already in flight.
    pub fn begin(&mut self) -> Option<Ticket> {
        if self.is_loading() {
            return None;
        }
        self.token += 1;
        self.state = WidgetState::Loading;
        Some(Ticket(self.token))
    }

    /// Local validation failed: straight to `Error`, no lookup issued.
    /// Ignored while loading, like any other submission.
    pub fn reject(&mut self, error: &LookupError) -> bool {
        if self.is_loading() {
            return false;
        }
        self.token += 1;
        self.state = WidgetState::Error(error.to_string());
        true
    }

    /// Applies a finished lookup. Returns `false` when the ticket is stale.
    pub fn complete(&mut self, ticket: Ticket, result: Result<T, LookupError>) -> bool {
        if ticket.0 != self.token {
            tracing::debug!(
                stale = ticket.0,
                current = self.token,
                "discarding stale lookup result"
            );
            return false;
        }
        self.state = match result {
            Ok(value) => WidgetState::Success(value),
            Err(e) => WidgetState::Error(e.to_string()),
        };
        true
    }

    /// The lookup behind `ticket` was dropped before it finished. Back to
    /// `Idle` if that ticket is still current, otherwise nothing changes.
    pub fn abandon(&mut self, ticket: Ticket) -> bool {
        if ticket.0 != self.token || !self.is_loading() {
            return false;
        }
        self.token += 1;
        self.state = WidgetState::Idle;
        true
    }

    /// Navigating away: back to `Idle`, outstanding tickets become stale.
    /// No server surface navigates away today; this is for embedding UIs.
    pub fn reset(&mut self) {
        self.token += 1;
        self.state = WidgetState::Idle;
    }
}

/// What happened to a submission
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    /// The result (or validation error) is now the displayed state
    Applied(Result<T, LookupError>),
    /// A lookup was already in flight; nothing was started
    Busy,
    /// The lookup finished after the widget moved on
    Discarded,
}

/// Releases the widget if a `submit` future is dropped mid-lookup
struct InFlight<'a, T> {
    inner: &'a Mutex<WidgetController<T>>,
    ticket: Option<Ticket>,
}

impl<T> InFlight<'_, T> {
    fn finish(mut self, result: Result<T, LookupError>) -> bool {
        match self.ticket.take() {
            Some(ticket) => self.inner.lock().complete(ticket, result),
            None => false,
        }
    }
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            if self.inner.lock().abandon(ticket) {
                tracing::debug!(ticket = ticket.0, "lookup dropped before completion");
            }
        }
    }
}

/// Shared handle to a widget controller
#[derive(Debug)]
pub struct Widget<T> {
    inner: Arc<Mutex<WidgetController<T>>>,
}

impl<T> Clone for Widget<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for Widget<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Widget<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(WidgetController::new())),
        }
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    pub fn is_loading(&self) -> bool {
        self.inner.lock().is_loading()
    }
}

impl<T: Clone> Widget<T> {
    pub fn snapshot(&self) -> WidgetState<T> {
        self.inner.lock().state().clone()
    }

    /// Validates, runs the lookup and records the outcome.
    ///
    /// `input` is the result of local validation; an error there never
    /// reaches `lookup`.
    pub async fn submit<I, F, Fut>(&self, input: Result<I, LookupError>, lookup: F) -> Submission<T>
    where
        F: FnOnce(I) -> Fut,
        Fut: Future<Output = Result<T, LookupError>>,
    {
        let input = match input {
            Ok(input) => input,
            Err(e) => {
                if !self.inner.lock().reject(&e) {
                    return Submission::Busy;
                }
                return Submission::Applied(Err(e));
            }
        };

        let Some(ticket) = self.inner.lock().begin() else {
            return Submission::Busy;
        };
        let in_flight = InFlight {
            inner: &self.inner,
            ticket: Some(ticket),
        };

        let result = lookup(input).await;

        if in_flight.finish(result.clone()) {
            Submission::Applied(result)
        } else {
            Submission::Discarded
        }
    }
}
