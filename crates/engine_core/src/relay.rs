//! Forwarding of harness calls into an adapter's `notify` hook.
//!
//! A harness written against "a real engine process" calls things like
//! `ping`, `configure` or `quit` on it. Homemade adapters have no such
//! process, so they hand out a [`NotificationRelay`] instead: every call made
//! on it becomes exactly one `notify(name, args)` on the owning adapter, and
//! nothing the adapter does in response can fail the caller.

use serde_json::Value;
use tracing::debug;

use crate::adapter::SearchAdapter;

/// Harness events with a well-known name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarnessEvent {
    Ping,
    Configure,
    SendOpponentInformation,
    SendGameResult,
    FirstSearch,
    TimeControl,
    Quit,
}

const HARNESS_EVENTS: &[(&str, HarnessEvent)] = &[
    ("ping", HarnessEvent::Ping),
    ("configure", HarnessEvent::Configure),
    ("send_opponent_information", HarnessEvent::SendOpponentInformation),
    ("send_game_result", HarnessEvent::SendGameResult),
    ("first_search", HarnessEvent::FirstSearch),
    ("time_control", HarnessEvent::TimeControl),
    ("quit", HarnessEvent::Quit),
];

impl HarnessEvent {
    pub fn from_name(name: &str) -> Option<HarnessEvent> {
        HARNESS_EVENTS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|&(_, event)| event)
    }

    pub fn as_str(self) -> &'static str {
        HARNESS_EVENTS
            .iter()
            .find(|(_, event)| *event == self)
            .map(|&(name, _)| name)
            .unwrap_or("unknown")
    }
}

/// Stand-in engine object that forwards every call to its owner's `notify`.
pub struct NotificationRelay<'a, A: SearchAdapter + ?Sized> {
    owner: &'a mut A,
    name: Option<String>,
}

impl<'a, A: SearchAdapter + ?Sized> NotificationRelay<'a, A> {
    pub fn new(owner: &'a mut A) -> Self {
        Self { owner, name: None }
    }

    pub fn named(owner: &'a mut A, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: Some(name.into()),
        }
    }

    /// Display name: the one given at construction, else the owner's.
    pub fn id(&self) -> &str {
        match &self.name {
            Some(name) => name.as_str(),
            None => self.owner.name(),
        }
    }

    /// Forward an arbitrary named call. Never fails.
    pub fn call(&mut self, method: &str, args: &[Value]) {
        if let Err(err) = self.owner.notify(method, args) {
            debug!(engine = self.id(), method, error = %err, "notification failed, ignoring");
        }
    }

    pub fn dispatch(&mut self, event: HarnessEvent, args: &[Value]) {
        self.call(event.as_str(), args);
    }

    pub fn ping(&mut self) {
        self.dispatch(HarnessEvent::Ping, &[]);
    }

    pub fn configure(&mut self, options: Value) {
        self.dispatch(HarnessEvent::Configure, &[options]);
    }

    pub fn send_opponent_information(&mut self, opponent: Value) {
        self.dispatch(HarnessEvent::SendOpponentInformation, &[opponent]);
    }

    pub fn send_game_result(&mut self, result: Value) {
        self.dispatch(HarnessEvent::SendGameResult, &[result]);
    }

    pub fn quit(&mut self) {
        self.dispatch(HarnessEvent::Quit, &[]);
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod relay_tests;
