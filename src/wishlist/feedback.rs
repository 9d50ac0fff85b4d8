//! User feedback and confirmation.
//!
//! `FeedbackSink` is the fire-and-forget "show message" channel (a toast in a
//! browser, a log line in the CLI). `Confirm` is the human-in-the-loop gate
//! used before destructive operations. Both are injected into the store.

use crate::shared::error::FeedbackError;
use std::fmt::Debug;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackVariant {
    Default,
    Success,
    Info,
    Destructive,
}

/// One user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub title: String,
    pub description: String,
    pub variant: FeedbackVariant,
}

impl Feedback {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        variant: FeedbackVariant,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, FeedbackVariant::Success)
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, FeedbackVariant::Info)
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, FeedbackVariant::Destructive)
    }
}

pub trait FeedbackSink: Send + Sync + Debug {
    fn show(&self, feedback: &Feedback) -> Result<(), FeedbackError>;
}

/// Deliver a message; a failing channel is logged and otherwise ignored
pub(crate) fn notify(sink: &dyn FeedbackSink, feedback: Feedback) {
    if let Err(e) = sink.show(&feedback) {
        tracing::warn!("[WISHLIST] Dropped feedback '{}': {}", feedback.title, e);
    }
}

/// Keeps every message; used by tests and hosts that render later
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    messages: Mutex<Vec<Feedback>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Feedback> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Feedback> {
        self.messages.lock().ok().and_then(|m| m.last().cloned())
    }

    pub fn count(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.clear();
        }
    }
}

impl FeedbackSink for RecordingFeedback {
    fn show(&self, feedback: &Feedback) -> Result<(), FeedbackError> {
        self.messages
            .lock()
            .map_err(|_| FeedbackError::new("recording lock poisoned"))?
            .push(feedback.clone());
        Ok(())
    }
}

/// Renders feedback as log lines
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFeedback;

impl FeedbackSink for TracingFeedback {
    fn show(&self, feedback: &Feedback) -> Result<(), FeedbackError> {
        match feedback.variant {
            FeedbackVariant::Destructive => {
                tracing::warn!("{}: {}", feedback.title, feedback.description)
            }
            _ => tracing::info!("{}: {}", feedback.title, feedback.description),
        }
        Ok(())
    }
}

/// Human-in-the-loop confirmation
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}
