//! Usage analytics for decorated calls.
//!
//! Every call through an analytics decorator produces exactly one [`Event`],
//! submitted after the delegate returns:
//!
//! - the event is named `"<Service> <Method>"`;
//! - a failed call appends `" Error"` to the name;
//! - the user id comes from the `x_forwarded_for` context field.
//!
//! A failed submission **replaces** the call's result with the submission
//! error. Callers therefore see telemetry failures even when the call itself
//! succeeded, and lose the delegate's own error when both fail.

use crate::context::{CallContext, FieldValue, Fields};
use crate::{BoxError, CallResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;

/// Context field holding the caller identity.
pub const USER_ID_FIELD: &str = "x_forwarded_for";

/// Suffix appended to the event name when the delegate fails.
pub const ERROR_SUFFIX: &str = " Error";

/// One analytics record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Fields::is_empty")]
    pub properties: Fields,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            event: name.into(),
            user_id: None,
            properties: Fields::new(),
        }
    }

    pub fn mark_failed(&mut self) {
        self.event.push_str(ERROR_SUFFIX);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("event sink rejected event: {0}")]
    Rejected(String),
    #[error("event sink unavailable: {0}")]
    Unavailable(String),
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Backend receiving analytics events.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn submit(&self, event: Event) -> Result<(), SinkError>;
}

#[async_trait]
impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    async fn submit(&self, event: Event) -> Result<(), SinkError> {
        (**self).submit(event).await
    }
}

#[async_trait]
impl<T: EventSink + ?Sized> EventSink for Box<T> {
    async fn submit(&self, event: Event) -> Result<(), SinkError> {
        (**self).submit(event).await
    }
}

/// Runs one decorated call and submits its analytics event.
pub async fn track<C, T, F>(
    client: &C,
    ctx: &CallContext,
    event_name: &str,
    call: F,
) -> CallResult<T>
where
    C: EventSink + ?Sized,
    F: Future<Output = CallResult<T>>,
{
    let mut event = Event::new(event_name);
    event.user_id = user_id(ctx, event_name);

    let mut result = call.await;
    if result.is_err() {
        event.mark_failed();
    }

    // TODO: surface both errors once downstream consumers sign off on a
    // combined error type; today the submission error wins.
    if let Err(submit_err) = client.submit(event).await {
        tracing::error!(error = %submit_err, event = event_name, "failed to submit analytics event");
        result = Err(BoxError::from(submit_err));
    }
    result
}

fn user_id(ctx: &CallContext, event_name: &str) -> Option<String> {
    match ctx.get(USER_ID_FIELD) {
        Some(FieldValue::Str(id)) => Some(id.clone()),
        Some(other) => {
            tracing::warn!(value = %other, event = event_name, "non-string x_forwarded_for in call context");
            None
        }
        None => {
            tracing::warn!(event = event_name, "missing x_forwarded_for in call context");
            None
        }
    }
}

/// Writes each event as one JSON line.
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    async fn submit(&self, event: Event) -> Result<(), SinkError> {
        let line = serde_json::to_string(&event)?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}
