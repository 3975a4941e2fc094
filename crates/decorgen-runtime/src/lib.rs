//! Run-time support for decorators emitted by `protoc-gen-decorate`.
//!
//! Generated code expects every proto service `S` to be exposed as an async
//! capability trait of this shape (the `kind=service` output renders it):
//!
//! ```ignore
//! #[decorgen_runtime::async_trait]
//! pub trait HelloWorld: Send + Sync {
//!     async fn speak(&self, ctx: &CallContext, input: Words) -> CallResult<Words>;
//! }
//! ```
//!
//! Decorators implement that same trait and wrap another implementer:
//!
//! - `HelloWorldAnalytics<N, C>` submits one [`analytics::Event`] per call to
//!   an [`analytics::EventSink`] (see [`analytics::track`]).
//! - `HelloWorldLogging<N, L>` enriches the [`CallContext`] and reports failed
//!   calls to a [`logging::LogSink`] (see [`logging::observe`]).
//!
//! Decorators hold no mutable state of their own, so one instance can serve
//! concurrent calls.

pub mod analytics;
pub mod context;
pub mod logging;

pub use async_trait::async_trait;
pub use context::{CallContext, FieldValue, Fields};

/// Error type carried through decorated calls.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type of every service trait method.
pub type CallResult<T> = Result<T, BoxError>;
