//! # decorgen-core
//!
//! Turns protobuf service descriptors into Rust decorators for the service's
//! capability trait:
//!
//! - `<Service>Analytics` submits one analytics event per call;
//! - `<Service>Logging` enriches the call context and logs failures with a
//!   payload stripped of sensitive fields;
//! - the service trait itself, for crates that do not define it by hand.
//!
//! The pipeline is `descriptor` (lowering) → `registry` (name resolution) →
//! `emit` (rendering), driven per request by [`driver::generate`]. The
//! generated code depends on `decorgen-runtime`.

pub mod classifier;
pub mod config;
pub mod descriptor;
pub mod driver;
pub mod emit;
pub mod error;
pub mod naming;
pub mod registry;
pub mod writer;

pub use classifier::FieldClassifier;
pub use config::{DecoratorKind, ExternPath, GeneratorConfig};
pub use descriptor::{load_descriptor_set_json, FileDescriptor};
pub use driver::{generate, generate_response, GenerationRequest, GenerationResponse};
pub use emit::{GeneratedFile, GENERATOR_NAME, VERSION};
pub use error::{GenerateError, Result};
