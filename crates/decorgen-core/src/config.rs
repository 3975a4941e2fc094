//! Plugin parameter parsing.
//!
//! protoc forwards everything before the `:` of `--decorate_out=<params>:<dir>`
//! as one string. Parameters are comma separated `key=value` pairs:
//!
//! | key            | value                              | default               |
//! |----------------|------------------------------------|-----------------------|
//! | `kind`         | `analytics`, `logging`, `service`  | `analytics`           |
//! | `sensitive`    | `:`-separated block-list tokens    | classifier default    |
//! | `runtime_path` | Rust path of `decorgen-runtime`    | `::decorgen_runtime`  |
//! | `extern_path`  | `.proto.pkg=::rust::path`          | `.google.protobuf`    |
//! | `comments`     | `true` / `false`                   | `true`                |
//!
//! `kind` and `extern_path` may repeat.

use crate::classifier::{FieldClassifier, DEFAULT_SENSITIVE_TOKENS};
use crate::error::{GenerateError, Result};

pub const DEFAULT_RUNTIME_PATH: &str = "::decorgen_runtime";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecoratorKind {
    Analytics,
    Logging,
    /// The service capability trait itself.
    Service,
}

impl DecoratorKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "analytics" => Some(Self::Analytics),
            "logging" => Some(Self::Logging),
            "service" => Some(Self::Service),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analytics => "analytics",
            Self::Logging => "logging",
            Self::Service => "service",
        }
    }

    /// Suffix replacing `.proto` in output file names.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::Analytics => ".analytics.rs",
            Self::Logging => ".logging.rs",
            Self::Service => ".service.rs",
        }
    }

    /// Suffix appended to the service name for the decorator type.
    pub fn type_suffix(&self) -> &'static str {
        match self {
            Self::Analytics => "Analytics",
            Self::Logging => "Logging",
            Self::Service => "",
        }
    }
}

/// Maps a proto package or type prefix onto an existing Rust path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternPath {
    pub proto_path: String,
    pub rust_path: String,
}

impl ExternPath {
    pub fn new(proto_path: impl Into<String>, rust_path: impl Into<String>) -> Self {
        Self {
            proto_path: proto_path.into(),
            rust_path: rust_path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub kinds: Vec<DecoratorKind>,
    pub classifier: FieldClassifier,
    pub runtime_path: String,
    pub extern_paths: Vec<ExternPath>,
    pub propagate_comments: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            kinds: vec![DecoratorKind::Analytics],
            classifier: FieldClassifier::default(),
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            extern_paths: default_extern_paths(),
            propagate_comments: true,
        }
    }
}

/// Well-known types resolve to `prost-types`, matching `prost-build`.
fn default_extern_paths() -> Vec<ExternPath> {
    vec![
        ExternPath::new(".google.protobuf", "::prost_types"),
        ExternPath::new(".google.protobuf.Empty", "()"),
    ]
}

impl GeneratorConfig {
    pub fn parse(parameter: Option<&str>) -> Result<Self> {
        let mut config = Self::default();
        let mut kinds: Vec<DecoratorKind> = Vec::new();

        for raw in parameter.unwrap_or("").split(',') {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let invalid = |message: &str| GenerateError::InvalidParameter {
                parameter: raw.to_string(),
                message: message.to_string(),
            };
            let (key, value) = raw
                .split_once('=')
                .ok_or_else(|| invalid("expected `key=value`"))?;

            match key.trim() {
                "kind" => {
                    let kind = DecoratorKind::parse(value.trim()).ok_or_else(|| {
                        invalid("expected one of `analytics`, `logging`, `service`")
                    })?;
                    if !kinds.contains(&kind) {
                        kinds.push(kind);
                    }
                }
                "sensitive" => {
                    let tokens: Vec<&str> =
                        value.split(':').map(str::trim).filter(|t| !t.is_empty()).collect();
                    if tokens.is_empty() {
                        return Err(invalid("the block-list needs at least one token"));
                    }
                    config.classifier = FieldClassifier::new(tokens);
                }
                "runtime_path" => {
                    let path = value.trim();
                    if path.is_empty() {
                        return Err(invalid("runtime path must not be empty"));
                    }
                    config.runtime_path = path.to_string();
                }
                "extern_path" => {
                    let (proto_path, rust_path) = value
                        .split_once('=')
                        .ok_or_else(|| invalid("expected `extern_path=.proto.path=::rust::path`"))?;
                    if !proto_path.starts_with('.') {
                        return Err(invalid("proto path must be fully qualified (leading `.`)"));
                    }
                    config
                        .extern_paths
                        .push(ExternPath::new(proto_path.trim(), rust_path.trim()));
                }
                "comments" => {
                    config.propagate_comments = match value.trim() {
                        "true" => true,
                        "false" => false,
                        _ => return Err(invalid("expected `true` or `false`")),
                    };
                }
                _ => return Err(invalid("unknown parameter")),
            }
        }

        if !kinds.is_empty() {
            config.kinds = kinds;
        }
        Ok(config)
    }

    pub fn sensitive_tokens_are_default(&self) -> bool {
        self.classifier.tokens().iter().map(String::as_str).eq(DEFAULT_SENSITIVE_TOKENS.iter().copied())
    }
}
