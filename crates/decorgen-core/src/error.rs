use thiserror::Error;

/// Fatal generation errors. Any of these aborts the whole request.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("unresolved type `{type_name}` referenced by {referrer}")]
    UnresolvedType { type_name: String, referrer: String },

    #[error("file `{0}` was requested for generation but is not part of the request")]
    UnknownFile(String),

    #[error("service `{0}` is declared more than once")]
    DuplicateService(String),

    #[error("method `{service}.{method}` is streaming; only unary methods can be decorated")]
    UnsupportedStreaming { service: String, method: String },

    #[error("invalid plugin parameter `{parameter}`: {message}")]
    InvalidParameter { parameter: String, message: String },

    #[error("failed to decode descriptor set: {0}")]
    Descriptor(String),

    #[error("failed to render generated source")]
    Render(#[from] std::fmt::Error),
}

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
