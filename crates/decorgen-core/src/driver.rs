//! Request-level generation: parameters, validation, registry, emission.
//!
//! A request either yields every output file or none: the first error
//! aborts generation and is reported through `CodeGeneratorResponse.error`.

use crate::config::GeneratorConfig;
use crate::descriptor::FileDescriptor;
use crate::emit::{Emitter, GeneratedFile};
use crate::error::{GenerateError, Result};
use crate::registry::Registry;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use std::collections::HashSet;

/// Everything a generation run reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Every file of the request, dependencies included.
    pub files: Vec<FileDescriptor>,
    /// Names of the files protoc asked us to generate for, in request order.
    pub files_to_generate: Vec<String>,
    /// Raw plugin parameter, if any.
    pub parameter: Option<String>,
}

impl From<&CodeGeneratorRequest> for GenerationRequest {
    fn from(request: &CodeGeneratorRequest) -> Self {
        Self {
            files: request.proto_file.iter().map(FileDescriptor::from_proto).collect(),
            files_to_generate: request.file_to_generate.clone(),
            parameter: request.parameter.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResponse {
    pub files: Vec<GeneratedFile>,
}

/// Generates decorators for every requested file and every configured kind.
///
/// Output order is request order, then kind order from the parameter. A file
/// named twice in `files_to_generate` is generated once.
pub fn generate(request: &GenerationRequest) -> Result<GenerationResponse> {
    let config = GeneratorConfig::parse(request.parameter.as_deref())?;

    let known: HashSet<&str> = request.files.iter().map(|f| f.name.as_str()).collect();
    if let Some(missing) = request
        .files_to_generate
        .iter()
        .find(|name| !known.contains(name.as_str()))
    {
        return Err(GenerateError::UnknownFile(missing.clone()));
    }

    let registry = Registry::build(&request.files, &config.extern_paths)?;
    let emitter = Emitter::new(&registry, &config);

    let mut files = Vec::new();
    let mut requested = HashSet::new();
    for name in &request.files_to_generate {
        if !requested.insert(name.as_str()) {
            tracing::debug!(file = %name, "requested more than once, generating once");
            continue;
        }
        let Some(file) = request.files.iter().find(|f| &f.name == name) else {
            continue;
        };
        if !file.has_services() {
            tracing::debug!(file = %file.name, "no services, nothing to decorate");
            continue;
        }
        for kind in &config.kinds {
            if let Some(generated) = emitter.emit_file(file, *kind)? {
                files.push(generated);
            }
        }
    }

    tracing::info!(
        requested = request.files_to_generate.len(),
        generated = files.len(),
        default_sensitive_tokens = config.sensitive_tokens_are_default(),
        "generation finished"
    );
    Ok(GenerationResponse { files })
}

/// The protoc plugin contract: errors become `error`, with no files.
pub fn generate_response(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let supported_features = Some(Feature::Proto3Optional as u64);
    match generate(&GenerationRequest::from(request)) {
        Ok(response) => CodeGeneratorResponse {
            supported_features,
            file: response
                .files
                .into_iter()
                .map(|f| File {
                    name: Some(f.name),
                    content: Some(f.content),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        },
        Err(err) => {
            tracing::error!(error = %err, "generation failed");
            CodeGeneratorResponse {
                error: Some(err.to_string()),
                supported_features,
                ..Default::default()
            }
        }
    }
}
