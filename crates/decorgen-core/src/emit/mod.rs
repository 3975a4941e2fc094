//! Decorator planning and rendering.
//!
//! Emission of one file happens in two phases:
//!
//! 1. every service of the file is planned into a [`DecoratorSpec`], which
//!    resolves all method input/output types through the [`Registry`];
//! 2. the specs are rendered into a single source text.
//!
//! Any planning failure aborts the file before a single line is rendered.

mod analytics;
mod logging;
mod service;

use crate::config::{DecoratorKind, GeneratorConfig};
use crate::descriptor::{FileDescriptor, ServiceDescriptor};
use crate::error::{GenerateError, Result};
use crate::naming::{output_file_name, snake_ident, type_ident};
use crate::registry::{qualify, Registry};
use crate::writer::SourceWriter;

pub const GENERATOR_NAME: &str = "protoc-gen-decorate";
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// One output file of a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub content: String,
}

/// A method of the decorated service, with its types resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodPlan {
    pub proto_name: String,
    pub rust_name: String,
    pub input_type: String,
    pub output_type: String,
    pub input_path: String,
    pub output_path: String,
    pub comments: Option<String>,
}

/// Everything needed to render one decorator (or service trait).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratorSpec {
    pub kind: DecoratorKind,
    pub package: String,
    pub service_name: String,
    /// Name of the capability trait the decorator implements.
    pub trait_name: String,
    /// `<Service><Kind>`, e.g. `HelloWorldAnalytics`.
    pub decorator_name: String,
    pub comments: Option<String>,
    /// Declaration order of the service.
    pub methods: Vec<MethodPlan>,
}

impl DecoratorSpec {
    pub fn plan(
        file: &FileDescriptor,
        service: &ServiceDescriptor,
        registry: &Registry<'_>,
        kind: DecoratorKind,
    ) -> Result<Self> {
        let qualified = qualify(&file.package, &service.name);
        let trait_name = type_ident(&service.name);

        let methods = service
            .methods
            .iter()
            .map(|method| {
                if method.client_streaming || method.server_streaming {
                    return Err(GenerateError::UnsupportedStreaming {
                        service: service.name.clone(),
                        method: method.name.clone(),
                    });
                }
                let referrer = || format!("method `{}.{}`", qualified.trim_start_matches('.'), method.name);
                let input_path = registry
                    .resolve(&method.input_type, &file.package)
                    .map_err(|e| e.with_referrer(referrer()))?;
                let output_path = registry
                    .resolve(&method.output_type, &file.package)
                    .map_err(|e| e.with_referrer(referrer()))?;

                Ok(MethodPlan {
                    proto_name: method.name.clone(),
                    rust_name: snake_ident(&method.name),
                    input_type: method.input_type.clone(),
                    output_type: method.output_type.clone(),
                    input_path,
                    output_path,
                    comments: method.comments.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DecoratorSpec {
            kind,
            package: file.package.clone(),
            service_name: service.name.clone(),
            decorator_name: format!("{trait_name}{}", kind.type_suffix()),
            trait_name,
            comments: service.comments.clone(),
            methods,
        })
    }
}

impl GenerateError {
    pub(crate) fn with_referrer(self, referrer: String) -> Self {
        match self {
            GenerateError::UnresolvedType { type_name, .. } => {
                GenerateError::UnresolvedType { type_name, referrer }
            }
            other => other,
        }
    }
}

/// Renders the files of one request.
pub struct Emitter<'r, 'a> {
    registry: &'r Registry<'a>,
    config: &'r GeneratorConfig,
}

impl<'r, 'a> Emitter<'r, 'a> {
    pub fn new(registry: &'r Registry<'a>, config: &'r GeneratorConfig) -> Self {
        Self { registry, config }
    }

    /// Emits one file for `kind`, or `None` when the file declares no service.
    pub fn emit_file(&self, file: &FileDescriptor, kind: DecoratorKind) -> Result<Option<GeneratedFile>> {
        if !file.has_services() {
            return Ok(None);
        }

        let specs = file
            .services
            .iter()
            .map(|service| DecoratorSpec::plan(file, service, self.registry, kind))
            .collect::<Result<Vec<_>>>()?;

        let mut w = SourceWriter::new();
        w.comment(&format!("Code generated by {GENERATOR_NAME} {VERSION}, DO NOT EDIT."))?;
        w.comment(&format!("source: {}", file.name))?;
        if !file.package.is_empty() {
            w.comment(&format!("package: {}", file.package))?;
        }

        for spec in &specs {
            w.blank()?;
            match kind {
                DecoratorKind::Analytics => analytics::render(&mut w, spec, self)?,
                DecoratorKind::Logging => logging::render(&mut w, spec, self)?,
                DecoratorKind::Service => service::render(&mut w, spec, self)?,
            }
        }

        let name = output_file_name(&file.name, kind.file_suffix());
        tracing::debug!(file = %file.name, output = %name, kind = kind.as_str(), services = specs.len(), "rendered decorators");
        Ok(Some(GeneratedFile {
            name,
            content: w.finish(),
        }))
    }

    fn runtime(&self) -> &str {
        &self.config.runtime_path
    }

    /// Appends propagated proto comments below an item's own doc line.
    fn propagate_doc(&self, w: &mut SourceWriter, comments: Option<&str>) -> Result<()> {
        if let (true, Some(text)) = (self.config.propagate_comments, comments) {
            w.line("///")?;
            w.doc(text)?;
        }
        Ok(())
    }

    /// Proto comments as the whole doc comment of an item.
    fn comments_doc(&self, w: &mut SourceWriter, comments: Option<&str>) -> Result<()> {
        if let (true, Some(text)) = (self.config.propagate_comments, comments) {
            w.doc(text)?;
        }
        Ok(())
    }

    /// `async fn name(&self, ctx: &CallContext, input: I) -> CallResult<O>`
    fn method_signature(&self, method: &MethodPlan) -> String {
        let rt = self.runtime();
        format!(
            "async fn {}(&self, ctx: &{rt}::CallContext, input: {}) -> {rt}::CallResult<{}>",
            method.rust_name, method.input_path, method.output_path
        )
    }

    /// `impl<...> Trait for Decorator<...>` with a `where` clause.
    fn trait_impl<F>(
        &self,
        w: &mut SourceWriter,
        spec: &DecoratorSpec,
        params: &str,
        bounds: &[String],
        body: F,
    ) -> Result<()>
    where
        F: Fn(&mut SourceWriter, &MethodPlan) -> std::fmt::Result,
    {
        w.line(&format!("#[{}::async_trait]", self.runtime()))?;
        w.line(&format!(
            "impl<{params}> {} for {}<{params}>",
            spec.trait_name, spec.decorator_name
        ))?;
        w.line("where")?;
        w.indented(|w| bounds.iter().try_for_each(|b| w.line(&format!("{b},"))))?;
        w.block("", |w| {
            for (i, method) in spec.methods.iter().enumerate() {
                if i > 0 {
                    w.blank()?;
                }
                w.block(&self.method_signature(method), |w| body(w, method))?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{MessageDescriptor, MethodDescriptor, Syntax};

    fn fixture() -> Vec<FileDescriptor> {
        vec![FileDescriptor {
            name: "test.proto".to_string(),
            package: "us.xeserv.api".to_string(),
            syntax: Syntax::Proto3,
            messages: vec![MessageDescriptor {
                name: "Words".to_string(),
                fields: Vec::new(),
                oneofs: Vec::new(),
                nested: Vec::new(),
                map_entry: false,
                comments: None,
            }],
            services: vec![ServiceDescriptor {
                name: "HelloWorld".to_string(),
                methods: vec![MethodDescriptor {
                    name: "Speak".to_string(),
                    input_type: ".us.xeserv.api.Words".to_string(),
                    output_type: ".us.xeserv.api.Words".to_string(),
                    client_streaming: false,
                    server_streaming: false,
                    comments: None,
                }],
                comments: None,
            }],
        }]
    }

    #[test]
    fn plans_decorator_names_and_method_types() -> anyhow::Result<()> {
        let files = fixture();
        let registry = Registry::build(&files, &[])?;
        let spec = DecoratorSpec::plan(&files[0], &files[0].services[0], &registry, DecoratorKind::Logging)?;

        assert_eq!(spec.decorator_name, "HelloWorldLogging");
        assert_eq!(spec.trait_name, "HelloWorld");
        assert_eq!(spec.methods.len(), 1);
        assert_eq!(spec.methods[0].rust_name, "speak");
        assert_eq!(spec.methods[0].input_path, "Words");
        assert_eq!(spec.methods[0].output_path, "Words");
        Ok(())
    }

    #[test]
    fn streaming_methods_are_rejected() {
        let mut files = fixture();
        files[0].services[0].methods[0].server_streaming = true;
        let registry = Registry::build(&files, &[]).unwrap();
        let err = DecoratorSpec::plan(&files[0], &files[0].services[0], &registry, DecoratorKind::Analytics)
            .unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedStreaming { .. }));
    }

    #[test]
    fn unresolved_types_name_the_method() {
        let mut files = fixture();
        files[0].services[0].methods[0].output_type = ".us.xeserv.api.Missing".to_string();
        let registry = Registry::build(&files, &[]).unwrap();
        let err = DecoratorSpec::plan(&files[0], &files[0].services[0], &registry, DecoratorKind::Analytics)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unresolved type `.us.xeserv.api.Missing` referenced by method `us.xeserv.api.HelloWorld.Speak`"
        );
    }
}
