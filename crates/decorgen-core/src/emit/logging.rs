//! `<Service>Logging`: context enrichment plus a log record on failure.
//!
//! Besides the decorator itself, one loggable-fields accessor is rendered per
//! distinct message used as a method input or output:
//!
//! ```ignore
//! pub fn words_fields(message: &Words) -> Fields {
//!     let mut fields = Fields::new();
//!     fields.insert("words_message".to_string(), FieldValue::from(message.message.as_str()));
//!     fields
//! }
//! ```
//!
//! Sensitive fields are left out of the projection entirely.

use super::{DecoratorSpec, Emitter};
use crate::classifier::FieldClassifier;
use crate::descriptor::{Cardinality, FieldKind, MessageDescriptor};
use crate::error::{GenerateError, Result};
use crate::naming::{field_key, snake_ident};
use crate::writer::SourceWriter;
use heck::ToSnakeCase;
use std::collections::BTreeSet;

/// A loggable-fields accessor for one message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Projection {
    pub type_name: String,
    pub fn_name: String,
    pub rust_path: String,
    /// `(key, value expression)` in field declaration order.
    pub entries: Vec<(String, String)>,
}

pub(super) fn render(w: &mut SourceWriter, spec: &DecoratorSpec, emitter: &Emitter<'_, '_>) -> Result<()> {
    let rt = emitter.runtime();
    let name = &spec.decorator_name;
    let projections = projections(spec, emitter)?;

    w.doc(&format!(
        "`{name}` is a middleware for `{}` that logs every failed call.",
        spec.trait_name
    ))?;
    emitter.propagate_doc(w, spec.comments.as_deref())?;
    w.line("#[derive(Debug, Clone)]")?;
    w.block(&format!("pub struct {name}<N, L>"), |w| {
        w.line("next: N,")?;
        w.line("sink: L,")
    })?;
    w.blank()?;

    w.block(&format!("impl<N, L> {name}<N, L>"), |w| {
        w.block("pub fn new(next: N, sink: L) -> Self", |w| w.line("Self { next, sink }"))?;
        for projection in &projections {
            w.blank()?;
            render_projection(w, rt, projection)?;
        }
        Ok(())
    })?;
    w.blank()?;

    let bounds = [
        format!("N: {}", spec.trait_name),
        format!("L: {rt}::logging::LogSink"),
    ];
    let fn_for_input = |type_name: &str| {
        projections
            .iter()
            .find(|p| p.type_name == type_name)
            .map(|p| p.fn_name.as_str())
            .unwrap_or_default()
    };
    emitter.trait_impl(w, spec, "N, L", &bounds, |w, method| {
        w.line("let ctx = ctx.with_fields([")?;
        w.indented(|w| {
            w.line(&format!("({rt}::logging::PACKAGE_FIELD, {:?}),", spec.package))?;
            w.line(&format!("({rt}::logging::SERVICE_FIELD, {:?}),", spec.service_name))?;
            w.line(&format!("({rt}::logging::METHOD_FIELD, {:?}),", method.proto_name))
        })?;
        w.line("]);")?;
        w.line(&format!(
            "let payload = Self::{}(&input);",
            fn_for_input(&method.input_type)
        ))?;
        w.line(&format!(
            "{rt}::logging::observe(&self.sink, &ctx, payload, self.next.{}(&ctx, input)).await",
            method.rust_name
        ))
    })
}

fn render_projection(w: &mut SourceWriter, rt: &str, projection: &Projection) -> std::fmt::Result {
    let Projection {
        fn_name,
        rust_path,
        entries,
        ..
    } = projection;

    w.doc(&format!("Loggable fields of `{rust_path}`, without sensitive fields."))?;
    if entries.is_empty() {
        return w.block(
            &format!("pub fn {fn_name}(_message: &{rust_path}) -> {rt}::Fields"),
            |w| w.line(&format!("{rt}::Fields::new()")),
        );
    }
    w.block(
        &format!("pub fn {fn_name}(message: &{rust_path}) -> {rt}::Fields"),
        |w| {
            w.line(&format!("let mut fields = {rt}::Fields::new();"))?;
            for (key, value) in entries {
                w.line(&format!("fields.insert({key:?}.to_string(), {value});"))?;
            }
            w.line("fields")
        },
    )
}

/// Distinct method input/output types, in order of first use.
fn input_and_output_types(spec: &DecoratorSpec) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    spec.methods
        .iter()
        .flat_map(|m| [m.input_type.as_str(), m.output_type.as_str()])
        .filter(|t| seen.insert(*t))
        .collect()
}

pub(crate) fn projections(spec: &DecoratorSpec, emitter: &Emitter<'_, '_>) -> Result<Vec<Projection>> {
    let types = input_and_output_types(spec);
    let mut projections = Vec::with_capacity(types.len());
    let mut used_names = BTreeSet::new();
    for type_name in types {
        let message = emitter
            .registry
            .message(type_name)
            .ok_or_else(|| GenerateError::UnresolvedType {
                type_name: type_name.to_string(),
                referrer: format!("service `{}`", spec.service_name),
            })?;
        let rust_path = emitter.registry.resolve(type_name, &spec.package)?;
        projections.push(Projection {
            type_name: type_name.to_string(),
            fn_name: unique_fn_name(projection_fn_name(type_name, &spec.package), &mut used_names),
            rust_path,
            entries: loggable_entries(message, &emitter.config.classifier, emitter.runtime()),
        });
    }
    Ok(projections)
}

/// `words_fields` for a message of the current package, otherwise the full
/// qualified name (`google_protobuf_timestamp_fields`).
fn projection_fn_name(type_name: &str, package: &str) -> String {
    let qualified = type_name.trim_start_matches('.');
    let local = qualified
        .strip_prefix(package)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(qualified);
    format!("{}_fields", local.replace('.', "_").to_snake_case())
}

/// `base`, or `base_2`, `base_3`, ... when an earlier type of the same
/// decorator already flattened to that name (`.acme.Outer.Inner` and
/// `.acme.OuterInner` both give `outer_inner_fields`).
fn unique_fn_name(base: String, used: &mut BTreeSet<String>) -> String {
    let mut name = base.clone();
    let mut n = 1;
    while !used.insert(name.clone()) {
        n += 1;
        name = format!("{base}_{n}");
    }
    name
}

/// Key and value expression for every non-sensitive field of `message`.
///
/// Members of a oneof are exposed by prost as a single field named after the
/// oneof; that field is dropped when the oneof or any member is sensitive.
pub(crate) fn loggable_entries(
    message: &MessageDescriptor,
    classifier: &FieldClassifier,
    rt: &str,
) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    let mut oneofs_done = BTreeSet::new();

    for field in &message.fields {
        if let Some(index) = field.oneof {
            if !oneofs_done.insert(index) {
                continue;
            }
            let Some(oneof) = message.oneofs.get(index) else {
                continue;
            };
            let sensitive = classifier.is_sensitive(oneof)
                || message
                    .fields
                    .iter()
                    .filter(|f| f.oneof == Some(index))
                    .any(|f| classifier.is_sensitive(&f.name));
            if !sensitive {
                entries.push((
                    field_key(&message.name, oneof),
                    format!("{rt}::FieldValue::debug(&message.{})", snake_ident(oneof)),
                ));
            }
            continue;
        }

        if classifier.is_sensitive(&field.name) {
            continue;
        }

        let access = format!("message.{}", snake_ident(&field.name));
        let value = match (&field.cardinality, &field.kind) {
            (Cardinality::Single, FieldKind::String) => {
                format!("{rt}::FieldValue::from({access}.as_str())")
            }
            (Cardinality::Single, FieldKind::Bytes) => format!("{rt}::FieldValue::bytes(&{access})"),
            (Cardinality::Single, FieldKind::Message(_)) => format!("{rt}::FieldValue::debug(&{access})"),
            (Cardinality::Single, _) => format!("{rt}::FieldValue::from({access})"),
            _ => format!("{rt}::FieldValue::debug(&{access})"),
        };
        entries.push((field_key(&message.name, &field.name), value));
    }
    entries
}
