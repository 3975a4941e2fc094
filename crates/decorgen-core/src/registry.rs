//! Descriptor registry: fully qualified proto names → Rust paths.
//!
//! The registry indexes every message and service of a request in a single
//! pass before anything is emitted, so a service may reference messages from
//! files that appear later in the request.
//!
//! Paths are computed the way `prost-build` lays out modules: one module per
//! package segment, one module per enclosing message, and relative `super::`
//! hops between packages. Extern paths (e.g. `.google.protobuf` →
//! `::prost_types`) take precedence, longest match first.

use crate::config::ExternPath;
use crate::descriptor::{FileDescriptor, MessageDescriptor};
use crate::error::{GenerateError, Result};
use crate::naming::{snake_ident, type_ident};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
struct RegisteredMessage<'a> {
    package: &'a str,
    /// Enclosing message names, outermost first, then the message itself.
    path: Vec<&'a str>,
    descriptor: &'a MessageDescriptor,
}

#[derive(Debug, Clone)]
pub struct Registry<'a> {
    messages: BTreeMap<String, RegisteredMessage<'a>>,
    /// Qualified service names, for duplicate detection.
    services: BTreeSet<String>,
    extern_paths: Vec<ExternPath>,
}

impl<'a> Registry<'a> {
    pub fn build(files: &'a [FileDescriptor], extern_paths: &[ExternPath]) -> Result<Self> {
        let mut registry = Registry {
            messages: BTreeMap::new(),
            services: BTreeSet::new(),
            extern_paths: extern_paths.to_vec(),
        };
        // Longest proto prefix first, so `.google.protobuf.Empty` beats
        // `.google.protobuf`. Later entries win among equal prefixes.
        registry
            .extern_paths
            .reverse();
        registry
            .extern_paths
            .sort_by(|a, b| b.proto_path.len().cmp(&a.proto_path.len()));

        for file in files {
            for message in &file.messages {
                registry.index_message(&file.package, Vec::new(), message);
            }
            for service in &file.services {
                let qualified = qualify(&file.package, &service.name);
                if !registry.services.insert(qualified.clone()) {
                    return Err(GenerateError::DuplicateService(qualified));
                }
            }
        }

        Ok(registry)
    }

    fn index_message(&mut self, package: &'a str, mut path: Vec<&'a str>, message: &'a MessageDescriptor) {
        path.push(&message.name);
        let qualified = qualify(package, &path.join("."));
        for nested in &message.nested {
            self.index_message(package, path.clone(), nested);
        }
        self.messages.insert(
            qualified,
            RegisteredMessage {
                package,
                path,
                descriptor: message,
            },
        );
    }

    /// Rust path of `type_name` as seen from a module generated for `from_package`.
    pub fn resolve(&self, type_name: &str, from_package: &str) -> Result<String> {
        let entry = self
            .messages
            .get(type_name)
            .ok_or_else(|| GenerateError::UnresolvedType {
                type_name: type_name.to_string(),
                referrer: format!("package `{from_package}`"),
            })?;

        if let Some(path) = self.resolve_extern(type_name, entry) {
            return Ok(path);
        }

        let from: Vec<&str> = split_package(from_package);
        let to: Vec<&str> = split_package(entry.package);
        let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

        let mut segments: Vec<String> = Vec::new();
        segments.extend(std::iter::repeat("super".to_string()).take(from.len() - common));
        segments.extend(to[common..].iter().map(|p| snake_ident(p)));
        segments.extend(message_segments(&entry.path));
        Ok(segments.join("::"))
    }

    fn resolve_extern(&self, type_name: &str, entry: &RegisteredMessage<'_>) -> Option<String> {
        let ext = self.extern_paths.iter().find(|ext| {
            type_name == ext.proto_path
                || type_name
                    .strip_prefix(ext.proto_path.as_str())
                    .map(|rest| rest.starts_with('.'))
                    .unwrap_or(false)
        })?;
        if type_name == ext.proto_path {
            return Some(ext.rust_path.clone());
        }

        // Segments covered by the extern prefix are dropped; any remaining
        // package segments become modules, then the message path follows.
        let covered = split_package(&ext.proto_path).len();
        let package = split_package(entry.package);
        let mut segments = vec![ext.rust_path.clone()];
        if covered < package.len() {
            segments.extend(package[covered..].iter().map(|p| snake_ident(p)));
            segments.extend(message_segments(&entry.path));
        } else {
            let skip = covered - package.len();
            let kept = &entry.path[skip.min(entry.path.len() - 1)..];
            segments.extend(message_segments(kept));
        }
        Some(segments.join("::"))
    }

    pub fn message(&self, type_name: &str) -> Option<&'a MessageDescriptor> {
        self.messages.get(type_name).map(|m| m.descriptor)
    }
}

/// `.package.Name`, or `.Name` for the empty package.
pub fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        format!(".{name}")
    } else {
        format!(".{package}.{name}")
    }
}

fn split_package(package: &str) -> Vec<&str> {
    package
        .trim_start_matches('.')
        .split('.')
        .filter(|s| !s.is_empty())
        .collect()
}

fn message_segments(path: &[&str]) -> Vec<String> {
    let Some((last, outer)) = path.split_last() else {
        return Vec::new();
    };
    outer
        .iter()
        .map(|m| snake_ident(m))
        .chain(std::iter::once(type_ident(last)))
        .collect()
}
