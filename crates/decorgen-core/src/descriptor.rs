//! Owned descriptor model.
//!
//! Descriptors arrive either as `prost_types` file descriptors (the protoc
//! plugin path) or as a Buf/protoc descriptor set rendered to JSON
//! (`buf build --as-file-descriptor-set -o set.json`). Both are lowered into
//! the small model below, which keeps only what decorator generation needs:
//! names, method signatures, field shapes and leading comments.

use crate::error::{GenerateError, Result};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, MethodDescriptorProto,
    ServiceDescriptorProto, SourceCodeInfo,
};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};

// =============================================================================
// Model
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    pub package: String,
    pub syntax: Syntax,
    pub messages: Vec<MessageDescriptor>,
    pub services: Vec<ServiceDescriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Proto2,
    Proto3,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub name: String,
    pub methods: Vec<MethodDescriptor>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    /// Fully qualified input message name, e.g. `.pkg.Words`.
    pub input_type: String,
    /// Fully qualified output message name.
    pub output_type: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDescriptor {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
    /// Declared oneof names, indexed by `FieldDescriptor::oneof`.
    pub oneofs: Vec<String>,
    pub nested: Vec<MessageDescriptor>,
    pub map_entry: bool,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub cardinality: Cardinality,
    /// Index into the owning message's `oneofs` for members of a real oneof.
    /// Proto3 `optional` fields live in synthetic oneofs and are not members.
    pub oneof: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int32,
    Int64,
    UInt32,
    UInt64,
    Float,
    Double,
    String,
    Bytes,
    Enum(String),
    Message(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    Optional,
    Repeated,
    Map,
}

impl FileDescriptor {
    pub fn has_services(&self) -> bool {
        !self.services.is_empty()
    }
}

// =============================================================================
// Lowering from prost-types
// =============================================================================

// Field numbers inside `FileDescriptorProto` / `DescriptorProto` /
// `ServiceDescriptorProto`, as used in `SourceCodeInfo.Location.path`.
const FILE_MESSAGE_TYPE: i32 = 4;
const FILE_SERVICE: i32 = 6;
const MESSAGE_NESTED_TYPE: i32 = 3;
const SERVICE_METHOD: i32 = 2;

type CommentIndex = HashMap<Vec<i32>, String>;

impl FileDescriptor {
    pub fn from_proto(file: &FileDescriptorProto) -> Self {
        let comments = comment_index(file.source_code_info.as_ref());
        let syntax = match file.syntax() {
            "proto3" => Syntax::Proto3,
            _ => Syntax::Proto2,
        };

        let messages = file
            .message_type
            .iter()
            .enumerate()
            .map(|(i, m)| lower_message(m, syntax, &comments, vec![FILE_MESSAGE_TYPE, i as i32]))
            .collect();

        let services = file
            .service
            .iter()
            .enumerate()
            .map(|(i, s)| lower_service(s, &comments, vec![FILE_SERVICE, i as i32]))
            .collect();

        FileDescriptor {
            name: file.name().to_string(),
            package: file.package().to_string(),
            syntax,
            messages,
            services,
        }
    }
}

fn comment_index(info: Option<&SourceCodeInfo>) -> CommentIndex {
    let mut index = CommentIndex::new();
    let Some(info) = info else {
        return index;
    };
    for loc in &info.location {
        let leading = loc.leading_comments.as_deref().unwrap_or("").trim_end();
        if !leading.trim().is_empty() {
            index.insert(loc.path.clone(), leading.to_string());
        }
    }
    index
}

fn lower_service(
    service: &ServiceDescriptorProto,
    comments: &CommentIndex,
    path: Vec<i32>,
) -> ServiceDescriptor {
    let methods = service
        .method
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let method_path = [path.clone(), vec![SERVICE_METHOD, i as i32]].concat();
            lower_method(m, comments.get(&method_path).cloned())
        })
        .collect();

    ServiceDescriptor {
        name: service.name().to_string(),
        methods,
        comments: comments.get(&path).cloned(),
    }
}

fn lower_method(method: &MethodDescriptorProto, comments: Option<String>) -> MethodDescriptor {
    MethodDescriptor {
        name: method.name().to_string(),
        input_type: method.input_type().to_string(),
        output_type: method.output_type().to_string(),
        client_streaming: method.client_streaming(),
        server_streaming: method.server_streaming(),
        comments,
    }
}

fn lower_message(
    message: &DescriptorProto,
    syntax: Syntax,
    comments: &CommentIndex,
    path: Vec<i32>,
) -> MessageDescriptor {
    let nested: Vec<MessageDescriptor> = message
        .nested_type
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let nested_path = [path.clone(), vec![MESSAGE_NESTED_TYPE, i as i32]].concat();
            lower_message(n, syntax, comments, nested_path)
        })
        .collect();

    // Synthesized `<Field>Entry` messages mark `map<K, V>` fields.
    let map_entries: HashSet<&str> = nested
        .iter()
        .filter(|n| n.map_entry)
        .map(|n| n.name.as_str())
        .collect();

    let fields = message
        .field
        .iter()
        .map(|f| lower_field(f, syntax, &map_entries))
        .collect();

    MessageDescriptor {
        name: message.name().to_string(),
        fields,
        oneofs: message.oneof_decl.iter().map(|o| o.name().to_string()).collect(),
        nested,
        map_entry: message
            .options
            .as_ref()
            .map(|o| o.map_entry())
            .unwrap_or(false),
        comments: comments.get(&path).cloned(),
    }
}

fn lower_field(
    field: &FieldDescriptorProto,
    syntax: Syntax,
    map_entries: &HashSet<&str>,
) -> FieldDescriptor {
    let type_name = field.type_name().to_string();
    let kind = match field.r#type() {
        Type::Bool => FieldKind::Bool,
        Type::Int32 | Type::Sint32 | Type::Sfixed32 => FieldKind::Int32,
        Type::Int64 | Type::Sint64 | Type::Sfixed64 => FieldKind::Int64,
        Type::Uint32 | Type::Fixed32 => FieldKind::UInt32,
        Type::Uint64 | Type::Fixed64 => FieldKind::UInt64,
        Type::Float => FieldKind::Float,
        Type::Double => FieldKind::Double,
        Type::String => FieldKind::String,
        Type::Bytes => FieldKind::Bytes,
        Type::Enum => FieldKind::Enum(type_name.clone()),
        Type::Message | Type::Group => FieldKind::Message(type_name.clone()),
    };

    let proto3_optional = field.proto3_optional();
    let is_map = field.label() == Label::Repeated
        && matches!(kind, FieldKind::Message(_))
        && type_name
            .rsplit('.')
            .next()
            .map(|last| map_entries.contains(last))
            .unwrap_or(false);

    let cardinality = match field.label() {
        Label::Repeated if is_map => Cardinality::Map,
        Label::Repeated => Cardinality::Repeated,
        _ if proto3_optional => Cardinality::Optional,
        Label::Optional if syntax == Syntax::Proto2 => Cardinality::Optional,
        _ => Cardinality::Single,
    };

    FieldDescriptor {
        name: field.name().to_string(),
        kind,
        cardinality,
        oneof: if proto3_optional {
            None
        } else {
            field.oneof_index.map(|i| i as usize)
        },
    }
}

// =============================================================================
// Descriptor set JSON (subset)
// =============================================================================

/// Loads a descriptor set rendered as JSON (`google.protobuf.FileDescriptorSet`
/// in its canonical JSON mapping, as produced by `buf build`).
pub fn load_descriptor_set_json(text: &str) -> Result<Vec<FileDescriptor>> {
    let set: FileDescriptorSetJson =
        serde_json::from_str(text).map_err(|e| GenerateError::Descriptor(e.to_string()))?;
    Ok(set
        .file
        .iter()
        .map(|f| FileDescriptor::from_proto(&f.to_proto()))
        .collect())
}

#[derive(Debug, Clone, Deserialize)]
struct FileDescriptorSetJson {
    #[serde(default)]
    file: Vec<FileDescriptorProtoJson>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileDescriptorProtoJson {
    name: Option<String>,
    package: Option<String>,
    #[serde(default)]
    message_type: Vec<DescriptorProtoJson>,
    #[serde(default)]
    service: Vec<ServiceDescriptorProtoJson>,
    source_code_info: Option<SourceCodeInfoJson>,
    syntax: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescriptorProtoJson {
    name: Option<String>,
    #[serde(default)]
    field: Vec<FieldDescriptorProtoJson>,
    #[serde(default)]
    nested_type: Vec<DescriptorProtoJson>,
    #[serde(default)]
    oneof_decl: Vec<OneofDescriptorProtoJson>,
    #[serde(default)]
    options: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct OneofDescriptorProtoJson {
    name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldDescriptorProtoJson {
    name: Option<String>,
    number: Option<i32>,
    label: Option<String>,
    #[serde(rename = "type")]
    typ: Option<String>,
    type_name: Option<String>,
    oneof_index: Option<i32>,
    proto3_optional: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
struct ServiceDescriptorProtoJson {
    name: Option<String>,
    #[serde(default)]
    method: Vec<MethodDescriptorProtoJson>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MethodDescriptorProtoJson {
    name: Option<String>,
    input_type: Option<String>,
    output_type: Option<String>,
    client_streaming: Option<bool>,
    server_streaming: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
struct SourceCodeInfoJson {
    #[serde(default)]
    location: Vec<LocationJson>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationJson {
    #[serde(default)]
    path: Vec<i32>,
    leading_comments: Option<String>,
}

impl FileDescriptorProtoJson {
    fn to_proto(&self) -> FileDescriptorProto {
        FileDescriptorProto {
            name: self.name.clone(),
            package: self.package.clone(),
            message_type: self.message_type.iter().map(|m| m.to_proto()).collect(),
            service: self
                .service
                .iter()
                .map(|s| ServiceDescriptorProto {
                    name: s.name.clone(),
                    method: s
                        .method
                        .iter()
                        .map(|m| MethodDescriptorProto {
                            name: m.name.clone(),
                            input_type: m.input_type.clone(),
                            output_type: m.output_type.clone(),
                            client_streaming: m.client_streaming,
                            server_streaming: m.server_streaming,
                            ..Default::default()
                        })
                        .collect(),
                    ..Default::default()
                })
                .collect(),
            source_code_info: self.source_code_info.as_ref().map(|sci| SourceCodeInfo {
                location: sci
                    .location
                    .iter()
                    .map(|loc| prost_types::source_code_info::Location {
                        path: loc.path.clone(),
                        leading_comments: loc.leading_comments.clone(),
                        ..Default::default()
                    })
                    .collect(),
            }),
            syntax: self.syntax.clone(),
            ..Default::default()
        }
    }
}

impl DescriptorProtoJson {
    fn to_proto(&self) -> DescriptorProto {
        let map_entry = self
            .options
            .get("mapEntry")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        DescriptorProto {
            name: self.name.clone(),
            field: self.field.iter().map(|f| f.to_proto()).collect(),
            nested_type: self.nested_type.iter().map(|n| n.to_proto()).collect(),
            oneof_decl: self
                .oneof_decl
                .iter()
                .map(|o| prost_types::OneofDescriptorProto {
                    name: o.name.clone(),
                    ..Default::default()
                })
                .collect(),
            options: map_entry.then(|| prost_types::MessageOptions {
                map_entry: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

impl FieldDescriptorProtoJson {
    fn to_proto(&self) -> FieldDescriptorProto {
        FieldDescriptorProto {
            name: self.name.clone(),
            number: self.number,
            label: self
                .label
                .as_deref()
                .and_then(Label::from_str_name)
                .map(|l| l as i32),
            r#type: self
                .typ
                .as_deref()
                .and_then(Type::from_str_name)
                .map(|t| t as i32),
            type_name: self.type_name.clone(),
            oneof_index: self.oneof_index,
            proto3_optional: self.proto3_optional,
            ..Default::default()
        }
    }
}
