//! Dialect-specific formatting of fields and arguments.

use crate::codegen::kinds::Dialect;
use crate::error::QueryError;
use crate::graph::NodeRef;
use crate::label::Label;

/// A state or value-object field read off the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: String,
    /// `List`, `Set`, ... when the field holds a collection of `ty`
    pub collection: Option<String>,
}

impl Field {
    /// Read a field node carrying a `FIELD_TYPE` and optional `COLLECTION_TYPE`.
    pub fn from_node(node: NodeRef<'_>) -> Result<Self, QueryError> {
        let collection = node.related_value_or(Label::CollectionType, "")?;
        Ok(Self {
            name: node.text().into_owned(),
            ty: node.related_value(Label::FieldType)?,
            collection: (!collection.trim().is_empty()).then_some(collection),
        })
    }

    pub fn is_collection(&self) -> bool {
        self.collection.is_some()
    }

    /// Type as written in declarations, collections wrapped.
    pub fn declared_type(&self, dialect: Dialect) -> String {
        let element = map_type(dialect, &self.ty);
        match &self.collection {
            Some(collection) => {
                format!("{}<{}>", map_collection(dialect, collection), element)
            }
            None => element,
        }
    }
}

/// Collect every field related to `owner` under `label`, in order.
pub fn fields_of(owner: NodeRef<'_>, label: Label) -> Result<Vec<Field>, QueryError> {
    owner.related(label).map(Field::from_node).collect()
}

/// Type of the named field, or `None` when the owner has no such field.
pub fn type_of(fields: &[Field], name: &str) -> Option<String> {
    fields.iter().find(|f| f.name == name).map(|f| f.ty.clone())
}

fn map_type(dialect: Dialect, ty: &str) -> String {
    let mapped = match dialect {
        Dialect::Java => ty,
        Dialect::Kotlin => match ty {
            "int" => "Int",
            "long" => "Long",
            "short" => "Short",
            "byte" => "Byte",
            "char" => "Char",
            "double" => "Double",
            "float" => "Float",
            "boolean" => "Boolean",
            other => other,
        },
        Dialect::CSharp => match ty {
            "String" => "string",
            "boolean" => "bool",
            other => other,
        },
    };
    mapped.to_string()
}

fn map_collection(dialect: Dialect, collection: &str) -> String {
    match (dialect, collection) {
        (Dialect::CSharp, "Set") => "ISet".to_string(),
        (_, other) => other.to_string(),
    }
}

pub fn member_declaration(dialect: Dialect, field: &Field) -> String {
    let ty = field.declared_type(dialect);
    match dialect {
        Dialect::Java => format!("public final {} {};", ty, field.name),
        Dialect::Kotlin => format!("val {}: {}", field.name, ty),
        Dialect::CSharp => format!("public readonly {} {};", ty, field.name),
    }
}

pub fn assignment(dialect: Dialect, field: &Field) -> String {
    match dialect {
        Dialect::Kotlin => format!("this.{} = {}", field.name, field.name),
        Dialect::Java | Dialect::CSharp => format!("this.{} = {};", field.name, field.name),
    }
}

/// One constructor parameter in a signature.
pub fn parameter(dialect: Dialect, field: &Field) -> String {
    let ty = field.declared_type(dialect);
    match dialect {
        Dialect::Java => format!("final {} {}", ty, field.name),
        Dialect::Kotlin => format!("{}: {}", field.name, ty),
        Dialect::CSharp => format!("{} {}", ty, field.name),
    }
}

/// Literal used when a field is constructed without a value.
pub fn default_value(dialect: Dialect, field: &Field) -> String {
    if let Some(collection) = &field.collection {
        let set = collection == "Set";
        return match (dialect, set) {
            (Dialect::Java, false) => "new ArrayList<>()".to_string(),
            (Dialect::Java, true) => "new HashSet<>()".to_string(),
            (Dialect::Kotlin, false) => "mutableListOf()".to_string(),
            (Dialect::Kotlin, true) => "mutableSetOf()".to_string(),
            (Dialect::CSharp, false) => format!("new List<{}>()", map_type(dialect, &field.ty)),
            (Dialect::CSharp, true) => format!("new HashSet<{}>()", map_type(dialect, &field.ty)),
        };
    }
    match field.ty.as_str() {
        "int" | "long" | "short" | "byte" => "0",
        "double" | "float" => "0.0",
        "boolean" => "false",
        "char" => "'\\0'",
        _ => "null",
    }
    .to_string()
}

/// Imports required by collection fields.
pub fn collection_imports(dialect: Dialect, fields: &[Field]) -> Vec<String> {
    let mut imports = Vec::new();
    for collection in fields.iter().filter_map(|f| f.collection.as_deref()) {
        match (dialect, collection) {
            (Dialect::Java, "Set") => {
                imports.push("java.util.Set".to_string());
                imports.push("java.util.HashSet".to_string());
            }
            (Dialect::Java, _) => {
                imports.push("java.util.List".to_string());
                imports.push("java.util.ArrayList".to_string());
            }
            (Dialect::CSharp, _) => imports.push("System.Collections.Generic".to_string()),
            (Dialect::Kotlin, _) => {}
        }
    }
    imports
}

pub fn members(dialect: Dialect, fields: &[Field]) -> Vec<String> {
    fields.iter().map(|f| member_declaration(dialect, f)).collect()
}

pub fn assignments(dialect: Dialect, fields: &[Field]) -> Vec<String> {
    fields.iter().map(|f| assignment(dialect, f)).collect()
}

pub fn signature(dialect: Dialect, fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| parameter(dialect, f))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Invocation arguments that pass `reference` through and default the rest.
pub fn reference_with_defaults(dialect: Dialect, fields: &[Field], reference: &str) -> String {
    fields
        .iter()
        .map(|f| {
            if f.name == reference {
                f.name.clone()
            } else {
                default_value(dialect, f)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
