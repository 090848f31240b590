//! Storage documents and the variable paths derived from them.
//!
//! Any directory named `storage` contributes its direct `.yaml` children.
//! Each document is keyed by its file name without the extension and
//! flattened into `${doc.key.sub}` references for completion.
//!
//! # Duplicate document names
//!
//! When several storage directories hold a document with the same name,
//! the one found last in depth-first order supplies the value. The entry
//! keeps the position where the name was first seen.

use serde_json::{Map, Number, Value};

use crate::config::StorageOptions;
use crate::core::error::ParseError;
use crate::core::Snapshot;
use crate::models::{Node, ValueType, VariablePath};

// =============================================================================
// Parsing
// =============================================================================

/// Parse a YAML document into a plain value tree.
///
/// Mapping keys become strings and tags are dropped, so the result only
/// holds maps, sequences and scalars. An empty document is `null`.
pub fn parse_document(text: &str) -> Result<Value, ParseError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
    Ok(to_plain(yaml))
}

fn to_plain(yaml: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => plain_number(&n),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(to_plain).collect()),
        Yaml::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(key_text(key), to_plain(value));
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => to_plain(tagged.value),
    }
}

fn plain_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn key_text(key: serde_yaml::Value) -> String {
    match to_plain(key) {
        Value::String(s) => s,
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

// =============================================================================
// Storage Index
// =============================================================================

/// Parsed storage documents keyed by document name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StorageIndex {
    documents: Map<String, Value>,
}

impl StorageIndex {
    /// Collect and parse every storage document in `snapshot`.
    ///
    /// Documents that fail to parse or parse to `null` are skipped.
    pub fn build(snapshot: &Snapshot, options: &StorageOptions) -> Self {
        let mut documents = Map::new();
        snapshot.root().walk(&mut |node: &Node| {
            if node.is_directory() && node.name == options.directory_name {
                collect_directory(node, options, &mut documents);
            }
        });
        tracing::trace!(documents = documents.len(), "storage index built");
        Self { documents }
    }

    /// Parsed value of a document.
    pub fn get(&self, document: &str) -> Option<&Value> {
        self.documents.get(document)
    }

    /// Document names in first-seen order.
    pub fn documents(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Every `${...}` reference the documents offer, in document order.
    ///
    /// Object keys produce an entry and are then descended into. Every
    /// array produces an entry of its own before its elements, so an array
    /// under a key is listed twice: once for the key, once for the array.
    /// Elements that are objects or arrays are descended into with `[n]`
    /// appended. Scalar documents add nothing.
    pub fn flatten_paths(&self) -> Vec<VariablePath> {
        let mut out = Vec::new();
        for (document, value) in &self.documents {
            walk_value(document, value, &mut out);
        }
        out
    }
}

fn collect_directory(dir: &Node, options: &StorageOptions, documents: &mut Map<String, Value>) {
    for child in dir.children() {
        let Some(content) = child.content() else {
            continue;
        };
        let Some(document) = options.document_name(&child.name) else {
            continue;
        };
        match parse_document(content) {
            Ok(Value::Null) => {}
            Ok(value) => {
                documents.insert(document.to_string(), value);
            }
            Err(err) => {
                tracing::debug!(file = %child.name, error = %err, "skipping invalid storage document");
            }
        }
    }
}

fn walk_value(path: &str, value: &Value, out: &mut Vec<VariablePath>) {
    match value {
        Value::Object(map) => walk_object(path, map, out),
        Value::Array(items) => {
            out.push(variable(path, value));
            walk_items(path, items, out);
        }
        _ => {}
    }
}

fn walk_object(prefix: &str, map: &Map<String, Value>, out: &mut Vec<VariablePath>) {
    for (key, value) in map {
        let path = format!("{}.{}", prefix, key);
        out.push(variable(&path, value));
        walk_value(&path, value, out);
    }
}

fn walk_items(prefix: &str, items: &[Value], out: &mut Vec<VariablePath>) {
    for (index, item) in items.iter().enumerate() {
        walk_value(&format!("{}[{}]", prefix, index), item, out);
    }
}

fn variable(reference: &str, value: &Value) -> VariablePath {
    VariablePath {
        path: format!("${{{}}}", reference),
        value_type: ValueType::of(value),
        value: value.clone(),
    }
}
