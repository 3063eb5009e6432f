//! Structural accessor and diagnostic tree printer.
//!
//! All higher-level extraction is built from four primitives: [`attribute`],
//! [`attribute_path`], [`cast`] and [`type_name`]. Kind adapters state the
//! label or path and the expected result type; these functions do the walking.
//!
//! # Path syntax
//!
//! - `"content"` -- the direct child labelled `content`
//! - `"storage|trueContent"` -- `trueContent` inside `storage`
//! - `"super"` -- the base structural layer, when the value exposes one

use std::sync::Arc;

use serde_json::{Map, Value as Tree};

use crate::error::{InspectionError, Result};
use crate::options::InspectOptions;
use crate::reflect::{Mirror, Reflect, Value};
use crate::type_tag::TypeTag;

/// Label that resolves to the base structural layer.
pub const SUPER_LABEL: &str = "super";

/// Separator between labels of an attribute path.
pub const PATH_SEPARATOR: char = '|';

/// Look up the direct child of `value` labelled `label`.
///
/// # Errors
///
/// Returns [`InspectionError::AttributeNotFound`] if no such child exists.
pub fn attribute(label: &str, value: &Value) -> Result<Value> {
    if label == SUPER_LABEL {
        if let Some(layer) = value.superclass() {
            return Ok(Value::new(layer));
        }
    }
    value
        .descendant(label)
        .ok_or_else(|| InspectionError::attribute_not_found(label, value.type_tag()))
}

/// Look up a direct child and cast it to `T`.
pub fn attribute_as<T: Reflect>(label: &str, value: &Value) -> Result<Arc<T>> {
    cast(&attribute(label, value)?)
}

/// Resolve a `|`-separated path left to right.
///
/// Equivalent to folding [`attribute`] over the labels; the first failing
/// segment aborts the whole lookup.
///
/// ```
/// use view_probe::inspector::attribute_path;
/// use view_probe::Value;
///
/// let value = Value::new(((1u8, "deep"), 2u8));
/// let found = attribute_path(".0|.1", &value).unwrap();
/// assert_eq!(found.describe(), "deep");
/// ```
pub fn attribute_path(path: &str, value: &Value) -> Result<Value> {
    path.split(PATH_SEPARATOR)
        .try_fold(value.clone(), |current, label| attribute(label, &current))
}

/// Resolve a path and cast the final value to `T`.
pub fn attribute_path_as<T: Reflect>(path: &str, value: &Value) -> Result<Arc<T>> {
    cast(&attribute_path(path, value)?)
}

/// Checked downcast.
///
/// # Errors
///
/// Returns [`InspectionError::TypeMismatch`] carrying the actual and expected tags.
pub fn cast<T: Reflect>(value: &Value) -> Result<Arc<T>> {
    value
        .downcast::<T>()
        .ok_or_else(|| InspectionError::type_mismatch(value.type_tag(), TypeTag::of::<T>()))
}

/// Type tag of `value`, optionally truncated to its prefix.
pub fn type_name(value: &Value, prefix_only: bool) -> TypeTag {
    let tag = value.type_tag();
    if prefix_only {
        tag.to_prefix()
    } else {
        tag
    }
}

// ============================================================================
// Diagnostic tree printer
// ============================================================================

/// Render the full structure of `value` for debugging.
///
/// Never fails. Sequence children keep their positional order; every other
/// level is sorted by its `name: Type` label. Besides structural children,
/// a value's base layer is listed as a synthetic `super: Mirror` child and a
/// user view's body as a synthetic `body` child.
pub fn print(value: &Value) -> String {
    print_with(value, &InspectOptions::default())
}

/// [`print`] with an explicit indentation width.
pub fn print_with(value: &Value, options: &InspectOptions) -> String {
    let mut out = value.type_tag().into_string();
    print_node(&attributes_tree(value), 1, options.indent_width, &mut out);
    out
}

/// Reflect `value` into a nested map/array shape.
///
/// Sequences become arrays, values with children become maps keyed by
/// `name: Type` (unlabelled children are named `[offset]`), a user view's body
/// is added as a synthetic `body` child, and leaves become `" = description"`.
pub fn attributes_tree(value: &Value) -> Tree {
    if value.is_sequence() {
        return Tree::Array(
            value
                .fields()
                .iter()
                .map(|field| attributes_tree(&field.value))
                .collect(),
        );
    }

    let mut map = Map::new();
    for (offset, field) in value.fields().into_iter().enumerate() {
        let name = field
            .label
            .unwrap_or_else(|| format!("[{}]", offset));
        let key = format!("{}: {}", name, field.value.type_tag());
        map.insert(key, attributes_tree(&field.value));
    }
    if let Some(layer) = value.superclass() {
        let layer = Value::new(layer);
        map.insert(
            format!("{}: {}", SUPER_LABEL, type_name(&layer, false)),
            attributes_tree(&layer),
        );
    }
    if let Some(body) = value.body() {
        map.insert(format!("body: {}", body.type_tag()), attributes_tree(&body));
    }

    if map.is_empty() {
        return Tree::String(format!(" = {}", value.describe()));
    }
    Tree::Object(map)
}

fn print_node(node: &Tree, level: usize, indent_width: usize, out: &mut String) {
    match node {
        Tree::Array(items) if items.is_empty() => out.push_str(" = []\n"),
        Tree::Array(items) => {
            out.push('\n');
            let indent = make_indent(level, indent_width);
            for (offset, item) in items.iter().enumerate() {
                out.push_str(&indent);
                out.push_str(&format!("[{}]", offset));
                print_node(item, level + 1, indent_width, out);
            }
        }
        Tree::Object(map) => {
            out.push('\n');
            let indent = make_indent(level, indent_width);
            let mut entries: Vec<(&String, &Tree)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (key, child) in entries {
                out.push_str(&indent);
                out.push_str(key);
                print_node(child, level + 1, indent_width, out);
            }
        }
        Tree::String(text) => {
            out.push_str(text);
            out.push('\n');
        }
        other => {
            out.push_str(&other.to_string());
            out.push('\n');
        }
    }
}

fn make_indent(level: usize, width: usize) -> String {
    " ".repeat(level * width)
}

/// Mirror of `value`'s own layer, including its base layers.
pub fn mirror(value: &Value) -> Mirror {
    Mirror::reflecting(value.reflect())
}
