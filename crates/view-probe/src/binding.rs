//! Two-way bound values and the single mutation accessor.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::content::Content;
use crate::error::{InspectionError, Result};
use crate::inspector;
use crate::reflect::{Field, Reflect, Value};
use crate::type_tag::TypeTag;

/// Shared, settable reference to a `T`.
///
/// Clones share storage, so a value written through one clone is observed by
/// every other. Reflects a single `wrappedValue` field holding a snapshot.
pub struct Binding<T> {
    storage: Arc<RwLock<T>>,
}

impl<T: Reflect + Clone> Binding<T> {
    pub fn new(initial: T) -> Self {
        Self {
            storage: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn get(&self) -> T {
        self.storage.read().clone()
    }

    pub fn set(&self, value: T) {
        *self.storage.write() = value;
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<T: Reflect + Clone> Reflect for Binding<T> {
    fn fields(&self) -> Vec<Field> {
        vec![Field::named("wrappedValue", Value::new(self.get()))]
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&*self.storage.read()).finish()
    }
}

/// Value type a binding tag is parameterised with: `Binding<String>` -> `String`.
fn bound_type(binding: &Value) -> String {
    let tag = binding.type_tag();
    match tag.generic_argument() {
        Some(argument) if tag.prefix() == "Binding" => argument.to_string(),
        _ => tag.into_string(),
    }
}

/// Assign `new_value` through the binding found at `path` under the node's
/// payload.
///
/// This is the only operation that writes to inspected state.
///
/// # Errors
///
/// Path resolution errors propagate unchanged. If the value at `path` is not a
/// `Binding<T>`, fails with [`InspectionError::TypeMismatch`] whose `factual`
/// names the bound value type and whose `expected` names `T`.
pub fn set_value<T: Reflect + Clone>(content: &Content, path: &str, new_value: T) -> Result<()> {
    let found = inspector::attribute_path(path, &content.payload)?;
    let binding = found
        .downcast::<Binding<T>>()
        .ok_or_else(|| InspectionError::type_mismatch(bound_type(&found), TypeTag::of::<T>()))?;
    debug!(path, value_type = %TypeTag::of::<T>(), "assigning through binding");
    binding.set(new_value);
    Ok(())
}
