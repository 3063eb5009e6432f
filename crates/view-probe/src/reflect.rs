//! Self-describing reflection over opaque values.
//!
//! Rust offers no runtime field enumeration, so every inspectable value
//! implements [`Reflect`] and describes its own structural children. A
//! [`Value`] is the type-erased, cheaply clonable handle the rest of the crate
//! operates on.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::type_tag::TypeTag;

/// Object-safe access to `Any` for every reflected type.
pub trait AsAny: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A value that can describe its own shape.
///
/// Only [`fields`](Reflect::fields) normally needs implementing; leaves keep the
/// default empty field list and override [`describe`](Reflect::describe).
pub trait Reflect: AsAny {
    /// Runtime type tag of the concrete value.
    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<Self>()
    }

    /// Ordered structural children. Sequence elements carry no label.
    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }

    /// Base structural layer, for values modelled as a derived layer on top
    /// of a parent layer.
    fn superclass(&self) -> Option<Mirror> {
        None
    }

    /// Composed content of a user-defined view.
    fn body(&self) -> Option<Value> {
        None
    }

    fn is_sequence(&self) -> bool {
        false
    }

    /// Textual representation used when the value has no structural children.
    fn describe(&self) -> String {
        self.type_tag().into_string()
    }
}

/// Type-erased handle to a reflected value.
///
/// Cloning is cheap and preserves identity: two clones are
/// [`ptr_eq`](Value::ptr_eq).
#[derive(Clone)]
pub struct Value(Arc<dyn Reflect>);

impl Value {
    pub fn new<T: Reflect>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Wrap an already shared value without copying it.
    pub fn from_arc<T: Reflect>(value: Arc<T>) -> Self {
        Self(value)
    }

    pub fn reflect(&self) -> &dyn Reflect {
        &*self.0
    }

    pub fn type_tag(&self) -> TypeTag {
        self.0.type_tag()
    }

    pub fn fields(&self) -> Vec<Field> {
        self.0.fields()
    }

    /// First direct child whose label equals `label`.
    pub fn descendant(&self, label: &str) -> Option<Value> {
        self.0
            .fields()
            .into_iter()
            .find(|field| field.label.as_deref() == Some(label))
            .map(|field| field.value)
    }

    pub fn superclass(&self) -> Option<Mirror> {
        self.0.superclass()
    }

    pub fn body(&self) -> Option<Value> {
        self.0.body()
    }

    pub fn is_sequence(&self) -> bool {
        self.0.is_sequence()
    }

    pub fn describe(&self) -> String {
        self.0.describe()
    }

    pub fn is<T: Reflect>(&self) -> bool {
        AsAny::as_any(&*self.0).is::<T>()
    }

    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        AsAny::as_any(&*self.0).downcast_ref::<T>()
    }

    /// Shared handle to the concrete value, if it is a `T`.
    pub fn downcast<T: Reflect>(&self) -> Option<Arc<T>> {
        AsAny::into_any_arc(Arc::clone(&self.0)).downcast::<T>().ok()
    }

    pub fn ptr_eq(&self, other: &Value) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({})", self.type_tag())
    }
}

/// One structural child of a value.
#[derive(Debug, Clone)]
pub struct Field {
    pub label: Option<String>,
    pub value: Value,
}

impl Field {
    pub fn named(label: impl Into<String>, value: Value) -> Self {
        Self {
            label: Some(label.into()),
            value,
        }
    }

    pub fn unnamed(value: Value) -> Self {
        Self { label: None, value }
    }
}

/// Opaque handle to one structural layer of a value.
///
/// Returned for the `"super"` label. It is itself reflected, so lookups can
/// continue through it.
#[derive(Debug, Clone)]
pub struct Mirror {
    subject: TypeTag,
    fields: Vec<Field>,
    superclass: Option<Box<Mirror>>,
}

impl Mirror {
    pub fn new(subject: TypeTag, fields: Vec<Field>) -> Self {
        Self {
            subject,
            fields,
            superclass: None,
        }
    }

    /// Capture the layer of `value` together with its own base layers.
    pub fn reflecting(value: &dyn Reflect) -> Self {
        Self {
            subject: value.type_tag(),
            fields: value.fields(),
            superclass: value.superclass().map(Box::new),
        }
    }

    pub fn with_superclass(mut self, superclass: Mirror) -> Self {
        self.superclass = Some(Box::new(superclass));
        self
    }

    /// Tag of the layer this mirror describes.
    pub fn subject(&self) -> &TypeTag {
        &self.subject
    }
}

impl Reflect for Mirror {
    fn fields(&self) -> Vec<Field> {
        self.fields.clone()
    }

    fn superclass(&self) -> Option<Mirror> {
        self.superclass.as_deref().cloned()
    }

    fn describe(&self) -> String {
        format!("Mirror for {}", self.subject)
    }
}

// ============================================================================
// Leaf and container impls
// ============================================================================

macro_rules! reflect_display_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn describe(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

reflect_display_leaf!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &'static str,
);

impl Reflect for () {
    fn describe(&self) -> String {
        "()".to_string()
    }
}

impl<T: Reflect + Clone> Reflect for Vec<T> {
    fn fields(&self) -> Vec<Field> {
        self.iter()
            .map(|element| Field::unnamed(Value::new(element.clone())))
            .collect()
    }

    fn is_sequence(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("[{} elements]", self.len())
    }
}

impl<T: Reflect + Clone> Reflect for Option<T> {
    fn fields(&self) -> Vec<Field> {
        match self {
            Some(inner) => vec![Field::named("some", Value::new(inner.clone()))],
            None => Vec::new(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Some(inner) => format!("Some({})", inner.describe()),
            None => "None".to_string(),
        }
    }
}

macro_rules! reflect_tuple {
    ($(($($name:ident : $idx:tt),+))+) => {
        $(
            impl<$($name: Reflect + Clone),+> Reflect for ($($name,)+) {
                fn fields(&self) -> Vec<Field> {
                    vec![$(Field::named(concat!(".", stringify!($idx)), Value::new(self.$idx.clone()))),+]
                }
            }
        )+
    };
}

reflect_tuple! {
    (A: 0)
    (A: 0, B: 1)
    (A: 0, B: 1, C: 2)
    (A: 0, B: 1, C: 2, D: 3)
    (A: 0, B: 1, C: 2, D: 3, E: 4)
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5)
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6)
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7)
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8)
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9)
}
