//! # view-probe
//!
//! Structural introspection of nested, declarative view descriptions.
//!
//! A view description is an opaque value built by composing many small
//! wrappers: containers, conditionals, modified content, identity wrappers.
//! view-probe lets test code walk that composition without the description
//! exposing any inspection API of its own: values describe their shape through
//! [`Reflect`], transparent wrappers are stripped by the [`engine`], and
//! container children are materialized on demand as a [`LazyGroup`].
//!
//! ## Quick start
//!
//! ```rust
//! use view_probe::views::{Text, ViewExt};
//! use view_probe::wrappers::{ConditionalContent, TupleView};
//! use view_probe::{children_of, Content, Value};
//!
//! let body = TupleView::new((
//!     Text::new("Header").padding(4.0),
//!     ConditionalContent::<Text, Text>::false_content(Text::new("Signed out")),
//! ));
//! let children = children_of(&Content::new(Value::new(body)), false).unwrap();
//! assert_eq!(children.count(), 2);
//!
//! let second = children.element(1).unwrap();
//! assert_eq!(second.payload.type_tag(), "Text");
//! ```
//!
//! ## Modules
//!
//! - [`reflect`] -- `Reflect` trait, `Value` handle, `Mirror` layers
//! - [`inspector`] -- attribute/path lookup, casts, type tags, diagnostic printer
//! - [`engine`] -- `normalize`, `children_of`, `guard_kind`
//! - [`content`] / [`lazy_group`] -- traversal nodes and on-demand child groups
//! - [`kind`] / [`kinds`] -- known-kind protocol, registry and built-in kind markers
//! - [`binding`] -- bound values and the mutation accessor
//! - [`inspectable`] -- typed `InspectableView<K>` handles
//! - [`wrappers`] / [`views`] -- built-in wrapper and sample view values
//! - [`options`] -- `InspectOptions`
//! - [`type_tag`] -- path-free runtime type names
//! - [`error`] -- error types

pub mod binding;
pub mod content;
pub mod engine;
pub mod error;
pub mod inspectable;
pub mod inspector;
pub mod kind;
pub mod kinds;
pub mod lazy_group;
pub mod options;
pub mod reflect;
pub mod type_tag;
pub mod views;
pub mod wrappers;

pub use binding::{set_value, Binding};
pub use content::Content;
pub use engine::{children_of, guard_kind, normalize, normalize_with};
pub use error::{InspectionError, Result};
pub use inspectable::{inspect, inspect_value, inspect_view, InspectableView};
pub use inspector::print as render;
pub use kind::{Extractor, KindDescriptor, KindRegistry, KnownKind, MultipleContent, SingleContent};
pub use lazy_group::LazyGroup;
pub use options::InspectOptions;
pub use reflect::{Field, Mirror, Reflect, Value};
pub use type_tag::TypeTag;
