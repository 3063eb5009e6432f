//! Typed handles for step-by-step navigation in tests.
//!
//! An [`InspectableView<K>`] pairs a [`Content`] node with the kind `K` it was
//! validated against. Kinds with one child expose `text()`, `picker()` and
//! friends; kinds with a group expose the `_at(index)` variants. Every step
//! runs [`engine::guard_kind`], so a wrong expectation fails with the tag that
//! was actually found.
//!
//! ```
//! use view_probe::views::{Text, ViewExt};
//! use view_probe::wrappers::TupleView;
//! use view_probe::inspect;
//!
//! let stack = TupleView::new((Text::new("Title").padding(8.0), Text::new("Subtitle")));
//! let root = inspect(stack).unwrap();
//! assert_eq!(root.text_at(1).unwrap().string().unwrap(), "Subtitle");
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::binding;
use crate::content::Content;
use crate::engine;
use crate::error::{InspectionError, Result};
use crate::inspector;
use crate::kind::{KnownKind, MultipleContent, SingleContent};
use crate::kinds::{self, ClassifiedView, CustomView};
use crate::lazy_group::LazyGroup;
use crate::reflect::{Reflect, Value};
use crate::type_tag::TypeTag;

/// A node validated as kind `K`.
pub struct InspectableView<K> {
    content: Content,
    index: Option<usize>,
    path: String,
    kind: PhantomData<fn() -> K>,
}

impl<K> fmt::Debug for InspectableView<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InspectableView")
            .field("path", &self.path)
            .field("index", &self.index)
            .field("payload", &self.content.payload.type_tag())
            .finish()
    }
}

/// Start inspecting `view`, normalized and accepted whatever its kind.
pub fn inspect<V: Reflect>(view: V) -> Result<InspectableView<ClassifiedView>> {
    inspect_value(Value::new(view))
}

/// [`inspect`] for an already erased value.
pub fn inspect_value(value: Value) -> Result<InspectableView<ClassifiedView>> {
    let content = engine::normalize(&Content::new(value))?;
    InspectableView::new(content, None, "inspect()".to_string(), None)
}

/// Start inspecting a user-defined view through its body.
pub fn inspect_view<T: Reflect>(view: T) -> Result<InspectableView<CustomView<T>>> {
    InspectableView::new(
        Content::new(Value::new(view)),
        None,
        "inspect()".to_string(),
        None,
    )
}

impl<K: KnownKind> InspectableView<K> {
    fn new(content: Content, parent: Option<&str>, call: String, index: Option<usize>) -> Result<Self> {
        engine::guard_kind(&content.payload, &K::type_prefix(), &call)?;
        let path = match parent {
            Some(parent) => format!("{}.{}", parent, call),
            None => call,
        };
        Ok(Self {
            content,
            index,
            path,
            kind: PhantomData,
        })
    }

    fn extract<C: KnownKind>(&self, content: Content, index: Option<usize>) -> Result<InspectableView<C>> {
        InspectableView::new(content, Some(&self.path), C::inspection_call(index), index)
    }

    /// Normalize the attribute `label` of the payload and step into it as `call`.
    fn descend(&self, label: &str, call: &str) -> Result<InspectableView<ClassifiedView>> {
        let view = inspector::attribute(label, &self.content.payload)?;
        let content = engine::normalize(&Content::new(view))?;
        InspectableView::new(content, Some(&self.path), call.to_string(), None)
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn payload(&self) -> &Value {
        &self.content.payload
    }

    /// Position within the parent group, if reached by index.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Chain of calls that led here, e.g. `inspect().picker().label_view()`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Diagnostic dump of the payload.
    pub fn print(&self) -> String {
        inspector::print(&self.content.payload)
    }

    /// Read a custom attribute of the payload by path.
    pub fn attribute<T: Reflect>(&self, path: &str) -> Result<Arc<T>> {
        inspector::attribute_path_as(path, &self.content.payload)
    }

    /// Innermost applied modifier whose modifier type satisfies `predicate`.
    ///
    /// # Errors
    ///
    /// [`InspectionError::AttributeNotFound`] naming `call` when no applied
    /// modifier matches.
    pub fn modifier<P>(&self, predicate: P, call: &str) -> Result<Value>
    where
        P: Fn(&TypeTag) -> bool,
    {
        self.content
            .modifiers
            .iter()
            .rev()
            .find(|applied| {
                inspector::attribute("modifier", applied)
                    .map(|modifier| predicate(&modifier.type_tag()))
                    .unwrap_or(false)
            })
            .cloned()
            .ok_or_else(|| InspectionError::attribute_not_found(call, self.content.payload.type_tag()))
    }

    /// Style set by the closest `picker_style` modifier.
    pub fn picker_style(&self) -> Result<Value> {
        let applied = self.modifier(|tag| tag.has_prefix("PickerStyleWriter"), "picker_style")?;
        inspector::attribute_path("modifier|style", &applied)
    }

    /// Style set by the closest `label_style` modifier.
    pub fn label_style(&self) -> Result<Value> {
        let applied = self.modifier(|tag| tag.has_prefix("LabelStyleModifier"), "label_style")?;
        inspector::attribute_path("modifier|style", &applied)
    }

    /// The same node without kind expectations.
    pub fn classified(&self) -> InspectableView<ClassifiedView> {
        InspectableView {
            content: self.content.clone(),
            index: self.index,
            path: self.path.clone(),
            kind: PhantomData,
        }
    }
}

impl<K: SingleContent> InspectableView<K> {
    pub fn child(&self) -> Result<Content> {
        K::child(&self.content)
    }

    pub fn any_view(&self) -> Result<InspectableView<ClassifiedView>> {
        self.extract(self.child()?, None)
    }

    pub fn text(&self) -> Result<InspectableView<kinds::Text>> {
        self.extract(self.child()?, None)
    }

    pub fn label(&self) -> Result<InspectableView<kinds::Label>> {
        self.extract(self.child()?, None)
    }

    pub fn picker(&self) -> Result<InspectableView<kinds::Picker>> {
        self.extract(self.child()?, None)
    }

    /// The single child as a user-defined view of type `T`.
    pub fn view<T: Reflect>(&self) -> Result<InspectableView<CustomView<T>>> {
        self.extract(self.child()?, None)
    }
}

impl<K: MultipleContent> InspectableView<K> {
    pub fn children(&self) -> Result<LazyGroup<Content>> {
        K::children(&self.content)
    }

    pub fn child_at(&self, index: usize) -> Result<Content> {
        K::children(&self.content)?.element(index)
    }

    pub fn any_view_at(&self, index: usize) -> Result<InspectableView<ClassifiedView>> {
        self.extract(self.child_at(index)?, Some(index))
    }

    pub fn text_at(&self, index: usize) -> Result<InspectableView<kinds::Text>> {
        self.extract(self.child_at(index)?, Some(index))
    }

    pub fn label_at(&self, index: usize) -> Result<InspectableView<kinds::Label>> {
        self.extract(self.child_at(index)?, Some(index))
    }

    pub fn picker_at(&self, index: usize) -> Result<InspectableView<kinds::Picker>> {
        self.extract(self.child_at(index)?, Some(index))
    }

    pub fn view_at<T: Reflect>(&self, index: usize) -> Result<InspectableView<CustomView<T>>> {
        self.extract(self.child_at(index)?, Some(index))
    }
}

impl InspectableView<kinds::Text> {
    pub fn string(&self) -> Result<String> {
        let string = inspector::attribute_as::<String>("string", &self.content.payload)?;
        Ok((*string).clone())
    }
}

impl InspectableView<kinds::Label> {
    pub fn title(&self) -> Result<InspectableView<ClassifiedView>> {
        self.descend("title", "title()")
    }

    pub fn icon(&self) -> Result<InspectableView<ClassifiedView>> {
        self.descend("icon", "icon()")
    }
}

impl InspectableView<kinds::Picker> {
    pub fn label_view(&self) -> Result<InspectableView<ClassifiedView>> {
        self.descend("label", "label_view()")
    }

    /// Drive the picker's bound selection to `value`.
    ///
    /// # Errors
    ///
    /// [`InspectionError::TypeMismatch`] naming the bound selection type when
    /// the picker is not bound to an `S`.
    pub fn select<S: Reflect + Clone>(&self, value: S) -> Result<()> {
        binding::set_value(&self.content, "selection", value)
    }
}

impl<T: Reflect> InspectableView<CustomView<T>> {
    /// The user's own value.
    pub fn actual_view(&self) -> Result<Arc<T>> {
        inspector::cast(&self.content.payload)
    }
}
