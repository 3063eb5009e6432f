//! Kind markers and their extractors.
//!
//! A marker names a wrapper kind independently of the generic parameters of
//! its value type: `kinds::ModifiedContent` stands for every
//! `wrappers::ModifiedContent<C, M>`. Built-in transparent extractors return
//! the raw inner node; [`crate::engine::normalize`] keeps unwrapping.

use std::marker::PhantomData;

use crate::content::Content;
use crate::engine;
use crate::error::{InspectionError, Result};
use crate::inspector;
use crate::kind::{KnownKind, MultipleContent, SingleContent};
use crate::lazy_group::LazyGroup;
use crate::reflect::Reflect;
use crate::type_tag::TypeTag;

macro_rules! known_kind {
    ($($(#[$meta:meta])* $marker:ident => $prefix:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy)]
            pub struct $marker;

            impl KnownKind for $marker {
                fn type_prefix() -> String {
                    $prefix.to_string()
                }
            }
        )*
    };
}

known_kind! {
    /// Variadic-view indirection.
    Tree => "Tree",
    /// Identity wrapper.
    IdView => "IdView",
    /// `Option<T>`; an absent value has no child.
    Optional => "Option",
    EquatableView => "EquatableView",
    /// Decorated content; contributes to the modifier history.
    ModifiedContent => "ModifiedContent",
    ConditionalContent => "ConditionalContent",
    SubscriptionView => "SubscriptionView",
    EnvironmentReader => "EnvironmentReader",
    DelayedPreferenceView => "DelayedPreferenceView",
    /// Tuple-backed group of children.
    TupleView => "TupleView",
    Text => "Text",
    Label => "Label",
    Picker => "Picker",
}

/// Extract the `content` field, keeping the modifier history.
fn content_child(content: &Content) -> Result<Content> {
    let view = inspector::attribute("content", &content.payload)?;
    Ok(content.replacing_payload(view))
}

impl SingleContent for Tree {
    fn child(content: &Content) -> Result<Content> {
        content_child(content)
    }
}

impl SingleContent for IdView {
    fn child(content: &Content) -> Result<Content> {
        content_child(content)
    }
}

impl SingleContent for Optional {
    fn child(content: &Content) -> Result<Content> {
        let view = inspector::attribute("some", &content.payload)?;
        Ok(content.replacing_payload(view))
    }
}

impl SingleContent for EquatableView {
    fn child(content: &Content) -> Result<Content> {
        content_child(content)
    }
}

impl SingleContent for ModifiedContent {
    fn child(content: &Content) -> Result<Content> {
        let view = inspector::attribute("content", &content.payload)?;
        Ok(content.appending_modifier(view, content.payload.clone()))
    }
}

impl SingleContent for ConditionalContent {
    fn child(content: &Content) -> Result<Content> {
        let storage = inspector::attribute("storage", &content.payload)?;
        let view = match inspector::attribute("trueContent", &storage) {
            Ok(view) => view,
            Err(_) => inspector::attribute("falseContent", &storage)?,
        };
        Ok(content.replacing_payload(view))
    }
}

impl SingleContent for SubscriptionView {
    fn child(content: &Content) -> Result<Content> {
        content_child(content)
    }
}

impl SingleContent for EnvironmentReader {
    fn child(content: &Content) -> Result<Content> {
        content_child(content)
    }
}

impl SingleContent for DelayedPreferenceView {
    fn child(content: &Content) -> Result<Content> {
        content_child(content)
    }
}

impl MultipleContent for TupleView {
    fn children(content: &Content) -> Result<LazyGroup<Content>> {
        let tuple = inspector::attribute("value", &content.payload)?;
        let count = tuple.fields().len();
        Ok(LazyGroup::new(count, move |index| {
            let child = inspector::attribute(&format!(".{}", index), &tuple)?;
            engine::normalize(&Content::new(child))
        }))
    }
}

impl MultipleContent for Picker {
    fn children(content: &Content) -> Result<LazyGroup<Content>> {
        let items = inspector::attribute("content", &content.payload)?;
        engine::children_of(&Content::new(items), false)
    }
}

/// Any node, whatever its kind. Accepts every payload.
#[derive(Debug, Clone, Copy)]
pub struct ClassifiedView;

impl KnownKind for ClassifiedView {
    fn type_prefix() -> String {
        String::new()
    }

    fn inspection_call(index: Option<usize>) -> String {
        match index {
            Some(index) => format!("any_view_at({})", index),
            None => "any_view()".to_string(),
        }
    }
}

impl SingleContent for ClassifiedView {
    fn child(content: &Content) -> Result<Content> {
        engine::normalize(content)
    }
}

impl MultipleContent for ClassifiedView {
    fn children(content: &Content) -> Result<LazyGroup<Content>> {
        engine::children_of(content, false)
    }
}

/// A user-defined composite view of type `T`, reached through its body.
pub struct CustomView<T>(PhantomData<fn() -> T>);

impl<T: Reflect> KnownKind for CustomView<T> {
    fn type_prefix() -> String {
        TypeTag::of::<T>().prefix().to_string()
    }

    fn inspection_call(index: Option<usize>) -> String {
        match index {
            Some(index) => format!("view_at::<{}>({})", Self::type_prefix(), index),
            None => format!("view::<{}>()", Self::type_prefix()),
        }
    }
}

impl<T: Reflect> CustomView<T> {
    fn body(content: &Content) -> Result<Content> {
        let view = inspector::cast::<T>(&content.payload)?;
        let body = view.body().ok_or_else(|| {
            InspectionError::NotSupported(format!(
                "{} does not expose a body; implement Reflect::body for it",
                content.payload.type_tag()
            ))
        })?;
        Ok(Content::new(body))
    }
}

impl<T: Reflect> SingleContent for CustomView<T> {
    fn child(content: &Content) -> Result<Content> {
        engine::normalize(&Self::body(content)?)
    }
}

impl<T: Reflect> MultipleContent for CustomView<T> {
    fn children(content: &Content) -> Result<LazyGroup<Content>> {
        engine::children_of(&Self::body(content)?, true)
    }
}
