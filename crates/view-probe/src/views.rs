//! A small catalog of concrete view values.
//!
//! These model the primitives most inspection scenarios touch: plain text, a
//! title/icon label, a selection picker and the modifiers that style them.

use std::sync::Arc;

use crate::binding::Binding;
use crate::reflect::{Field, Reflect, Value};
use crate::wrappers::ModifiedContent;

/// A run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    string: String,
}

impl Text {
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.string
    }
}

impl Reflect for Text {
    fn fields(&self) -> Vec<Field> {
        vec![Field::named("string", Value::new(self.string.clone()))]
    }
}

/// A title paired with an icon.
pub struct Label<T, I> {
    title: Arc<T>,
    icon: Arc<I>,
}

impl<T: Reflect, I: Reflect> Label<T, I> {
    pub fn new(title: T, icon: I) -> Self {
        Self {
            title: Arc::new(title),
            icon: Arc::new(icon),
        }
    }
}

impl<T, I> Clone for Label<T, I> {
    fn clone(&self) -> Self {
        Self {
            title: Arc::clone(&self.title),
            icon: Arc::clone(&self.icon),
        }
    }
}

impl<T: Reflect, I: Reflect> Reflect for Label<T, I> {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::named("title", Value::from_arc(Arc::clone(&self.title))),
            Field::named("icon", Value::from_arc(Arc::clone(&self.icon))),
        ]
    }
}

/// A control choosing one `S` among the options in `content`.
pub struct Picker<L, S, C> {
    label: Arc<L>,
    selection: Binding<S>,
    content: Arc<C>,
}

impl<L: Reflect, S: Reflect + Clone, C: Reflect> Picker<L, S, C> {
    pub fn new(label: L, selection: Binding<S>, content: C) -> Self {
        Self {
            label: Arc::new(label),
            selection,
            content: Arc::new(content),
        }
    }

    pub fn selection(&self) -> &Binding<S> {
        &self.selection
    }
}

impl<L, S, C> Clone for Picker<L, S, C> {
    fn clone(&self) -> Self {
        Self {
            label: Arc::clone(&self.label),
            selection: self.selection.clone(),
            content: Arc::clone(&self.content),
        }
    }
}

impl<L: Reflect, S: Reflect + Clone, C: Reflect> Reflect for Picker<L, S, C> {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::named("label", Value::from_arc(Arc::clone(&self.label))),
            Field::named("selection", Value::new(self.selection.clone())),
            Field::named("content", Value::from_arc(Arc::clone(&self.content))),
        ]
    }
}

// ============================================================================
// Modifiers
// ============================================================================

/// Insets content on every edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub length: f64,
}

impl Reflect for Padding {
    fn fields(&self) -> Vec<Field> {
        vec![Field::named("length", Value::new(self.length))]
    }
}

/// Applies picker style `S` to the pickers below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickerStyleWriter<S> {
    pub style: S,
}

impl<S: Reflect + Clone> Reflect for PickerStyleWriter<S> {
    fn fields(&self) -> Vec<Field> {
        vec![Field::named("style", Value::new(self.style.clone()))]
    }
}

/// Applies label style `S` to the labels below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelStyleModifier<S> {
    pub style: S,
}

impl<S: Reflect + Clone> Reflect for LabelStyleModifier<S> {
    fn fields(&self) -> Vec<Field> {
        vec![Field::named("style", Value::new(self.style.clone()))]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WheelPickerStyle;

impl Reflect for WheelPickerStyle {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentedPickerStyle;

impl Reflect for SegmentedPickerStyle {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IconOnlyLabelStyle;

impl Reflect for IconOnlyLabelStyle {}

/// Builder-style decoration, mirroring how view descriptions are composed.
pub trait ViewExt: Reflect + Sized {
    fn modifier<M: Reflect>(self, modifier: M) -> ModifiedContent<Self, M> {
        ModifiedContent::new(self, modifier)
    }

    fn padding(self, length: f64) -> ModifiedContent<Self, Padding> {
        self.modifier(Padding { length })
    }

    fn picker_style<S: Reflect + Clone>(self, style: S) -> ModifiedContent<Self, PickerStyleWriter<S>> {
        self.modifier(PickerStyleWriter { style })
    }

    fn label_style<S: Reflect + Clone>(self, style: S) -> ModifiedContent<Self, LabelStyleModifier<S>> {
        self.modifier(LabelStyleModifier { style })
    }
}

impl<V: Reflect> ViewExt for V {}
