//! Unwrapping engine.
//!
//! Strips the closed set of built-in transparent wrappers off a node, exposes
//! container children as a [`LazyGroup`], and validates kinds before typed
//! extraction.

use tracing::trace;

use crate::content::Content;
use crate::error::{InspectionError, Result};
use crate::kind::{KnownKind, MultipleContent, SingleContent};
use crate::kinds;
use crate::lazy_group::LazyGroup;
use crate::options::InspectOptions;
use crate::reflect::Value;
use crate::type_tag::TypeTag;

/// The built-in wrapper kinds whose sole role is to carry one inner payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransparentKind {
    Tree,
    IdView,
    Optional,
    EquatableView,
    ModifiedContent,
    SubscriptionView,
    ConditionalContent,
    EnvironmentReader,
    DelayedPreferenceView,
}

impl TransparentKind {
    /// Recognise a transparent kind from a prefix tag.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "Tree" => Some(Self::Tree),
            "IdView" => Some(Self::IdView),
            "Option" => Some(Self::Optional),
            "EquatableView" => Some(Self::EquatableView),
            "ModifiedContent" => Some(Self::ModifiedContent),
            "SubscriptionView" => Some(Self::SubscriptionView),
            "ConditionalContent" => Some(Self::ConditionalContent),
            "EnvironmentReader" => Some(Self::EnvironmentReader),
            "DelayedPreferenceView" => Some(Self::DelayedPreferenceView),
            _ => None,
        }
    }

    /// Run this kind's single-child extractor.
    pub fn child(self, content: &Content) -> Result<Content> {
        match self {
            Self::Tree => kinds::Tree::child(content),
            Self::IdView => kinds::IdView::child(content),
            Self::Optional => kinds::Optional::child(content),
            Self::EquatableView => kinds::EquatableView::child(content),
            Self::ModifiedContent => kinds::ModifiedContent::child(content),
            Self::SubscriptionView => kinds::SubscriptionView::child(content),
            Self::ConditionalContent => kinds::ConditionalContent::child(content),
            Self::EnvironmentReader => kinds::EnvironmentReader::child(content),
            Self::DelayedPreferenceView => kinds::DelayedPreferenceView::child(content),
        }
    }
}

/// Strip transparent wrappers until a non-transparent payload is reached.
///
/// A node whose payload is not transparent is returned unchanged, so
/// `normalize` is idempotent.
///
/// # Errors
///
/// Propagates the first extractor failure. An absent `Option` fails with
/// [`InspectionError::AttributeNotFound`] for the label `some`. More than
/// [`InspectOptions::max_unwrap_depth`] wrappers fail with
/// [`InspectionError::NotSupported`].
pub fn normalize(content: &Content) -> Result<Content> {
    normalize_with(content, &InspectOptions::default())
}

/// [`normalize`] with explicit options.
pub fn normalize_with(content: &Content, options: &InspectOptions) -> Result<Content> {
    let mut current = content.clone();
    let mut stripped = 0usize;

    loop {
        let tag = current.payload.type_tag();
        let Some(kind) = TransparentKind::from_prefix(tag.prefix()) else {
            return Ok(current);
        };
        if stripped == options.max_unwrap_depth {
            return Err(InspectionError::NotSupported(format!(
                "Unwrapping {} exceeded {} nested transparent wrappers; \
                 break the self-referential wrapper chain or raise max_unwrap_depth",
                tag, options.max_unwrap_depth
            )));
        }
        trace!(kind = ?kind, depth = stripped, tag = %tag, "unwrapping transparent wrapper");
        current = kind.child(&current)?;
        stripped += 1;
    }
}

/// Normalize `value` with an initial modifier history.
pub fn unwrap_value(value: Value, modifiers: Vec<Value>) -> Result<Content> {
    normalize(&Content::with_modifiers(value, modifiers))
}

/// Children of a container-like node.
///
/// A tuple group yields one child per element in declaration order. Any other
/// node is its own solitary child; with `reset_modifiers_for_solitary_child`
/// that child starts a fresh modifier history.
pub fn children_of(
    content: &Content,
    reset_modifiers_for_solitary_child: bool,
) -> Result<LazyGroup<Content>> {
    let unwrapped = normalize(content)?;
    if is_tuple_view(&unwrapped.payload) {
        return kinds::TupleView::children(&unwrapped);
    }
    let solitary = if reset_modifiers_for_solitary_child {
        unwrapped.without_modifiers()
    } else {
        unwrapped
    };
    Ok(LazyGroup::new(1, move |_| Ok(solitary.clone())))
}

pub fn is_tuple_view(value: &Value) -> bool {
    value.type_tag().prefix() == kinds::TupleView::type_prefix()
}

/// Check that `value`'s tag starts with `expected_prefix`.
///
/// `inspection_call` names the call being attempted and is echoed in the
/// guidance of the two environment-reader configurations that need an
/// explicit unwrap first. The named unwrap calls, `.navigation_bar_items()`
/// and `.popover()`, are provided by the adapters for those kinds, not by this
/// crate; without such an adapter the reader cannot be stepped through.
///
/// # Errors
///
/// [`InspectionError::NotSupported`] for those reader configurations,
/// otherwise [`InspectionError::TypeMismatch`] on a prefix mismatch.
pub fn guard_kind(value: &Value, expected_prefix: &str, inspection_call: &str) -> Result<()> {
    let tag = value.type_tag();
    if !expected_prefix.is_empty() && tag.has_prefix(kinds::EnvironmentReader::type_prefix().as_str()) {
        guard_environment_reader(&tag, inspection_call)?;
    }
    if !tag.has_prefix(expected_prefix) {
        return Err(InspectionError::type_mismatch(tag, expected_prefix));
    }
    Ok(())
}

fn guard_environment_reader(tag: &TypeTag, inspection_call: &str) -> Result<()> {
    if tag.contains("NavigationBarItemsKey") {
        return Err(InspectionError::NotSupported(format!(
            "Please insert '.navigation_bar_items()' before {} for unwrapping the underlying view hierarchy.",
            inspection_call
        )));
    }
    if tag.contains("AnchorWritingModifier") {
        return Err(InspectionError::NotSupported(format!(
            "Please insert '.popover()' before {} for unwrapping the view under the popover anchor.",
            inspection_call
        )));
    }
    Ok(())
}
