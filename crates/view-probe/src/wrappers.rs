//! Value types of the built-in transparent wrapper kinds and the tuple group.
//!
//! Each wrapper carries exactly one meaningful payload and is elided during
//! traversal. Children are held behind `Arc`, so reflecting a wrapper never
//! deep-copies its subtree and repeated lookups of a wrapper's own fields
//! return the same handle. Elements inside a tuple, `Option` or `Vec` are
//! re-wrapped on every lookup and compare as distinct nodes.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::reflect::{Field, Reflect, Value};

/// Environment key of a reader that publishes navigation bar items.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationBarItemsKey;

/// Environment key of a reader that writes a popover anchor.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorWritingModifier;

/// Variadic-view indirection: a layout `root` applied to `content`.
pub struct Tree<R, C> {
    root: Arc<R>,
    content: Arc<C>,
}

impl<R: Reflect, C: Reflect> Tree<R, C> {
    pub fn new(root: R, content: C) -> Self {
        Self {
            root: Arc::new(root),
            content: Arc::new(content),
        }
    }
}

impl<R, C> Clone for Tree<R, C> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            content: Arc::clone(&self.content),
        }
    }
}

impl<R: Reflect, C: Reflect> Reflect for Tree<R, C> {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::named("root", Value::from_arc(Arc::clone(&self.root))),
            Field::named("content", Value::from_arc(Arc::clone(&self.content))),
        ]
    }
}

/// Identity wrapper: `content` tagged with an explicit `id`.
pub struct IdView<C, I> {
    content: Arc<C>,
    id: Arc<I>,
}

impl<C: Reflect, I: Reflect> IdView<C, I> {
    pub fn new(content: C, id: I) -> Self {
        Self {
            content: Arc::new(content),
            id: Arc::new(id),
        }
    }
}

impl<C, I> Clone for IdView<C, I> {
    fn clone(&self) -> Self {
        Self {
            content: Arc::clone(&self.content),
            id: Arc::clone(&self.id),
        }
    }
}

impl<C: Reflect, I: Reflect> Reflect for IdView<C, I> {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::named("content", Value::from_arc(Arc::clone(&self.content))),
            Field::named("id", Value::from_arc(Arc::clone(&self.id))),
        ]
    }
}

/// Wrapper that compares its content by equality before re-rendering.
pub struct EquatableView<C> {
    content: Arc<C>,
}

impl<C: Reflect> EquatableView<C> {
    pub fn new(content: C) -> Self {
        Self {
            content: Arc::new(content),
        }
    }
}

impl<C> Clone for EquatableView<C> {
    fn clone(&self) -> Self {
        Self {
            content: Arc::clone(&self.content),
        }
    }
}

impl<C: Reflect> Reflect for EquatableView<C> {
    fn fields(&self) -> Vec<Field> {
        vec![Field::named(
            "content",
            Value::from_arc(Arc::clone(&self.content)),
        )]
    }
}

/// `content` decorated with `modifier`.
///
/// Unwrapping appends the whole wrapper to the node's modifier history so
/// adapters can later read `modifier|...` paths from it.
pub struct ModifiedContent<C, M> {
    content: Arc<C>,
    modifier: Arc<M>,
}

impl<C: Reflect, M: Reflect> ModifiedContent<C, M> {
    pub fn new(content: C, modifier: M) -> Self {
        Self {
            content: Arc::new(content),
            modifier: Arc::new(modifier),
        }
    }
}

impl<C, M> Clone for ModifiedContent<C, M> {
    fn clone(&self) -> Self {
        Self {
            content: Arc::clone(&self.content),
            modifier: Arc::clone(&self.modifier),
        }
    }
}

impl<C: Reflect, M: Reflect> Reflect for ModifiedContent<C, M> {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::named("content", Value::from_arc(Arc::clone(&self.content))),
            Field::named("modifier", Value::from_arc(Arc::clone(&self.modifier))),
        ]
    }
}

/// Which branch of a [`ConditionalContent`] is live.
pub enum ConditionalStorage<T, F> {
    TrueContent(Arc<T>),
    FalseContent(Arc<F>),
}

impl<T, F> Clone for ConditionalStorage<T, F> {
    fn clone(&self) -> Self {
        match self {
            Self::TrueContent(content) => Self::TrueContent(Arc::clone(content)),
            Self::FalseContent(content) => Self::FalseContent(Arc::clone(content)),
        }
    }
}

impl<T: Reflect, F: Reflect> Reflect for ConditionalStorage<T, F> {
    fn fields(&self) -> Vec<Field> {
        match self {
            Self::TrueContent(content) => vec![Field::named(
                "trueContent",
                Value::from_arc(Arc::clone(content)),
            )],
            Self::FalseContent(content) => vec![Field::named(
                "falseContent",
                Value::from_arc(Arc::clone(content)),
            )],
        }
    }
}

/// An `if`/`else` branch; exactly one side is present.
pub struct ConditionalContent<T, F> {
    storage: ConditionalStorage<T, F>,
}

impl<T: Reflect, F: Reflect> ConditionalContent<T, F> {
    pub fn true_content(content: T) -> Self {
        Self {
            storage: ConditionalStorage::TrueContent(Arc::new(content)),
        }
    }

    pub fn false_content(content: F) -> Self {
        Self {
            storage: ConditionalStorage::FalseContent(Arc::new(content)),
        }
    }
}

impl<T, F> Clone for ConditionalContent<T, F> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }
}

impl<T: Reflect, F: Reflect> Reflect for ConditionalContent<T, F> {
    fn fields(&self) -> Vec<Field> {
        vec![Field::named("storage", Value::new(self.storage.clone()))]
    }
}

/// `content` that also listens to `publisher`.
pub struct SubscriptionView<P, C> {
    publisher: Arc<P>,
    content: Arc<C>,
}

impl<P: Reflect, C: Reflect> SubscriptionView<P, C> {
    pub fn new(publisher: P, content: C) -> Self {
        Self {
            publisher: Arc::new(publisher),
            content: Arc::new(content),
        }
    }
}

impl<P, C> Clone for SubscriptionView<P, C> {
    fn clone(&self) -> Self {
        Self {
            publisher: Arc::clone(&self.publisher),
            content: Arc::clone(&self.content),
        }
    }
}

impl<P: Reflect, C: Reflect> Reflect for SubscriptionView<P, C> {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::named("publisher", Value::from_arc(Arc::clone(&self.publisher))),
            Field::named("content", Value::from_arc(Arc::clone(&self.content))),
        ]
    }
}

/// `content` produced from the environment value stored under key `K`.
///
/// `K` only appears in the type tag, which is how unsupported reader
/// configurations are recognised.
pub struct EnvironmentReader<K, C> {
    key: PhantomData<fn() -> K>,
    content: Arc<C>,
}

impl<K: 'static, C: Reflect> EnvironmentReader<K, C> {
    pub fn new(content: C) -> Self {
        Self {
            key: PhantomData,
            content: Arc::new(content),
        }
    }
}

impl<K, C> Clone for EnvironmentReader<K, C> {
    fn clone(&self) -> Self {
        Self {
            key: PhantomData,
            content: Arc::clone(&self.content),
        }
    }
}

impl<K: 'static, C: Reflect> Reflect for EnvironmentReader<K, C> {
    fn fields(&self) -> Vec<Field> {
        vec![Field::named(
            "content",
            Value::from_arc(Arc::clone(&self.content)),
        )]
    }
}

/// `content` built once the preference `K` has been resolved.
pub struct DelayedPreferenceView<K, C> {
    key: PhantomData<fn() -> K>,
    content: Arc<C>,
}

impl<K: 'static, C: Reflect> DelayedPreferenceView<K, C> {
    pub fn new(content: C) -> Self {
        Self {
            key: PhantomData,
            content: Arc::new(content),
        }
    }
}

impl<K, C> Clone for DelayedPreferenceView<K, C> {
    fn clone(&self) -> Self {
        Self {
            key: PhantomData,
            content: Arc::clone(&self.content),
        }
    }
}

impl<K: 'static, C: Reflect> Reflect for DelayedPreferenceView<K, C> {
    fn fields(&self) -> Vec<Field> {
        vec![Field::named(
            "content",
            Value::from_arc(Arc::clone(&self.content)),
        )]
    }
}

/// Fixed-arity group of children stored as a tuple in `value`.
pub struct TupleView<T> {
    value: Arc<T>,
}

impl<T: Reflect + Clone> TupleView<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(value),
        }
    }
}

impl<T> Clone for TupleView<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
        }
    }
}

impl<T: Reflect + Clone> Reflect for TupleView<T> {
    fn fields(&self) -> Vec<Field> {
        vec![Field::named("value", Value::from_arc(Arc::clone(&self.value)))]
    }
}
