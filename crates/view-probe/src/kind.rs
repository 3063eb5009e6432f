//! Known-kind capability protocol.
//!
//! A wrapper kind plugs into child extraction by naming the type prefix it
//! models and implementing exactly one of [`SingleContent`] or
//! [`MultipleContent`]. Kinds are described by a [`KindDescriptor`]; a
//! [`KindRegistry`] maps prefixes to descriptors and is immutable once built.

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::content::Content;
use crate::error::{InspectionError, Result};
use crate::inspector;
use crate::lazy_group::LazyGroup;

/// A wrapper kind recognised by its type-tag prefix.
pub trait KnownKind {
    /// Constant per kind; matches the prefix of the runtime tag it models.
    fn type_prefix() -> String;

    /// Call that extracts this kind from a parent, used in error guidance.
    fn inspection_call(index: Option<usize>) -> String {
        let name = snake_case(&Self::type_prefix());
        match index {
            Some(index) => format!("{}_at({})", name, index),
            None => format!("{}()", name),
        }
    }
}

/// A kind carrying exactly one meaningful child.
pub trait SingleContent: KnownKind {
    fn child(content: &Content) -> Result<Content>;
}

/// A kind carrying an ordered group of children.
pub trait MultipleContent: KnownKind {
    fn children(content: &Content) -> Result<LazyGroup<Content>>;
}

pub type SingleExtractor = fn(&Content) -> Result<Content>;
pub type MultipleExtractor = fn(&Content) -> Result<LazyGroup<Content>>;

/// The extraction strategy of a kind: one child or a group, never both.
#[derive(Clone, Copy)]
pub enum Extractor {
    Single(SingleExtractor),
    Multiple(MultipleExtractor),
}

/// Registration record for one wrapper kind.
#[derive(Clone)]
pub struct KindDescriptor {
    type_prefix: String,
    extractor: Extractor,
}

impl KindDescriptor {
    pub fn new(type_prefix: impl Into<String>, extractor: Extractor) -> Self {
        Self {
            type_prefix: type_prefix.into(),
            extractor,
        }
    }

    pub fn single<K: SingleContent>() -> Self {
        Self::new(K::type_prefix(), Extractor::Single(K::child))
    }

    pub fn multiple<K: MultipleContent>() -> Self {
        Self::new(K::type_prefix(), Extractor::Multiple(K::children))
    }

    pub fn type_prefix(&self) -> &str {
        &self.type_prefix
    }

    pub fn extractor(&self) -> Extractor {
        self.extractor
    }
}

impl std::fmt::Debug for KindDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arity = match self.extractor {
            Extractor::Single(_) => "single",
            Extractor::Multiple(_) => "multiple",
        };
        f.debug_struct("KindDescriptor")
            .field("type_prefix", &self.type_prefix)
            .field("extractor", &arity)
            .finish()
    }
}

static GLOBAL_REGISTRY: OnceCell<KindRegistry> = OnceCell::new();

/// Immutable table from type prefix to kind descriptor.
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    kinds: HashMap<String, KindDescriptor>,
}

impl KindRegistry {
    pub fn builder() -> KindRegistryBuilder {
        KindRegistryBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn get(&self, type_prefix: &str) -> Option<&KindDescriptor> {
        self.kinds.get(type_prefix)
    }

    /// Descriptor for the kind of `content`'s payload.
    pub fn lookup(&self, content: &Content) -> Option<&KindDescriptor> {
        let prefix = inspector::type_name(&content.payload, true);
        self.kinds.get(prefix.as_str())
    }

    /// Run the single-child extractor registered for `content`'s kind.
    ///
    /// # Errors
    ///
    /// Fails with [`InspectionError::NotSupported`] when the kind is not
    /// registered or extracts a group instead of a single child.
    pub fn child(&self, content: &Content) -> Result<Content> {
        match self.descriptor_for(content)?.extractor {
            Extractor::Single(extract) => extract(content),
            Extractor::Multiple(_) => Err(InspectionError::NotSupported(format!(
                "{} holds multiple children; use children() and pick one by index",
                content.payload.type_tag()
            ))),
        }
    }

    /// Run the multi-child extractor registered for `content`'s kind.
    pub fn children(&self, content: &Content) -> Result<LazyGroup<Content>> {
        match self.descriptor_for(content)?.extractor {
            Extractor::Multiple(extract) => extract(content),
            Extractor::Single(_) => Err(InspectionError::NotSupported(format!(
                "{} holds a single child; use child() instead of children()",
                content.payload.type_tag()
            ))),
        }
    }

    fn descriptor_for(&self, content: &Content) -> Result<&KindDescriptor> {
        self.lookup(content).ok_or_else(|| {
            InspectionError::NotSupported(format!(
                "No kind is registered for {}; register a descriptor with prefix '{}' first",
                content.payload.type_tag(),
                inspector::type_name(&content.payload, true)
            ))
        })
    }

    /// Install `self` as the process-wide registry.
    ///
    /// # Errors
    ///
    /// Fails with [`InspectionError::NotSupported`] if a registry was already
    /// installed; the installed table never changes afterwards.
    pub fn install(self) -> Result<&'static KindRegistry> {
        let count = self.kinds.len();
        GLOBAL_REGISTRY.set(self).map_err(|_| {
            InspectionError::NotSupported(
                "A kind registry is already installed; build a single registry before any traversal"
                    .to_string(),
            )
        })?;
        debug!(kinds = count, "kind registry installed");
        Ok(GLOBAL_REGISTRY.get_or_init(KindRegistry::default))
    }

    /// The installed registry, if any.
    pub fn global() -> Option<&'static KindRegistry> {
        GLOBAL_REGISTRY.get()
    }
}

/// Collects descriptors before the registry is frozen.
#[derive(Debug, Default)]
pub struct KindRegistryBuilder {
    kinds: HashMap<String, KindDescriptor>,
}

impl KindRegistryBuilder {
    /// Add a descriptor.
    ///
    /// # Errors
    ///
    /// Prefixes must be unique; a second descriptor for the same prefix is
    /// rejected with [`InspectionError::NotSupported`].
    pub fn register(mut self, descriptor: KindDescriptor) -> Result<Self> {
        if self.kinds.contains_key(descriptor.type_prefix()) {
            return Err(InspectionError::NotSupported(format!(
                "Kind '{}' is already registered; each type prefix needs exactly one descriptor",
                descriptor.type_prefix()
            )));
        }
        self.kinds
            .insert(descriptor.type_prefix.clone(), descriptor);
        Ok(self)
    }

    pub fn single<K: SingleContent>(self) -> Result<Self> {
        self.register(KindDescriptor::single::<K>())
    }

    pub fn multiple<K: MultipleContent>(self) -> Result<Self> {
        self.register(KindDescriptor::multiple::<K>())
    }

    pub fn build(self) -> KindRegistry {
        KindRegistry { kinds: self.kinds }
    }
}

/// `ModifiedContent` -> `modified_content`
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
