//! Count-known, on-demand sequences.

use std::fmt;
use std::sync::Arc;

use crate::error::{InspectionError, Result};

type Generator<T> = Arc<dyn Fn(usize) -> Result<T> + Send + Sync>;

/// A finite, restartable, random-access lazy sequence.
///
/// The element count is known upfront; an element is only built when its
/// index is requested. The generator must be pure: asking for the same index
/// twice yields structurally equal results.
pub struct LazyGroup<T> {
    count: usize,
    generator: Generator<T>,
}

impl<T> Clone for LazyGroup<T> {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<T: 'static> LazyGroup<T> {
    pub fn new<F>(count: usize, generator: F) -> Self
    where
        F: Fn(usize) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            count,
            generator: Arc::new(generator),
        }
    }

    pub fn empty() -> Self {
        Self::new(0, |index| Err(out_of_bounds(index, 0)))
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Materialize the element at `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`InspectionError::NotSupported`] for an index outside
    /// `0..count`, or with whatever the generator reports.
    pub fn element(&self, index: usize) -> Result<T> {
        if index >= self.count {
            return Err(out_of_bounds(index, self.count));
        }
        (self.generator)(index)
    }

    /// Iterate over all elements, materializing each on demand.
    pub fn iter(&self) -> impl Iterator<Item = Result<T>> + '_ {
        (0..self.count).map(move |index| (self.generator)(index))
    }

    /// Materialize every element, stopping at the first failure.
    pub fn collect_all(&self) -> Result<Vec<T>> {
        self.iter().collect()
    }

    /// `self` followed by `other`, still lazy.
    pub fn concat(&self, other: &LazyGroup<T>) -> LazyGroup<T> {
        let split = self.count;
        let head = Arc::clone(&self.generator);
        let tail = Arc::clone(&other.generator);
        LazyGroup::new(self.count + other.count, move |index| {
            if index < split {
                head(index)
            } else {
                tail(index - split)
            }
        })
    }

    pub fn map<U, F>(&self, transform: F) -> LazyGroup<U>
    where
        U: 'static,
        F: Fn(T) -> Result<U> + Send + Sync + 'static,
    {
        let source = Arc::clone(&self.generator);
        LazyGroup::new(self.count, move |index| transform(source(index)?))
    }
}

impl<T> fmt::Debug for LazyGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyGroup").field("count", &self.count).finish()
    }
}

fn out_of_bounds(index: usize, count: usize) -> InspectionError {
    InspectionError::NotSupported(format!(
        "Index {} is out of bounds for a group of {} elements; use an index below {}",
        index, count, count
    ))
}
