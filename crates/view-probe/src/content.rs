//! The unit of traversal.

use crate::reflect::Value;

/// One point in the inspection tree: a payload plus the modifiers applied by
/// its ancestors, outermost first.
///
/// Equality is identity: two nodes are equal when they share the same payload
/// handle and the same modifier handles, never by deep comparison.
#[derive(Debug, Clone)]
pub struct Content {
    pub payload: Value,
    pub modifiers: Vec<Value>,
}

impl Content {
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifiers(payload: Value, modifiers: Vec<Value>) -> Self {
        Self { payload, modifiers }
    }

    /// Same modifier history, different payload.
    pub fn replacing_payload(&self, payload: Value) -> Self {
        Self {
            payload,
            modifiers: self.modifiers.clone(),
        }
    }

    /// New node for `payload` whose history is this node's plus `modifier`.
    pub fn appending_modifier(&self, payload: Value, modifier: Value) -> Self {
        let mut modifiers = Vec::with_capacity(self.modifiers.len() + 1);
        modifiers.extend(self.modifiers.iter().cloned());
        modifiers.push(modifier);
        Self { payload, modifiers }
    }

    /// Same payload with an empty modifier history.
    pub fn without_modifiers(&self) -> Self {
        Self::new(self.payload.clone())
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        self.payload.ptr_eq(&other.payload)
            && self.modifiers.len() == other.modifiers.len()
            && self
                .modifiers
                .iter()
                .zip(&other.modifiers)
                .all(|(a, b)| a.ptr_eq(b))
    }
}

impl From<Value> for Content {
    fn from(payload: Value) -> Self {
        Self::new(payload)
    }
}
