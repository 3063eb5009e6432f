//! Runtime type tags used for kind dispatch.
//!
//! A [`TypeTag`] is derived from [`std::any::type_name`] with every module path
//! removed, so `view_probe::wrappers::ModifiedContent<my_app::Title, view_probe::views::Padding>`
//! is tagged `ModifiedContent<Title, Padding>`. Two values of the same concrete
//! type always produce the same tag. Tags are used for dispatch, never for
//! comparing content.

use std::fmt;

/// Short, path-free name of a value's runtime type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(String);

impl TypeTag {
    /// Tag of the type `T`.
    pub fn of<T: ?Sized>() -> Self {
        Self::from_type_name(std::any::type_name::<T>())
    }

    /// Build a tag from a fully qualified type name, stripping module paths
    /// from every component.
    pub fn from_type_name(full: &str) -> Self {
        let mut out = String::with_capacity(full.len());
        // Byte offset in `out` where the current path component begins.
        let mut segment_start = 0;
        let mut chars = full.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                ':' if chars.peek() == Some(&':') => {
                    chars.next();
                    out.truncate(segment_start);
                }
                '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' | '*' => {
                    out.push(c);
                    segment_start = out.len();
                }
                _ => out.push(c),
            }
        }

        Self(out)
    }

    /// The portion of the tag before any generic-parameter annotation.
    ///
    /// ```
    /// use view_probe::TypeTag;
    /// let tag = TypeTag::from_type_name("a::ModifiedContent<b::Text, c::Padding>");
    /// assert_eq!(tag.prefix(), "ModifiedContent");
    /// ```
    pub fn prefix(&self) -> &str {
        match self.0.find('<') {
            Some(pos) => &self.0[..pos],
            None => &self.0,
        }
    }

    /// The tag truncated to its prefix, as an owned tag.
    pub fn to_prefix(&self) -> TypeTag {
        TypeTag(self.prefix().to_string())
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    /// Text between the outermost angle brackets, if the tag is generic.
    ///
    /// `Binding<Option<String>>` yields `Option<String>`.
    pub fn generic_argument(&self) -> Option<&str> {
        let open = self.0.find('<')?;
        let close = self.0.rfind('>')?;
        (close > open).then(|| &self.0[open + 1..close])
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        tag.0
    }
}

impl PartialEq<str> for TypeTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TypeTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_paths_in_every_component() {
        let tag = TypeTag::from_type_name(
            "core::option::Option<alloc::vec::Vec<(i32, alloc::string::String)>>",
        );
        assert_eq!(tag, "Option<Vec<(i32, String)>>");
    }

    #[test]
    fn references_and_lifetimes_survive() {
        assert_eq!(TypeTag::of::<&'static str>(), "&str");
        assert_eq!(TypeTag::of::<[u8]>(), "[u8]");
    }

    #[test]
    fn prefix_stops_at_first_generic_delimiter() {
        let tag = TypeTag::of::<Option<Vec<String>>>();
        assert_eq!(tag.prefix(), "Option");
        assert_eq!(tag.generic_argument(), Some("Vec<String>"));
        assert_eq!(TypeTag::of::<bool>().generic_argument(), None);
    }
}
