//! JSON pointer representation for addressing sub-documents.
//!
//! This module provides [`JsonPointer`], an RFC 6901 pointer used both to
//! index sub-schemas inside a schema container and to locate instance values
//! in validation messages.

use std::fmt::{self, Display};

use crate::error::SchemaError;

/// An RFC 6901 JSON pointer.
///
/// A pointer is a sequence of reference tokens, rendered as `/a/b/0`. Tokens
/// are stored unescaped; `~` and `/` are escaped as `~0` and `~1` only when
/// parsing and rendering.
///
/// # Example
///
/// ```rust
/// use inquest::JsonPointer;
///
/// let pointer = JsonPointer::root()
///     .push("properties")
///     .push("email");
///
/// assert_eq!(pointer.to_string(), "/properties/email");
/// assert_eq!(JsonPointer::parse("/properties/email").unwrap(), pointer);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// Creates the empty pointer designating the whole document.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a pointer from its text form.
    ///
    /// The empty string is the root pointer. Any other pointer must start
    /// with `/`; `~1` and `~0` unescape to `/` and `~`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPointer`] if the text does not start
    /// with `/` or contains a `~` that is not part of a valid escape.
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        if text.is_empty() {
            return Ok(Self::root());
        }
        if !text.starts_with('/') {
            return Err(SchemaError::InvalidPointer(text.to_string()));
        }

        let mut tokens = Vec::new();
        for raw in text.split('/').skip(1) {
            tokens.push(unescape(raw).ok_or_else(|| SchemaError::InvalidPointer(text.to_string()))?);
        }
        Ok(Self { tokens })
    }

    /// Returns a new pointer with a reference token appended.
    ///
    /// This method does not modify the original pointer; it returns a new one.
    pub fn push(&self, token: impl Into<String>) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.push(token.into());
        Self { tokens }
    }

    /// Returns a new pointer with an array index token appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(index.to_string())
    }

    /// Returns true if this is the root pointer (no tokens).
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the number of reference tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if this pointer has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns an iterator over the unescaped reference tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Returns the parent pointer (all tokens except the last), or None for root.
    pub fn parent(&self) -> Option<Self> {
        if self.tokens.is_empty() {
            None
        } else {
            Some(Self {
                tokens: self.tokens[..self.tokens.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last reference token, or None for root.
    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    /// Renders the pointer for use in validation messages.
    ///
    /// The root pointer renders as `(root)` so messages never start with a
    /// bare colon.
    pub fn location(&self) -> String {
        if self.is_root() {
            "(root)".to_string()
        } else {
            self.to_string()
        }
    }
}

impl Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", escape(token))?;
        }
        Ok(())
    }
}

fn escape(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return None,
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_pointer_is_empty() {
        let pointer = JsonPointer::root();
        assert!(pointer.is_root());
        assert!(pointer.is_empty());
        assert_eq!(pointer.len(), 0);
        assert_eq!(pointer.to_string(), "");
    }

    #[test]
    fn test_push_tokens() {
        let pointer = JsonPointer::root().push("properties").push("name");
        assert_eq!(pointer.to_string(), "/properties/name");
        assert_eq!(pointer.len(), 2);
    }

    #[test]
    fn test_push_index() {
        let pointer = JsonPointer::root().push("items").push_index(3);
        assert_eq!(pointer.to_string(), "/items/3");
    }

    #[test]
    fn test_parse_round_trip() {
        let pointer = JsonPointer::parse("/a/b/0").unwrap();
        let tokens: Vec<_> = pointer.tokens().collect();
        assert_eq!(tokens, vec!["a", "b", "0"]);
        assert_eq!(pointer.to_string(), "/a/b/0");
    }

    #[test]
    fn test_parse_empty_is_root() {
        assert!(JsonPointer::parse("").unwrap().is_root());
    }

    #[test]
    fn test_parse_rejects_missing_leading_slash() {
        assert!(JsonPointer::parse("a/b").is_err());
    }

    #[test]
    fn test_parse_rejects_dangling_escape() {
        assert!(JsonPointer::parse("/a~2b").is_err());
        assert!(JsonPointer::parse("/a~").is_err());
    }

    #[test]
    fn test_escaping() {
        let pointer = JsonPointer::root().push("a/b").push("c~d");
        assert_eq!(pointer.to_string(), "/a~1b/c~0d");

        let parsed = JsonPointer::parse("/a~1b/c~0d").unwrap();
        assert_eq!(parsed, pointer);
        let tokens: Vec<_> = parsed.tokens().collect();
        assert_eq!(tokens, vec!["a/b", "c~d"]);
    }

    #[test]
    fn test_empty_token() {
        let pointer = JsonPointer::parse("/").unwrap();
        assert_eq!(pointer.len(), 1);
        assert_eq!(pointer.last(), Some(""));
    }

    #[test]
    fn test_parent() {
        let pointer = JsonPointer::root().push("a").push("b");
        let parent = pointer.parent().unwrap();
        assert_eq!(parent.to_string(), "/a");
        let root = parent.parent().unwrap();
        assert!(root.is_root());
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_pointer_immutability() {
        let base = JsonPointer::root().push("properties");
        let a = base.push("a");
        let b = base.push("b");
        assert_eq!(base.to_string(), "/properties");
        assert_eq!(a.to_string(), "/properties/a");
        assert_eq!(b.to_string(), "/properties/b");
    }

    #[test]
    fn test_location() {
        assert_eq!(JsonPointer::root().location(), "(root)");
        assert_eq!(JsonPointer::root().push("name").location(), "/name");
    }
}
