//! RDF terms: IRIs, graph-local anonymous node keys, literals and triples.
//!
//! Anonymous (blank) nodes are never identified by their source label. Each
//! [`Graph`](super::Graph) hands out its own [`AnonId`] keys, so two graphs
//! loaded from the same document still live in separate id spaces and can
//! only be related through structural matching.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An absolute IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    /// Wrap an IRI string. No validation is done here; parsers validate input.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for Iri {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Iri {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Graph-local key of an anonymous node.
///
/// Only meaningful together with the graph that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnonId(u32);

impl AnonId {
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AnonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:a{}", self.0)
    }
}

/// A literal with optional datatype and language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Iri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Literal {
    /// Plain literal without datatype or language.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            datatype: None,
            language: None,
        }
    }

    /// Language-tagged literal.
    pub fn lang(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            datatype: None,
            language: Some(language.into().to_lowercase()),
        }
    }

    /// Literal with an explicit datatype.
    pub fn typed(text: impl Into<String>, datatype: impl Into<Iri>) -> Self {
        Self {
            text: text.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// Two literals are of a compatible kind when datatype and language tag
    /// are identical; the lexical text may differ.
    #[must_use]
    pub fn same_kind(&self, other: &Self) -> bool {
        self.datatype == other.datatype && self.language == other.language
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.text)?;
        if let Some(lang) = &self.language {
            write!(f, "@{lang}")?;
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^{dt}")?;
        }
        Ok(())
    }
}

/// Subject position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeRef {
    Named(Iri),
    Anonymous(AnonId),
}

impl NodeRef {
    #[must_use]
    pub const fn as_named(&self) -> Option<&Iri> {
        match self {
            Self::Named(iri) => Some(iri),
            Self::Anonymous(_) => None,
        }
    }

    #[must_use]
    pub const fn as_anon(&self) -> Option<AnonId> {
        match self {
            Self::Named(_) => None,
            Self::Anonymous(id) => Some(*id),
        }
    }

    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous(_))
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(iri) => iri.fmt(f),
            Self::Anonymous(id) => id.fmt(f),
        }
    }
}

impl From<AnonId> for NodeRef {
    fn from(id: AnonId) -> Self {
        Self::Anonymous(id)
    }
}

impl From<Iri> for NodeRef {
    fn from(iri: Iri) -> Self {
        Self::Named(iri)
    }
}

/// Object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    Named(Iri),
    Literal(Literal),
    Anonymous(AnonId),
}

impl Value {
    #[must_use]
    pub const fn as_named(&self) -> Option<&Iri> {
        match self {
            Self::Named(iri) => Some(iri),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_anon(&self) -> Option<AnonId> {
        match self {
            Self::Anonymous(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous(_))
    }

    /// Whether a modification from `self` to `other` keeps the object kind:
    /// both IRIs, or both literals with identical datatype and language tag.
    #[must_use]
    pub fn compatible_with(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Named(_), Self::Named(_)) => true,
            (Self::Literal(a), Self::Literal(b)) => a.same_kind(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(iri) => iri.fmt(f),
            Self::Literal(lit) => lit.fmt(f),
            Self::Anonymous(id) => id.fmt(f),
        }
    }
}

impl From<AnonId> for Value {
    fn from(id: AnonId) -> Self {
        Self::Anonymous(id)
    }
}

impl From<Iri> for Value {
    fn from(iri: Iri) -> Self {
        Self::Named(iri)
    }
}

impl From<Literal> for Value {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}

/// An RDF statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    pub subject: NodeRef,
    pub predicate: Iri,
    pub object: Value,
}

impl Triple {
    pub fn new(subject: impl Into<NodeRef>, predicate: impl Into<Iri>, object: impl Into<Value>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Neither subject nor object is anonymous.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        !self.subject.is_anonymous() && !self.object.is_anonymous()
    }

    /// Named subject pointing at an anonymous object.
    #[must_use]
    pub const fn is_blank_entry_point(&self) -> bool {
        !self.subject.is_anonymous() && self.object.is_anonymous()
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_kind_compatibility() {
        let en = Literal::lang("Dog", "en");
        let en2 = Literal::lang("Hound", "EN");
        let cs = Literal::lang("Pes", "cs");
        assert!(en.same_kind(&en2));
        assert!(!en.same_kind(&cs));

        let int = Literal::typed("1", "http://www.w3.org/2001/XMLSchema#integer");
        assert!(!int.same_kind(&Literal::plain("1")));
    }

    #[test]
    fn test_value_compatibility() {
        let a = Value::Named(Iri::new("http://example.org/a"));
        let b = Value::Named(Iri::new("http://example.org/b"));
        let lit = Value::Literal(Literal::plain("a"));
        assert!(a.compatible_with(&b));
        assert!(!a.compatible_with(&lit));
        assert!(!Value::Anonymous(AnonId::new(0)).compatible_with(&Value::Anonymous(AnonId::new(1))));
    }

    #[test]
    fn test_triple_shapes() {
        let plain = Triple::new(Iri::new("http://e/a"), "http://e/p", Literal::plain("x"));
        assert!(plain.is_plain());
        assert!(!plain.is_blank_entry_point());

        let entry = Triple::new(Iri::new("http://e/a"), "http://e/p", Value::Anonymous(AnonId::new(3)));
        assert!(entry.is_blank_entry_point());
        assert!(!entry.is_plain());
        assert_eq!(entry.to_string(), "<http://e/a> <http://e/p> _:a3");
    }
}
