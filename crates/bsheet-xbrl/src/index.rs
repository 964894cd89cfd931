//! Fact index over one XBRL instance document.
//!
//! [`FactIndex::parse`] reads every numeric leaf element of an instance into a
//! [`Fact`] and builds a local-name lookup map once, so resolution never
//! rescans the document.

use bsheet_core::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A single numeric fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    /// Local tag name, without namespace prefix (e.g. `CurrentAssets`).
    pub tag: String,
    /// Namespace prefix seen in the document (e.g. `jppfs_cor`); informational.
    pub prefix: String,
    /// Scope qualifier, the `contextRef` of the fact.
    pub context: String,
    /// Numeric value.
    pub value: f64,
}

impl Fact {
    /// Creates a fact. A `prefix:Name` tag is split into prefix and local name.
    #[must_use]
    pub fn new(tag: &str, context: impl Into<String>, value: f64) -> Self {
        let (prefix, local) = match tag.rsplit_once(':') {
            Some((prefix, local)) => (prefix, local),
            None => ("", tag),
        };
        Self {
            tag: local.to_string(),
            prefix: prefix.to_string(),
            context: context.into(),
            value,
        }
    }
}

/// Ordered collection of the facts of one filing.
#[derive(Debug, Clone, Default)]
pub struct FactIndex {
    facts: Vec<Fact>,
    by_tag: HashMap<String, Vec<usize>>,
}

impl FactIndex {
    /// Parses an XBRL instance document.
    ///
    /// Tags match by local name whatever their prefix. Elements that have
    /// element children, or whose text is empty or not a finite number, are
    /// not facts and are skipped.
    ///
    /// # Errors
    /// Returns [`ExtractError::Parse`] if the document is not UTF-8 or not
    /// well-formed XML.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ExtractError::Parse(format!("Document is not UTF-8: {e}")))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let doc = roxmltree::Document::parse(text)
            .map_err(|e| ExtractError::Parse(format!("Malformed document: {e}")))?;

        let mut facts = Vec::new();
        for node in doc.root_element().descendants().filter(|n| n.is_element()) {
            if node.children().any(|c| c.is_element()) {
                continue;
            }
            let Some(value) = node.text().and_then(parse_number) else {
                continue;
            };

            let name = node.tag_name();
            let prefix = name
                .namespace()
                .and_then(|ns| node.lookup_prefix(ns))
                .unwrap_or("");
            facts.push(Fact {
                tag: name.name().to_string(),
                prefix: prefix.to_string(),
                context: node.attribute("contextRef").unwrap_or("").to_string(),
                value,
            });
        }

        debug!(facts = facts.len(), "Parsed XBRL instance");
        Ok(Self::from_facts(facts))
    }

    /// Builds an index from facts that are already parsed.
    #[must_use]
    pub fn from_facts(facts: Vec<Fact>) -> Self {
        let mut by_tag: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, fact) in facts.iter().enumerate() {
            by_tag.entry(fact.tag.clone()).or_default().push(i);
        }
        Self { facts, by_tag }
    }

    /// Returns the facts whose local name matches, in document order.
    ///
    /// A prefixed name such as `jppfs_cor:NetAssets` is matched by its local part.
    pub fn facts_for<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a Fact> + 'a {
        let local = tag.rsplit_once(':').map_or(tag, |(_, local)| local);
        self.by_tag
            .get(local)
            .into_iter()
            .flatten()
            .map(|&i| &self.facts[i])
    }

    /// Returns an iterator over all facts in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    /// Returns the number of facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true if the document held no numeric facts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
