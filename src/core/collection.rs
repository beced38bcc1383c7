//! Collections the harness can benchmark
//!
//! The harness only needs the six operations of [`CollectionUnderTest`]; it
//! never looks at the concrete type behind them.

use std::collections::{HashMap, HashSet};
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Element type stored by every collection under test
pub type Element = i64;

/// A hash-based collection exercised by the trial runner
///
/// # Element domain
///
/// The harness only ever inserts non-negative elements. Negative values are
/// reserved for miss probes, so an implementation must not treat any negative
/// element as present unless it was inserted explicitly (which the harness
/// never does).
pub trait CollectionUnderTest {
    /// Construct an empty instance
    fn create() -> Self;

    fn insert(&mut self, value: Element);

    /// Remove `value`, returning whether it was present
    fn delete(&mut self, value: Element) -> bool;

    fn contains(&self, value: Element) -> bool;

    fn size(&self) -> usize;

    /// Visit every element exactly once
    fn traverse<F: FnMut(Element)>(&self, visit: F);
}

impl CollectionUnderTest for HashSet<Element> {
    fn create() -> Self {
        HashSet::new()
    }

    fn insert(&mut self, value: Element) {
        HashSet::insert(self, value);
    }

    fn delete(&mut self, value: Element) -> bool {
        self.remove(&value)
    }

    fn contains(&self, value: Element) -> bool {
        HashSet::contains(self, &value)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn traverse<F: FnMut(Element)>(&self, mut visit: F) {
        for &v in self {
            visit(v);
        }
    }
}

/// Map keyed by element; the stored value mirrors the key
impl CollectionUnderTest for HashMap<Element, Element> {
    fn create() -> Self {
        HashMap::new()
    }

    fn insert(&mut self, value: Element) {
        HashMap::insert(self, value, value);
    }

    fn delete(&mut self, value: Element) -> bool {
        self.remove(&value).is_some()
    }

    fn contains(&self, value: Element) -> bool {
        self.contains_key(&value)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn traverse<F: FnMut(Element)>(&self, mut visit: F) {
        for &k in self.keys() {
            visit(k);
        }
    }
}

/// Which collection type to benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum CollectionKind {
    #[default]
    #[serde(rename = "HashSet")]
    HashSet,
    #[serde(rename = "HashMap")]
    HashMap,
}

impl CollectionKind {
    /// Label used in the report header
    pub fn label(&self) -> &'static str {
        match self {
            CollectionKind::HashSet => "Sets",
            CollectionKind::HashMap => "Maps",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::HashSet => write!(f, "HashSet"),
            CollectionKind::HashMap => write!(f, "HashMap"),
        }
    }
}
