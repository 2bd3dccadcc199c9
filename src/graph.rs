//! Link graph: pages and the pages they link to.
//!
//! A [`LinkGraph`] maps every [`Page`] to the set of pages it links to. Every
//! link target is itself a page of the graph; all constructors enforce this,
//! either by rejecting the graph ([`LinkGraph::from_links`]) or by dropping
//! the offending links ([`LinkGraph::from_links_pruned`]).
//!
//! Pages are kept in sorted order, so every walk over the graph (and every
//! index derived from it) is stable across runs.

use crate::error::{Error, Result};
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Opaque page identifier, e.g. a file name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Page(String);

impl Page {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Page {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Page {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for Page {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl Borrow<str> for Page {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Page {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directed graph of pages to their outbound links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGraph {
    links: BTreeMap<Page, BTreeSet<Page>>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self {
            links: BTreeMap::new(),
        }
    }

    /// Build a graph from `(page, links)` pairs.
    ///
    /// Repeated pages have their link sets merged. Fails with
    /// [`Error::InvalidGraph`] if any link target is not itself one of the
    /// pages.
    pub fn from_links<I, P, L, Q>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<Page>,
        L: IntoIterator<Item = Q>,
        Q: Into<Page>,
    {
        let graph = Self::collect(links);
        graph.check_targets()?;
        Ok(graph)
    }

    /// Build a graph from `(page, links)` pairs, silently dropping links to
    /// pages that are not part of the input.
    pub fn from_links_pruned<I, P, L, Q>(links: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<Page>,
        L: IntoIterator<Item = Q>,
        Q: Into<Page>,
    {
        let mut graph = Self::collect(links);
        let known: BTreeSet<Page> = graph.links.keys().cloned().collect();
        for targets in graph.links.values_mut() {
            targets.retain(|t| known.contains(t));
        }
        graph
    }

    fn collect<I, P, L, Q>(links: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<Page>,
        L: IntoIterator<Item = Q>,
        Q: Into<Page>,
    {
        let mut map: BTreeMap<Page, BTreeSet<Page>> = BTreeMap::new();
        for (page, targets) in links {
            map.entry(page.into())
                .or_default()
                .extend(targets.into_iter().map(Into::into));
        }
        Self { links: map }
    }

    /// Add a page with no links. Returns `false` if it was already present.
    pub fn add_page(&mut self, page: impl Into<Page>) -> bool {
        let page = page.into();
        if self.links.contains_key(&page) {
            return false;
        }
        self.links.insert(page, BTreeSet::new());
        true
    }

    /// Add a link between two existing pages.
    pub fn add_link(&mut self, from: &str, to: &str) -> Result<()> {
        if !self.links.contains_key(to) {
            return Err(Error::InvalidGraph(format!(
                "link target `{to}` is not a page of the graph"
            )));
        }
        let targets = self
            .links
            .get_mut(from)
            .ok_or_else(|| Error::InvalidGraph(format!("`{from}` is not a page of the graph")))?;
        targets.insert(Page::from(to));
        Ok(())
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Total number of links.
    pub fn link_count(&self) -> usize {
        self.links.values().map(BTreeSet::len).sum()
    }

    pub fn contains(&self, page: &str) -> bool {
        self.links.contains_key(page)
    }

    /// Outbound links of a page, or `None` if the page is unknown.
    pub fn links(&self, page: &str) -> Option<&BTreeSet<Page>> {
        self.links.get(page)
    }

    /// Pages in sorted order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.links.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Page, &BTreeSet<Page>)> {
        self.links.iter()
    }

    /// Pages with no outbound links.
    pub fn dangling_pages(&self) -> impl Iterator<Item = &Page> {
        self.links
            .iter()
            .filter(|(_, targets)| targets.is_empty())
            .map(|(page, _)| page)
    }

    /// Check the graph is usable for ranking: non-empty, and every link
    /// target is a page.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::InvalidGraph("graph has no pages".to_string()));
        }
        self.check_targets()
    }

    fn check_targets(&self) -> Result<()> {
        for (page, targets) in &self.links {
            if let Some(missing) = targets.iter().find(|t| !self.links.contains_key(*t)) {
                return Err(Error::InvalidGraph(format!(
                    "page `{page}` links to `{missing}`, which is not in the graph"
                )));
            }
        }
        Ok(())
    }

    /// Index-based view for the numeric kernels.
    pub(crate) fn adjacency(&self) -> Result<Adjacency> {
        self.validate()?;
        let pages: Vec<Page> = self.links.keys().cloned().collect();
        let index: BTreeMap<&Page, usize> =
            pages.iter().enumerate().map(|(i, p)| (p, i)).collect();
        let mut out = Vec::with_capacity(pages.len());
        for targets in self.links.values() {
            let mut row = Vec::with_capacity(targets.len());
            for t in targets {
                // validate() guarantees every target is indexed
                let idx = index
                    .get(t)
                    .copied()
                    .ok_or_else(|| Error::InvalidGraph(format!("unindexed page `{t}`")))?;
                row.push(idx);
            }
            out.push(row);
        }
        Ok(Adjacency { pages, out })
    }
}

/// Pages by index plus out-link indices, in the graph's sorted page order.
#[derive(Debug, Clone)]
pub(crate) struct Adjacency {
    pub(crate) pages: Vec<Page>,
    pub(crate) out: Vec<Vec<usize>>,
}

impl Adjacency {
    pub(crate) fn len(&self) -> usize {
        self.pages.len()
    }

    pub(crate) fn index_of(&self, page: &str) -> Option<usize> {
        self.pages
            .binary_search_by(|p| p.as_str().cmp(page))
            .ok()
    }
}
