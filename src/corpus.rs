//! Load a directory of HTML pages into a [`LinkGraph`].
//!
//! Every `*.html` file directly inside the directory is a page, named by its
//! file name. Its links are the `href` targets of its anchor tags, minus
//! links to itself and minus anything that is not another page of the
//! corpus.

use crate::error::Result;
use crate::graph::LinkGraph;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::debug;

const ANCHOR_PATTERN: &str = r#"<a\s*href="([^>]*)""#;

fn anchor_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(ANCHOR_PATTERN).unwrap_or_else(|e| panic!("invalid anchor pattern: {e}"))
    })
}

/// Anchor targets in an HTML document.
pub fn extract_links(html: &str) -> BTreeSet<String> {
    anchor_regex()
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Read every `.html` file in `dir` and build the pruned link graph.
pub fn load_corpus(dir: impl AsRef<Path>) -> Result<LinkGraph> {
    let dir = dir.as_ref();
    let mut pages: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // follows symlinks, so linked pages count
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".html") {
            continue;
        }
        let html = fs::read_to_string(entry.path())?;
        let mut links = extract_links(&html);
        links.remove(&name);
        pages.insert(name, links);
    }

    let graph = LinkGraph::from_links_pruned(pages);
    debug!(
        dir = %dir.display(),
        pages = graph.len(),
        links = graph.link_count(),
        "loaded corpus"
    );
    Ok(graph)
}
