use std::collections::BTreeMap;

/// Heading tag (`h1`..`h6`) to number of occurrences, ordered by tag.
pub type HeadingCounts = BTreeMap<String, u64>;

/// Link reachability as reported by the backend.
///
/// Older backends send a bare count, newer ones the list of URLs. Both shapes
/// are kept so callers can show the list when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTally {
    Count(u64),
    Urls(Vec<String>),
}

impl LinkTally {
    pub fn count(&self) -> u64 {
        match self {
            LinkTally::Count(count) => *count,
            LinkTally::Urls(urls) => urls.len() as u64,
        }
    }

    pub fn urls(&self) -> &[String] {
        match self {
            LinkTally::Count(_) => &[],
            LinkTally::Urls(urls) => urls,
        }
    }
}

impl Default for LinkTally {
    fn default() -> Self {
        LinkTally::Count(0)
    }
}

/// Canonical analysis outcome, independent of the backend's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisResult {
    pub source_url: String,
    pub title: Option<String>,
    pub html_version: Option<String>,
    pub has_login_form: bool,
    pub heading_counts: HeadingCounts,
    /// Precomputed, human-readable heading summary. Only some backends send
    /// it; it is displayed verbatim and never parsed.
    pub headings_summary: Option<String>,
    pub accessible_links: LinkTally,
    pub inaccessible_links: LinkTally,
}

impl AnalysisResult {
    pub fn accessible_link_count(&self) -> u64 {
        self.accessible_links.count()
    }

    pub fn inaccessible_link_count(&self) -> u64 {
        self.inaccessible_links.count()
    }
}
