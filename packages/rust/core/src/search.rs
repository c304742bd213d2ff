//! Substring search over provider, resource, data source and function names.
//!
//! [`SearchIndex`] case-folds every name once when the schema is loaded, so a
//! keystroke costs one linear scan of pre-folded strings instead of
//! re-lowercasing the catalog.

use indexmap::IndexMap;
use tracing::{debug, instrument};

use terradex_shared::SchemaModel;

use crate::tree::Category;

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A non-blank, case-folded search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    folded: String,
}

impl Query {
    /// Trim and case-fold `raw`. Returns `None` for an empty or
    /// whitespace-only query, which callers treat as "no filter".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            folded: trimmed.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.folded
    }
}

// ---------------------------------------------------------------------------
// MatchSet
// ---------------------------------------------------------------------------

/// Matches found under one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderMatches {
    /// The provider's own name contains the query. Recorded for display only;
    /// it never puts the provider into a filtered tree by itself.
    pub name_matched: bool,
    pub resources: Vec<String>,
    pub data_sources: Vec<String>,
    pub functions: Vec<String>,
}

impl ProviderMatches {
    pub fn items(&self, category: Category) -> &[String] {
        match category {
            Category::Resources => &self.resources,
            Category::DataSources => &self.data_sources,
            Category::Functions => &self.functions,
        }
    }

    fn items_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Resources => &mut self.resources,
            Category::DataSources => &mut self.data_sources,
            Category::Functions => &mut self.functions,
        }
    }

    pub fn item_count(&self) -> usize {
        self.resources.len() + self.data_sources.len() + self.functions.len()
    }

    pub fn has_item_matches(&self) -> bool {
        self.item_count() > 0
    }
}

/// Result of applying a query to the schema: matched names per provider, in
/// schema order. Providers with no match of any kind are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    query: String,
    providers: IndexMap<String, ProviderMatches>,
}

impl MatchSet {
    /// The folded query this set was computed for.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderMatches> {
        self.providers.get(name)
    }

    pub fn providers(&self) -> impl Iterator<Item = (&str, &ProviderMatches)> {
        self.providers.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total matched items (provider-name matches are not counted).
    pub fn item_count(&self) -> usize {
        self.providers.values().map(ProviderMatches::item_count).sum()
    }

    /// True when no item matched, even if a provider name did.
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

// ---------------------------------------------------------------------------
// SearchIndex
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct FoldedName {
    folded: String,
    name: String,
}

impl FoldedName {
    fn new(name: &str) -> Self {
        Self {
            folded: name.to_lowercase(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct ProviderEntry {
    name: FoldedName,
    /// Indexed by position in [`Category::ALL`].
    groups: [Vec<FoldedName>; 3],
}

/// Case-folded names of one schema, in schema order.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    providers: Vec<ProviderEntry>,
}

impl SearchIndex {
    #[instrument(skip_all)]
    pub fn new(schema: &SchemaModel) -> Self {
        let providers: Vec<ProviderEntry> = schema
            .providers
            .iter()
            .map(|(name, provider)| ProviderEntry {
                name: FoldedName::new(name),
                groups: Category::ALL.map(|c| {
                    c.item_names(provider)
                        .into_iter()
                        .map(FoldedName::new)
                        .collect()
                }),
            })
            .collect();

        debug!(providers = providers.len(), "search index built");
        Self { providers }
    }

    /// Every provider and item whose name contains `query`, case-insensitively.
    #[instrument(skip_all, fields(query = %query.as_str()))]
    pub fn matches(&self, query: &Query) -> MatchSet {
        let needle = query.as_str();
        let mut providers = IndexMap::new();

        for entry in &self.providers {
            let mut found = ProviderMatches {
                name_matched: entry.name.folded.contains(needle),
                ..ProviderMatches::default()
            };
            for (category, names) in Category::ALL.iter().zip(&entry.groups) {
                found.items_mut(*category).extend(
                    names
                        .iter()
                        .filter(|n| n.folded.contains(needle))
                        .map(|n| n.name.clone()),
                );
            }
            if found.name_matched || found.has_item_matches() {
                providers.insert(entry.name.name.clone(), found);
            }
        }

        let set = MatchSet {
            query: needle.to_string(),
            providers,
        };
        debug!(items = set.item_count(), providers = set.providers.len(), "query matched");
        set
    }
}

/// One-off match without keeping an index around.
pub fn find_matches(schema: &SchemaModel, query: &Query) -> MatchSet {
    SearchIndex::new(schema).matches(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_schema;

    fn run(query: &str) -> MatchSet {
        find_matches(&sample_schema(), &Query::parse(query).unwrap())
    }

    #[test]
    fn blank_queries_mean_no_filter() {
        assert_eq!(Query::parse(""), None);
        assert_eq!(Query::parse("   \t"), None);
        assert_eq!(Query::parse("  Inst ").unwrap().as_str(), "inst");
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let set = run("INST");
        assert_eq!(set.query(), "inst");
        let aws = set.provider("aws").unwrap();
        assert_eq!(aws.resources, vec!["aws_instance"]);
        assert!(aws.data_sources.is_empty());
        assert!(aws.functions.is_empty());
        assert!(set.provider("google").is_none());
        assert_eq!(set.item_count(), 1);
    }

    #[test]
    fn matches_keep_schema_order() {
        let set = run("arn_");
        assert_eq!(
            set.provider("aws").unwrap().functions,
            vec!["arn_parse", "arn_build"]
        );
    }

    #[test]
    fn provider_name_match_is_recorded_separately() {
        let set = run("goog");
        let google = set.provider("google").unwrap();
        assert!(google.name_matched);
        assert!(!google.has_item_matches());
        assert!(set.is_empty());

        let set = run("aws_");
        let aws = set.provider("aws").unwrap();
        assert!(!aws.name_matched);
        assert_eq!(aws.item_count(), 3);
    }

    #[test]
    fn unmatched_query_is_empty() {
        let set = run("kubernetes");
        assert!(set.is_empty());
        assert_eq!(set.providers().count(), 0);
    }

    #[test]
    fn index_is_reusable_across_queries() {
        let schema = sample_schema();
        let index = SearchIndex::new(&schema);
        let first = index.matches(&Query::parse("bucket").unwrap());
        let second = index.matches(&Query::parse("network").unwrap());
        assert_eq!(first.provider("aws").unwrap().resources, vec!["aws_s3_bucket"]);
        assert_eq!(second.provider("google").unwrap().resources, vec!["compute_network"]);
    }
}
