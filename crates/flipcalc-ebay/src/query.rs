//! Builds the Browse API search request from user parameters.

use flipcalc_core::{Category, SearchParams};

const CONDITIONS_FILTER: &str = "conditions:{1000|1500|2000|2500|3000}";
const BUYING_OPTIONS_FILTER: &str = "buyingOptions:{FIXED_PRICE|BEST_OFFER}";
const CURRENCY_FILTER: &str = "priceCurrency:USD";
const SORT_BY_PRICE: &str = "price";

/// A fully-specified search request. Its `Display` form is what error
/// messages report as "what was sent".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub filters: Vec<String>,
    pub limit: u32,
    pub category_id: Option<&'static str>,
    pub sort: &'static str,
}

impl SearchRequest {
    #[must_use]
    pub fn from_params(params: &SearchParams) -> Self {
        let filters = vec![
            format!("price:[1..{}]", params.max_price.normalize()),
            CURRENCY_FILTER.to_string(),
            CONDITIONS_FILTER.to_string(),
            BUYING_OPTIONS_FILTER.to_string(),
        ];

        Self {
            query: build_query(&params.search_term, params.category),
            filters,
            limit: params.limit,
            category_id: params.category.marketplace_id(),
            sort: SORT_BY_PRICE,
        }
    }

    /// The `filter` parameter: all filters joined by commas.
    #[must_use]
    pub fn filter_param(&self) -> String {
        self.filters.join(",")
    }

    /// Query-string pairs in the order they are sent.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("q", self.query.clone()),
            ("filter", self.filter_param()),
            ("limit", self.limit.to_string()),
            ("sort", self.sort.to_string()),
        ];
        if let Some(id) = self.category_id {
            pairs.push(("category_ids", id.to_string()));
        }
        pairs
    }
}

impl std::fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "q={} filter={} limit={} sort={}",
            self.query,
            self.filter_param(),
            self.limit,
            self.sort
        )?;
        if let Some(id) = self.category_id {
            write!(f, " category_ids={id}")?;
        }
        Ok(())
    }
}

/// Negated group sent upstream for video games, verbatim. Only the last three
/// multi-word phrases are quoted; the normalizer re-checks every phrase locally.
const VIDEO_GAME_EXCLUSION_GROUP: &str = "-(case only, manual only, insert only, artwork only, \
     booklet only, manaul only, no disc,\"for parts\",\"not working\",\"empty box\",broken,defective)";

/// Quotes the term as an exact phrase and appends the category's negated
/// exclusion group, if it has one.
fn build_query(term: &str, category: Category) -> String {
    let phrase = format!("\"{}\"", term.trim().replace('"', ""));
    match exclusion_group(category) {
        Some(group) => format!("{phrase} {group}"),
        None => phrase,
    }
}

fn exclusion_group(category: Category) -> Option<&'static str> {
    match category {
        Category::VideoGames => Some(VIDEO_GAME_EXCLUSION_GROUP),
        _ => None,
    }
}
