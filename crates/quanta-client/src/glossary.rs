//! Glossary terms and the list views derived from them.

use serde::{Deserialize, Serialize};

/// A glossary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub term: String,
    pub definition: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Server-side paging metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total_pages: u32,
    pub total_items: u64,
}

/// Terms returned by `/glossary`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlossaryListing {
    pub terms: Vec<GlossaryTerm>,
    /// Present when the service paged the listing itself.
    pub pagination: Option<Pagination>,
}

/// The two payload shapes the service produces.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum GlossaryPayload {
    Paged {
        data: Vec<GlossaryTerm>,
        #[serde(default)]
        pagination: Option<Pagination>,
    },
    List(Vec<GlossaryTerm>),
}

impl From<GlossaryPayload> for GlossaryListing {
    fn from(payload: GlossaryPayload) -> Self {
        match payload {
            GlossaryPayload::Paged { data, pagination } => Self {
                terms: data,
                pagination,
            },
            GlossaryPayload::List(terms) => Self {
                terms,
                pagination: None,
            },
        }
    }
}

/// Sort terms alphabetically, ignoring case.
pub fn sort_terms(terms: &mut [GlossaryTerm]) {
    terms.sort_by_cached_key(|t| t.term.to_lowercase());
}

/// Terms whose name or definition contains `query`, ignoring case.
pub fn filter_terms<'a>(terms: &'a [GlossaryTerm], query: &str) -> Vec<&'a GlossaryTerm> {
    let query = query.trim().to_lowercase();
    terms
        .iter()
        .filter(|t| {
            query.is_empty()
                || t.term.to_lowercase().contains(&query)
                || t.definition.to_lowercase().contains(&query)
        })
        .collect()
}

/// "1 term found" / "n terms found".
pub fn count_label(n: usize) -> String {
    if n == 1 {
        "1 term found".to_string()
    } else {
        format!("{n} terms found")
    }
}

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

/// Slice `items` into 1-based pages of `per_page`.
///
/// Page 0 is read as page 1 and `per_page` 0 as 1. A page past the end is
/// empty but still reports the totals.
pub fn paginate<T: Clone>(items: &[T], page: u32, per_page: u32) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1) as usize;
    let total_pages = items.len().div_ceil(per_page) as u32;

    let start = (page as usize - 1).saturating_mul(per_page);
    let slice = items
        .get(start..)
        .map(|rest| &rest[..rest.len().min(per_page)])
        .unwrap_or(&[]);

    Page {
        items: slice.to_vec(),
        page,
        total_pages,
        total_items: items.len() as u64,
    }
}
