// List query engine: search/status/date filtering, pagination, aggregates
//
// Every operation here is a pure function of (records, params). Mutation and
// page-reset rules live in `view`; this module never touches state.

use crate::record::Record;
use chrono::NaiveDate;

/// Categorical filter over a resource's status field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Match every record, including those without a status field
    #[default]
    All,
    /// Exact match against the record's status value
    Is(String),
}

impl StatusFilter {
    /// Parse the wire form used by the filter dropdowns: "all" means no filter
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            StatusFilter::All
        } else {
            StatusFilter::Is(value.to_string())
        }
    }

    fn matches(&self, status: Option<&str>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Is(wanted) => status == Some(wanted.as_str()),
        }
    }
}

/// Combined search/filter/pagination input driving a list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Free-text search term; empty matches everything
    pub search: String,
    pub status: StatusFilter,
    /// Day-equality filter; `None` matches everything
    pub date: Option<NaiveDate>,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            date: None,
            page: 1,
            page_size: 10,
        }
    }
}

/// One displayable page of a filtered collection
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage<T> {
    pub items: Vec<T>,
    /// Count of records passing all predicates, across every page
    pub total_count: usize,
    /// At least 1: an empty result is one page of zero items
    pub total_pages: usize,
    /// The page actually served, after clamping
    pub page: usize,
    /// 0-based index of the first item within the filtered set
    pub start_index: usize,
    /// 0-based index one past the last item
    pub end_index: usize,
}

impl<T> QueryPage<T> {
    /// Footer line shown under every table: "1 - 10 / 43"
    pub fn range_label(&self) -> String {
        let first = if self.total_count == 0 { 0 } else { self.start_index + 1 };
        format!("{} - {} / {}", first, self.end_index, self.total_count)
    }
}

/// Whether a single record passes all three predicates (ANDed)
pub fn matches<T: Record>(record: &T, params: &QueryParams) -> bool {
    let term = params.search.trim().to_lowercase();
    let matches_search = term.is_empty()
        || record
            .search_text()
            .iter()
            .any(|field| field.to_lowercase().contains(&term));
    let matches_status = params.status.matches(record.status());
    let matches_date = match params.date {
        None => true,
        Some(day) => record.event_date() == Some(day),
    };
    matches_search && matches_status && matches_date
}

/// Stable filter: survivors keep their input order
pub fn filter<T: Record>(records: &[T], params: &QueryParams) -> Vec<T> {
    records
        .iter()
        .filter(|record| matches(*record, params))
        .cloned()
        .collect()
}

/// Slice one page out of an already-filtered collection
///
/// `page` is clamped into `[1, total_pages]` and `page_size` to at least 1,
/// so no input produces an out-of-range slice.
pub fn paginate<T: Clone>(filtered: &[T], page: usize, page_size: usize) -> QueryPage<T> {
    let page_size = page_size.max(1);
    let total_count = filtered.len();
    let total_pages = total_count.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let start_index = (page - 1) * page_size;
    let end_index = (start_index + page_size).min(total_count);

    QueryPage {
        items: filtered[start_index..end_index].to_vec(),
        total_count,
        total_pages,
        page,
        start_index,
        end_index,
    }
}

/// Filter then paginate in one step
pub fn query<T: Record>(records: &[T], params: &QueryParams) -> QueryPage<T> {
    let filtered = filter(records, params);
    paginate(&filtered, params.page, params.page_size)
}

/// Page numbers for the pager buttons: up to 5, centered on the current page
/// when possible, clamped at both ends
pub fn page_window(page: usize, total_pages: usize) -> Vec<usize> {
    let total_pages = total_pages.max(1);
    let page = page.clamp(1, total_pages);
    let count = total_pages.min(5);

    (0..count)
        .map(|i| {
            if total_pages <= 5 {
                i + 1
            } else if page <= 3 {
                i + 1
            } else if page >= total_pages - 2 {
                total_pages - 4 + i
            } else {
                page - 2 + i
            }
        })
        .collect()
}

/// Sum a numeric field over the full (unfiltered) collection
///
/// Summary cards are computed from the whole collection, independent of the
/// page currently shown.
pub fn sum_by<T>(records: &[T], mut value: impl FnMut(&T) -> i64) -> i64 {
    records.iter().map(|record| value(record)).sum()
}

/// Count records satisfying a predicate over the full collection
pub fn count_where<T>(records: &[T], mut pred: impl FnMut(&T) -> bool) -> usize {
    records.iter().filter(|record| pred(record)).count()
}
