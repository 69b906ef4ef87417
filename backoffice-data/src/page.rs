use serde::{Deserialize, Serialize};

/// Pagination window. `page` is 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub per_page: Option<u64>,
}

impl Pagination {
    pub fn new(page: i64, per_page: u64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    /// The effective 1-based page: absent, zero or negative pages clamp to 1.
    pub fn effective_page(&self) -> u64 {
        match self.page {
            Some(p) if p > 0 => p as u64,
            _ => 1,
        }
    }

    /// The page size, or `None` when everything should be returned.
    pub fn effective_per_page(&self) -> Option<u64> {
        self.per_page.filter(|&n| n > 0)
    }
}

/// A page of results. `total` counts every record before the page was cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub data: Vec<T>,
    pub total: usize,
}

impl<T> ListResult<T> {
    pub fn empty() -> Self {
        Self { data: Vec::new(), total: 0 }
    }

    /// Number of pages needed to show `total` records `per_page` at a time.
    pub fn page_count(&self, per_page: u64) -> u64 {
        if per_page == 0 {
            return if self.total == 0 { 0 } else { 1 };
        }
        (self.total as u64).div_ceil(per_page)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResult<U> {
        ListResult {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Slice `records` to the requested window.
///
/// Out-of-range pages produce an empty `data`, never an error.
pub fn paginate<T>(records: Vec<T>, pagination: Option<&Pagination>) -> ListResult<T> {
    let total = records.len();
    let Some(per_page) = pagination.and_then(Pagination::effective_per_page) else {
        return ListResult { data: records, total };
    };
    let page = pagination.map_or(1, Pagination::effective_page);

    let start = (page - 1).saturating_mul(per_page);
    let start = usize::try_from(start).unwrap_or(usize::MAX).min(total);
    let len = usize::try_from(per_page).unwrap_or(usize::MAX);

    let data = records.into_iter().skip(start).take(len).collect();
    ListResult { data, total }
}
