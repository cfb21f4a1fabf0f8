//! Pagination, sorting, and filtering over a caller-owned record slice.

use std::cmp::Ordering;

use thiserror::Error;

/// Items shown per page unless the caller picks another size.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Record with stable named fields usable for sorting and default filtering.
pub trait ListRecord {
    /// Value of the field addressed by `key`; `None` when the record has no
    /// such field.
    fn sort_value(&self, key: &str) -> Option<&str>;
}

/// Caller-supplied filter. The query is never empty when the predicate runs;
/// an `Err` makes the presenter fall back to the unfiltered list.
pub type FilterPredicate<T> = Box<dyn Fn(&T, &str) -> anyhow::Result<bool> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("filter failed for query '{query}': {reason}")]
pub struct FilterError {
    pub query: String,
    pub reason: String,
}

/// One page of the derived view plus the pagination metadata the chrome
/// renders around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page_number: usize,
}

/// Deterministic, pure transformation from a full record set plus view
/// parameters to a displayed page. The source slice stays caller-owned and is
/// re-read on every [`ListPresenter::visible_page`] call; nothing derived is
/// cached.
pub struct ListPresenter<T> {
    query: String,
    predicate: Option<FilterPredicate<T>>,
    sort_key: String,
    ascending: bool,
    page_size: usize,
    page_offset: usize,
}

impl<T: ListRecord + Clone> ListPresenter<T> {
    pub fn new(sort_key: impl Into<String>) -> Self {
        Self {
            query: String::new(),
            predicate: None,
            sort_key: sort_key.into(),
            ascending: true,
            page_size: DEFAULT_PAGE_SIZE,
            page_offset: 0,
        }
    }

    /// Replaces the default contains-on-sort-field filter.
    pub fn with_predicate(mut self, predicate: FilterPredicate<T>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Changing the query always jumps back to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page_offset = 0;
    }

    pub fn set_sort(&mut self, key: impl Into<String>, ascending: bool) {
        self.sort_key = key.into();
        self.ascending = ascending;
    }

    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    /// Pages are 1-based; values below 1 land on the first page, values past
    /// the end clamp to the last page at read time.
    pub fn set_page(&mut self, page_number: usize) {
        self.page_offset = (page_number.max(1) - 1) * self.page_size;
    }

    /// A size of 0 is ignored. The current offset is kept, so the view
    /// re-buckets in place instead of jumping back to page 1.
    pub fn set_page_size(&mut self, size: usize) {
        if size == 0 {
            return;
        }
        self.page_size = size;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Pure read: filter, then stable-sort, then slice. A failed predicate is
    /// reported alongside the page and the unfiltered list is shown instead.
    pub fn visible_page(&self, source: &[T]) -> (PageView<T>, Option<FilterError>) {
        let (mut rows, filter_error) = self.filtered(source);
        self.sort_rows(&mut rows);

        let total_count = rows.len();
        let total_pages = total_count.div_ceil(self.page_size);
        let offset = if total_pages == 0 {
            0
        } else {
            self.page_offset.min((total_pages - 1) * self.page_size)
        };
        let page_number = offset / self.page_size + 1;
        let items = rows
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .cloned()
            .collect();

        (
            PageView {
                items,
                total_count,
                total_pages,
                page_number,
            },
            filter_error,
        )
    }

    fn filtered<'a>(&self, source: &'a [T]) -> (Vec<&'a T>, Option<FilterError>) {
        if self.query.is_empty() {
            return (source.iter().collect(), None);
        }

        match &self.predicate {
            Some(predicate) => {
                let mut rows = Vec::new();
                for record in source {
                    match predicate(record, &self.query) {
                        Ok(true) => rows.push(record),
                        Ok(false) => {}
                        Err(err) => {
                            return (
                                source.iter().collect(),
                                Some(FilterError {
                                    query: self.query.clone(),
                                    reason: err.to_string(),
                                }),
                            );
                        }
                    }
                }
                (rows, None)
            }
            None => {
                let query = self.query.to_lowercase();
                let rows = source
                    .iter()
                    .filter(|record| {
                        record
                            .sort_value(&self.sort_key)
                            .is_some_and(|value| value.to_lowercase().contains(&query))
                    })
                    .collect();
                (rows, None)
            }
        }
    }

    fn sort_rows(&self, rows: &mut [&T]) {
        // slice::sort_by is stable; ties keep their prior relative order.
        rows.sort_by(|a, b| {
            let ordering = match (a.sort_value(&self.sort_key), b.sort_value(&self.sort_key)) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            if self.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
    }
}
