//! Walk query engine: filter, sort and paginate a retrieved walk collection.
//!
//! Wire parameters are resolved against the [`WalkField`] allow-list into a
//! [`QueryPlan`] first. Each field maps to a fixed accessor or comparator, so
//! a field name can never be evaluated as an expression.

use std::cmp::Ordering;

use nz_walks_sdk::{DEFAULT_PAGE_NUMBER, SortDirection, Walk, WalkField, WalkQuery};

use crate::config::{UnknownFieldPolicy, WalksQueryConfig};
use crate::domain::error::DomainError;

/// Stateless engine; holds only its configuration.
#[derive(Debug, Clone, Default)]
pub struct WalkQueryEngine {
    config: WalksQueryConfig,
}

/// Validated, allow-list-resolved instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub filter: Option<FilterSpec>,
    pub sort: Option<SortSpec>,
    pub page: PageWindow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub field: WalkField,
    /// Already lower-cased.
    pub needle: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: WalkField,
    pub direction: SortDirection,
}

/// 1-based page window; both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    number: u64,
    size: u64,
}

impl PageWindow {
    /// # Errors
    /// Returns `DomainError::InvalidArgument` when either value is below 1.
    pub fn new(number: i64, size: i64) -> Result<Self, DomainError> {
        let number = u64::try_from(number)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| {
                DomainError::invalid_argument("pageNumber", format!("must be >= 1, got {number}"))
            })?;
        let size = u64::try_from(size)
            .ok()
            .filter(|s| *s >= 1)
            .ok_or_else(|| {
                DomainError::invalid_argument("pageSize", format!("must be >= 1, got {size}"))
            })?;
        Ok(Self { number, size })
    }

    #[must_use]
    pub fn number(self) -> u64 {
        self.number
    }

    #[must_use]
    pub fn size(self) -> u64 {
        self.size
    }

    #[must_use]
    pub fn offset(self) -> u64 {
        (self.number - 1).saturating_mul(self.size)
    }
}

impl WalkQueryEngine {
    #[must_use]
    pub fn new(config: WalksQueryConfig) -> Self {
        Self { config }
    }

    /// Resolve raw parameters into a plan without touching any data.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidArgument` for page bounds below 1, and for
    /// unknown field names when the policy is [`UnknownFieldPolicy::Reject`].
    pub fn plan(&self, query: &WalkQuery) -> Result<QueryPlan, DomainError> {
        let page = PageWindow::new(
            query.page_number.unwrap_or(DEFAULT_PAGE_NUMBER),
            query.page_size.unwrap_or(self.config.default_page_size),
        )?;

        let filter = self
            .resolve("filterOn", query.filter_on.as_deref(), WalkField::is_filterable)?
            .map(|field| FilterSpec {
                field,
                needle: query
                    .filter_query
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase(),
            });

        let sort = self
            .resolve("sortBy", query.sort_by.as_deref(), WalkField::is_sortable)?
            .map(|field| SortSpec {
                field,
                direction: query.direction(),
            });

        Ok(QueryPlan { filter, sort, page })
    }

    /// Plan and apply in one step.
    ///
    /// # Errors
    /// Same as [`WalkQueryEngine::plan`].
    pub fn run(&self, walks: Vec<Walk>, query: &WalkQuery) -> Result<Vec<Walk>, DomainError> {
        Ok(self.plan(query)?.apply(walks))
    }

    fn resolve(
        &self,
        param: &str,
        token: Option<&str>,
        capable: fn(WalkField) -> bool,
    ) -> Result<Option<WalkField>, DomainError> {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        match WalkField::parse(token).filter(|f| capable(*f)) {
            Some(field) => Ok(Some(field)),
            None => match self.config.unknown_field_policy {
                UnknownFieldPolicy::Ignore => {
                    tracing::debug!(param, token, "Ignoring unsupported walk field");
                    Ok(None)
                }
                UnknownFieldPolicy::Reject => Err(DomainError::invalid_argument(
                    param,
                    format!("unsupported field '{token}'"),
                )),
            },
        }
    }
}

impl QueryPlan {
    /// Filter, then stable-sort, then slice the page.
    #[must_use]
    pub fn apply(&self, mut walks: Vec<Walk>) -> Vec<Walk> {
        if let Some(filter) = &self.filter {
            walks.retain(|walk| filter.matches(walk));
        }

        if let Some(sort) = self.sort {
            // `sort_by` is stable; reversing the comparator keeps ties in
            // retrieval order for descending sorts too.
            walks.sort_by(|a, b| match sort.direction {
                SortDirection::Ascending => compare(sort.field, a, b),
                SortDirection::Descending => compare(sort.field, b, a),
            });
        }

        let offset = usize::try_from(self.page.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(self.page.size()).unwrap_or(usize::MAX);
        walks.into_iter().skip(offset).take(size).collect()
    }
}

impl FilterSpec {
    fn matches(&self, walk: &Walk) -> bool {
        text_of(self.field, walk).is_none_or(|text| text.to_lowercase().contains(&self.needle))
    }
}

fn text_of(field: WalkField, walk: &Walk) -> Option<&str> {
    match field {
        WalkField::Name => Some(&walk.name),
        WalkField::Description => Some(&walk.description),
        WalkField::Length => None,
    }
}

fn compare(field: WalkField, a: &Walk, b: &Walk) -> Ordering {
    match field {
        WalkField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        WalkField::Description => a
            .description
            .to_lowercase()
            .cmp(&b.description.to_lowercase()),
        WalkField::Length => a.length_in_km.total_cmp(&b.length_in_km),
    }
}
