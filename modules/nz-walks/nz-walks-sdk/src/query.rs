//! Walk listing vocabulary.
//!
//! Field names arrive from the wire as free-form strings. They are only ever
//! resolved against the closed [`WalkField`] allow-list; nothing outside it can
//! drive filtering or ordering.

/// Page returned when the caller omits `pageNumber`.
pub const DEFAULT_PAGE_NUMBER: i64 = 1;

/// Page size used when the caller omits `pageSize`.
pub const DEFAULT_PAGE_SIZE: i64 = 1000;

/// Walk fields the listing endpoint may filter or sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkField {
    Name,
    Description,
    Length,
}

impl WalkField {
    /// Every accepted field, in documentation order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Description, Self::Length];

    /// Resolve a wire token (case-insensitive, surrounding whitespace ignored).
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(token))
    }

    /// Canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::Length => "Length",
        }
    }

    /// Text fields support substring filtering; numeric fields do not.
    #[must_use]
    pub const fn is_filterable(self) -> bool {
        matches!(self, Self::Name | Self::Description)
    }

    #[must_use]
    pub const fn is_sortable(self) -> bool {
        true
    }
}

/// Ordering applied by the sort stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// `isAscending` is tri-state on the wire: absent means ascending, an
    /// explicit `false` means descending.
    #[must_use]
    pub fn from_is_ascending(flag: Option<bool>) -> Self {
        match flag {
            None | Some(true) => Self::Ascending,
            Some(false) => Self::Descending,
        }
    }
}

/// Raw listing parameters exactly as received.
///
/// Nothing here is validated yet; the query engine resolves field names and
/// checks page bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkQuery {
    pub filter_on: Option<String>,
    pub filter_query: Option<String>,
    pub sort_by: Option<String>,
    pub is_ascending: Option<bool>,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

impl WalkQuery {
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        SortDirection::from_is_ascending(self.is_ascending)
    }
}
