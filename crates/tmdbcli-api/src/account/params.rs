//! Query parameters for paged account endpoints.

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Sort order accepted by the favorite, watchlist and rated endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest additions first.
    #[default]
    CreatedAtAsc,
    /// Newest additions first.
    CreatedAtDesc,
}

impl SortOrder {
    /// Returns the `sort_by` query value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAtAsc => "created_at.asc",
            Self::CreatedAtDesc => "created_at.desc",
        }
    }
}

/// Parameters for a single page of a media collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParams {
    /// Response language (e.g. "en-US").
    pub language: String,
    /// Page number, starting at 1.
    pub page: u32,
    /// Sort order.
    pub sort_by: SortOrder,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            language: String::from(DEFAULT_LANGUAGE),
            page: 1,
            sort_by: SortOrder::default(),
        }
    }
}

impl PageParams {
    /// Creates parameters for page 1, `en-US`, oldest first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub const fn sort_by(mut self, sort_by: SortOrder) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Builds the query pairs in the order TMDB documents them.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("language", self.language.clone()),
            ("page", self.page.to_string()),
            ("sort_by", String::from(self.sort_by.as_str())),
        ]
    }
}
