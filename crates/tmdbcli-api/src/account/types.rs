//! TMDB account API request and response types.
//!
//! Field order follows the wire order so that re-serializing a decoded value
//! reproduces the server's layout.

use serde::{Deserialize, Serialize};

// --- Media kind ---

/// Media kind accepted by the favorite, watchlist and rated endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Movies.
    Movie,
    /// TV series.
    Tv,
}

impl MediaKind {
    /// Returns the `media_type` value used in write bodies.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    /// Returns the path segment used by collection endpoints.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Movie => "movies",
            Self::Tv => "tv",
        }
    }
}

// --- Envelopes ---

/// Paged response envelope shared by every collection endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Current page number.
    pub page: u32,
    /// Items on this page.
    pub results: Vec<T>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

/// A collection page whose item type depends on the requested [`MediaKind`].
///
/// Serialized untagged, so raw output is just the page.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MediaPage<M, T> {
    /// Page of movies.
    Movies(Page<M>),
    /// Page of TV series.
    Tv(Page<T>),
}

impl<M, T> MediaPage<M, T> {
    /// Returns the media kind of this page.
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        match self {
            Self::Movies(_) => MediaKind::Movie,
            Self::Tv(_) => MediaKind::Tv,
        }
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn result_count(&self) -> usize {
        match self {
            Self::Movies(page) => page.results.len(),
            Self::Tv(page) => page.results.len(),
        }
    }
}

/// Favorite or watchlist page.
pub type ListedMedia = MediaPage<MovieSummary, TvSummary>;

/// Rated movies or rated TV series page.
pub type RatedMedia = MediaPage<Rated<MovieSummary>, Rated<TvSummary>>;

/// Reply to favorite and watchlist writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Whether the write succeeded.
    pub success: bool,
    /// TMDB status code (1 = created, 13 = deleted, ...).
    pub status_code: u32,
    /// Human-readable status.
    pub status_message: String,
}

/// Error payload returned by TMDB on failed requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// TMDB status code.
    pub status_code: u32,
    /// Human-readable status.
    pub status_message: String,
    /// Always `false`.
    #[serde(default)]
    pub success: bool,
}

// --- Account details ---

/// Response from `account/{account_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDetails {
    /// Avatar sources.
    pub avatar: Avatar,
    /// Numeric account ID.
    pub id: u64,
    /// Preferred language (ISO 639-1).
    pub iso_639_1: String,
    /// Country (ISO 3166-1).
    pub iso_3166_1: String,
    /// Display name.
    pub name: String,
    /// Whether adult content is included in results.
    pub include_adult: bool,
    /// Login name.
    pub username: String,
}

/// Avatar sources of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Gravatar avatar.
    pub gravatar: Gravatar,
    /// Avatar uploaded to TMDB.
    pub tmdb: TmdbAvatar,
}

/// Gravatar avatar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gravatar {
    /// MD5 hash of the account e-mail.
    pub hash: String,
}

/// Avatar uploaded to TMDB.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbAvatar {
    /// Image path (null when none was uploaded).
    pub avatar_path: Option<String>,
}

// --- Lists ---

/// A custom list owned by the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountList {
    /// List description.
    pub description: String,
    /// Number of users who favorited the list.
    pub favorite_count: u32,
    /// List ID.
    pub id: u64,
    /// Number of items in the list.
    pub item_count: u32,
    /// List language (ISO 639-1).
    pub iso_639_1: String,
    /// List type (e.g. "movie").
    pub list_type: String,
    /// List name.
    pub name: String,
    /// Poster image path.
    pub poster_path: Option<String>,
}

// --- Media summaries ---

/// A movie as returned by favorite, watchlist and rated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Adult flag.
    pub adult: bool,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Genre IDs.
    pub genre_ids: Vec<u32>,
    /// TMDB movie ID.
    pub id: u64,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Original title.
    pub original_title: String,
    /// Overview text.
    pub overview: String,
    /// Popularity score.
    pub popularity: f64,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Release date (YYYY-MM-DD or null).
    pub release_date: Option<String>,
    /// Localized title.
    pub title: String,
    /// Video flag.
    pub video: bool,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
}

/// A TV series as returned by favorite, watchlist and rated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvSummary {
    /// Adult flag.
    pub adult: bool,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Genre IDs.
    pub genre_ids: Vec<u32>,
    /// TMDB series ID.
    pub id: u64,
    /// Origin countries (ISO 3166-1).
    pub origin_country: Vec<String>,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Original name.
    pub original_name: String,
    /// Overview text.
    pub overview: String,
    /// Popularity score.
    pub popularity: f64,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// First air date (YYYY-MM-DD or null).
    pub first_air_date: Option<String>,
    /// Localized name.
    pub name: String,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
}

/// A summary annotated with the account's rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rated<T> {
    /// The rated item.
    #[serde(flatten)]
    pub item: T,
    /// Rating given by the account (0.5 - 10.0).
    pub rating: f64,
}

/// A rated TV episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatedEpisode {
    /// Air date (YYYY-MM-DD or null).
    pub air_date: Option<String>,
    /// Episode number within the season.
    pub episode_number: u32,
    /// Episode type (e.g. "standard", "finale").
    #[serde(default)]
    pub episode_type: String,
    /// TMDB episode ID.
    pub id: u64,
    /// Episode name.
    pub name: String,
    /// Overview text.
    pub overview: String,
    /// Production code.
    #[serde(default)]
    pub production_code: String,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Season number.
    pub season_number: u32,
    /// TMDB series ID.
    pub show_id: u64,
    /// Still image path.
    pub still_path: Option<String>,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Rating given by the account.
    pub rating: f64,
}
