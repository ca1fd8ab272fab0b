//! TMDB account API client module.
//!
//! Handles HTTP requests to the `account/{account_id}` endpoints of TMDB API v3:
//! account details, custom lists, favorites, watchlist and rated media.

mod api;
mod client;
mod error;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{AccountApi, LocalAccountApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{AccountClient, AccountClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::AccountError;
pub use params::{PageParams, SortOrder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    AccountDetails, AccountList, Avatar, ErrorBody, Gravatar, ListedMedia, MediaKind, MediaPage,
    MovieSummary, Page, Rated, RatedEpisode, RatedMedia, StatusResponse, TmdbAvatar, TvSummary,
};
