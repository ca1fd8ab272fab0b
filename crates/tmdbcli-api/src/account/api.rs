//! `AccountApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::AccountError;
use super::params::PageParams;
use super::types::{
    AccountDetails, AccountList, ListedMedia, MediaKind, Page, RatedEpisode, RatedMedia,
    StatusResponse,
};

/// TMDB account API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(AccountApi: Send)]
pub trait LocalAccountApi {
    /// Fetches the public details of the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn details(&self) -> Result<AccountDetails, AccountError>;

    /// Fetches one page of the account's custom lists.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn lists(&self, page: u32) -> Result<Page<AccountList>, AccountError>;

    /// Marks (`favorite = true`) or unmarks a movie or TV series as favorite.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or the
    /// server does not answer 201 (mark) / 200 (unmark).
    async fn add_favorite(
        &self,
        kind: MediaKind,
        media_id: u64,
        favorite: bool,
    ) -> Result<StatusResponse, AccountError>;

    /// Fetches one page of favorite movies or TV series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn favorites(
        &self,
        kind: MediaKind,
        params: &PageParams,
    ) -> Result<ListedMedia, AccountError>;

    /// Adds (`watchlist = true`) or removes a movie or TV series from the watchlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or the
    /// server does not answer 201 (add) / 200 (remove).
    async fn add_to_watchlist(
        &self,
        kind: MediaKind,
        media_id: u64,
        watchlist: bool,
    ) -> Result<StatusResponse, AccountError>;

    /// Fetches one page of the watchlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn watchlist(
        &self,
        kind: MediaKind,
        params: &PageParams,
    ) -> Result<ListedMedia, AccountError>;

    /// Fetches one page of rated movies or TV series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn rated(&self, kind: MediaKind, params: &PageParams)
    -> Result<RatedMedia, AccountError>;

    /// Fetches one page of rated TV episodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn rated_episodes(
        &self,
        params: &PageParams,
    ) -> Result<Page<RatedEpisode>, AccountError>;
}
