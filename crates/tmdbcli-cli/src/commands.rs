//! Account subcommand actions.
//!
//! Each action performs exactly one API call and renders the result to `out`.
#![allow(clippy::future_not_send)]

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tmdbcli_api::account::{LocalAccountApi, MediaKind, PageParams};
use tracing::instrument;

use crate::output;

/// How a response is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Pretty-printed JSON of the decoded response.
    Raw,
    /// Human-readable text.
    Text,
}

impl Format {
    /// Maps the `--raw` flag.
    pub const fn from_raw_flag(raw: bool) -> Self {
        if raw { Self::Raw } else { Self::Text }
    }
}

fn render<W: Write, T: Serialize>(
    out: &mut W,
    format: Format,
    value: &T,
    text: impl FnOnce(&mut W, &T) -> io::Result<()>,
) -> Result<()> {
    match format {
        Format::Raw => output::write_raw(out, value),
        Format::Text => text(out, value),
    }
    .context("failed to write output")
}

/// Runs `account details`.
///
/// # Errors
///
/// Returns an error if the API request or the write fails.
#[instrument(skip_all)]
pub async fn run_details<A: LocalAccountApi, W: Write>(
    api: &A,
    out: &mut W,
    format: Format,
) -> Result<()> {
    let details = api
        .details()
        .await
        .context("TMDB account details request failed")?;
    render(out, format, &details, output::write_details)
}

/// Runs `account lists [PAGE]`.
///
/// # Errors
///
/// Returns an error if the API request or the write fails.
#[instrument(skip_all)]
pub async fn run_lists<A: LocalAccountApi, W: Write>(
    api: &A,
    out: &mut W,
    page: u32,
    format: Format,
) -> Result<()> {
    let lists = api
        .lists(page)
        .await
        .context("TMDB account lists request failed")?;
    tracing::debug!(page, total_results = lists.total_results, "fetched lists");
    render(out, format, &lists, output::write_lists)
}

/// Runs `account favorite add`.
///
/// # Errors
///
/// Returns an error if the API request or the write fails.
#[instrument(skip_all)]
pub async fn run_add_favorite<A: LocalAccountApi, W: Write>(
    api: &A,
    out: &mut W,
    kind: MediaKind,
    media_id: u64,
    favorite: bool,
    format: Format,
) -> Result<()> {
    let status = api
        .add_favorite(kind, media_id, favorite)
        .await
        .with_context(|| {
            format!("TMDB favorite request failed for {} {media_id}", kind.as_str())
        })?;
    render(out, format, &status, output::write_status)
}

/// Runs `account favorite get`.
///
/// # Errors
///
/// Returns an error if the API request or the write fails.
#[instrument(skip_all)]
pub async fn run_favorites<A: LocalAccountApi, W: Write>(
    api: &A,
    out: &mut W,
    kind: MediaKind,
    params: &PageParams,
    format: Format,
) -> Result<()> {
    let page = api
        .favorites(kind, params)
        .await
        .context("TMDB favorites request failed")?;
    tracing::debug!(count = page.result_count(), "fetched favorites");
    render(out, format, &page, |out, page| {
        output::write_media_page(out, Some("Favorite"), page)
    })
}

/// Runs `account watchlist add`.
///
/// # Errors
///
/// Returns an error if the API request or the write fails.
#[instrument(skip_all)]
pub async fn run_add_to_watchlist<A: LocalAccountApi, W: Write>(
    api: &A,
    out: &mut W,
    kind: MediaKind,
    media_id: u64,
    watchlist: bool,
    format: Format,
) -> Result<()> {
    let status = api
        .add_to_watchlist(kind, media_id, watchlist)
        .await
        .with_context(|| {
            format!("TMDB watchlist request failed for {} {media_id}", kind.as_str())
        })?;
    render(out, format, &status, output::write_status)
}

/// Runs `account watchlist get`.
///
/// # Errors
///
/// Returns an error if the API request or the write fails.
#[instrument(skip_all)]
pub async fn run_watchlist<A: LocalAccountApi, W: Write>(
    api: &A,
    out: &mut W,
    kind: MediaKind,
    params: &PageParams,
    format: Format,
) -> Result<()> {
    let page = api
        .watchlist(kind, params)
        .await
        .context("TMDB watchlist request failed")?;
    tracing::debug!(count = page.result_count(), "fetched watchlist");
    render(out, format, &page, |out, page| {
        output::write_media_page(out, Some("Watchlist"), page)
    })
}

/// Runs `account rated get`.
///
/// # Errors
///
/// Returns an error if the API request or the write fails.
#[instrument(skip_all)]
pub async fn run_rated<A: LocalAccountApi, W: Write>(
    api: &A,
    out: &mut W,
    kind: MediaKind,
    params: &PageParams,
    format: Format,
) -> Result<()> {
    let page = api
        .rated(kind, params)
        .await
        .context("TMDB rated request failed")?;
    tracing::debug!(count = page.result_count(), "fetched rated items");
    render(out, format, &page, |out, page| {
        output::write_media_page(out, None, page)
    })
}

/// Runs `account rated get-eps`.
///
/// # Errors
///
/// Returns an error if the API request or the write fails.
#[instrument(skip_all)]
pub async fn run_rated_episodes<A: LocalAccountApi, W: Write>(
    api: &A,
    out: &mut W,
    params: &PageParams,
    format: Format,
) -> Result<()> {
    let page = api
        .rated_episodes(params)
        .await
        .context("TMDB rated episodes request failed")?;
    render(out, format, &page, |out, page| {
        output::write_entries(out, &page.results)
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde::de::DeserializeOwned;
    use tmdbcli_api::account::{
        AccountDetails, AccountError, AccountList, ListedMedia, MediaPage, Page, RatedEpisode,
        RatedMedia, StatusResponse,
    };

    use super::*;

    const DETAILS: &str = include_str!("../../../fixtures/account/details.json");
    const LISTS: &str = include_str!("../../../fixtures/account/lists.json");
    const LISTS_EMPTY: &str = include_str!("../../../fixtures/account/lists_empty.json");
    const FAVORITE_MOVIES: &str = include_str!("../../../fixtures/account/favorite_movies.json");
    const FAVORITE_TV: &str = include_str!("../../../fixtures/account/favorite_tv.json");
    const WATCHLIST_MOVIES: &str = include_str!("../../../fixtures/account/watchlist_movies.json");
    const WATCHLIST_TV: &str = include_str!("../../../fixtures/account/watchlist_tv.json");
    const RATED_MOVIES: &str = include_str!("../../../fixtures/account/rated_movies.json");
    const RATED_TV: &str = include_str!("../../../fixtures/account/rated_tv.json");
    const RATED_EPISODES: &str = include_str!("../../../fixtures/account/rated_episodes.json");
    const STATUS_CREATED: &str = include_str!("../../../fixtures/account/status_created.json");
    const STATUS_DELETED: &str = include_str!("../../../fixtures/account/status_deleted.json");

    fn fixture<T: DeserializeOwned>(json: &str) -> T {
        serde_json::from_str(json).unwrap()
    }

    /// Serves fixtures instead of calling TMDB.
    #[derive(Debug)]
    struct StubApi;

    impl LocalAccountApi for StubApi {
        async fn details(&self) -> Result<AccountDetails, AccountError> {
            Ok(fixture(DETAILS))
        }

        async fn lists(&self, page: u32) -> Result<Page<AccountList>, AccountError> {
            Ok(fixture(if page == 1 { LISTS } else { LISTS_EMPTY }))
        }

        async fn add_favorite(
            &self,
            _kind: MediaKind,
            _media_id: u64,
            favorite: bool,
        ) -> Result<StatusResponse, AccountError> {
            Ok(fixture(if favorite { STATUS_CREATED } else { STATUS_DELETED }))
        }

        async fn favorites(
            &self,
            kind: MediaKind,
            _params: &PageParams,
        ) -> Result<ListedMedia, AccountError> {
            Ok(match kind {
                MediaKind::Movie => MediaPage::Movies(fixture(FAVORITE_MOVIES)),
                MediaKind::Tv => MediaPage::Tv(fixture(FAVORITE_TV)),
            })
        }

        async fn add_to_watchlist(
            &self,
            _kind: MediaKind,
            _media_id: u64,
            watchlist: bool,
        ) -> Result<StatusResponse, AccountError> {
            Ok(fixture(if watchlist { STATUS_CREATED } else { STATUS_DELETED }))
        }

        async fn watchlist(
            &self,
            kind: MediaKind,
            _params: &PageParams,
        ) -> Result<ListedMedia, AccountError> {
            Ok(match kind {
                MediaKind::Movie => MediaPage::Movies(fixture(WATCHLIST_MOVIES)),
                MediaKind::Tv => MediaPage::Tv(fixture(WATCHLIST_TV)),
            })
        }

        async fn rated(
            &self,
            kind: MediaKind,
            _params: &PageParams,
        ) -> Result<RatedMedia, AccountError> {
            Ok(match kind {
                MediaKind::Movie => MediaPage::Movies(fixture(RATED_MOVIES)),
                MediaKind::Tv => MediaPage::Tv(fixture(RATED_TV)),
            })
        }

        async fn rated_episodes(
            &self,
            _params: &PageParams,
        ) -> Result<Page<RatedEpisode>, AccountError> {
            Ok(fixture(RATED_EPISODES))
        }
    }

    /// Fails every call with a 404.
    #[derive(Debug)]
    struct NotFoundApi;

    fn not_found<T>() -> Result<T, AccountError> {
        Err(AccountError::NotFound {
            message: String::from("The resource you requested could not be found."),
        })
    }

    impl LocalAccountApi for NotFoundApi {
        async fn details(&self) -> Result<AccountDetails, AccountError> {
            not_found()
        }

        async fn lists(&self, _page: u32) -> Result<Page<AccountList>, AccountError> {
            not_found()
        }

        async fn add_favorite(
            &self,
            _kind: MediaKind,
            _media_id: u64,
            _favorite: bool,
        ) -> Result<StatusResponse, AccountError> {
            not_found()
        }

        async fn favorites(
            &self,
            _kind: MediaKind,
            _params: &PageParams,
        ) -> Result<ListedMedia, AccountError> {
            not_found()
        }

        async fn add_to_watchlist(
            &self,
            _kind: MediaKind,
            _media_id: u64,
            _watchlist: bool,
        ) -> Result<StatusResponse, AccountError> {
            not_found()
        }

        async fn watchlist(
            &self,
            _kind: MediaKind,
            _params: &PageParams,
        ) -> Result<ListedMedia, AccountError> {
            not_found()
        }

        async fn rated(
            &self,
            _kind: MediaKind,
            _params: &PageParams,
        ) -> Result<RatedMedia, AccountError> {
            not_found()
        }

        async fn rated_episodes(
            &self,
            _params: &PageParams,
        ) -> Result<Page<RatedEpisode>, AccountError> {
            not_found()
        }
    }

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn test_details_text() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_details(&StubApi, &mut buf, Format::Text).await.unwrap();

        // Assert
        assert_eq!(
            text(buf),
            "Account details for 21907685\nID: 21907685\nUsername: clairvoyance27\n"
        );
    }

    #[tokio::test]
    async fn test_details_raw_keeps_field_order() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_details(&StubApi, &mut buf, Format::Raw).await.unwrap();

        // Assert
        let out = text(buf);
        let expected: serde_json::Value = fixture(DETAILS);
        assert_eq!(fixture::<serde_json::Value>(&out), expected);
        assert!(out.starts_with("{\n   \"avatar\": {\n      \"gravatar\": {\n"));
        let id_pos = out.find("\"id\"").unwrap();
        let username_pos = out.find("\"username\"").unwrap();
        assert!(id_pos < username_pos);
        assert!(out.ends_with("}\n"));
    }

    #[tokio::test]
    async fn test_lists_text() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_lists(&StubApi, &mut buf, 1, Format::Text).await.unwrap();

        // Assert
        assert_eq!(
            text(buf),
            "Lists:\n\
             1. Name: my-list-2\n\
             Description: test my list 2\n\
             List Type: movie\n\
             Total Items: 2\n\
             \n\
             2. Name: my-list\n\
             Description: test my list\n\
             List Type: movie\n\
             Total Items: 2\n\
             \n"
        );
    }

    #[tokio::test]
    async fn test_lists_empty_text() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_lists(&StubApi, &mut buf, 500, Format::Text)
            .await
            .unwrap();

        // Assert
        assert_eq!(text(buf), "Lists:\n");
    }

    #[tokio::test]
    async fn test_favorite_movies_text() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_favorites(
            &StubApi,
            &mut buf,
            MediaKind::Movie,
            &PageParams::new(),
            Format::Text,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(
            text(buf),
            "Favorite Movies:\n\
             1. Title: Cosmic Chaos\n\
             Release Date: 2023-08-03\n\
             Popularity: 160.04\n\
             Vote Count: 46\n\
             Vote Average: 6.00\n\
             \n\
             2. Title: Absolut\n\
             Release Date: 2005-04-20\n\
             Popularity: 0.29\n\
             Vote Count: 29\n\
             Vote Average: 7.80\n\
             \n"
        );
    }

    #[tokio::test]
    async fn test_favorite_tv_text() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_favorites(
            &StubApi,
            &mut buf,
            MediaKind::Tv,
            &PageParams::new(),
            Format::Text,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(
            text(buf),
            "Favorite TV Shows:\n\
             1. Name: Till Death Us Do Part\n\
             First Air Date: 1966-06-06\n\
             Popularity: 12.82\n\
             Vote Count: 24\n\
             Vote Average: 7.40\n\
             \n\
             2. Name: Game of Thrones\n\
             First Air Date: 2011-04-17\n\
             Popularity: 192.15\n\
             Vote Count: 24838\n\
             Vote Average: 8.46\n\
             \n"
        );
    }

    #[tokio::test]
    async fn test_watchlist_movies_text() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_watchlist(
            &StubApi,
            &mut buf,
            MediaKind::Movie,
            &PageParams::new(),
            Format::Text,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(
            text(buf),
            "Watchlist Movies:\n\
             1. Title: Star Wars\n\
             Release Date: 1977-05-25\n\
             Popularity: 20.15\n\
             Vote Count: 21056\n\
             Vote Average: 8.20\n\
             \n\
             2. Title: Fight Club\n\
             Release Date: 1999-10-15\n\
             Popularity: 33.76\n\
             Vote Count: 30142\n\
             Vote Average: 8.44\n\
             \n\
             3. Title: Reservoir Dogs\n\
             Release Date: 1992-09-02\n\
             Popularity: 10.44\n\
             Vote Count: 14565\n\
             Vote Average: 8.12\n\
             \n\
             4. Title: Cléo from 5 to 7\n\
             Release Date: 1962-04-11\n\
             Popularity: 2.47\n\
             Vote Count: 706\n\
             Vote Average: 7.70\n\
             \n"
        );
    }

    #[tokio::test]
    async fn test_watchlist_tv_text() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_watchlist(
            &StubApi,
            &mut buf,
            MediaKind::Tv,
            &PageParams::new(),
            Format::Text,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(
            text(buf),
            "Watchlist TV Shows:\n\
             1. Name: Law & Order: Special Victims Unit\n\
             First Air Date: 1999-09-20\n\
             Popularity: 341.29\n\
             Vote Count: 3905\n\
             Vote Average: 7.94\n\
             \n\
             2. Name: Island at War\n\
             First Air Date: 2004-07-11\n\
             Popularity: 1.68\n\
             Vote Count: 9\n\
             Vote Average: 7.40\n\
             \n"
        );
    }

    #[tokio::test]
    async fn test_rated_movies_text() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_rated(
            &StubApi,
            &mut buf,
            MediaKind::Movie,
            &PageParams::new(),
            Format::Text,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(
            text(buf),
            "1. Title: The Wild Robot\n\
             Release Date: 2024-09-12\n\
             Popularity: 64.82\n\
             Vote Count: 4716\n\
             Vote Average: 8.33\n\
             \n\
             2. Title: A Minecraft Movie\n\
             Release Date: 2025-03-31\n\
             Popularity: 695.71\n\
             Vote Count: 499\n\
             Vote Average: 6.10\n\
             \n"
        );
    }

    #[tokio::test]
    async fn test_rated_tv_text() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_rated(
            &StubApi,
            &mut buf,
            MediaKind::Tv,
            &PageParams::new(),
            Format::Text,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(
            text(buf),
            "1. Name: Breaking Bad\n\
             First Air Date: 2008-01-20\n\
             Popularity: 89.71\n\
             Vote Count: 15000\n\
             Vote Average: 8.90\n\
             \n\
             2. Name: Island at War\n\
             First Air Date: 2004-07-11\n\
             Popularity: 1.68\n\
             Vote Count: 9\n\
             Vote Average: 7.40\n\
             \n"
        );
    }

    #[tokio::test]
    async fn test_rated_episodes_text() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_rated_episodes(&StubApi, &mut buf, &PageParams::new(), Format::Text)
            .await
            .unwrap();

        // Assert
        assert_eq!(
            text(buf),
            "1. Name: The Long Night\n\
             Eps Number: 3\n\
             Air Date: 2019-04-28\n\
             Vote Count: 308\n\
             Vote Average: 6.87\n\
             \n\
             2. Name: The Iron Throne\n\
             Eps Number: 6\n\
             Air Date: 2019-05-19\n\
             Vote Count: 343\n\
             Vote Average: 4.57\n\
             \n"
        );
    }

    #[tokio::test]
    async fn test_add_favorite_text() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_add_favorite(&StubApi, &mut buf, MediaKind::Movie, 650, true, Format::Text)
            .await
            .unwrap();

        // Assert
        assert_eq!(text(buf), "Success. (status code 1)\n");
    }

    #[tokio::test]
    async fn test_remove_from_watchlist_text() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_add_to_watchlist(&StubApi, &mut buf, MediaKind::Tv, 799, false, Format::Text)
            .await
            .unwrap();

        // Assert
        assert_eq!(
            text(buf),
            "The item/record was deleted successfully. (status code 13)\n"
        );
    }

    #[tokio::test]
    async fn test_add_to_watchlist_raw() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_add_to_watchlist(&StubApi, &mut buf, MediaKind::Movie, 799, true, Format::Raw)
            .await
            .unwrap();

        // Assert
        assert_eq!(
            text(buf),
            "{\n   \"success\": true,\n   \"status_code\": 1,\n   \"status_message\": \"Success.\"\n}\n"
        );
    }

    #[tokio::test]
    async fn test_rated_raw_includes_rating() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        run_rated(
            &StubApi,
            &mut buf,
            MediaKind::Movie,
            &PageParams::new(),
            Format::Raw,
        )
        .await
        .unwrap();

        // Assert
        let value: serde_json::Value = fixture(&text(buf));
        assert_eq!(value, fixture::<serde_json::Value>(RATED_MOVIES));
    }

    #[tokio::test]
    async fn test_api_error_writes_nothing() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        let result = run_watchlist(
            &NotFoundApi,
            &mut buf,
            MediaKind::Tv,
            &PageParams::new(),
            Format::Text,
        )
        .await;

        // Assert
        let err = result.unwrap_err();
        assert!(err.to_string().contains("TMDB watchlist request failed"));
        assert!(format!("{err:#}").contains("could not be found"));
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn test_add_error_names_media() {
        // Arrange
        let mut buf = Vec::new();

        // Act
        let result =
            run_add_favorite(&NotFoundApi, &mut buf, MediaKind::Movie, 650, true, Format::Text)
                .await;

        // Assert
        assert!(result.unwrap_err().to_string().contains("movie 650"));
    }

    #[test]
    fn test_format_from_raw_flag() {
        // Arrange & Act & Assert
        assert_eq!(Format::from_raw_flag(true), Format::Raw);
        assert_eq!(Format::from_raw_flag(false), Format::Text);
    }
}
