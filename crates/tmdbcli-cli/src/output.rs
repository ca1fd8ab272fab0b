//! Text and raw JSON rendering of account API responses.
//!
//! Every writer takes a generic `Write` so commands can render to stdout
//! while tests render to a `Vec<u8>`.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tmdbcli_api::account::{
    AccountDetails, AccountList, MediaPage, MovieSummary, Page, Rated, RatedEpisode,
    StatusResponse, TvSummary,
};

/// Placeholder for missing optional values.
const MISSING: &str = "-";

/// Writes `value` as pretty JSON (3-space indent) followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_raw<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    let formatter = PrettyFormatter::with_indent(b"   ");
    let mut ser = serde_json::Serializer::with_formatter(&mut *out, formatter);
    value.serialize(&mut ser)?;
    writeln!(out)
}

/// Writes the account id and username.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_details<W: Write>(out: &mut W, details: &AccountDetails) -> io::Result<()> {
    writeln!(out, "Account details for {}", details.id)?;
    writeln!(out, "ID: {}", details.id)?;
    writeln!(out, "Username: {}", details.username)
}

/// Writes the account's custom lists.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_lists<W: Write>(out: &mut W, lists: &Page<AccountList>) -> io::Result<()> {
    writeln!(out, "Lists:")?;
    for (number, list) in (1_usize..).zip(&lists.results) {
        writeln!(out, "{number}. Name: {}", list.name)?;
        writeln!(out, "Description: {}", list.description)?;
        writeln!(out, "List Type: {}", list.list_type)?;
        writeln!(out, "Total Items: {}", list.item_count)?;
        writeln!(out)?;
    }
    Ok(())
}

/// A collection item that renders as one numbered block.
pub trait Listing {
    /// Writes the block, starting with `{number}. `.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write_entry<W: Write>(&self, out: &mut W, number: usize) -> io::Result<()>;
}

impl Listing for MovieSummary {
    fn write_entry<W: Write>(&self, out: &mut W, number: usize) -> io::Result<()> {
        writeln!(out, "{number}. Title: {}", self.title)?;
        writeln!(out, "Release Date: {}", or_missing(self.release_date.as_deref()))?;
        write_scores(out, self.popularity, self.vote_count, self.vote_average)
    }
}

impl Listing for TvSummary {
    fn write_entry<W: Write>(&self, out: &mut W, number: usize) -> io::Result<()> {
        writeln!(out, "{number}. Name: {}", self.name)?;
        writeln!(
            out,
            "First Air Date: {}",
            or_missing(self.first_air_date.as_deref())
        )?;
        write_scores(out, self.popularity, self.vote_count, self.vote_average)
    }
}

impl<T: Listing> Listing for Rated<T> {
    fn write_entry<W: Write>(&self, out: &mut W, number: usize) -> io::Result<()> {
        self.item.write_entry(out, number)
    }
}

impl Listing for RatedEpisode {
    fn write_entry<W: Write>(&self, out: &mut W, number: usize) -> io::Result<()> {
        writeln!(out, "{number}. Name: {}", self.name)?;
        writeln!(out, "Eps Number: {}", self.episode_number)?;
        writeln!(out, "Air Date: {}", or_missing(self.air_date.as_deref()))?;
        writeln!(out, "Vote Count: {}", self.vote_count)?;
        writeln!(out, "Vote Average: {:.2}", self.vote_average)
    }
}

fn write_scores<W: Write>(
    out: &mut W,
    popularity: f64,
    vote_count: u32,
    vote_average: f64,
) -> io::Result<()> {
    writeln!(out, "Popularity: {popularity:.2}")?;
    writeln!(out, "Vote Count: {vote_count}")?;
    writeln!(out, "Vote Average: {vote_average:.2}")
}

/// Writes one numbered block per item, each followed by a blank line.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_entries<W: Write, L: Listing>(out: &mut W, items: &[L]) -> io::Result<()> {
    for (number, item) in (1_usize..).zip(items) {
        item.write_entry(out, number)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Writes a movie or TV page, under `"{section} Movies:"` / `"{section} TV Shows:"`
/// when a section is given.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_media_page<W: Write, M: Listing, T: Listing>(
    out: &mut W,
    section: Option<&str>,
    page: &MediaPage<M, T>,
) -> io::Result<()> {
    match page {
        MediaPage::Movies(movies) => {
            if let Some(section) = section {
                writeln!(out, "{section} Movies:")?;
            }
            write_entries(out, &movies.results)
        }
        MediaPage::Tv(shows) => {
            if let Some(section) = section {
                writeln!(out, "{section} TV Shows:")?;
            }
            write_entries(out, &shows.results)
        }
    }
}

/// Writes the reply of a favorite or watchlist write.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_status<W: Write>(out: &mut W, status: &StatusResponse) -> io::Result<()> {
    writeln!(
        out,
        "{} (status code {})",
        status.status_message, status.status_code
    )
}

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}
