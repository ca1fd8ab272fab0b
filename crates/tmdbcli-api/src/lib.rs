//! API client library for tmdbcli.
//!
//! Provides a client for the account endpoints of the TMDB API v3.

/// TMDB account API client.
pub mod account;
