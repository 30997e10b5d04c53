//! # userdeck
//!
//! `userdeck` fetches a list of users from a remote JSON API and renders them as
//! cards in a small HTML page, together with a loading/success/error status line.
//!
//! The page is modeled in-process ([`directory::DirectoryPage`]) and mutated only
//! through three handles: the status line, the card grid and the trigger button.
//! [`directory::Loader`] drives one fetch-validate-render cycle against those
//! handles, and the [`web`] module serves the resulting page over HTTP.
//!
//! ## Triggers
//!
//! - Server start performs the initial load (the "page ready" trigger).
//! - `POST /refresh` performs a manual reload (the "button click" trigger).
//!
//! Only one load runs at a time; an invocation arriving while another is in flight
//! is skipped.

pub mod cli;
pub mod directory;
pub mod web;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Endpoint queried when no `--api-url` is given.
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/users";
