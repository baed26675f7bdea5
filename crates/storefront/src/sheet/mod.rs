//! Spreadsheet API client.
//!
//! The catalog and user list live in a spreadsheet exposed through a
//! Sheety-style REST service: `GET` on a resource returns an envelope whose
//! single top-level key holds an array of row objects, `POST` creates a row
//! wrapped under a singular root key, and `PUT`/`DELETE` address a row by its
//! numeric identifier.
//!
//! # Architecture
//!
//! - The remote sheet is the source of truth; there is no local database.
//! - Row objects use inconsistent column spellings (`descricao`/`descrição`,
//!   `fotourl`/`fotoUrl`); [`records`] performs one normalization pass on
//!   ingress and writes canonical spellings on egress, so no other module
//!   ever branches on a field-name variant.
//! - Requests use `reqwest` with JSON bodies and no configured timeout; a
//!   failed call is terminal for the action that issued it.

mod client;
mod records;

pub use client::SheetClient;
pub use records::UserRow;

use thiserror::Error;

/// Errors that can occur when talking to the spreadsheet API.
#[derive(Debug, Error)]
pub enum SheetError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("sheet API returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No top-level key of the response envelope held an array.
    #[error("response envelope has no row collection (expected key \"{0}\")")]
    MissingCollection(String),

    /// A mutation response did not contain the written record.
    #[error("response envelope has no record under key \"{0}\"")]
    MissingRecord(String),

    /// A record came back without the fields the catalog requires.
    #[error("record is missing required fields: {0}")]
    MalformedRecord(String),
}
