//! Outcome of one fetch-and-decode cycle

use super::types::ResultSet;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// At least one record decoded
    Results(ResultSet),
    /// The server answered with an empty result list
    NoResults,
    /// The request never produced a response (DNS, connect, read errors)
    NetworkFailure(String),
    /// The server answered with a non-2xx status
    HttpStatus(u16),
    /// The body was not the expected JSON
    DecodeFailure(String),
}

impl SearchOutcome {
    /// Build the outcome for a decoded body
    pub fn from_records(records: ResultSet) -> Self {
        if records.is_empty() {
            Self::NoResults
        } else {
            Self::Results(records)
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::NetworkFailure(_) | Self::HttpStatus(_) | Self::DecodeFailure(_)
        )
    }

    /// The result set, with every non-success collapsed to empty
    pub fn into_results(self) -> ResultSet {
        match self {
            Self::Results(records) => records,
            _ => Vec::new(),
        }
    }

    /// One-line description for a status bar or stderr
    pub fn summary(&self) -> String {
        match self {
            Self::Results(records) if records.len() == 1 => "1 result".to_string(),
            Self::Results(records) => format!("{} results", records.len()),
            Self::NoResults => "No matches".to_string(),
            Self::NetworkFailure(reason) => format!("Request failed: {}", reason),
            Self::HttpStatus(code) => format!("Server returned HTTP {}", code),
            Self::DecodeFailure(reason) => format!("Unreadable response: {}", reason),
        }
    }
}
