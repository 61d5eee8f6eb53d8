//! Search backend: request building, fetching and decoding

pub mod api;
pub mod decode;
pub mod outcome;
pub mod sequence;
pub mod types;

pub use api::SearchClient;
pub use outcome::SearchOutcome;
pub use sequence::{SearchSequence, SearchTicket};
pub use types::{RecordId, ResultRecord, ResultSet};
