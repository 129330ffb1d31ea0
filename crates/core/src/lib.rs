//! Domain logic for the events directory: no I/O, no framework types.

pub mod dates;
pub mod error;
pub mod limits;
pub mod pagination;
pub mod search;
pub mod similarity;
pub mod slug;
pub mod submission;
pub mod types;
