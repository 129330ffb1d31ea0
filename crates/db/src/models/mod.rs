//! Row structs and response shapes.
//!
//! Each submodule contains:
//! - `FromRow` structs matching the columns its repository selects
//! - `Serialize` list/detail shapes returned by the API
//!
//! Child collections (`bands`, `genres`, `upcoming_shows`) are
//! `#[sqlx(skip)]` and filled in after the parent query.

pub mod band;
pub mod genre;
pub mod search;
pub mod show;
pub mod venue;
