//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate to the repositories in `setlist_db` and map errors via
//! [`crate::error::AppError`].

pub mod bands;
pub mod genres;
pub mod search;
pub mod shows;
pub mod submissions;
pub mod venues;
