//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod band_repo;
pub mod genre_repo;
pub mod search_repo;
pub mod show_repo;
pub mod venue_repo;

pub use band_repo::BandRepo;
pub use genre_repo::GenreRepo;
pub use search_repo::SearchRepo;
pub use show_repo::ShowRepo;
pub use venue_repo::VenueRepo;
