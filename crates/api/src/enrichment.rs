//! Batched child-collection loading.
//!
//! List and detail handlers load their parents first, then attach lineups
//! (bands per show) or genres (per band) with one `= ANY($1)` query per
//! collection. A failed batch load is logged and the parents keep their
//! empty child lists.

use std::collections::HashMap;

use setlist_core::similarity::shared_by_key;
use setlist_core::types::DbId;
use setlist_db::models::band::{BandListItem, SimilarBandItem};
use setlist_db::models::genre::GenreBasic;
use setlist_db::models::show::{BandBasic, BandForShow, ShowListItem};
use setlist_db::models::venue::VenueShowItem;
use setlist_db::repositories::{GenreRepo, ShowRepo};
use sqlx::PgPool;

/// A response item that owns a child collection keyed by its id.
pub trait WithChildren<C> {
    fn parent_id(&self) -> DbId;

    fn set_children(&mut self, children: Vec<C>);
}

impl WithChildren<BandBasic> for ShowListItem {
    fn parent_id(&self) -> DbId {
        self.id
    }

    fn set_children(&mut self, children: Vec<BandBasic>) {
        self.bands = children;
    }
}

impl WithChildren<BandBasic> for VenueShowItem {
    fn parent_id(&self) -> DbId {
        self.id
    }

    fn set_children(&mut self, children: Vec<BandBasic>) {
        self.bands = children;
    }
}

impl WithChildren<GenreBasic> for BandListItem {
    fn parent_id(&self) -> DbId {
        self.id
    }

    fn set_children(&mut self, children: Vec<GenreBasic>) {
        self.genres = children;
    }
}

impl WithChildren<GenreBasic> for BandForShow {
    fn parent_id(&self) -> DbId {
        self.id
    }

    fn set_children(&mut self, children: Vec<GenreBasic>) {
        self.genres = children;
    }
}

/// Group `(parent_id, child)` pairs by parent, preserving row order.
///
/// Every id in `parent_ids` is present in the result, with an empty list if
/// it has no children. Rows for unknown parents are dropped.
pub fn group_by_parent<C>(
    parent_ids: &[DbId],
    rows: impl IntoIterator<Item = (DbId, C)>,
) -> HashMap<DbId, Vec<C>> {
    let mut grouped: HashMap<DbId, Vec<C>> =
        parent_ids.iter().map(|id| (*id, Vec::new())).collect();
    for (parent_id, child) in rows {
        if let Some(children) = grouped.get_mut(&parent_id) {
            children.push(child);
        }
    }
    grouped
}

/// Move each parent's children out of `grouped` and onto the parent.
pub fn attach<P, C>(parents: &mut [P], mut grouped: HashMap<DbId, Vec<C>>)
where
    P: WithChildren<C>,
{
    for parent in parents {
        let children = grouped.remove(&parent.parent_id()).unwrap_or_default();
        parent.set_children(children);
    }
}

/// Attach the ordered band lineup to each show.
#[tracing::instrument(skip_all, fields(count = shows.len()))]
pub async fn attach_lineups<P>(pool: &PgPool, shows: &mut [P])
where
    P: WithChildren<BandBasic>,
{
    if shows.is_empty() {
        return;
    }
    let ids: Vec<DbId> = shows.iter().map(|s| s.parent_id()).collect();

    match ShowRepo::bands_for_shows(pool, &ids).await {
        Ok(rows) => {
            let grouped = group_by_parent(&ids, rows.into_iter().map(|r| (r.show_id, r.band)));
            attach(shows, grouped);
        }
        Err(e) => tracing::warn!(error = %e, "Failed to load show lineups"),
    }
}

/// Attach genres to each band.
#[tracing::instrument(skip_all, fields(count = bands.len()))]
pub async fn attach_genres<P>(pool: &PgPool, bands: &mut [P])
where
    P: WithChildren<GenreBasic>,
{
    if bands.is_empty() {
        return;
    }
    let ids: Vec<DbId> = bands.iter().map(|b| b.parent_id()).collect();

    match load_genres(pool, &ids).await {
        Ok(grouped) => attach(bands, grouped),
        Err(e) => tracing::warn!(error = %e, "Failed to load band genres"),
    }
}

/// Fill `shared_genres` with the genres each candidate has in common with
/// the source band.
#[tracing::instrument(skip(pool, similar), fields(count = similar.len()))]
pub async fn attach_shared_genres(pool: &PgPool, source_id: DbId, similar: &mut [SimilarBandItem]) {
    if similar.is_empty() {
        return;
    }
    let mut ids: Vec<DbId> = similar.iter().map(|b| b.id).collect();
    ids.push(source_id);

    let mut grouped = match load_genres(pool, &ids).await {
        Ok(grouped) => grouped,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load genres for similar bands");
            return;
        }
    };

    let source_genres = grouped.remove(&source_id).unwrap_or_default();
    for band in similar.iter_mut() {
        let candidate = grouped.remove(&band.id).unwrap_or_default();
        band.shared_genres = shared_by_key(&source_genres, &candidate, |g| g.id);
    }
}

async fn load_genres(
    pool: &PgPool,
    band_ids: &[DbId],
) -> Result<HashMap<DbId, Vec<GenreBasic>>, sqlx::Error> {
    let rows = GenreRepo::for_bands(pool, band_ids).await?;
    Ok(group_by_parent(
        band_ids,
        rows.into_iter().map(|r| (r.band_id, r.genre)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre(id: DbId) -> GenreBasic {
        GenreBasic {
            id,
            name: format!("Genre {id}"),
            slug: format!("genre-{id}"),
        }
    }

    fn band(id: DbId) -> BandListItem {
        BandListItem {
            id,
            name: format!("Band {id}"),
            slug: format!("band-{id}"),
            bio: None,
            hometown: None,
            image_url: None,
            genres: Vec::new(),
        }
    }

    #[test]
    fn every_parent_gets_an_entry() {
        let grouped = group_by_parent(&[1, 2, 3], vec![(1, genre(10)), (1, genre(11))]);
        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[&1].len(), 2);
        assert!(grouped[&2].is_empty());
        assert!(grouped[&3].is_empty());
    }

    #[test]
    fn row_order_is_preserved_per_parent() {
        let grouped = group_by_parent(&[1], vec![(1, genre(30)), (1, genre(10)), (1, genre(20))]);
        let ids: Vec<DbId> = grouped[&1].iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[test]
    fn rows_for_unknown_parents_are_dropped() {
        let grouped = group_by_parent(&[1], vec![(2, genre(10))]);
        assert_eq!(grouped.len(), 1);
        assert!(grouped[&1].is_empty());
    }

    #[test]
    fn attach_moves_children_onto_parents() {
        let mut bands = vec![band(1), band(2)];
        let grouped = group_by_parent(&[1, 2], vec![(2, genre(5))]);
        attach(&mut bands, grouped);
        assert!(bands[0].genres.is_empty());
        assert_eq!(bands[1].genres, vec![genre(5)]);
    }
}
