//! Integration tests for the repository layer against a real database.

use chrono::{Duration, Utc};
use setlist_core::types::{DbId, Timestamp};
use setlist_db::models::show::CreateShow;
use setlist_db::repositories::{BandRepo, GenreRepo, SearchRepo, ShowRepo, VenueRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn insert_venue(pool: &PgPool, name: &str, slug: &str, region: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO venues (name, slug, region) VALUES ($1, $2, $3) RETURNING id")
        .bind(name)
        .bind(slug)
        .bind(region)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn insert_band(pool: &PgPool, name: &str, slug: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO bands (name, slug) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn insert_genre(pool: &PgPool, name: &str, slug: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO genres (name, slug) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn tag_band(pool: &PgPool, band_id: DbId, genre_id: DbId) {
    sqlx::query("INSERT INTO band_genres (band_id, genre_id) VALUES ($1, $2)")
        .bind(band_id)
        .bind(genre_id)
        .execute(pool)
        .await
        .unwrap();
}

async fn insert_show(
    pool: &PgPool,
    venue_id: DbId,
    title: &str,
    date: Timestamp,
    price_min: Option<f64>,
) -> DbId {
    ShowRepo::create(
        pool,
        &CreateShow {
            venue_id,
            title: Some(title.to_string()),
            image_url: None,
            date,
            doors_time: None,
            show_time: None,
            price_min,
            price_max: price_min,
            ticket_url: None,
            age_restriction: None,
            status: "scheduled".to_string(),
            source: "manual".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn health_check_succeeds(pool: PgPool) {
    setlist_db::health_check(&pool).await.unwrap();
}

// ---------------------------------------------------------------------------
// Show lists
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn upcoming_excludes_past_and_reports_total(pool: PgPool) {
    let now = Utc::now();
    let venue = insert_venue(&pool, "Orange Peel", "orange-peel", "Downtown").await;
    insert_show(&pool, venue, "Last week", now - Duration::days(7), None).await;
    let first = insert_show(&pool, venue, "Tomorrow", now + Duration::days(1), None).await;
    insert_show(&pool, venue, "Next week", now + Duration::days(7), None).await;

    let rows = ShowRepo::list_upcoming(&pool, now, 1, 0).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_count, 2);
    assert_eq!(rows[0].show.id, first);
    assert_eq!(rows[0].show.venue_slug, "orange-peel");
}

#[sqlx::test(migrations = "./migrations")]
async fn free_filter_keeps_unpriced_and_zero_priced(pool: PgPool) {
    let now = Utc::now();
    let venue = insert_venue(&pool, "Grey Eagle", "grey-eagle", "West").await;
    let unpriced = insert_show(&pool, venue, "Unpriced", now + Duration::days(1), None).await;
    let zero = insert_show(&pool, venue, "Zero", now + Duration::days(2), Some(0.0)).await;
    insert_show(&pool, venue, "Paid", now + Duration::days(3), Some(15.0)).await;

    let rows = ShowRepo::list_free(&pool, now, 50, 0).await.unwrap();
    let ids: Vec<DbId> = rows.iter().map(|r| r.show.id).collect();
    assert_eq!(ids, vec![unpriced, zero]);
}

#[sqlx::test(migrations = "./migrations")]
async fn prices_round_trip_as_floats(pool: PgPool) {
    let now = Utc::now();
    let venue = insert_venue(&pool, "Grey Eagle", "grey-eagle", "West").await;
    let id = insert_show(&pool, venue, "Paid", now + Duration::days(3), Some(12.5)).await;

    let row = ShowRepo::find_detail(&pool, id).await.unwrap().unwrap();
    assert_eq!(row.price_min, Some(12.5));
    assert_eq!(row.price_max, Some(12.5));
}

#[sqlx::test(migrations = "./migrations")]
async fn venue_and_region_filters_are_or_semantics(pool: PgPool) {
    let now = Utc::now();
    let a = insert_venue(&pool, "A", "a", "Downtown").await;
    let b = insert_venue(&pool, "B", "b", "West").await;
    let c = insert_venue(&pool, "C", "c", "South").await;
    insert_show(&pool, a, "At A", now + Duration::days(1), None).await;
    insert_show(&pool, b, "At B", now + Duration::days(2), None).await;
    insert_show(&pool, c, "At C", now + Duration::days(3), None).await;

    let slugs = vec!["a".to_string(), "c".to_string()];
    let rows = ShowRepo::list_by_venues(&pool, now, &slugs, 50, 0).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].total_count, 2);

    let regions = vec!["West".to_string()];
    let rows = ShowRepo::list_by_regions(&pool, now, &regions, 50, 0).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].show.title.as_deref(), Some("At B"));
}

#[sqlx::test(migrations = "./migrations")]
async fn genre_filter_counts_each_show_once(pool: PgPool) {
    let now = Utc::now();
    let venue = insert_venue(&pool, "Orange Peel", "orange-peel", "Downtown").await;
    let rock = insert_genre(&pool, "Rock", "rock").await;
    let punk = insert_genre(&pool, "Punk", "punk").await;
    let band_a = insert_band(&pool, "Alpha", "alpha").await;
    let band_b = insert_band(&pool, "Bravo", "bravo").await;
    tag_band(&pool, band_a, rock).await;
    tag_band(&pool, band_b, punk).await;

    let show = insert_show(&pool, venue, "Double bill", now + Duration::days(1), None).await;
    ShowRepo::link_band(&pool, show, band_a, true, 1).await.unwrap();
    ShowRepo::link_band(&pool, show, band_b, false, 0).await.unwrap();
    insert_show(&pool, venue, "No bands", now + Duration::days(2), None).await;

    let slugs = vec!["rock".to_string(), "punk".to_string()];
    let rows = ShowRepo::list_by_genres(&pool, now, &slugs, 50, 0).await.unwrap();
    let total = ShowRepo::count_by_genres(&pool, now, &slugs).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(total, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn lineups_are_ordered_by_performance_then_id(pool: PgPool) {
    let now = Utc::now();
    let venue = insert_venue(&pool, "Orange Peel", "orange-peel", "Downtown").await;
    let opener = insert_band(&pool, "Opener", "opener").await;
    let headliner = insert_band(&pool, "Headliner", "headliner").await;
    let tied = insert_band(&pool, "Tied", "tied").await;
    let show = insert_show(&pool, venue, "Bill", now + Duration::days(1), None).await;
    let empty = insert_show(&pool, venue, "Empty", now + Duration::days(2), None).await;

    ShowRepo::link_band(&pool, show, headliner, true, 2).await.unwrap();
    ShowRepo::link_band(&pool, show, tied, false, 1).await.unwrap();
    ShowRepo::link_band(&pool, show, opener, false, 1).await.unwrap();

    let rows = ShowRepo::bands_for_shows(&pool, &[show, empty]).await.unwrap();
    let order: Vec<DbId> = rows.iter().map(|r| r.band.id).collect();
    assert_eq!(order, vec![opener, tied, headliner]);
    assert!(rows.iter().all(|r| r.show_id == show));
    assert!(rows[2].band.is_headliner);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_lineup_entry_is_rejected(pool: PgPool) {
    let now = Utc::now();
    let venue = insert_venue(&pool, "Orange Peel", "orange-peel", "Downtown").await;
    let band = insert_band(&pool, "Alpha", "alpha").await;
    let show = insert_show(&pool, venue, "Bill", now + Duration::days(1), None).await;

    ShowRepo::link_band(&pool, show, band, true, 0).await.unwrap();
    assert!(ShowRepo::link_band(&pool, show, band, false, 1).await.is_err());
}

// ---------------------------------------------------------------------------
// Bands
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_with_unique_slug_suffixes_collisions(pool: PgPool) {
    insert_band(&pool, "The Owls", "the-owls").await;

    let created = BandRepo::create_with_unique_slug(&pool, "The  Owls!")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.slug, "the-owls-2");
    assert_eq!(created.name, "The  Owls!");

    let third = BandRepo::create_with_unique_slug(&pool, "the owls")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(third.slug, "the-owls-3");
}

#[sqlx::test(migrations = "./migrations")]
async fn find_by_name_is_exact(pool: PgPool) {
    let id = insert_band(&pool, "Moss", "moss").await;

    let found = BandRepo::find_by_name(&pool, "Moss").await.unwrap().unwrap();
    assert_eq!(found.id, id);
    assert!(BandRepo::find_by_name(&pool, "moss").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn similar_bands_rank_by_shared_genres(pool: PgPool) {
    let rock = insert_genre(&pool, "Rock", "rock").await;
    let punk = insert_genre(&pool, "Punk", "punk").await;
    let folk = insert_genre(&pool, "Folk", "folk").await;

    let source = insert_band(&pool, "Source", "source").await;
    let close = insert_band(&pool, "Close", "close").await;
    let distant = insert_band(&pool, "Distant", "distant").await;
    let unrelated = insert_band(&pool, "Unrelated", "unrelated").await;

    tag_band(&pool, source, rock).await;
    tag_band(&pool, source, punk).await;
    tag_band(&pool, close, rock).await;
    tag_band(&pool, close, punk).await;
    tag_band(&pool, distant, punk).await;
    tag_band(&pool, unrelated, folk).await;

    let similar = BandRepo::similar(&pool, source, 10).await.unwrap();
    let ids: Vec<DbId> = similar.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![close, distant]);
    assert_eq!(similar[0].shared_genre_count, 2);
    assert_eq!(similar[1].shared_genre_count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn band_search_matches_hometown(pool: PgPool) {
    sqlx::query("INSERT INTO bands (name, slug, hometown) VALUES ('Moss', 'moss', 'Asheville')")
        .execute(&pool)
        .await
        .unwrap();
    insert_band(&pool, "Elsewhere", "elsewhere").await;

    let rows = BandRepo::search(&pool, "asheville", 50, 0).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].band.slug, "moss");
    assert_eq!(rows[0].total_count, 1);
}

// ---------------------------------------------------------------------------
// Genres and venues
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn genre_show_count_is_distinct(pool: PgPool) {
    let now = Utc::now();
    let venue = insert_venue(&pool, "Orange Peel", "orange-peel", "Downtown").await;
    let rock = insert_genre(&pool, "Rock", "rock").await;
    insert_genre(&pool, "Jazz", "jazz").await;
    let a = insert_band(&pool, "Alpha", "alpha").await;
    let b = insert_band(&pool, "Bravo", "bravo").await;
    tag_band(&pool, a, rock).await;
    tag_band(&pool, b, rock).await;

    let show = insert_show(&pool, venue, "Bill", now + Duration::days(1), None).await;
    ShowRepo::link_band(&pool, show, a, true, 0).await.unwrap();
    ShowRepo::link_band(&pool, show, b, false, 1).await.unwrap();

    let genres = GenreRepo::list_with_show_counts(&pool).await.unwrap();
    let jazz = genres.iter().find(|g| g.slug == "jazz").unwrap();
    let rock = genres.iter().find(|g| g.slug == "rock").unwrap();
    assert_eq!(jazz.show_count, 0);
    assert_eq!(rock.show_count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn venue_list_counts_only_upcoming_shows(pool: PgPool) {
    let now = Utc::now();
    let venue = insert_venue(&pool, "Orange Peel", "orange-peel", "Downtown").await;
    insert_show(&pool, venue, "Past", now - Duration::days(1), None).await;
    insert_show(&pool, venue, "Future", now + Duration::days(1), None).await;

    let venues = VenueRepo::list(&pool, now).await.unwrap();
    assert_eq!(venues.len(), 1);
    assert_eq!(venues[0].upcoming_show_count, 1);

    assert!(VenueRepo::exists(&pool, venue).await.unwrap());
    assert!(!VenueRepo::exists(&pool, venue + 1000).await.unwrap());
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn show_search_matches_linked_band_names(pool: PgPool) {
    let now = Utc::now();
    let venue = insert_venue(&pool, "Orange Peel", "orange-peel", "Downtown").await;
    let band = insert_band(&pool, "Thunderclap", "thunderclap").await;
    let show = insert_show(&pool, venue, "Friday night", now + Duration::days(1), None).await;
    ShowRepo::link_band(&pool, show, band, true, 0).await.unwrap();

    let shows = SearchRepo::shows(&pool, "thunderclap", now, 20).await.unwrap();
    assert_eq!(shows.len(), 1);
    assert_eq!(shows[0].id, show);
    assert_eq!(shows[0].venue_name, "Orange Peel");

    let venues = SearchRepo::venues(&pool, "downtown", 20).await.unwrap();
    assert_eq!(venues.len(), 1);

    let bands = SearchRepo::bands(&pool, "nothing-matches-this", 20).await.unwrap();
    assert!(bands.is_empty());
}
