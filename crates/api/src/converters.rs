//! Row-to-response conversion for list endpoints.
//!
//! Paginated queries repeat `COUNT(*) OVER()` on every row. The total is
//! read from the first row; an empty page reports a total of zero.

use setlist_db::models::band::{BandListItem, CountedBandRow};
use setlist_db::models::show::{CountedShowRow, ShowListItem, ShowListRow};

/// A query row that carries the total match count of its query.
pub trait PagedRow {
    type Item;

    fn total_count(&self) -> i64;

    fn into_item(self) -> Self::Item;
}

impl PagedRow for CountedShowRow {
    type Item = ShowListItem;

    fn total_count(&self) -> i64 {
        self.total_count
    }

    fn into_item(self) -> ShowListItem {
        self.show.into()
    }
}

impl PagedRow for CountedBandRow {
    type Item = BandListItem;

    fn total_count(&self) -> i64 {
        self.total_count
    }

    fn into_item(self) -> BandListItem {
        self.band
    }
}

/// Convert counted rows into list items plus the query total.
pub fn into_page<R: PagedRow>(rows: Vec<R>) -> (Vec<R::Item>, i64) {
    let total = rows.first().map_or(0, PagedRow::total_count);
    let items = rows.into_iter().map(PagedRow::into_item).collect();
    (items, total)
}

/// Convert an unpaginated result set; the total is simply its length.
pub fn into_window(rows: Vec<ShowListRow>) -> (Vec<ShowListItem>, i64) {
    let items: Vec<ShowListItem> = rows.into_iter().map(ShowListItem::from).collect();
    let total = i64::try_from(items.len()).unwrap_or(i64::MAX);
    (items, total)
}
