//! PostgreSQL-backed [`BookingRepository`].
//!
//! Resolved [`BookingQuery`] values are pushed down to SQL: the subject
//! becomes either a `booker_id` predicate or an `item_id IN (owned items)`
//! subselect, the filter becomes a time or status predicate, and the page
//! becomes `OFFSET`/`LIMIT` after ordering by `start_date DESC`.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookingPersistenceError, BookingRepository};
use crate::domain::{
    Booking, BookingFilter, BookingId, BookingQuery, BookingStatus, BookingSubject, BookingWindow,
    ItemId, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::BookingRow;
use super::pool::DbPool;
use super::schema::{bookings, items};

/// Diesel implementation of the booking repository port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> BookingPersistenceError {
    map_diesel_error(
        error,
        BookingPersistenceError::query,
        BookingPersistenceError::connection,
    )
}

fn to_row(booking: &Booking) -> BookingRow {
    BookingRow {
        id: *booking.id().as_uuid(),
        item_id: *booking.item_id().as_uuid(),
        booker_id: *booking.booker_id().as_uuid(),
        start_date: booking.start(),
        end_date: booking.end(),
        status: booking.status().as_str().to_owned(),
    }
}

fn from_row(row: BookingRow) -> Result<Booking, BookingPersistenceError> {
    let status = BookingStatus::from_str(&row.status)
        .map_err(|err| BookingPersistenceError::query(err.to_string()))?;
    let window = BookingWindow::new(row.start_date, row.end_date)
        .map_err(|err| BookingPersistenceError::query(format!("invalid stored window: {err}")))?;
    Ok(Booking::new(
        BookingId::from_uuid(row.id),
        ItemId::from_uuid(row.item_id),
        UserId::from_uuid(row.booker_id),
        window,
        status,
    ))
}

fn from_rows(rows: Vec<BookingRow>) -> Result<Vec<Booking>, BookingPersistenceError> {
    rows.into_iter().map(from_row).collect()
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), BookingPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingPersistenceError::connection))?;

        diesel::insert_into(bookings::table)
            .values(&to_row(booking))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, BookingPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingPersistenceError::connection))?;

        let row = bookings::table
            .filter(bookings::id.eq(id.as_uuid()))
            .select(BookingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(from_row).transpose()
    }

    async fn list(&self, query: &BookingQuery) -> Result<Vec<Booking>, BookingPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingPersistenceError::connection))?;

        let mut sql = bookings::table.into_boxed();
        sql = match query.subject {
            BookingSubject::Booker(booker) => {
                sql.filter(bookings::booker_id.eq(*booker.as_uuid()))
            }
            BookingSubject::Owner(owner) => sql.filter(
                bookings::item_id.eq_any(
                    items::table
                        .filter(items::owner_id.eq(*owner.as_uuid()))
                        .select(items::id),
                ),
            ),
        };
        sql = match query.filter {
            BookingFilter::All => sql,
            BookingFilter::Current { now } => sql
                .filter(bookings::start_date.le(now))
                .filter(bookings::end_date.gt(now)),
            BookingFilter::Past { now } => sql.filter(bookings::end_date.lt(now)),
            BookingFilter::Future { now } => sql.filter(bookings::start_date.gt(now)),
            BookingFilter::Status(status) => sql.filter(bookings::status.eq(status.as_str())),
        };

        let rows: Vec<BookingRow> = sql
            .order((bookings::start_date.desc(), bookings::id.asc()))
            .offset(query.page.offset())
            .limit(query.page.limit())
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        from_rows(rows)
    }

    async fn find_last(
        &self,
        item_id: &ItemId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>, BookingPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingPersistenceError::connection))?;

        let row = bookings::table
            .filter(bookings::item_id.eq(item_id.as_uuid()))
            .filter(bookings::start_date.lt(now))
            .order(bookings::start_date.desc())
            .select(BookingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(from_row).transpose()
    }

    async fn find_next(
        &self,
        item_id: &ItemId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>, BookingPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingPersistenceError::connection))?;

        let row = bookings::table
            .filter(bookings::item_id.eq(item_id.as_uuid()))
            .filter(bookings::start_date.gt(now))
            .filter(bookings::status.eq(BookingStatus::Approved.as_str()))
            .order(bookings::start_date.asc())
            .select(BookingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(from_row).transpose()
    }

    async fn list_by_booker_and_item(
        &self,
        booker_id: &UserId,
        item_id: &ItemId,
    ) -> Result<Vec<Booking>, BookingPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingPersistenceError::connection))?;

        let rows: Vec<BookingRow> = bookings::table
            .filter(bookings::booker_id.eq(booker_id.as_uuid()))
            .filter(bookings::item_id.eq(item_id.as_uuid()))
            .order(bookings::start_date.desc())
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        from_rows(rows)
    }

    async fn update_status(
        &self,
        id: &BookingId,
        expected: BookingStatus,
        new: BookingStatus,
    ) -> Result<bool, BookingPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingPersistenceError::connection))?;

        // Conditional update: zero rows means another decision got there first.
        let updated = diesel::update(
            bookings::table
                .filter(bookings::id.eq(id.as_uuid()))
                .filter(bookings::status.eq(expected.as_str())),
        )
        .set(bookings::status.eq(new.as_str()))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(updated == 1)
    }
}
