//! PostgreSQL-backed [`ItemRequestRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{ItemRequestPersistenceError, ItemRequestRepository};
use crate::domain::{ItemRequest, ItemRequestId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::ItemRequestRow;
use super::pool::DbPool;
use super::schema::item_requests;

/// Diesel implementation of the item request repository port.
#[derive(Clone)]
pub struct DieselItemRequestRepository {
    pool: DbPool,
}

impl DieselItemRequestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> ItemRequestPersistenceError {
    map_diesel_error(
        error,
        ItemRequestPersistenceError::query,
        ItemRequestPersistenceError::connection,
    )
}

fn from_row(row: ItemRequestRow) -> Result<ItemRequest, ItemRequestPersistenceError> {
    ItemRequest::try_new(
        ItemRequestId::from_uuid(row.id),
        UserId::from_uuid(row.requester_id),
        row.description,
        row.created_at,
    )
    .map_err(|err| ItemRequestPersistenceError::query(format!("invalid stored request: {err}")))
}

#[async_trait]
impl ItemRequestRepository for DieselItemRequestRepository {
    async fn save(&self, request: &ItemRequest) -> Result<(), ItemRequestPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ItemRequestPersistenceError::connection))?;
        let row = ItemRequestRow {
            id: *request.id().as_uuid(),
            requester_id: *request.requester_id().as_uuid(),
            description: request.description().to_owned(),
            created_at: request.created_at(),
        };

        diesel::insert_into(item_requests::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &ItemRequestId,
    ) -> Result<Option<ItemRequest>, ItemRequestPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ItemRequestPersistenceError::connection))?;

        let row = item_requests::table
            .filter(item_requests::id.eq(id.as_uuid()))
            .select(ItemRequestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(from_row).transpose()
    }

    async fn list_by_requester(
        &self,
        requester_id: &UserId,
    ) -> Result<Vec<ItemRequest>, ItemRequestPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ItemRequestPersistenceError::connection))?;

        let rows: Vec<ItemRequestRow> = item_requests::table
            .filter(item_requests::requester_id.eq(requester_id.as_uuid()))
            .order((item_requests::created_at.desc(), item_requests::id.asc()))
            .select(ItemRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(from_row).collect()
    }

    async fn list_excluding_requester(
        &self,
        requester_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemRequest>, ItemRequestPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ItemRequestPersistenceError::connection))?;

        let rows: Vec<ItemRequestRow> = item_requests::table
            .filter(item_requests::requester_id.ne(requester_id.as_uuid()))
            .order((item_requests::created_at.desc(), item_requests::id.asc()))
            .offset(page.offset())
            .limit(page.limit())
            .select(ItemRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(from_row).collect()
    }
}
