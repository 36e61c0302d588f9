//! PostgreSQL-backed [`ItemRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{ItemPersistenceError, ItemRepository};
use crate::domain::{Item, ItemDraft, ItemId, ItemRequestId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::ItemRow;
use super::pool::DbPool;
use super::schema::items;

/// Diesel implementation of the item repository port.
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> ItemPersistenceError {
    map_diesel_error(
        error,
        ItemPersistenceError::query,
        ItemPersistenceError::connection,
    )
}

fn to_row(item: &Item) -> ItemRow {
    ItemRow {
        id: *item.id().as_uuid(),
        owner_id: *item.owner_id().as_uuid(),
        name: item.name().to_owned(),
        description: item.description().to_owned(),
        available: item.available(),
        request_id: item.request_id().map(|id| *id.as_uuid()),
    }
}

fn item_from_row(row: ItemRow) -> Result<Item, ItemPersistenceError> {
    let draft = ItemDraft {
        name: row.name,
        description: row.description,
        available: row.available,
        request_id: row.request_id.map(ItemRequestId::from_uuid),
    };
    Item::try_new(ItemId::from_uuid(row.id), UserId::from_uuid(row.owner_id), draft)
        .map_err(|err| ItemPersistenceError::query(format!("invalid stored item: {err}")))
}

/// `%text%` with LIKE metacharacters escaped.
fn contains_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn save(&self, item: &Item) -> Result<(), ItemPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ItemPersistenceError::connection))?;
        let row = to_row(item);

        diesel::insert_into(items::table)
            .values(&row)
            .on_conflict(items::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ItemPersistenceError::connection))?;

        let row = items::table
            .filter(items::id.eq(id.as_uuid()))
            .select(ItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(item_from_row).transpose()
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<Item>, ItemPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ItemPersistenceError::connection))?;

        let rows: Vec<ItemRow> = items::table
            .filter(items::owner_id.eq(owner_id.as_uuid()))
            .order(items::id.asc())
            .offset(page.offset())
            .limit(page.limit())
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(item_from_row).collect()
    }

    async fn search_available(
        &self,
        text: &str,
        page: PageRequest,
    ) -> Result<Vec<Item>, ItemPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ItemPersistenceError::connection))?;
        let pattern = contains_pattern(text);

        let rows: Vec<ItemRow> = items::table
            .filter(items::available.eq(true))
            .filter(
                items::name
                    .ilike(pattern.clone())
                    .or(items::description.ilike(pattern)),
            )
            .order(items::id.asc())
            .offset(page.offset())
            .limit(page.limit())
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(item_from_row).collect()
    }

    async fn list_by_request(
        &self,
        request_id: &ItemRequestId,
    ) -> Result<Vec<Item>, ItemPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ItemPersistenceError::connection))?;

        let rows: Vec<ItemRow> = items::table
            .filter(items::request_id.eq(request_id.as_uuid()))
            .order(items::id.asc())
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(item_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("drill", "%drill%")]
    #[case("50%", "%50\\%%")]
    #[case("snake_case", "%snake\\_case%")]
    fn like_pattern_escapes_metacharacters(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(text), expected);
    }

    #[rstest]
    fn stored_rows_are_validated() {
        let row = ItemRow {
            id: uuid::Uuid::new_v4(),
            owner_id: uuid::Uuid::new_v4(),
            name: String::new(),
            description: "desc".to_owned(),
            available: true,
            request_id: None,
        };
        assert!(item_from_row(row).is_err());
    }
}
