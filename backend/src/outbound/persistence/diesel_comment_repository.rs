//! PostgreSQL-backed [`CommentRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentPersistenceError, CommentRepository};
use crate::domain::{AuthoredComment, Comment, CommentId, ItemId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::CommentRow;
use super::pool::DbPool;
use super::schema::{comments, users};

/// Diesel implementation of the comment repository port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> CommentPersistenceError {
    map_diesel_error(
        error,
        CommentPersistenceError::query,
        CommentPersistenceError::connection,
    )
}

fn from_row(row: CommentRow) -> Result<Comment, CommentPersistenceError> {
    Comment::try_new(
        CommentId::from_uuid(row.id),
        ItemId::from_uuid(row.item_id),
        UserId::from_uuid(row.author_id),
        row.text,
        row.created_at,
    )
    .map_err(|err| CommentPersistenceError::query(format!("invalid stored comment: {err}")))
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn save(&self, comment: &Comment) -> Result<(), CommentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CommentPersistenceError::connection))?;
        let row = CommentRow {
            id: *comment.id().as_uuid(),
            item_id: *comment.item_id().as_uuid(),
            author_id: *comment.author_id().as_uuid(),
            text: comment.text().to_owned(),
            created_at: comment.created_at(),
        };

        diesel::insert_into(comments::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_by_item(
        &self,
        item_id: &ItemId,
    ) -> Result<Vec<AuthoredComment>, CommentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CommentPersistenceError::connection))?;

        let rows: Vec<(CommentRow, String)> = comments::table
            .inner_join(users::table)
            .filter(comments::item_id.eq(item_id.as_uuid()))
            .order((comments::created_at.asc(), comments::id.asc()))
            .select((CommentRow::as_select(), users::name))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter()
            .map(|(row, author_name)| {
                from_row(row).map(|comment| AuthoredComment {
                    comment,
                    author_name,
                })
            })
            .collect()
    }
}
