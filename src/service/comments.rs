//! Comment repository operations.

use rusqlite::{OptionalExtension, Row, params};
use tracing::debug;

use super::CatalogService;
use crate::error::{CatalogError, Result};
use crate::{Comment, CommentId, ResourceId, UserId};

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        comment_id: CommentId::new(row.get(0)?),
        comment_body: row.get(1)?,
        user_id: UserId::new(row.get(2)?),
        resource_id: ResourceId::new(row.get(3)?),
    })
}

impl CatalogService {
    /// Adds a comment to a resource.
    ///
    /// Both `resource_id` and `user_id` must reference existing rows,
    /// otherwise the store rejects the insert and [`CatalogError::Invalid`]
    /// is returned.
    pub fn create_comment(
        &self,
        resource_id: ResourceId,
        comment_body: &str,
        user_id: UserId,
    ) -> Result<Comment> {
        let conn = self.db.connection();

        conn.execute(
            "INSERT INTO comments (comment_body, user_id, resource_id) VALUES (?1, ?2, ?3)",
            params![comment_body, user_id.get(), resource_id.get()],
        )?;

        let comment = Comment {
            comment_id: CommentId::new(conn.last_insert_rowid()),
            comment_body: comment_body.to_string(),
            user_id,
            resource_id,
        };

        debug!(comment_id = %comment.comment_id, %resource_id, "created comment");
        Ok(comment)
    }

    /// Lists a resource's comments in the order they were written.
    pub fn list_comments(&self, resource_id: ResourceId) -> Result<Vec<Comment>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            "SELECT comment_id, comment_body, user_id, resource_id
             FROM comments
             WHERE resource_id = ?1
             ORDER BY comment_id",
        )?;

        let comments = stmt
            .query_map([resource_id.get()], comment_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(comments)
    }

    /// Deletes a single comment and returns it.
    pub fn delete_comment(&self, comment_id: CommentId) -> Result<Comment> {
        let conn = self.db.connection();

        let deleted = conn
            .query_row(
                "DELETE FROM comments WHERE comment_id = ?1
                 RETURNING comment_id, comment_body, user_id, resource_id",
                [comment_id.get()],
                comment_from_row,
            )
            .optional()?
            .ok_or_else(|| CatalogError::not_found("comment", comment_id))?;

        debug!(%comment_id, "deleted comment");
        Ok(deleted)
    }
}
