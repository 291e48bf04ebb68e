//! Like/dislike repository operations.
//!
//! A user holds at most one vote per resource. The composite primary key on
//! `likes(user_id, resource_id)` makes a second row impossible, and
//! [`CatalogService::set_vote`] writes through a single
//! `INSERT .. ON CONFLICT .. DO UPDATE`, so concurrent votes for the same new
//! pair converge on one row instead of racing between a lookup and a write.

use rusqlite::{OptionalExtension, Row, TransactionBehavior, params};
use tracing::debug;

use super::CatalogService;
use crate::error::{CatalogError, Result};
use crate::{Like, ResourceId, UserId, VoteTally};

fn like_from_row(row: &Row<'_>) -> rusqlite::Result<Like> {
    Ok(Like {
        user_id: UserId::new(row.get(0)?),
        resource_id: ResourceId::new(row.get(1)?),
        liked: row.get(2)?,
    })
}

impl CatalogService {
    /// Records a like (`liked = true`) or dislike (`liked = false`).
    ///
    /// Inserts the vote if the user has none on this resource, otherwise
    /// overwrites the existing value. Returns the row as it stands after the
    /// write.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog::{CatalogService, Database, NewResource, UserId};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let service = CatalogService::new(Database::in_memory()?);
    /// service
    ///     .database()
    ///     .connection()
    ///     .execute("INSERT INTO users (user_id, name) VALUES (1, 'Ada')", [])?;
    /// let resource = service.create_resource(&NewResource {
    ///     resource_name: "SQL Zoo".into(),
    ///     author_name: "Napier".into(),
    ///     url: "https://sqlzoo.net".into(),
    ///     description: "Interactive SQL".into(),
    ///     content_type: "exercises".into(),
    ///     build_stage: "week 3".into(),
    ///     opinion: "recommended".into(),
    ///     opinion_reason: "hands on".into(),
    ///     user_id: UserId::new(1),
    /// })?;
    ///
    /// service.set_vote(UserId::new(1), resource.resource_id, true)?;
    /// let like = service.set_vote(UserId::new(1), resource.resource_id, false)?;
    /// assert!(!like.liked);
    /// assert_eq!(service.vote_tally(resource.resource_id)?.dislikes, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn set_vote(&self, user_id: UserId, resource_id: ResourceId, liked: bool) -> Result<Like> {
        let mut conn = self.db.connection();
        // Take the write lock up front so a second connection waits on the
        // busy timeout instead of failing mid-transaction.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO likes (user_id, resource_id, liked) VALUES (?1, ?2, ?3)
             ON CONFLICT (user_id, resource_id) DO UPDATE SET liked = excluded.liked",
            params![user_id.get(), resource_id.get(), liked],
        )?;

        // Read back inside the same transaction so the result is this write,
        // not one from another connection that lands right after it.
        let like = tx.query_row(
            "SELECT user_id, resource_id, liked FROM likes WHERE user_id = ?1 AND resource_id = ?2",
            [user_id.get(), resource_id.get()],
            like_from_row,
        )?;
        tx.commit()?;

        debug!(%user_id, %resource_id, vote = %like.vote(), "recorded vote");
        Ok(like)
    }

    /// Returns the vote a user holds on a resource, if any.
    pub fn get_vote(&self, user_id: UserId, resource_id: ResourceId) -> Result<Option<Like>> {
        let conn = self.db.connection();

        let like = conn
            .query_row(
                "SELECT user_id, resource_id, liked FROM likes WHERE user_id = ?1 AND resource_id = ?2",
                [user_id.get(), resource_id.get()],
                like_from_row,
            )
            .optional()?;
        Ok(like)
    }

    /// Removes one user's vote on a resource and returns it.
    pub fn remove_vote(&self, user_id: UserId, resource_id: ResourceId) -> Result<Like> {
        let conn = self.db.connection();

        let removed = conn
            .query_row(
                "DELETE FROM likes WHERE user_id = ?1 AND resource_id = ?2
                 RETURNING user_id, resource_id, liked",
                [user_id.get(), resource_id.get()],
                like_from_row,
            )
            .optional()?
            .ok_or_else(|| {
                CatalogError::not_found("vote", format!("by user {user_id} on resource {resource_id}"))
            })?;

        debug!(%user_id, %resource_id, "removed vote");
        Ok(removed)
    }

    /// Removes every user's vote on a resource, returning how many were removed.
    ///
    /// Reports [`CatalogError::NotFound`] when the resource had no votes.
    pub fn clear_votes(&self, resource_id: ResourceId) -> Result<usize> {
        let conn = self.db.connection();

        let removed = conn.execute("DELETE FROM likes WHERE resource_id = ?1", [resource_id.get()])?;
        if removed == 0 {
            return Err(CatalogError::not_found("votes for resource", resource_id));
        }

        debug!(%resource_id, removed, "cleared votes");
        Ok(removed)
    }

    /// Counts likes and dislikes on a resource.
    pub fn vote_tally(&self, resource_id: ResourceId) -> Result<VoteTally> {
        let conn = self.db.connection();

        let (likes, dislikes): (i64, i64) = conn.query_row(
            "SELECT COALESCE(SUM(liked), 0), COALESCE(SUM(1 - liked), 0)
             FROM likes WHERE resource_id = ?1",
            [resource_id.get()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(VoteTally {
            resource_id,
            likes: likes.unsigned_abs(),
            dislikes: dislikes.unsigned_abs(),
        })
    }
}
