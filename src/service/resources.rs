//! Resource repository operations.

use rusqlite::{OptionalExtension, Row, params};
use tracing::debug;

use super::{CatalogService, is_foreign_key_violation, timestamp_column};
use crate::error::{CatalogError, Result};
use crate::{NewResource, Resource, ResourceId, UserId};

const RESOURCE_COLUMNS: &str = "resource_id, resource_name, author_name, url, description, \
     content_type, build_stage, opinion, opinion_reason, user_id, time_date";

pub(super) fn resource_from_row(row: &Row<'_>) -> rusqlite::Result<Resource> {
    Ok(Resource {
        resource_id: ResourceId::new(row.get(0)?),
        resource_name: row.get(1)?,
        author_name: row.get(2)?,
        url: row.get(3)?,
        description: row.get(4)?,
        content_type: row.get(5)?,
        build_stage: row.get(6)?,
        opinion: row.get(7)?,
        opinion_reason: row.get(8)?,
        user_id: UserId::new(row.get(9)?),
        time_date: timestamp_column(row, 10)?,
    })
}

/// Rows removed alongside a resource by a cascading delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeCounts {
    pub comments: usize,
    pub likes: usize,
    pub study_list: usize,
}

impl CatalogService {
    /// Submits a new resource.
    ///
    /// The store assigns `resource_id` and `time_date`. Fails with
    /// [`CatalogError::Invalid`] if `user_id` does not reference a user.
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
    ///
    /// let resource = service.create_resource(&NewResource {
    ///     resource_name: "The Rust Book".into(),
    ///     author_name: "Klabnik".into(),
    ///     url: "https://doc.rust-lang.org/book/".into(),
    ///     description: "Official guide".into(),
    ///     content_type: "book".into(),
    ///     build_stage: "week 1".into(),
    ///     opinion: "recommended".into(),
    ///     opinion_reason: "clear examples".into(),
    ///     user_id: UserId::new(1),
    /// })?;
    /// assert_eq!(resource.resource_id.get(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn create_resource(&self, new: &NewResource) -> Result<Resource> {
        let conn = self.db.connection();

        conn.execute(
            "INSERT INTO resources (resource_name, author_name, url, description, content_type,
                                    build_stage, opinion, opinion_reason, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                new.resource_name,
                new.author_name,
                new.url,
                new.description,
                new.content_type,
                new.build_stage,
                new.opinion,
                new.opinion_reason,
                new.user_id.get(),
            ],
        )?;
        let resource_id = conn.last_insert_rowid();

        let resource = conn.query_row(
            &format!("SELECT {RESOURCE_COLUMNS} FROM resources WHERE resource_id = ?1"),
            [resource_id],
            resource_from_row,
        )?;

        debug!(resource_id = %resource.resource_id, user_id = %resource.user_id, "created resource");
        Ok(resource)
    }

    /// Lists every resource, newest first.
    ///
    /// Resources created within the same second are ordered by id, so the
    /// later insert still comes first. An empty catalog yields an empty Vec.
    pub fn list_resources(&self) -> Result<Vec<Resource>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(&format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources ORDER BY time_date DESC, resource_id DESC"
        ))?;

        let resources = stmt
            .query_map([], resource_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(resources)
    }

    /// Fetches one resource by id.
    ///
    /// The number of rows returned decides the outcome: none is
    /// [`CatalogError::NotFound`], more than one is [`CatalogError::Ambiguous`].
    pub fn get_resource(&self, id: ResourceId) -> Result<Resource> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(&format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources WHERE resource_id = ?1"
        ))?;

        let mut rows = stmt
            .query_map([id.get()], resource_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        match rows.len() {
            0 => Err(CatalogError::not_found("resource", id)),
            1 => Ok(rows.remove(0)),
            count => Err(CatalogError::Ambiguous {
                entity: "resource",
                key: id.to_string(),
                count,
            }),
        }
    }

    /// Deletes a resource and returns the removed row.
    ///
    /// While comments, votes or study-list entries still reference the
    /// resource the delete is refused with [`CatalogError::Conflict`], unless
    /// `cascade` is set, in which case those rows are removed first inside
    /// the same transaction.
    pub fn delete_resource(&self, id: ResourceId, cascade: bool) -> Result<Resource> {
        self.delete_resource_counted(id, cascade)
            .map(|(resource, _)| resource)
    }

    /// Same as [`CatalogService::delete_resource`], also reporting how many
    /// dependent rows the cascade removed.
    pub fn delete_resource_counted(
        &self,
        id: ResourceId,
        cascade: bool,
    ) -> Result<(Resource, CascadeCounts)> {
        let mut conn = self.db.connection();
        let tx = conn.transaction()?;

        let resource = tx
            .query_row(
                &format!("SELECT {RESOURCE_COLUMNS} FROM resources WHERE resource_id = ?1"),
                [id.get()],
                resource_from_row,
            )
            .optional()?
            .ok_or_else(|| CatalogError::not_found("resource", id))?;

        let mut counts = CascadeCounts::default();
        if cascade {
            counts.comments = tx.execute("DELETE FROM comments WHERE resource_id = ?1", [id.get()])?;
            counts.likes = tx.execute("DELETE FROM likes WHERE resource_id = ?1", [id.get()])?;
            counts.study_list =
                tx.execute("DELETE FROM study_list WHERE resource_id = ?1", [id.get()])?;
        }

        match tx.execute("DELETE FROM resources WHERE resource_id = ?1", [id.get()]) {
            Ok(_) => {}
            Err(e) if is_foreign_key_violation(&e) => {
                return Err(CatalogError::Conflict(format!(
                    "resource {id} still has comments, votes or study-list entries"
                )));
            }
            Err(e) => return Err(e.into()),
        }

        tx.commit()?;
        debug!(resource_id = %id, cascade, ?counts, "deleted resource");
        Ok((resource, counts))
    }
}
