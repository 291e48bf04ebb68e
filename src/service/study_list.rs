//! Study-list repository operations.
//!
//! Membership is unique per (user, resource): adding a resource a user has
//! already saved is a no-op that still reports the entry.

use rusqlite::{OptionalExtension, params};
use tracing::debug;

use super::CatalogService;
use super::resources::resource_from_row;
use crate::error::{CatalogError, Result};
use crate::{Resource, ResourceId, StudyListEntry, UserId};

impl CatalogService {
    /// Saves a resource to a user's study list.
    ///
    /// Fails with [`CatalogError::Invalid`] if either id is unknown.
    pub fn add_to_study_list(
        &self,
        user_id: UserId,
        resource_id: ResourceId,
    ) -> Result<StudyListEntry> {
        let conn = self.db.connection();

        let inserted = conn.execute(
            "INSERT INTO study_list (user_id, resource_id) VALUES (?1, ?2)
             ON CONFLICT (user_id, resource_id) DO NOTHING",
            params![user_id.get(), resource_id.get()],
        )?;

        debug!(%user_id, %resource_id, already_saved = inserted == 0, "saved to study list");
        Ok(StudyListEntry {
            user_id,
            resource_id,
        })
    }

    /// Lists a user's study-list entries in the order they were saved.
    pub fn list_study_list(&self, user_id: UserId) -> Result<Vec<StudyListEntry>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            "SELECT user_id, resource_id FROM study_list WHERE user_id = ?1 ORDER BY rowid",
        )?;

        let entries = stmt
            .query_map([user_id.get()], |row| {
                Ok(StudyListEntry {
                    user_id: UserId::new(row.get(0)?),
                    resource_id: ResourceId::new(row.get(1)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// Lists the full resources a user has saved, in the order they were saved.
    pub fn list_study_list_resources(&self, user_id: UserId) -> Result<Vec<Resource>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            "SELECT r.resource_id, r.resource_name, r.author_name, r.url, r.description,
                    r.content_type, r.build_stage, r.opinion, r.opinion_reason, r.user_id,
                    r.time_date
             FROM study_list s
             JOIN resources r ON r.resource_id = s.resource_id
             WHERE s.user_id = ?1
             ORDER BY s.rowid",
        )?;

        let resources = stmt
            .query_map([user_id.get()], resource_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(resources)
    }

    /// Removes a resource from a user's study list and returns the entry.
    pub fn remove_from_study_list(
        &self,
        user_id: UserId,
        resource_id: ResourceId,
    ) -> Result<StudyListEntry> {
        let conn = self.db.connection();

        let removed = conn
            .query_row(
                "DELETE FROM study_list WHERE user_id = ?1 AND resource_id = ?2
                 RETURNING user_id, resource_id",
                [user_id.get(), resource_id.get()],
                |row| {
                    Ok(StudyListEntry {
                        user_id: UserId::new(row.get(0)?),
                        resource_id: ResourceId::new(row.get(1)?),
                    })
                },
            )
            .optional()?
            .ok_or_else(|| {
                CatalogError::not_found(
                    "study-list entry",
                    format!("for user {user_id} and resource {resource_id}"),
                )
            })?;

        debug!(%user_id, %resource_id, "removed from study list");
        Ok(removed)
    }
}
