//! Tag repository operations.

use rusqlite::OptionalExtension;
use tracing::debug;

use super::CatalogService;
use crate::Tag;
use crate::error::{CatalogError, Result};

impl CatalogService {
    /// Creates a tag.
    ///
    /// A name that already exists is rejected by the store's uniqueness rule
    /// with [`CatalogError::Invalid`]; the existing tag is left untouched.
    pub fn create_tag(&self, tag_name: &str) -> Result<Tag> {
        let conn = self.db.connection();

        conn.execute("INSERT INTO tags (tag_name) VALUES (?1)", [tag_name])?;

        debug!(tag_name, "created tag");
        Ok(Tag::new(tag_name))
    }

    /// Lists all tags by name.
    pub fn list_tags(&self) -> Result<Vec<Tag>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare("SELECT tag_name FROM tags ORDER BY tag_name")?;

        let tags = stmt
            .query_map([], |row| Ok(Tag::new(row.get::<_, String>(0)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tags)
    }

    /// Deletes a tag by name and returns it.
    pub fn delete_tag(&self, tag_name: &str) -> Result<Tag> {
        let conn = self.db.connection();

        let deleted = conn
            .query_row(
                "DELETE FROM tags WHERE tag_name = ?1 RETURNING tag_name",
                [tag_name],
                |row| Ok(Tag::new(row.get::<_, String>(0)?)),
            )
            .optional()?
            .ok_or_else(|| CatalogError::not_found("tag", tag_name))?;

        debug!(tag_name, "deleted tag");
        Ok(deleted)
    }
}
