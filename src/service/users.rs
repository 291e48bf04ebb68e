//! User repository operations. Users are read-only to the catalog.

use super::CatalogService;
use crate::error::Result;
use crate::{User, UserId};

impl CatalogService {
    /// Lists all users alphabetically by name.
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare("SELECT user_id, name FROM users ORDER BY name ASC, user_id ASC")?;

        let users = stmt
            .query_map([], |row| {
                Ok(User {
                    user_id: UserId::new(row.get(0)?),
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }
}
