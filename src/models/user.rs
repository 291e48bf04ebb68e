use serde::{Deserialize, Serialize};

use super::UserId;

/// A user as seen by the catalog. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
}
