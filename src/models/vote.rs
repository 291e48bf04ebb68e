use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ResourceId, UserId};

/// Direction of a vote on a resource.
///
/// Stored as the boolean `liked` column; on the wire clients send
/// `"like"` or `"dislike"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Like,
    Dislike,
}

impl Vote {
    /// Returns the value stored in the `liked` column.
    pub fn liked(self) -> bool {
        matches!(self, Self::Like)
    }
}

impl From<bool> for Vote {
    fn from(liked: bool) -> Self {
        if liked { Self::Like } else { Self::Dislike }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Like => write!(f, "like"),
            Self::Dislike => write!(f, "dislike"),
        }
    }
}

/// The single vote row a user holds on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user_id: UserId,
    pub resource_id: ResourceId,
    pub liked: bool,
}

impl Like {
    pub fn vote(&self) -> Vote {
        Vote::from(self.liked)
    }
}

/// Like and dislike counts for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub resource_id: ResourceId,
    pub likes: u64,
    pub dislikes: u64,
}
