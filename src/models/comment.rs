use serde::{Deserialize, Serialize};

use super::{CommentId, ResourceId, UserId};

/// A user's comment on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: CommentId,
    pub comment_body: String,
    pub user_id: UserId,
    pub resource_id: ResourceId,
}
