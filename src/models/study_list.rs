use serde::{Deserialize, Serialize};

use super::{ResourceId, UserId};

/// Marks that a user saved a resource to their study list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudyListEntry {
    pub user_id: UserId,
    pub resource_id: ResourceId,
}
