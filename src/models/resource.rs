use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{ResourceId, UserId};

/// A learning resource submitted to the catalog, together with the
/// submitter's opinion of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub resource_id: ResourceId,
    pub resource_name: String,
    pub author_name: String,
    pub url: String,
    pub description: String,
    pub content_type: String,
    pub build_stage: String,
    pub opinion: String,
    pub opinion_reason: String,
    /// The user who submitted the resource.
    pub user_id: UserId,
    /// When the store recorded the resource.
    #[serde(with = "time::serde::rfc3339")]
    pub time_date: OffsetDateTime,
}

/// Fields supplied by a client when submitting a resource.
///
/// Shapes are not validated beyond what the store enforces; `user_id` must
/// reference an existing user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResource {
    pub resource_name: String,
    pub author_name: String,
    pub url: String,
    pub description: String,
    pub content_type: String,
    pub build_stage: String,
    pub opinion: String,
    pub opinion_reason: String,
    pub user_id: UserId,
}

impl Resource {
    /// Returns true if this row carries exactly the submitted fields.
    pub fn matches(&self, submitted: &NewResource) -> bool {
        self.resource_name == submitted.resource_name
            && self.author_name == submitted.author_name
            && self.url == submitted.url
            && self.description == submitted.description
            && self.content_type == submitted.content_type
            && self.build_stage == submitted.build_stage
            && self.opinion == submitted.opinion
            && self.opinion_reason == submitted.opinion_reason
            && self.user_id == submitted.user_id
    }
}
