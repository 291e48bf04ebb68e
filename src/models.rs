mod comment;
mod ids;
mod resource;
mod study_list;
mod tag;
mod user;
mod vote;

pub use comment::Comment;
pub use ids::{CommentId, ResourceId, UserId};
pub use resource::{NewResource, Resource};
pub use study_list::StudyListEntry;
pub use tag::Tag;
pub use user::User;
pub use vote::{Like, Vote, VoteTally};
