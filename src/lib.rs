pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod logging;
pub mod models;
pub mod service;

pub use config::Config;
pub use db::Database;
pub use error::CatalogError;
pub use models::{
    Comment, CommentId, Like, NewResource, Resource, ResourceId, StudyListEntry, Tag, User,
    UserId, Vote, VoteTally,
};
pub use service::{CascadeCounts, CatalogService};
