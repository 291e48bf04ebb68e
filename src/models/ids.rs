use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new ID from its database value.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the underlying ID value.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user. Users are created outside the catalog.
    UserId
);

define_id!(
    /// Unique identifier for a resource, assigned by the store on insert.
    ResourceId
);

define_id!(
    /// Unique identifier for a comment, assigned by the store on insert.
    CommentId
);
