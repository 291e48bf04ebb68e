use serde::{Deserialize, Serialize};

/// A free-standing label. The name is the key: two tags never share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub tag_name: String,
}

impl Tag {
    /// Creates a tag with the given name.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog::Tag;
    ///
    /// let tag = Tag::new("rust");
    /// assert_eq!(tag.name(), "rust");
    /// ```
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
        }
    }

    /// Returns the tag's name.
    pub fn name(&self) -> &str {
        &self.tag_name
    }
}
