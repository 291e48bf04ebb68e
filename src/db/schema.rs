/// Complete database schema for the catalog.
///
/// Uses CREATE TABLE/INDEX IF NOT EXISTS for idempotent execution.
/// Foreign keys carry no ON DELETE action: removing a referenced row fails
/// while dependents exist, and cascading is done explicitly by the service.
pub const INITIAL_SCHEMA: &str = r#"
-- Users are managed outside the catalog; the service only reads them
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

-- Resources: submitted learning material with the author's opinion of it
CREATE TABLE IF NOT EXISTS resources (
    resource_id INTEGER PRIMARY KEY,
    resource_name TEXT NOT NULL,
    author_name TEXT NOT NULL,
    url TEXT NOT NULL,
    description TEXT NOT NULL,
    content_type TEXT NOT NULL,
    build_stage TEXT NOT NULL,
    opinion TEXT NOT NULL,
    opinion_reason TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    time_date INTEGER NOT NULL DEFAULT (CAST(strftime('%s', 'now') AS INTEGER)),
    FOREIGN KEY (user_id) REFERENCES users(user_id)
);

CREATE TABLE IF NOT EXISTS comments (
    comment_id INTEGER PRIMARY KEY,
    comment_body TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    resource_id INTEGER NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(user_id),
    FOREIGN KEY (resource_id) REFERENCES resources(resource_id)
);

-- One vote per user per resource; liked = 1 is a like, 0 a dislike
CREATE TABLE IF NOT EXISTS likes (
    user_id INTEGER NOT NULL,
    resource_id INTEGER NOT NULL,
    liked INTEGER NOT NULL CHECK (liked IN (0, 1)),
    PRIMARY KEY (user_id, resource_id),
    FOREIGN KEY (user_id) REFERENCES users(user_id),
    FOREIGN KEY (resource_id) REFERENCES resources(resource_id)
);

CREATE TABLE IF NOT EXISTS tags (
    tag_name TEXT PRIMARY KEY NOT NULL
);

CREATE TABLE IF NOT EXISTS study_list (
    user_id INTEGER NOT NULL,
    resource_id INTEGER NOT NULL,
    PRIMARY KEY (user_id, resource_id),
    FOREIGN KEY (user_id) REFERENCES users(user_id),
    FOREIGN KEY (resource_id) REFERENCES resources(resource_id)
);

-- Index for sorting resources by creation date
CREATE INDEX IF NOT EXISTS idx_resources_time_date ON resources(time_date);

-- Indexes for per-resource lookups
CREATE INDEX IF NOT EXISTS idx_comments_resource ON comments(resource_id);
CREATE INDEX IF NOT EXISTS idx_likes_resource ON likes(resource_id);
CREATE INDEX IF NOT EXISTS idx_study_list_resource ON study_list(resource_id);
"#;
