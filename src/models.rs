use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type Id = i64;

/// Characters of post text used for list previews.
pub const PREVIEW_CHARS: usize = 15;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewUser {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Group {
    pub id: Id,
    pub slug: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewGroup {
    pub slug: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Post {
    pub id: Id,
    pub text: String,
    pub author_id: Id,
    pub group_id: Option<Id>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// First `PREVIEW_CHARS` characters of the text, no ellipsis.
    pub fn preview(&self) -> String {
        self.text.chars().take(PREVIEW_CHARS).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewPost {
    pub text: String,
    pub group_id: Option<Id>,
}

/// Full-replacement edit payload; only the author may apply it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdatePost {
    pub text: String,
    pub group_id: Option<Id>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Comment {
    pub id: Id,
    pub post_id: Id,
    pub author_id: Id,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewComment {
    pub text: String,
}

/// Directed follow edge: `user_id` follows `author_id`.
/// (user_id, author_id) pairs are unique; self-edges never exist.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Follow {
    pub user_id: Id,
    pub author_id: Id,
}

/// (user_id, post_id) pairs are unique.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Like {
    pub user_id: Id,
    pub post_id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(text: &str) -> Post {
        Post { id: 1, text: text.into(), author_id: 1, group_id: None, created_at: Utc::now() }
    }

    #[test]
    fn preview_truncates_to_fifteen_chars() {
        let p = post("0123456789abcdefghij");
        assert_eq!(p.preview(), "0123456789abcde");
    }

    #[test]
    fn preview_keeps_short_text_whole() {
        let p = post("short");
        assert_eq!(p.preview(), "short");
    }

    #[test]
    fn preview_counts_chars_not_bytes() {
        let p = post("ééééééééééééééééé");
        assert_eq!(p.preview().chars().count(), 15);
    }
}
