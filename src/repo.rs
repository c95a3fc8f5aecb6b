use crate::models::*;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    #[error("internal: {0}")]
    Internal(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

use async_trait::async_trait;

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create_user(&self, new: NewUser) -> RepoResult<User>;
    async fn get_user(&self, id: Id) -> RepoResult<User>;
    async fn get_user_by_username(&self, username: &str) -> RepoResult<User>;
}

#[async_trait]
pub trait GroupRepo: Send + Sync {
    async fn list_groups(&self) -> RepoResult<Vec<Group>>;
    async fn create_group(&self, new: NewGroup) -> RepoResult<Group>;
    async fn get_group_by_slug(&self, slug: &str) -> RepoResult<Group>;
}

/// Post listings are always newest-first.
#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn list_posts(&self) -> RepoResult<Vec<Post>>;
    async fn list_posts_by_group(&self, group_id: Id) -> RepoResult<Vec<Post>>;
    async fn list_posts_by_author(&self, author_id: Id) -> RepoResult<Vec<Post>>;
    async fn get_post(&self, id: Id) -> RepoResult<Post>;
    async fn create_post(&self, author_id: Id, new: NewPost) -> RepoResult<Post>;
    async fn update_post(&self, id: Id, upd: UpdatePost) -> RepoResult<Post>;
    /// Deletes the post together with its comments and likes.
    async fn delete_post(&self, id: Id) -> RepoResult<()>;
}

#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn list_comments(&self, post_id: Id) -> RepoResult<Vec<Comment>>;
    async fn create_comment(&self, post_id: Id, author_id: Id, new: NewComment) -> RepoResult<Comment>;
    async fn get_comment(&self, id: Id) -> RepoResult<Comment>;
    async fn delete_comment(&self, id: Id) -> RepoResult<()>;
}

/// Follow and like edges. Creation is idempotent: a duplicate create is a
/// successful no-op, and a self-follow creates nothing. Deletion requires
/// an existing edge.
#[async_trait]
pub trait SocialRepo: Send + Sync {
    async fn follow(&self, user_id: Id, author_id: Id) -> RepoResult<()>;
    async fn unfollow(&self, user_id: Id, author_id: Id) -> RepoResult<()>;
    async fn is_following(&self, user_id: Id, author_id: Id) -> RepoResult<bool>;
    /// Posts whose author is followed by `user_id`, newest first.
    async fn feed(&self, user_id: Id) -> RepoResult<Vec<Post>>;
    async fn like(&self, user_id: Id, post_id: Id) -> RepoResult<()>;
    async fn unlike(&self, user_id: Id, post_id: Id) -> RepoResult<()>;
    async fn has_liked(&self, user_id: Id, post_id: Id) -> RepoResult<bool>;
}

pub trait Repo: UserRepo + GroupRepo + PostRepo + CommentRepo + SocialRepo {}

impl<T> Repo for T where T: UserRepo + GroupRepo + PostRepo + CommentRepo + SocialRepo {}

#[cfg(feature = "inmem-store")]
pub mod inmem {
    use super::*;
    use chrono::Utc;
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, RwLock};

    const SNAPSHOT_PATH: &str = "data/state.json";

    fn newest_first(posts: &mut [Post]) {
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    }

    #[derive(Default, Serialize, Deserialize)]
    struct State {
        users: HashMap<Id, User>,
        groups: HashMap<Id, Group>,
        posts: HashMap<Id, Post>,
        comments: HashMap<Id, Comment>,
        follows: Vec<Follow>,
        likes: Vec<Like>,
        next_id: Id,
    }

    #[derive(Clone)]
    pub struct InMemRepo {
        state: Arc<RwLock<State>>,
        snapshot_path: Arc<PathBuf>,
    }

    impl InMemRepo {
        fn snapshot_path() -> PathBuf {
            match std::env::var("QUILL_DATA_DIR") {
                Ok(dir) => {
                    let mut p = PathBuf::from(dir);
                    p.push("state.json");
                    p
                }
                Err(_) => PathBuf::from(SNAPSHOT_PATH),
            }
        }

        fn load_state_from(path: &Path) -> State {
            match std::fs::read(path) {
                Ok(bytes) => match serde_json::from_slice::<State>(&bytes) {
                    Ok(s) => s,
                    Err(e) => {
                        log::warn!("failed to parse snapshot '{}': {e}; starting empty", path.display());
                        State::default()
                    }
                },
                Err(_) => State::default(),
            }
        }

        fn persist(&self) {
            let path = &*self.snapshot_path;
            if let Ok(bytes) = serde_json::to_vec_pretty(&*self.state.read().unwrap()) {
                if let Some(dir) = path.parent() {
                    let _ = std::fs::create_dir_all(dir);
                }
                if let Err(e) = std::fs::write(path, bytes) {
                    log::warn!("failed to write snapshot '{}': {e}", path.display());
                }
            }
        }

        pub fn new() -> Self {
            let snapshot_path = Self::snapshot_path();
            let state = Self::load_state_from(&snapshot_path);
            Self {
                state: Arc::new(RwLock::new(state)),
                snapshot_path: Arc::new(snapshot_path),
            }
        }

        fn next_id(state: &mut State) -> Id {
            state.next_id += 1;
            state.next_id
        }
    }

    impl Default for InMemRepo {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl UserRepo for InMemRepo {
        async fn create_user(&self, new: NewUser) -> RepoResult<User> {
            let mut s = self.state.write().unwrap();
            if s.users.values().any(|u| u.username == new.username) {
                return Err(RepoError::Conflict);
            }
            let id = Self::next_id(&mut s);
            let user = User { id, username: new.username, created_at: Utc::now() };
            s.users.insert(id, user.clone());
            drop(s);
            self.persist();
            Ok(user)
        }

        async fn get_user(&self, id: Id) -> RepoResult<User> {
            let s = self.state.read().unwrap();
            s.users.get(&id).cloned().ok_or(RepoError::NotFound)
        }

        async fn get_user_by_username(&self, username: &str) -> RepoResult<User> {
            let s = self.state.read().unwrap();
            s.users
                .values()
                .find(|u| u.username == username)
                .cloned()
                .ok_or(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl GroupRepo for InMemRepo {
        async fn list_groups(&self) -> RepoResult<Vec<Group>> {
            let s = self.state.read().unwrap();
            let mut v: Vec<_> = s.groups.values().cloned().collect();
            v.sort_by_key(|g| g.id);
            Ok(v)
        }

        async fn create_group(&self, new: NewGroup) -> RepoResult<Group> {
            let mut s = self.state.write().unwrap();
            if s.groups.values().any(|g| g.slug == new.slug) {
                return Err(RepoError::Conflict);
            }
            let id = Self::next_id(&mut s);
            let group = Group { id, slug: new.slug, title: new.title, description: new.description };
            s.groups.insert(id, group.clone());
            drop(s);
            self.persist();
            Ok(group)
        }

        async fn get_group_by_slug(&self, slug: &str) -> RepoResult<Group> {
            let s = self.state.read().unwrap();
            s.groups
                .values()
                .find(|g| g.slug == slug)
                .cloned()
                .ok_or(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl PostRepo for InMemRepo {
        async fn list_posts(&self) -> RepoResult<Vec<Post>> {
            let s = self.state.read().unwrap();
            let mut v: Vec<_> = s.posts.values().cloned().collect();
            newest_first(&mut v);
            Ok(v)
        }

        async fn list_posts_by_group(&self, group_id: Id) -> RepoResult<Vec<Post>> {
            let s = self.state.read().unwrap();
            let mut v: Vec<_> = s
                .posts
                .values()
                .filter(|p| p.group_id == Some(group_id))
                .cloned()
                .collect();
            newest_first(&mut v);
            Ok(v)
        }

        async fn list_posts_by_author(&self, author_id: Id) -> RepoResult<Vec<Post>> {
            let s = self.state.read().unwrap();
            let mut v: Vec<_> = s
                .posts
                .values()
                .filter(|p| p.author_id == author_id)
                .cloned()
                .collect();
            newest_first(&mut v);
            Ok(v)
        }

        async fn get_post(&self, id: Id) -> RepoResult<Post> {
            let s = self.state.read().unwrap();
            s.posts.get(&id).cloned().ok_or(RepoError::NotFound)
        }

        async fn create_post(&self, author_id: Id, new: NewPost) -> RepoResult<Post> {
            let mut s = self.state.write().unwrap();
            if !s.users.contains_key(&author_id) {
                return Err(RepoError::NotFound);
            }
            if let Some(gid) = new.group_id {
                if !s.groups.contains_key(&gid) {
                    return Err(RepoError::NotFound);
                }
            }
            let id = Self::next_id(&mut s);
            let post = Post {
                id,
                text: new.text,
                author_id,
                group_id: new.group_id,
                created_at: Utc::now(),
            };
            s.posts.insert(id, post.clone());
            drop(s);
            self.persist();
            Ok(post)
        }

        async fn update_post(&self, id: Id, upd: UpdatePost) -> RepoResult<Post> {
            let mut s = self.state.write().unwrap();
            if let Some(gid) = upd.group_id {
                if !s.groups.contains_key(&gid) {
                    return Err(RepoError::NotFound);
                }
            }
            let post = s.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
            post.text = upd.text;
            post.group_id = upd.group_id;
            let updated = post.clone();
            drop(s);
            self.persist();
            Ok(updated)
        }

        async fn delete_post(&self, id: Id) -> RepoResult<()> {
            let mut s = self.state.write().unwrap();
            if s.posts.remove(&id).is_none() {
                return Err(RepoError::NotFound);
            }
            // cascade: comments and likes die with the post
            s.comments.retain(|_, c| c.post_id != id);
            s.likes.retain(|l| l.post_id != id);
            drop(s);
            self.persist();
            Ok(())
        }
    }

    #[async_trait]
    impl CommentRepo for InMemRepo {
        async fn list_comments(&self, post_id: Id) -> RepoResult<Vec<Comment>> {
            let s = self.state.read().unwrap();
            let mut v: Vec<_> = s
                .comments
                .values()
                .filter(|c| c.post_id == post_id)
                .cloned()
                .collect();
            v.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(v)
        }

        async fn create_comment(&self, post_id: Id, author_id: Id, new: NewComment) -> RepoResult<Comment> {
            let mut s = self.state.write().unwrap();
            if !s.posts.contains_key(&post_id) || !s.users.contains_key(&author_id) {
                return Err(RepoError::NotFound);
            }
            let id = Self::next_id(&mut s);
            let comment = Comment {
                id,
                post_id,
                author_id,
                text: new.text,
                created_at: Utc::now(),
            };
            s.comments.insert(id, comment.clone());
            drop(s);
            self.persist();
            Ok(comment)
        }

        async fn get_comment(&self, id: Id) -> RepoResult<Comment> {
            let s = self.state.read().unwrap();
            s.comments.get(&id).cloned().ok_or(RepoError::NotFound)
        }

        async fn delete_comment(&self, id: Id) -> RepoResult<()> {
            let mut s = self.state.write().unwrap();
            if s.comments.remove(&id).is_none() {
                return Err(RepoError::NotFound);
            }
            drop(s);
            self.persist();
            Ok(())
        }
    }

    #[async_trait]
    impl SocialRepo for InMemRepo {
        async fn follow(&self, user_id: Id, author_id: Id) -> RepoResult<()> {
            // self-follow is a silent no-op, nothing is created
            if user_id == author_id {
                return Ok(());
            }
            let mut s = self.state.write().unwrap();
            if !s.users.contains_key(&user_id) || !s.users.contains_key(&author_id) {
                return Err(RepoError::NotFound);
            }
            if s.follows.iter().any(|f| f.user_id == user_id && f.author_id == author_id) {
                return Ok(());
            }
            s.follows.push(Follow { user_id, author_id });
            drop(s);
            self.persist();
            Ok(())
        }

        async fn unfollow(&self, user_id: Id, author_id: Id) -> RepoResult<()> {
            let mut s = self.state.write().unwrap();
            let before = s.follows.len();
            s.follows.retain(|f| !(f.user_id == user_id && f.author_id == author_id));
            if s.follows.len() == before {
                return Err(RepoError::NotFound);
            }
            drop(s);
            self.persist();
            Ok(())
        }

        async fn is_following(&self, user_id: Id, author_id: Id) -> RepoResult<bool> {
            let s = self.state.read().unwrap();
            Ok(s.follows.iter().any(|f| f.user_id == user_id && f.author_id == author_id))
        }

        async fn feed(&self, user_id: Id) -> RepoResult<Vec<Post>> {
            let s = self.state.read().unwrap();
            let followed: Vec<Id> = s
                .follows
                .iter()
                .filter(|f| f.user_id == user_id)
                .map(|f| f.author_id)
                .collect();
            let mut v: Vec<_> = s
                .posts
                .values()
                .filter(|p| followed.contains(&p.author_id))
                .cloned()
                .collect();
            newest_first(&mut v);
            Ok(v)
        }

        async fn like(&self, user_id: Id, post_id: Id) -> RepoResult<()> {
            let mut s = self.state.write().unwrap();
            if !s.users.contains_key(&user_id) || !s.posts.contains_key(&post_id) {
                return Err(RepoError::NotFound);
            }
            if s.likes.iter().any(|l| l.user_id == user_id && l.post_id == post_id) {
                return Ok(());
            }
            s.likes.push(Like { user_id, post_id });
            drop(s);
            self.persist();
            Ok(())
        }

        async fn unlike(&self, user_id: Id, post_id: Id) -> RepoResult<()> {
            let mut s = self.state.write().unwrap();
            let before = s.likes.len();
            s.likes.retain(|l| !(l.user_id == user_id && l.post_id == post_id));
            if s.likes.len() == before {
                return Err(RepoError::NotFound);
            }
            drop(s);
            self.persist();
            Ok(())
        }

        async fn has_liked(&self, user_id: Id, post_id: Id) -> RepoResult<bool> {
            let s = self.state.read().unwrap();
            Ok(s.likes.iter().any(|l| l.user_id == user_id && l.post_id == post_id))
        }
    }
}

// Postgres implementation (feature = "postgres-store")
#[cfg(feature = "postgres-store")]
pub mod pg {
    use super::*;
    use sqlx::{Pool, Postgres};

    #[derive(Clone)]
    pub struct PgRepo {
        pool: Pool<Postgres>,
    }

    impl PgRepo {
        pub fn new(pool: Pool<Postgres>) -> Self {
            Self { pool }
        }
    }

    fn db_err(e: sqlx::Error) -> RepoError {
        match e {
            sqlx::Error::RowNotFound => RepoError::NotFound,
            sqlx::Error::Database(db) => match db.code().as_deref() {
                // unique_violation: the row already exists
                Some("23505") => RepoError::Conflict,
                // foreign_key_violation: the referenced row is gone
                Some("23503") => RepoError::NotFound,
                _ => RepoError::Internal(db.to_string()),
            },
            other => RepoError::Internal(other.to_string()),
        }
    }

    const POST_COLS: &str = "id, text, author_id, group_id, created_at";

    #[async_trait]
    impl UserRepo for PgRepo {
        async fn create_user(&self, new: NewUser) -> RepoResult<User> {
            sqlx::query_as::<_, User>(
                "INSERT INTO users (username) VALUES ($1) RETURNING id, username, created_at",
            )
            .bind(&new.username)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
        }

        async fn get_user(&self, id: Id) -> RepoResult<User> {
            sqlx::query_as::<_, User>("SELECT id, username, created_at FROM users WHERE id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)
        }

        async fn get_user_by_username(&self, username: &str) -> RepoResult<User> {
            sqlx::query_as::<_, User>(
                "SELECT id, username, created_at FROM users WHERE username = $1",
            )
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
        }
    }

    #[async_trait]
    impl GroupRepo for PgRepo {
        async fn list_groups(&self) -> RepoResult<Vec<Group>> {
            sqlx::query_as::<_, Group>(
                r#"SELECT id, slug, title, description FROM "groups" ORDER BY id"#,
            )
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)
        }

        async fn create_group(&self, new: NewGroup) -> RepoResult<Group> {
            sqlx::query_as::<_, Group>(
                r#"INSERT INTO "groups" (slug, title, description) VALUES ($1, $2, $3)
                   RETURNING id, slug, title, description"#,
            )
            .bind(&new.slug)
            .bind(&new.title)
            .bind(&new.description)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
        }

        async fn get_group_by_slug(&self, slug: &str) -> RepoResult<Group> {
            sqlx::query_as::<_, Group>(
                r#"SELECT id, slug, title, description FROM "groups" WHERE slug = $1"#,
            )
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
        }
    }

    #[async_trait]
    impl PostRepo for PgRepo {
        async fn list_posts(&self) -> RepoResult<Vec<Post>> {
            sqlx::query_as::<_, Post>(&format!(
                "SELECT {POST_COLS} FROM posts ORDER BY created_at DESC, id DESC"
            ))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)
        }

        async fn list_posts_by_group(&self, group_id: Id) -> RepoResult<Vec<Post>> {
            sqlx::query_as::<_, Post>(&format!(
                "SELECT {POST_COLS} FROM posts WHERE group_id = $1 ORDER BY created_at DESC, id DESC"
            ))
            .bind(group_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)
        }

        async fn list_posts_by_author(&self, author_id: Id) -> RepoResult<Vec<Post>> {
            sqlx::query_as::<_, Post>(&format!(
                "SELECT {POST_COLS} FROM posts WHERE author_id = $1 ORDER BY created_at DESC, id DESC"
            ))
            .bind(author_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)
        }

        async fn get_post(&self, id: Id) -> RepoResult<Post> {
            sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLS} FROM posts WHERE id = $1"))
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)
        }

        async fn create_post(&self, author_id: Id, new: NewPost) -> RepoResult<Post> {
            sqlx::query_as::<_, Post>(&format!(
                "INSERT INTO posts (text, author_id, group_id) VALUES ($1, $2, $3) RETURNING {POST_COLS}"
            ))
            .bind(&new.text)
            .bind(author_id)
            .bind(new.group_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
        }

        async fn update_post(&self, id: Id, upd: UpdatePost) -> RepoResult<Post> {
            sqlx::query_as::<_, Post>(&format!(
                "UPDATE posts SET text = $2, group_id = $3 WHERE id = $1 RETURNING {POST_COLS}"
            ))
            .bind(id)
            .bind(&upd.text)
            .bind(upd.group_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
        }

        async fn delete_post(&self, id: Id) -> RepoResult<()> {
            // comments and likes cascade via foreign keys
            let res = sqlx::query("DELETE FROM posts WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(db_err)?;
            if res.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CommentRepo for PgRepo {
        async fn list_comments(&self, post_id: Id) -> RepoResult<Vec<Comment>> {
            sqlx::query_as::<_, Comment>(
                "SELECT id, post_id, author_id, text, created_at FROM comments
                 WHERE post_id = $1 ORDER BY created_at DESC, id DESC",
            )
            .bind(post_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)
        }

        async fn create_comment(&self, post_id: Id, author_id: Id, new: NewComment) -> RepoResult<Comment> {
            sqlx::query_as::<_, Comment>(
                "INSERT INTO comments (post_id, author_id, text) VALUES ($1, $2, $3)
                 RETURNING id, post_id, author_id, text, created_at",
            )
            .bind(post_id)
            .bind(author_id)
            .bind(&new.text)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
        }

        async fn get_comment(&self, id: Id) -> RepoResult<Comment> {
            sqlx::query_as::<_, Comment>(
                "SELECT id, post_id, author_id, text, created_at FROM comments WHERE id = $1",
            )
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
        }

        async fn delete_comment(&self, id: Id) -> RepoResult<()> {
            let res = sqlx::query("DELETE FROM comments WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(db_err)?;
            if res.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }
    }

    #[async_trait]
    impl SocialRepo for PgRepo {
        async fn follow(&self, user_id: Id, author_id: Id) -> RepoResult<()> {
            if user_id == author_id {
                return Ok(());
            }
            // concurrent duplicate creates race to a single surviving row
            sqlx::query(
                "INSERT INTO follows (user_id, author_id) VALUES ($1, $2)
                 ON CONFLICT (user_id, author_id) DO NOTHING",
            )
            .bind(user_id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
            Ok(())
        }

        async fn unfollow(&self, user_id: Id, author_id: Id) -> RepoResult<()> {
            let res = sqlx::query("DELETE FROM follows WHERE user_id = $1 AND author_id = $2")
                .bind(user_id)
                .bind(author_id)
                .execute(&self.pool)
                .await
                .map_err(db_err)?;
            if res.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }

        async fn is_following(&self, user_id: Id, author_id: Id) -> RepoResult<bool> {
            sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM follows WHERE user_id = $1 AND author_id = $2)",
            )
            .bind(user_id)
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
        }

        async fn feed(&self, user_id: Id) -> RepoResult<Vec<Post>> {
            sqlx::query_as::<_, Post>(
                "SELECT p.id, p.text, p.author_id, p.group_id, p.created_at
                 FROM posts p
                 JOIN follows f ON f.author_id = p.author_id
                 WHERE f.user_id = $1
                 ORDER BY p.created_at DESC, p.id DESC",
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)
        }

        async fn like(&self, user_id: Id, post_id: Id) -> RepoResult<()> {
            sqlx::query(
                "INSERT INTO likes (user_id, post_id) VALUES ($1, $2)
                 ON CONFLICT (user_id, post_id) DO NOTHING",
            )
            .bind(user_id)
            .bind(post_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
            Ok(())
        }

        async fn unlike(&self, user_id: Id, post_id: Id) -> RepoResult<()> {
            let res = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
                .bind(user_id)
                .bind(post_id)
                .execute(&self.pool)
                .await
                .map_err(db_err)?;
            if res.rows_affected() == 0 {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }

        async fn has_liked(&self, user_id: Id, post_id: Id) -> RepoResult<bool> {
            sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND post_id = $2)",
            )
            .bind(user_id)
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
        }
    }
}
