#![cfg(feature = "inmem-store")]

use quill::{
    models::{NewComment, NewGroup, NewPost, NewUser, UpdatePost},
    repo::{inmem::InMemRepo, RepoError},
};
// Bring trait method namespaces into scope so calls on InMemRepo resolve.
use quill::repo::{CommentRepo, GroupRepo, PostRepo, SocialRepo, UserRepo};

/// Helper that returns a fresh, empty repository for every test run.
fn repo() -> InMemRepo {
    // isolate state: do **not** persist to the default file path
    std::env::set_var("QUILL_DATA_DIR", tempfile::tempdir().unwrap().path());
    InMemRepo::new()
}

async fn user(r: &InMemRepo, name: &str) -> quill::models::User {
    r.create_user(NewUser { username: name.into() }).await.unwrap()
}

#[tokio::test]
async fn user_crud_and_conflict() {
    let r = repo();

    let u = user(&r, "leo").await;
    assert_eq!(u.username, "leo");
    assert_eq!(r.get_user(u.id).await.unwrap().id, u.id);
    assert_eq!(r.get_user_by_username("leo").await.unwrap().id, u.id);

    // duplicate username → conflict
    let err = r.create_user(NewUser { username: "leo".into() }).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict));

    let err = r.get_user_by_username("nobody").await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn group_crud_and_conflict() {
    let r = repo();

    assert!(r.list_groups().await.unwrap().is_empty());

    let g = r
        .create_group(NewGroup {
            slug: "cats".into(),
            title: "Cats".into(),
            description: "Cat pictures".into(),
        })
        .await
        .unwrap();
    assert_eq!(g.slug, "cats");
    assert_eq!(r.get_group_by_slug("cats").await.unwrap().id, g.id);

    let err = r
        .create_group(NewGroup {
            slug: "cats".into(),
            title: "Dup".into(),
            description: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict));
}

#[tokio::test]
async fn post_lifecycle_with_group() {
    let r = repo();
    let author = user(&r, "author").await;
    let g = r
        .create_group(NewGroup {
            slug: "news".into(),
            title: "News".into(),
            description: String::new(),
        })
        .await
        .unwrap();

    let post = r
        .create_post(author.id, NewPost { text: "hello world".into(), group_id: Some(g.id) })
        .await
        .unwrap();
    assert_eq!(post.author_id, author.id);
    assert_eq!(post.group_id, Some(g.id));

    // edit text and clear the group
    let updated = r
        .update_post(post.id, UpdatePost { text: "edited".into(), group_id: None })
        .await
        .unwrap();
    assert_eq!(updated.text, "edited");
    assert_eq!(updated.group_id, None);
    // creation timestamp is immutable
    assert_eq!(updated.created_at, post.created_at);

    // unknown group on create → not found
    let err = r
        .create_post(author.id, NewPost { text: "x".into(), group_id: Some(999) })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));

    r.delete_post(post.id).await.unwrap();
    assert!(matches!(r.get_post(post.id).await.unwrap_err(), RepoError::NotFound));
    assert!(matches!(r.delete_post(post.id).await.unwrap_err(), RepoError::NotFound));
}

#[tokio::test]
async fn post_listings_are_newest_first() {
    let r = repo();
    let a = user(&r, "a").await;
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(r.create_post(a.id, NewPost { text: format!("post {i}"), group_id: None }).await.unwrap().id);
    }
    let listed: Vec<_> = r.list_posts().await.unwrap().iter().map(|p| p.id).collect();
    ids.reverse();
    assert_eq!(listed, ids);

    let by_author: Vec<_> = r.list_posts_by_author(a.id).await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(by_author, ids);
}

#[tokio::test]
async fn deleting_a_post_cascades_comments_and_likes() {
    let r = repo();
    let a = user(&r, "a").await;
    let b = user(&r, "b").await;
    let post = r.create_post(a.id, NewPost { text: "t".into(), group_id: None }).await.unwrap();
    let comment = r
        .create_comment(post.id, b.id, NewComment { text: "nice".into() })
        .await
        .unwrap();
    r.like(b.id, post.id).await.unwrap();

    r.delete_post(post.id).await.unwrap();
    assert!(matches!(r.get_comment(comment.id).await.unwrap_err(), RepoError::NotFound));
    assert!(!r.has_liked(b.id, post.id).await.unwrap());
}

#[tokio::test]
async fn comments_list_newest_first_for_their_post() {
    let r = repo();
    let a = user(&r, "a").await;
    let p1 = r.create_post(a.id, NewPost { text: "one".into(), group_id: None }).await.unwrap();
    let p2 = r.create_post(a.id, NewPost { text: "two".into(), group_id: None }).await.unwrap();
    let c1 = r.create_comment(p1.id, a.id, NewComment { text: "first".into() }).await.unwrap();
    let c2 = r.create_comment(p1.id, a.id, NewComment { text: "second".into() }).await.unwrap();
    r.create_comment(p2.id, a.id, NewComment { text: "other".into() }).await.unwrap();

    let listed: Vec<_> = r.list_comments(p1.id).await.unwrap().iter().map(|c| c.id).collect();
    assert_eq!(listed, vec![c2.id, c1.id]);
}

#[tokio::test]
async fn self_follow_is_a_silent_noop() {
    let r = repo();
    let a = user(&r, "a").await;

    r.follow(a.id, a.id).await.unwrap();
    assert!(!r.is_following(a.id, a.id).await.unwrap());
}

#[tokio::test]
async fn follow_is_idempotent_and_unfollow_requires_an_edge() {
    let r = repo();
    let a = user(&r, "a").await;
    let b = user(&r, "b").await;

    r.follow(a.id, b.id).await.unwrap();
    r.follow(a.id, b.id).await.unwrap();
    assert!(r.is_following(a.id, b.id).await.unwrap());
    // direction matters
    assert!(!r.is_following(b.id, a.id).await.unwrap());

    r.unfollow(a.id, b.id).await.unwrap();
    assert!(!r.is_following(a.id, b.id).await.unwrap());
    assert!(matches!(r.unfollow(a.id, b.id).await.unwrap_err(), RepoError::NotFound));
}

#[tokio::test]
async fn feed_contains_exactly_followed_authors_posts() {
    let r = repo();
    let reader = user(&r, "reader").await;
    let followed = user(&r, "followed").await;
    let stranger = user(&r, "stranger").await;

    let old = r.create_post(followed.id, NewPost { text: "old".into(), group_id: None }).await.unwrap();
    r.create_post(stranger.id, NewPost { text: "noise".into(), group_id: None }).await.unwrap();
    let new = r.create_post(followed.id, NewPost { text: "new".into(), group_id: None }).await.unwrap();

    r.follow(reader.id, followed.id).await.unwrap();

    let feed = r.feed(reader.id).await.unwrap();
    let ids: Vec<_> = feed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![new.id, old.id]);

    // the stranger's reader sees nothing
    assert!(r.feed(stranger.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn like_is_idempotent_and_allows_own_posts() {
    let r = repo();
    let a = user(&r, "a").await;
    let post = r.create_post(a.id, NewPost { text: "mine".into(), group_id: None }).await.unwrap();

    // liking your own post is allowed
    r.like(a.id, post.id).await.unwrap();
    r.like(a.id, post.id).await.unwrap();
    assert!(r.has_liked(a.id, post.id).await.unwrap());

    r.unlike(a.id, post.id).await.unwrap();
    assert!(!r.has_liked(a.id, post.id).await.unwrap());
    assert!(matches!(r.unlike(a.id, post.id).await.unwrap_err(), RepoError::NotFound));

    // liking a missing post is an error
    assert!(matches!(r.like(a.id, 999).await.unwrap_err(), RepoError::NotFound));
}
