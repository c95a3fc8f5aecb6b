use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth::{can_modify, create_jwt, Auth, Role};
use crate::cache::PageCache;
use crate::error::ApiError;
use crate::models::*;
use crate::pagination::{paginate, PageQuery};
use crate::repo::Repo;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::resource("/posts")
                    .route(web::get().to(index))
                    .route(web::post().to(create_post)),
            )
            .service(
                web::resource("/posts/{id}")
                    .route(web::get().to(post_detail))
                    .route(web::put().to(update_post))
                    .route(web::delete().to(delete_post)),
            )
            .service(web::resource("/posts/{id}/comments").route(web::post().to(add_comment)))
            .service(
                web::resource("/posts/{id}/like")
                    .route(web::post().to(like_post))
                    .route(web::delete().to(unlike_post)),
            )
            .service(web::resource("/comments/{id}").route(web::delete().to(delete_comment)))
            .service(
                web::resource("/groups")
                    .route(web::get().to(list_groups))
                    .route(web::post().to(create_group)),
            )
            .service(web::resource("/groups/{slug}").route(web::get().to(group_posts)))
            .service(web::resource("/users/{username}").route(web::get().to(profile)))
            .service(
                web::resource("/users/{username}/follow")
                    .route(web::post().to(profile_follow))
                    .route(web::delete().to(profile_unfollow)),
            )
            .service(web::resource("/feed").route(web::get().to(follow_index)))
            .service(web::resource("/auth/login").route(web::post().to(login)))
            .service(web::resource("/auth/me").route(web::get().to(auth_me)))
            .service(web::resource("/admin/cache/clear").route(web::post().to(clear_cache))),
    );
}

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repo>,
    pub page_cache: PageCache,
}

macro_rules! ensure_admin {
    ($auth:expr) => {
        if !$auth.0.is_admin() {
            return Err(ApiError::Forbidden);
        }
    };
}

fn redirect_to(location: String) -> HttpResponse {
    HttpResponse::Found().insert_header(("Location", location)).finish()
}

fn require_text(text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::Validation { field: "text", message: "must not be empty".into() });
    }
    Ok(())
}

fn post_detail_url(id: Id) -> String {
    format!("/api/v1/posts/{id}")
}

/// Custom not-found body for any unmatched route.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "not found" }))
}

// ---------------- posts ------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    params(("page" = Option<String>, Query, description = "1-based page, defaults to 1")),
    responses((status = 200, description = "Paginated post listing"))
)]
pub async fn index(
    req: HttpRequest,
    data: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let key = PageCache::key("index", req.query_string());
    if let Some(body) = data.page_cache.get(&key) {
        return Ok(HttpResponse::Ok().content_type("application/json").body(body));
    }
    let posts = data.repo.list_posts().await?;
    let page = paginate(posts, query.number());
    let body = serde_json::to_vec(&serde_json::json!({ "page_obj": page }))
        .map_err(|_| ApiError::Internal)?;
    data.page_cache.put(key, body.clone());
    Ok(HttpResponse::Ok().content_type("application/json").body(body))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = NewPost,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 302, description = "Unauthenticated, redirected to login"),
        (status = 400, description = "Empty text"),
        (status = 404, description = "Group not found")
    )
)]
pub async fn create_post(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewPost>,
) -> Result<HttpResponse, ApiError> {
    require_text(&payload.text)?;
    let post = data.repo.create_post(auth.0.uid, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(post))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(("id" = Id, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post detail context"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn post_detail(
    auth: Option<Auth>,
    data: web::Data<AppState>,
    path: web::Path<Id>,
) -> Result<HttpResponse, ApiError> {
    let post = data.repo.get_post(path.into_inner()).await?;
    let comments = data.repo.list_comments(post.id).await?;
    // derived per read, never stored
    let liked = match &auth {
        Some(a) => data.repo.has_liked(a.0.uid, post.id).await?,
        None => false,
    };
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "post": post,
        "comments": comments,
        "liked": liked,
    })))
}

#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    request_body = UpdatePost,
    params(("id" = Id, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 302, description = "Not the author, redirected to the detail view"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn update_post(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<UpdatePost>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let post = data.repo.get_post(id).await?;
    // you may look but not touch: non-authors land on the read view
    if !can_modify(&auth.0, post.author_id) {
        return Ok(redirect_to(post_detail_url(id)));
    }
    require_text(&payload.text)?;
    let updated = data.repo.update_post(id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(("id" = Id, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 302, description = "Not the author, redirected to the detail view"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let post = data.repo.get_post(id).await?;
    if !can_modify(&auth.0, post.author_id) {
        return Ok(redirect_to(post_detail_url(id)));
    }
    data.repo.delete_post(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ---------------- comments --------------------------------------------

#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/comments",
    request_body = NewComment,
    params(("id" = Id, Path, description = "Post id")),
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Empty text"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn add_comment(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<NewComment>,
) -> Result<HttpResponse, ApiError> {
    let post_id = path.into_inner();
    require_text(&payload.text)?;
    let comment = data
        .repo
        .create_comment(post_id, auth.0.uid, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}",
    params(("id" = Id, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 302, description = "Not the author, redirected to the parent post"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn delete_comment(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
) -> Result<HttpResponse, ApiError> {
    let comment = data.repo.get_comment(path.into_inner()).await?;
    if !can_modify(&auth.0, comment.author_id) {
        return Ok(redirect_to(post_detail_url(comment.post_id)));
    }
    data.repo.delete_comment(comment.id).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ---------------- groups ----------------------------------------------

#[utoipa::path(
    get,
    path = "/api/v1/groups",
    responses((status = 200, description = "List groups", body = [Group]))
)]
pub async fn list_groups(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let groups = data.repo.list_groups().await?;
    Ok(HttpResponse::Ok().json(groups))
}

#[utoipa::path(
    post,
    path = "/api/v1/groups",
    request_body = NewGroup,
    responses(
        (status = 201, description = "Group created", body = Group),
        (status = 403, description = "Not an admin"),
        (status = 409, description = "Slug already taken")
    )
)]
pub async fn create_group(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewGroup>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let group = data.repo.create_group(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(group))
}

#[utoipa::path(
    get,
    path = "/api/v1/groups/{slug}",
    params(
        ("slug" = String, Path, description = "Group slug"),
        ("page" = Option<String>, Query, description = "1-based page, defaults to 1")
    ),
    responses(
        (status = 200, description = "Group with paginated posts"),
        (status = 404, description = "Group not found")
    )
)]
pub async fn group_posts(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let group = data.repo.get_group_by_slug(&path.into_inner()).await?;
    let posts = data.repo.list_posts_by_group(group.id).await?;
    let page = paginate(posts, query.number());
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "group": group,
        "page_obj": page,
    })))
}

// ---------------- profiles and the social graph ------------------------

#[utoipa::path(
    get,
    path = "/api/v1/users/{username}",
    params(
        ("username" = String, Path, description = "Author username"),
        ("page" = Option<String>, Query, description = "1-based page, defaults to 1")
    ),
    responses(
        (status = 200, description = "Profile with paginated posts"),
        (status = 404, description = "User not found")
    )
)]
pub async fn profile(
    auth: Option<Auth>,
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let author = data.repo.get_user_by_username(&path.into_inner()).await?;
    let posts = data.repo.list_posts_by_author(author.id).await?;
    let page = paginate(posts, query.number());
    let following = match &auth {
        Some(a) if a.0.uid != author.id => data.repo.is_following(a.0.uid, author.id).await?,
        _ => false,
    };
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "author": author,
        "page_obj": page,
        "following": following,
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{username}/follow",
    params(("username" = String, Path, description = "Author username")),
    responses(
        (status = 200, description = "Following (idempotent; self-follow is a no-op)"),
        (status = 404, description = "User not found")
    )
)]
pub async fn profile_follow(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let author = data.repo.get_user_by_username(&path.into_inner()).await?;
    data.repo.follow(auth.0.uid, author.id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{username}/follow",
    params(("username" = String, Path, description = "Author username")),
    responses(
        (status = 200, description = "Unfollowed"),
        (status = 404, description = "No such follow edge")
    )
)]
pub async fn profile_unfollow(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let author = data.repo.get_user_by_username(&path.into_inner()).await?;
    data.repo.unfollow(auth.0.uid, author.id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

#[utoipa::path(
    get,
    path = "/api/v1/feed",
    params(("page" = Option<String>, Query, description = "1-based page, defaults to 1")),
    responses(
        (status = 200, description = "Posts by followed authors, newest first"),
        (status = 302, description = "Unauthenticated, redirected to login")
    )
)]
pub async fn follow_index(
    auth: Auth,
    data: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let posts = data.repo.feed(auth.0.uid).await?;
    let page = paginate(posts, query.number());
    Ok(HttpResponse::Ok().json(serde_json::json!({ "page_obj": page })))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/like",
    params(("id" = Id, Path, description = "Post id")),
    responses(
        (status = 200, description = "Liked (idempotent)"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn like_post(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
) -> Result<HttpResponse, ApiError> {
    data.repo.like(auth.0.uid, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}/like",
    params(("id" = Id, Path, description = "Post id")),
    responses(
        (status = 200, description = "Unliked"),
        (status = 404, description = "No such like")
    )
)]
pub async fn unlike_post(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
) -> Result<HttpResponse, ApiError> {
    data.repo.unlike(auth.0.uid, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

// ---------------- auth -------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = NewUser,
    responses(
        (status = 200, description = "Token issued (user created on first login)"),
        (status = 400, description = "Empty username")
    )
)]
pub async fn login(
    data: web::Data<AppState>,
    payload: web::Json<NewUser>,
) -> Result<HttpResponse, ApiError> {
    let username = payload.username.trim().to_string();
    if username.is_empty() {
        return Err(ApiError::Validation {
            field: "username",
            message: "must not be empty".into(),
        });
    }

    let user = match data.repo.get_user_by_username(&username).await {
        Ok(user) => user,
        Err(crate::repo::RepoError::NotFound) => {
            match data.repo.create_user(NewUser { username: username.clone() }).await {
                Ok(user) => user,
                // lost a create race: the row exists now
                Err(crate::repo::RepoError::Conflict) => {
                    data.repo.get_user_by_username(&username).await?
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(e) => return Err(e.into()),
    };

    let bootstrap_admins = std::env::var("BOOTSTRAP_ADMIN_USERS").unwrap_or_default();
    let is_admin = bootstrap_admins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .any(|s| s == user.username);
    let roles = if is_admin { vec![Role::Admin, Role::User] } else { vec![Role::User] };

    let token = create_jwt(user.id, &user.username, roles).map_err(|_| ApiError::Internal)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "token": token, "user": user })))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current identity"),
        (status = 302, description = "Unauthenticated, redirected to login")
    )
)]
pub async fn auth_me(auth: Auth) -> Result<HttpResponse, ApiError> {
    let role = if auth.0.is_admin() { "admin" } else { "user" };
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": auth.0.uid,
        "username": auth.0.sub,
        "role": role,
    })))
}

// ---------------- operations -------------------------------------------

/// Operator-level full cache flush. The next index request recomputes.
#[utoipa::path(
    post,
    path = "/api/v1/admin/cache/clear",
    responses(
        (status = 200, description = "Cache purged"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn clear_cache(auth: Auth, data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    data.page_cache.clear();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}
