//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use rongdhonu_core::domain::{Pagination, Post, PostFields, PostFilter, PostOrder, PostQuery};
use rongdhonu_core::error::RepoError;
use rongdhonu_shared::dto::{
    CountResponse, LatestPostsQuery, ListPostsQuery, PostPage, PostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const DEFAULT_LATEST_LIMIT: u64 = 3;

fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| AppError::BadRequest(format!("Invalid post id \"{}\": {}", raw, e)))
}

/// Leading integer of a query value, read like `parseInt`: surrounding
/// junk such as `5abc` still yields 5, no digits at all yields `None`.
fn leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let value = rest[..end].bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -value } else { value })
}

/// Request body to domain fields. Omitted values become empty/false.
fn fields(req: PostRequest) -> PostFields {
    PostFields {
        title: req.title.unwrap_or_default(),
        content: req.content.unwrap_or_default(),
        featured_image: req.featured_image,
        tags: req.tags.unwrap_or_default(),
        is_draft: req.is_draft.unwrap_or(false),
    }
}

/// GET /posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let pagination = Pagination::from_request(query.page, query.limit);

    let filter = PostFilter::published()
        .with_search(query.search)
        .with_tag(query.tag);

    let total_posts = state.posts.count(&filter).await?;
    let posts = state
        .posts
        .find_matching(
            &PostQuery::new(filter)
                .offset(pagination.offset())
                .limit(pagination.limit),
        )
        .await?;

    Ok(HttpResponse::Ok().json(PostPage {
        posts,
        total_posts,
        current_page: pagination.page,
        total_pages: pagination.total_pages(total_posts),
    }))
}

/// GET /posts/{id} - answers `null` when the post does not exist.
pub async fn get_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post: Option<Post> = state.posts.find_by_id(id).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /posts/add
pub async fn add(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.save(Post::new(fields(body.into_inner()))).await?;

    tracing::info!(post_id = %post.id, state = ?post.state(), by = %identity.subject, "Post added");
    Ok(HttpResponse::Ok().json("Post added!"))
}

/// POST /posts/update/{id} - overwrites every field of the stored post.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(RepoError::NotFound)?;

    post.overwrite(fields(body.into_inner()));
    let post = state.posts.save(post).await?;

    tracing::info!(post_id = %post.id, state = ?post.state(), by = %identity.subject, "Post updated");
    Ok(HttpResponse::Ok().json("Post updated!"))
}

/// DELETE /posts/delete/{id} - succeeds whether or not the post exists.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.posts.delete(id).await?;

    tracing::info!(post_id = %id, by = %identity.subject, "Post deleted");
    Ok(HttpResponse::Ok().json("Post deleted."))
}

async fn count(state: &AppState, filter: PostFilter) -> AppResult<HttpResponse> {
    let count = state.posts.count(&filter).await?;
    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

/// GET /posts/count/total
pub async fn count_total(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    count(&state, PostFilter::all()).await
}

/// GET /posts/count/drafts
pub async fn count_drafts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    count(&state, PostFilter::drafts()).await
}

/// GET /posts/count/published
pub async fn count_published(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    count(&state, PostFilter::published()).await
}

/// GET /posts/latest - an unreadable or non-positive `limit` means 3.
pub async fn latest(
    state: web::Data<AppState>,
    query: web::Query<LatestPostsQuery>,
) -> AppResult<HttpResponse> {
    let limit = query
        .limit
        .as_deref()
        .and_then(leading_int)
        .filter(|l| *l > 0)
        .map_or(DEFAULT_LATEST_LIMIT, |l| l as u64);

    let posts = state
        .posts
        .find_matching(
            &PostQuery::new(PostFilter::published())
                .order(PostOrder::LatestPublished)
                .limit(limit),
        )
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}
