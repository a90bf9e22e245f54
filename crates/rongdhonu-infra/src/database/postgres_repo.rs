//! PostgreSQL repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use rongdhonu_core::domain::{Post, PostFilter, PostOrder, PostQuery, StatusFilter};
use rongdhonu_core::error::RepoError;
use rongdhonu_core::ports::{BaseRepository, PostRepository};

use super::entity::post::{self, Entity as PostEntity};

/// Postgres binds LIMIT/OFFSET as BIGINT.
const MAX_BIND: u64 = i64::MAX as u64;

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    pub(crate) db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_error(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
        _ => RepoError::Query(e.to_string()),
    }
}

/// Escape LIKE metacharacters so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn condition(filter: &PostFilter) -> Condition {
    let mut cond = Condition::all();

    match filter.status {
        StatusFilter::Any => {}
        StatusFilter::Drafts => cond = cond.add(post::Column::IsDraft.eq(true)),
        StatusFilter::Published => cond = cond.add(post::Column::IsDraft.eq(false)),
    }

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        cond = cond.add(
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(post::Column::Title))).like(pattern.clone()))
                .add(Expr::expr(Func::lower(Expr::col(post::Column::Content))).like(pattern)),
        );
    }

    if let Some(tag) = &filter.tag {
        cond = cond.add(Expr::cust_with_values(r#"? = ANY("tags")"#, [tag.clone()]));
    }

    cond
}

#[async_trait]
impl BaseRepository<Post, Uuid> for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, mut entity: Post) -> Result<Post, RepoError> {
        entity.validate()?;

        let existing = PostEntity::find_by_id(entity.id)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        let now = Utc::now();
        entity.updated_at = now;

        let model = match existing {
            Some(stored) => {
                entity.created_at = stored.created_at.into();
                let active: post::ActiveModel = entity.into();
                active.update(&self.db).await
            }
            None => {
                entity.created_at = now;
                let active: post::ActiveModel = entity.into();
                active.insert(&self.db).await
            }
        }
        .map_err(query_error)?;

        tracing::debug!(post_id = %model.id, "Post saved");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            tracing::debug!(post_id = %id, "Delete matched no post");
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_matching(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(?query, "Finding posts");

        let mut select = PostEntity::find().filter(condition(&query.filter));

        select = match query.order {
            PostOrder::Created => select.order_by_asc(post::Column::CreatedAt),
            PostOrder::LatestPublished => select.order_by_desc(post::Column::PublishedAt),
        };

        let result = select
            .offset(query.offset.min(MAX_BIND))
            .limit(query.limit.map(|limit| limit.min(MAX_BIND)))
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(condition(filter))
            .count(&self.db)
            .await
            .map_err(query_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_Off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("Rust"), "%rust%");
    }
}
