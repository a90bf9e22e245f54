use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostFilter, PostQuery};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Deleting a missing entity is not an error.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts matching the query's filter, ordered and windowed.
    async fn find_matching(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError>;

    /// Number of posts matching a filter.
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;
}
