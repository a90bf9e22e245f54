//! In-memory post store - used when no database is configured.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use rongdhonu_core::domain::{Post, PostFilter, PostOrder, PostQuery};
use rongdhonu_core::error::RepoError;
use rongdhonu_core::ports::{BaseRepository, PostRepository};

/// In-memory post repository backed by a vector in insertion order.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        post.validate()?;

        let mut posts = self.posts.write().await;
        let now = Utc::now();

        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => {
                post.created_at = existing.created_at;
                post.updated_at = now;
                *existing = post.clone();
            }
            None => {
                post.created_at = now;
                post.updated_at = now;
                posts.push(post.clone());
            }
        }

        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        posts.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_matching(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;

        let mut matching: Vec<Post> = posts
            .iter()
            .filter(|p| query.filter.matches(p))
            .cloned()
            .collect();

        if query.order == PostOrder::LatestPublished {
            // Stable sort keeps insertion order among equal timestamps.
            matching.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        }

        let window = matching
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit.map_or(usize::MAX, |l| l as usize))
            .collect();

        Ok(window)
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().filter(|p| filter.matches(p)).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rongdhonu_core::domain::PostFields;

    fn post(title: &str, is_draft: bool) -> Post {
        Post::new(PostFields {
            title: title.to_string(),
            content: "content".to_string(),
            is_draft,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.save(post("first", false)).await.unwrap();

        let found = repo.find_by_id(saved.id).await.unwrap();
        assert_eq!(found.unwrap().title, "first");
    }

    #[tokio::test]
    async fn test_save_rejects_missing_title() {
        let repo = InMemoryPostRepository::new();

        let result = repo.save(post("", false)).await;

        assert!(matches!(result, Err(RepoError::Validation(_))));
        assert_eq!(repo.count(&PostFilter::all()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = InMemoryPostRepository::new();
        let mut saved = repo.save(post("first", false)).await.unwrap();
        let created_at = saved.created_at;

        saved.title = "renamed".to_string();
        let updated = repo.save(saved).await.unwrap();

        assert_eq!(updated.created_at, created_at);
        assert!(updated.updated_at >= created_at);
        assert_eq!(repo.count(&PostFilter::all()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_is_silent() {
        let repo = InMemoryPostRepository::new();

        assert!(repo.delete(Uuid::new_v4()).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_matching_windows_results() {
        let repo = InMemoryPostRepository::new();
        for i in 0..5 {
            repo.save(post(&format!("post {i}"), false)).await.unwrap();
        }
        repo.save(post("draft", true)).await.unwrap();

        let query = PostQuery::new(PostFilter::published()).offset(2).limit(2);
        let page = repo.find_matching(&query).await.unwrap();

        let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["post 2", "post 3"]);
        assert_eq!(repo.count(&PostFilter::drafts()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_latest_orders_by_published_at() {
        let repo = InMemoryPostRepository::new();
        let mut older = post("older", false);
        older.published_at = Some(Utc::now() - chrono::Duration::hours(1));
        repo.save(older).await.unwrap();
        repo.save(post("newer", false)).await.unwrap();

        let query = PostQuery::new(PostFilter::published())
            .order(PostOrder::LatestPublished)
            .limit(1);
        let latest = repo.find_matching(&query).await.unwrap();

        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].title, "newer");
    }
}
