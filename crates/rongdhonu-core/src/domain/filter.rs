//! Post selection criteria shared by every repository backend.

use super::Post;

/// Which publication states a query selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Any,
    Drafts,
    Published,
}

/// Filter over posts.
///
/// `search` is a case-insensitive substring match on title or content;
/// `tag` requires exact membership in the post's tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub status: StatusFilter,
    pub search: Option<String>,
    pub tag: Option<String>,
}

impl PostFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn drafts() -> Self {
        Self {
            status: StatusFilter::Drafts,
            ..Self::default()
        }
    }

    pub fn published() -> Self {
        Self {
            status: StatusFilter::Published,
            ..Self::default()
        }
    }

    /// Empty search terms are ignored.
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.is_empty());
        self
    }

    /// Empty tags are ignored.
    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag.filter(|t| !t.is_empty());
        self
    }

    /// Evaluate the filter against a single post.
    pub fn matches(&self, post: &Post) -> bool {
        let status_ok = match self.status {
            StatusFilter::Any => true,
            StatusFilter::Drafts => post.is_draft,
            StatusFilter::Published => !post.is_draft,
        };
        if !status_ok {
            return false;
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !post.title.to_lowercase().contains(&needle)
                && !post.content.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        match &self.tag {
            Some(tag) => post.tags.iter().any(|t| t == tag),
            None => true,
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrder {
    /// Oldest first, by creation time.
    #[default]
    Created,
    /// Most recently published first.
    LatestPublished,
}

/// A filtered, ordered, windowed selection of posts.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub filter: PostFilter,
    pub order: PostOrder,
    pub offset: u64,
    pub limit: Option<u64>,
}

impl PostQuery {
    pub fn new(filter: PostFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn order(mut self, order: PostOrder) -> Self {
        self.order = order;
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostFields;

    fn post(title: &str, content: &str, tags: &[&str], is_draft: bool) -> Post {
        Post::new(PostFields {
            title: title.to_string(),
            content: content.to_string(),
            featured_image: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_draft,
        })
    }

    #[test]
    fn test_published_filter_excludes_drafts() {
        let filter = PostFilter::published();

        assert!(filter.matches(&post("a", "b", &[], false)));
        assert!(!filter.matches(&post("a", "b", &[], true)));
    }

    #[test]
    fn test_search_is_case_insensitive_on_title_or_content() {
        let filter = PostFilter::published().with_search(Some("RUST".to_string()));

        assert!(filter.matches(&post("Learning rust", "body", &[], false)));
        assert!(filter.matches(&post("Title", "all about Rust", &[], false)));
        assert!(!filter.matches(&post("Title", "Go", &[], false)));
    }

    #[test]
    fn test_tag_requires_exact_membership() {
        let filter = PostFilter::all().with_tag(Some("x".to_string()));

        assert!(filter.matches(&post("a", "b", &["y", "x"], true)));
        assert!(!filter.matches(&post("a", "b", &["xx"], true)));
    }

    #[test]
    fn test_empty_terms_are_ignored() {
        let filter = PostFilter::all()
            .with_search(Some(String::new()))
            .with_tag(Some(String::new()));

        assert_eq!(filter, PostFilter::all());
    }
}
