use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Draft,
    Published,
}

/// Caller-editable fields of a post.
///
/// Both creation and update take the full set; update overwrites every
/// field, so anything left at its default here is cleared on the stored post.
#[derive(Debug, Clone, Default)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub tags: Vec<String>,
    pub is_draft: bool,
}

/// Post entity - a blog post, either draft or published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub tags: Vec<String>,
    pub is_draft: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post. A non-draft post is stamped as published now.
    pub fn new(fields: PostFields) -> Self {
        let now = Utc::now();
        let published_at = if fields.is_draft { None } else { Some(now) };

        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            content: fields.content,
            featured_image: fields.featured_image,
            tags: fields.tags,
            is_draft: fields.is_draft,
            published_at,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn state(&self) -> PublishState {
        if self.is_draft {
            PublishState::Draft
        } else {
            PublishState::Published
        }
    }

    /// Overwrite all editable fields and apply the publish transition.
    ///
    /// Draft -> published stamps `published_at`; moving to draft clears it;
    /// published -> published keeps the original timestamp.
    pub fn overwrite(&mut self, fields: PostFields) {
        let was_draft = self.is_draft;

        self.title = fields.title;
        self.content = fields.content;
        self.featured_image = fields.featured_image;
        self.tags = fields.tags;
        self.is_draft = fields.is_draft;

        if fields.is_draft {
            self.published_at = None;
        } else if was_draft {
            self.published_at = Some(Utc::now());
        }
    }

    /// Required-field check, run by repositories before persisting.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut missing = Vec::new();
        if self.title.is_empty() {
            missing.push("title");
        }
        if self.content.is_empty() {
            missing.push("content");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "Post validation failed: {} required",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(is_draft: bool) -> PostFields {
        PostFields {
            title: "A".to_string(),
            content: "B".to_string(),
            featured_image: Some("/img/cover.png".to_string()),
            tags: vec!["rust".to_string()],
            is_draft,
        }
    }

    #[test]
    fn test_new_published_post_is_stamped() {
        let before = Utc::now();
        let post = Post::new(fields(false));
        let after = Utc::now();

        let published_at = post.published_at.expect("published post has timestamp");
        assert!(published_at >= before && published_at <= after);
        assert_eq!(post.state(), PublishState::Published);
    }

    #[test]
    fn test_new_draft_has_no_timestamp() {
        let post = Post::new(fields(true));

        assert!(post.published_at.is_none());
        assert_eq!(post.state(), PublishState::Draft);
    }

    #[test]
    fn test_publishing_a_draft_stamps_now() {
        let mut post = Post::new(fields(true));

        let before = Utc::now();
        post.overwrite(fields(false));

        assert!(!post.is_draft);
        assert!(post.published_at.unwrap() >= before);
    }

    #[test]
    fn test_moving_to_draft_clears_timestamp() {
        let mut post = Post::new(fields(false));

        post.overwrite(fields(true));

        assert!(post.is_draft);
        assert!(post.published_at.is_none());
    }

    #[test]
    fn test_republishing_keeps_original_timestamp() {
        let mut post = Post::new(fields(false));
        let original = post.published_at;

        post.overwrite(PostFields {
            title: "Edited".to_string(),
            ..fields(false)
        });

        assert_eq!(post.published_at, original);
        assert_eq!(post.title, "Edited");
    }

    #[test]
    fn test_overwrite_clears_omitted_fields() {
        let mut post = Post::new(fields(false));

        post.overwrite(PostFields {
            title: "A".to_string(),
            content: "B".to_string(),
            ..Default::default()
        });

        assert!(post.featured_image.is_none());
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_validate_requires_title_and_content() {
        let post = Post::new(PostFields::default());

        let err = post.validate().unwrap_err();
        assert!(err.to_string().contains("title, content"));
        assert!(Post::new(fields(false)).validate().is_ok());
    }

    #[test]
    fn test_whitespace_counts_as_present() {
        let post = Post::new(PostFields {
            title: " ".to_string(),
            ..fields(false)
        });

        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_serializes_camel_case() {
        let post = Post::new(fields(true));
        let json = serde_json::to_value(&post).unwrap();

        assert_eq!(json["isDraft"], true);
        assert!(json["publishedAt"].is_null());
        assert_eq!(json["featuredImage"], "/img/cover.png");
    }
}
