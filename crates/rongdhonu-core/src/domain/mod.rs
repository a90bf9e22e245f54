//! Domain entities - the core business objects.

mod filter;
mod pagination;
mod post;

pub use filter::{PostFilter, PostOrder, PostQuery, StatusFilter};
pub use pagination::Pagination;
pub use post::{Post, PostFields, PublishState};
