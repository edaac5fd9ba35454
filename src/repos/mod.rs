pub mod comment_repo;
pub mod error;
pub mod idea_repo;
pub mod memory;
pub mod store;

pub use comment_repo::{CommentRepo, CommentRow, NewComment};
pub use error::{RepoError, RepoResult};
pub use idea_repo::{IdeaRepo, IdeaRow, NewIdea};
pub use store::Store;
