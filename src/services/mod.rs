pub mod comments;
pub mod error;
pub mod id_codec;
pub mod ideas;
pub mod ranking;
pub mod validation;

pub use comments::CommentService;
pub use error::{ServiceError, ServiceResult};
pub use ideas::IdeaService;
