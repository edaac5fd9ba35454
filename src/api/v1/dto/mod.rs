pub mod comments;
pub mod ideas;
