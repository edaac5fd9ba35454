pub mod comments;
pub mod health;
pub mod ideas;
