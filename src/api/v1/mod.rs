/*
 * Responsibility
 * - the v1 surface (re-export routes())
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
