/**
 * Responsibility
 *  - one tagged id type per resource that appears in a path
 *
 * Everything declared pub here is re-exported through ./mod.rs
 */
use super::core::PublicId;

// ideas
pub enum IdeaTag {}
pub type PublicIdeaId = PublicId<IdeaTag>;
