/**
 * Responsibility
 *  - tie core and types together
 *  - control what handlers get to see
 */
mod core;
mod types;

pub use types::*;
