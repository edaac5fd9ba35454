/*
 * Responsibility
 * - router-level middleware, one module per concern
 */
pub mod cors;
pub mod http;
pub mod security_headers;
