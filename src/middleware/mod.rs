/*
 * Responsibility
 * - middleware entry points: authorization gate, CORS, HTTP cross-cutting layers
 */
pub mod auth;
pub mod cors;
pub mod http;
