/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::access::requires_auth (permission 単位), http (transport), cors
 */
pub mod auth;
pub mod cors;
pub mod http;
