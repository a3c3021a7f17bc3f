/*
 * Responsibility
 * - middlware の公開インターフェース (re-export)
 * - http / cors / security_headers: Router 全体に掛ける横断的関心事
 * - auth: `/api/v1` の Bearer ID token 検証
 * - route_gate: page navigation を session mirror cookie で振り分ける
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod route_gate;
pub mod security_headers;
