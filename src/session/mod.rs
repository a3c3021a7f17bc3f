/*
 * Responsibility
 * - Session mirror: 認証状態の cookie コピー (auth token の有無 / primary role / enrollment flag)
 * - 書き込みは mirror.rs のみ、route gate は snapshot.rs 経由で読むだけ
 */
pub mod cookies;
pub mod mirror;
pub mod snapshot;

pub use cookies::{
    AUTH_TOKEN_COOKIE, CookiePolicy, ENROLLED_PREFIX, USER_ROLE_COOKIE, enrollment_cookie_name,
};
pub use mirror::{SessionMirror, SignedIn};
pub use snapshot::CookieSnapshot;
