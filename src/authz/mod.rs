/*
 * Responsibility
 * - Role / Permission の閉じた列挙と、その対応表
 * - role claims → 有効な permission 集合の解決 (pure)
 * - UI 側の PermissionGate 判定
 */
pub mod claims;
pub mod guard;
pub mod permission;
pub mod role;

pub use claims::{Claims, effective_roles, resolve};
pub use guard::{ClaimsState, Combinator, Gated, PermissionGate, Requirement};
pub use permission::Permission;
pub use role::{Role, UnknownRole};
