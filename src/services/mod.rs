/*
 * Responsibility
 * - handler から呼ばれる業務ロジック (token 検証 / identity 解決 / role 付与)
 * - repos の trait にだけ依存し、HTTP の型は持ち込まない
 */
pub mod auth;
pub mod identity;
pub mod roles;
