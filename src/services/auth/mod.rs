pub mod factory;
pub mod fingerprint;
pub mod id_token;

pub use factory::build_verifier;
pub use fingerprint::token_fingerprint;
pub use id_token::{IdTokenVerifier, TokenError, VerifiedIdentity, VerifierKey};
