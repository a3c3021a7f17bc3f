/// Factory: build `IdTokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{IdTokenVerifier, TokenError};

pub fn build_verifier(config: &Config) -> Result<Arc<IdTokenVerifier>, TokenError> {
    let verifier = IdTokenVerifier::new(
        &config.id_token_key,
        &config.auth_issuer,
        &config.auth_audience,
        config.id_token_leeway_seconds,
    )?;

    Ok(Arc::new(verifier))
}
