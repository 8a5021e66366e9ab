use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, middleware::Next, response::Response};

use fieldintel_auth::{TokenCodec, TokenError};

use crate::app::errors;
use crate::context::AuthContext;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenCodec>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers()).map_err(errors::token_error_to_response)?;

    let user_id = state
        .tokens
        .decode(token)
        .map_err(errors::token_error_to_response)?;

    req.extensions_mut().insert(AuthContext::new(user_id));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, TokenError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(TokenError::Missing)?;

    let header = header.to_str().map_err(|_| TokenError::Malformed)?;

    let header = header.strip_prefix("Bearer ").ok_or(TokenError::Malformed)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(TokenError::Malformed);
    }

    Ok(token)
}
