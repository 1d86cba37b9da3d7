use super::jwt::{JwtAuth, JwtClaims};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Extract JWT from Authorization header or cookie
fn extract_token_from_request(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    bearer.or_else(|| {
        headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|cookies| {
                cookies.split(';').find_map(|cookie| {
                    let (name, value) = cookie.trim().split_once('=')?;
                    (name == ACCESS_TOKEN_COOKIE && !value.is_empty()).then_some(value)
                })
            })
    })
}

fn authenticate(auth: &JwtAuth, headers: &HeaderMap) -> Result<JwtClaims, AppError> {
    let Some(token) = extract_token_from_request(headers) else {
        tracing::debug!("No JWT found in Authorization header or cookie");
        return Err(AppError::Unauthorized("No token provided".into()));
    };

    auth.verify_token(token).map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        AppError::Unauthorized("Invalid token".into())
    })
}

/// Admin gate for write routes.
///
/// Validates the token from the `Authorization: Bearer` header or the
/// `access_token` cookie and inserts [`JwtClaims`] into request extensions.
/// Missing or invalid tokens get 401; valid tokens without the role get 403.
///
/// ```ignore
/// let admin = Router::new()
///     .route("/", post(create))
///     .route_layer(axum::middleware::from_fn_with_state(auth, require_admin));
/// ```
pub async fn require_admin(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(&auth, &headers)?;

    if !claims.is_admin() {
        tracing::info!(sub = %claims.sub, "Admin role required");
        return Err(AppError::Forbidden("Admin role required".into()));
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
