//! Identity extractor for pre-authenticated requests.
//!
//! Requests arrive with identity already established by the gateway:
//! `X-User-Id` carries the caller's id and `X-User-Role` one of
//! `student`, `mentor`, `admin`. The extractor turns them into an
//! `Actor` for handler-level authorization. Token validation itself is
//! an external collaborator and never reaches this service.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{Actor, UserId, UserRole};

use super::error::ErrorResponse;

/// Extractor that requires an authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthenticatedActor(pub Actor);

/// Rejection returned when identity headers are missing or malformed.
#[derive(Debug)]
pub struct IdentityRejection(String);

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("unauthorized", self.0)),
        )
            .into_response()
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedActor
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("X-User-Id")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| IdentityRejection("Missing X-User-Id header".to_string()))?;

        let role = parts
            .headers
            .get("X-User-Role")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| IdentityRejection("Missing X-User-Role header".to_string()))?;

        let user_id = UserId::new(user_id)
            .map_err(|e| IdentityRejection(format!("Invalid user id: {}", e)))?;
        let role =
            UserRole::parse(role).map_err(|e| IdentityRejection(format!("Invalid role: {}", e)))?;

        Ok(AuthenticatedActor(Actor::new(user_id, role)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(req: Request<()>) -> Result<AuthenticatedActor, IdentityRejection> {
        let (mut parts, _) = req.into_parts();
        AuthenticatedActor::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn extracts_actor_from_headers() {
        let req = Request::builder()
            .header("X-User-Id", "user-42")
            .header("X-User-Role", "mentor")
            .body(())
            .unwrap();

        let AuthenticatedActor(actor) = extract(req).await.unwrap();
        assert_eq!(actor.user_id.as_str(), "user-42");
        assert_eq!(actor.role, UserRole::Mentor);
    }

    #[tokio::test]
    async fn rejects_missing_headers() {
        let req = Request::builder().body(()).unwrap();
        assert!(extract(req).await.is_err());
    }

    #[tokio::test]
    async fn rejects_unknown_role() {
        let req = Request::builder()
            .header("X-User-Id", "user-42")
            .header("X-User-Role", "superuser")
            .body(())
            .unwrap();
        assert!(extract(req).await.is_err());
    }
}
