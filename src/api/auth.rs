//! Caller identity.
//!
//! Authentication happens upstream; the proxy forwards the user as
//! `X-User-Id` and, optionally, `X-User-Role`. Requests without the id header
//! are anonymous.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

use super::ApiError;
use crate::domain::{Actor, Role, UserId};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The caller, if any. Malformed identity headers are rejected with 400
/// rather than silently treated as anonymous.
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Option<Actor>);

impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = actor_from_headers(&parts.headers)?;
        if let Some(actor) = actor {
            tracing::Span::current().record("user_id", actor.user_id.value());
        }
        Ok(Self(actor))
    }
}

pub fn actor_from_headers(headers: &HeaderMap) -> Result<Option<Actor>, ApiError> {
    let Some(raw_id) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };

    let user_id = raw_id
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<i32>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::validation("Invalid X-User-Id header"))?;

    let role = match headers.get(USER_ROLE_HEADER) {
        None => Role::Member,
        Some(raw) => raw
            .to_str()
            .ok()
            .and_then(|v| v.parse::<Role>().ok())
            .ok_or_else(|| ApiError::validation("Invalid X-User-Role header"))?,
    };

    Ok(Some(Actor {
        user_id: UserId::new(user_id),
        role,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_anonymous_without_headers() {
        assert_eq!(actor_from_headers(&HeaderMap::new()).unwrap(), None);
    }

    #[test]
    fn test_member_by_default() {
        let actor = actor_from_headers(&headers(&[(USER_ID_HEADER, "7")]))
            .unwrap()
            .unwrap();
        assert_eq!(actor, Actor::member(7));
    }

    #[test]
    fn test_admin_role() {
        let actor = actor_from_headers(&headers(&[
            (USER_ID_HEADER, "1"),
            (USER_ROLE_HEADER, "admin"),
        ]))
        .unwrap()
        .unwrap();
        assert!(actor.is_admin());
    }

    #[test]
    fn test_malformed_headers_are_rejected() {
        assert!(actor_from_headers(&headers(&[(USER_ID_HEADER, "abc")])).is_err());
        assert!(actor_from_headers(&headers(&[(USER_ID_HEADER, "0")])).is_err());
        assert!(
            actor_from_headers(&headers(&[(USER_ID_HEADER, "3"), (USER_ROLE_HEADER, "root")]))
                .is_err()
        );
    }
}
