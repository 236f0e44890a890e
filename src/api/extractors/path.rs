//! Entity id path extractor.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::domain::EntityKind;
use crate::error::AppError;

/// Integer id taken from the `{id}` path segment.
///
/// An id that does not parse as an `i64` cannot name a stored row, so it is
/// answered with the not-found error of the collection in the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                let kind = parts
                    .uri
                    .path()
                    .split('/')
                    .find(|segment| !segment.is_empty())
                    .and_then(EntityKind::from_collection);
                Err(kind.map_or_else(|| AppError::from(rejection), AppError::NotFound))
            }
        }
    }
}
