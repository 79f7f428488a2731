//! Access scope extractor
//!
//! Resolves the request's [`AccessScope`] from the authenticated principal
//! (inserted into request extensions by the authentication middleware,
//! which is owned by the HTTP layer) plus scope overrides carried in the
//! query string. Handlers take the scope as an argument and never
//! re-implement bypass or tenant branching themselves.

use axum::{extract::FromRequestParts, extract::Query, http::request::Parts};
use crate::domain::AuthenticatedPrincipal;
use crate::error::AppError;
use crate::scope::{AccessScope, ScopeOverrides, ScopeResolver};

/// # Example
///
/// ```ignore
/// async fn list_categories(
///     scope: AccessScope,
///     State(state): State<AppState>,
/// ) -> impl IntoResponse {
///     state.master_data.categories(&scope).await
/// }
/// ```
impl<S> FromRequestParts<S> for AccessScope
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .ok_or_else(|| {
                AppError::Unauthorized("Missing authenticated principal".to_string())
            })?;

        let Query(overrides): Query<ScopeOverrides> = Query::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(format!("Invalid scope overrides: {}", e)))?;

        ScopeResolver::resolve(&principal, &overrides)
    }
}

/// Guard for store-bound operations: rejects early with "store selection
/// required" instead of letting a store-less scope reach the query layer.
pub fn require_store_when_needed(scope: &AccessScope) -> Result<(), AppError> {
    if scope.enforce_store
        && scope.store_id.is_none()
        && scope.target_store_id.is_none()
        && !scope.apply_to_all_stores
    {
        return Err(AppError::MissingStoreContext);
    }
    Ok(())
}
