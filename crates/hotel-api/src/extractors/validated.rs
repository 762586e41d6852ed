//! JSON body extractor that runs `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use hotel_core::error::AppError;

use crate::error::ApiError;

/// A JSON body that passed its `#[validate]` rules.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        value.validate().map_err(|errors| {
            let mut err = AppError::bad_request("Validation failed");
            if let Ok(details) = serde_json::to_value(&errors) {
                err = err.with_details(details);
            }
            ApiError(err)
        })?;

        Ok(Self(value))
    }
}
