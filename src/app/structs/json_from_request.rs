use crate::app::models::api_error::ApiError;
use axum::Json;
use axum_macros::FromRequest;

/// `Json` extractor whose rejections surface as `ApiError`.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonFromRequest<T>(pub T);
