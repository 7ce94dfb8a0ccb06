use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::HttpResponse;
use serde::Serialize;

use crate::errors::AppError;

/// Pretty-print `value` as JSON with two-space indentation.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Serve `value` as a JSON file the client saves under `filename`.
pub fn json_download<T: Serialize + ?Sized>(
    filename: &str,
    value: &T,
) -> Result<HttpResponse, AppError> {
    if filename.trim().is_empty() {
        return Err(AppError::BadRequest("filename must not be empty".to_string()));
    }
    let body = to_pretty_json(value).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("application/json; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename.to_string())],
        })
        .body(body))
}
