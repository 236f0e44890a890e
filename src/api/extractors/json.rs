//! JSON body extractor.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejection is reported as [`AppError`].
///
/// Syntax errors, wrong content types, missing fields and values of the
/// wrong type all produce the same 400 validation body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
