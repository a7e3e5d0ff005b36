use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
    Error, Json, RequestExt,
};
use http::{header, request::Parts, HeaderMap, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;

/// Inbound request with its body buffered as is, within the configured body limit.
pub struct RawRequest {
    pub parts: Parts,
    pub body: Bytes,
}

impl<S> FromRequest<S> for RawRequest
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, _: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.with_limited_body().into_parts();
        let body = collect_limited(body).await?;
        Ok(RawRequest { parts, body })
    }
}

pub struct JsonRequest<T> {
    pub parts: Parts,
    pub json: T,
}

impl<S, T> FromRequest<S> for JsonRequest<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S>,
{
    type Rejection = Response;

    async fn from_request(req: Request, _: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.with_limited_body().into_parts();

        if !json_content_type(&parts.headers) {
            return Err(
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "missing json content type").into_response(),
            );
        }

        let bytes = collect_limited(body).await?;
        let Json(value): Json<T> = Json::from_bytes(&bytes).map_err(|err| err.into_response())?;

        Ok(JsonRequest { parts, json: value })
    }
}

async fn collect_limited(body: Body) -> Result<Bytes, Response> {
    match body.collect().await {
        Ok(body) => Ok(body.to_bytes()),
        Err(err) => {
            let box_error = match err.into_inner().downcast::<Error>() {
                Ok(err) => err.into_inner(),
                Err(err) => err,
            };
            let box_error = match box_error.downcast::<Error>() {
                Ok(err) => err.into_inner(),
                Err(err) => err,
            };
            let status = if box_error.is::<http_body_util::LengthLimitError>() {
                StatusCode::PAYLOAD_TOO_LARGE
            } else {
                StatusCode::BAD_REQUEST
            };
            Err((status, "Failed to buffer the request body").into_response())
        }
    }
}

fn json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(header::CONTENT_TYPE) else {
        return false;
    };
    let Ok(content_type) = content_type.to_str() else {
        return false;
    };
    let Ok(mime) = content_type.parse::<mime::Mime>() else {
        return false;
    };

    mime.type_() == "application"
        && (mime.subtype() == "json" || mime.suffix().is_some_and(|name| name == "json"))
}
