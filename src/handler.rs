//! HTTP request handlers for the link shortener
//!
//! - `shorten_link` accepts a JSON body, registers the URL and returns the short URL
//! - `redirect_link` resolves any other path as a short code and redirects to its target

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use percent_encoding::{utf8_percent_encode, AsciiSet};
use serde::de::Error as _;

use crate::error::{AppError, Result};
use crate::model::{ShortenRequest, ShortenResponse};
use crate::registry::AppState;

/// Creates a short URL for the submitted link
///
/// The content type is checked before the body is read, so a request with a
/// missing or wrong `Content-Type` never reaches the registry. Only the first
/// JSON value in the body is decoded; anything after it is ignored and a bare
/// `null` counts as an empty request. The URL itself is not validated: empty
/// or malformed strings are stored verbatim.
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page" }
/// ```
///
/// # Response
///
/// - **200 OK** - `{"short_url": "https://fer.link/AbC123"}`
/// - **400 Bad Request** - Body does not start with a JSON object (or `null`)
///   whose `url` is a string
/// - **415 Unsupported Media Type** - `Content-Type` is not exactly `application/json`
pub async fn shorten_link(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ShortenResponse>> {
    if !is_json_content_type(&headers) {
        return Err(AppError::UnsupportedMediaType);
    }

    let payload = serde_json::Deserializer::from_slice(&body)
        .into_iter::<Option<ShortenRequest>>()
        .next()
        .unwrap_or_else(|| Err(serde_json::Error::custom("request body is empty")))?
        .unwrap_or_default();

    let code = state.registry.register(payload.url);
    tracing::debug!(%code, "link shortened");

    Ok(Json(ShortenResponse {
        short_url: state.short_url(&code),
    }))
}

/// Redirects a short code to its stored URL
///
/// Mounted as the router fallback: the whole request path minus its leading
/// `/` is the code, whatever the method.
///
/// # Response
///
/// - **302 Found** - `Location` is the stored URL, see [`location_value`]
/// - **404 Not Found** - `Short URL not found`
/// - **500 Internal Server Error** - Stored URL holds a control character
///   that no header can carry
pub async fn redirect_link(State(state): State<AppState>, uri: Uri) -> Result<Response> {
    let code = uri.path().strip_prefix('/').unwrap_or(uri.path());

    let target = match state.registry.lookup(code) {
        Some(target) => target,
        None => {
            tracing::debug!(%code, "short code not found");
            return Err(AppError::NotFound);
        }
    };

    let location = location_value(&target)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Requires the header to be exactly `application/json`, with no parameters.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .is_some_and(|value| value == "application/json")
}

// Only bytes outside ASCII are escaped; everything else goes out as stored.
const NON_ASCII: &AsciiSet = &AsciiSet::EMPTY;

/// Turns a stored URL into a `Location` header value
///
/// Line breaks become spaces and non-ASCII bytes are percent-encoded. An
/// empty target would make the client reload the same short URL, so it
/// redirects to `/` instead. Any other control character is rejected.
fn location_value(target: &str) -> Result<HeaderValue> {
    if target.is_empty() {
        return Ok(HeaderValue::from_static("/"));
    }

    let unfolded = target.replace(['\r', '\n'], " ");
    let encoded = utf8_percent_encode(&unfolded, NON_ASCII).to_string();

    HeaderValue::from_str(&encoded).map_err(|_| {
        tracing::debug!(location = %encoded.escape_debug(), "unusable redirect target");
        AppError::InvalidTarget
    })
}
