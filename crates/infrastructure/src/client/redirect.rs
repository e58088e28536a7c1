use bytes::Bytes;
use dnsprobe_application::ports::{HttpRequest, HttpResponse};
use dnsprobe_domain::TransportError;
use http::header::{
    HeaderName, AUTHORIZATION, CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, COOKIE, LOCATION,
    PROXY_AUTHORIZATION, TRANSFER_ENCODING, WWW_AUTHENTICATE,
};
use http::{Method, StatusCode, Uri};

const CREDENTIAL_HEADERS: [HeaderName; 4] =
    [AUTHORIZATION, COOKIE, PROXY_AUTHORIZATION, WWW_AUTHENTICATE];

const BODY_HEADERS: [HeaderName; 4] =
    [CONTENT_TYPE, CONTENT_LENGTH, CONTENT_ENCODING, TRANSFER_ENCODING];

/// Rebuilds a request from its parts. Extensions are not carried over.
pub(crate) fn clone_request(request: &HttpRequest) -> HttpRequest {
    let mut copy = http::Request::new(request.body().clone());
    *copy.method_mut() = request.method().clone();
    *copy.uri_mut() = request.uri().clone();
    *copy.version_mut() = request.version();
    *copy.headers_mut() = request.headers().clone();
    copy
}

/// The `Location` of a redirect response, if `response` is one we follow.
pub(crate) fn location(response: &HttpResponse) -> Option<&str> {
    match response.status() {
        StatusCode::MOVED_PERMANENTLY
        | StatusCode::FOUND
        | StatusCode::SEE_OTHER
        | StatusCode::TEMPORARY_REDIRECT
        | StatusCode::PERMANENT_REDIRECT => response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok()),
        _ => None,
    }
}

/// Builds the request for the next hop of a redirect chain.
pub(crate) fn next_request(
    previous: &HttpRequest,
    status: StatusCode,
    location: &str,
) -> Result<HttpRequest, TransportError> {
    let target = resolve_location(previous.uri(), location)?;

    let switch_to_get = status == StatusCode::SEE_OTHER
        || (matches!(status, StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND)
            && previous.method() != Method::GET
            && previous.method() != Method::HEAD);

    let mut next = clone_request(previous);
    if switch_to_get {
        // 303 keeps HEAD as HEAD.
        if previous.method() != Method::HEAD {
            *next.method_mut() = Method::GET;
        }
        *next.body_mut() = Bytes::new();
        for name in &BODY_HEADERS {
            next.headers_mut().remove(name);
        }
    }

    if target.host() != previous.uri().host() {
        for name in &CREDENTIAL_HEADERS {
            next.headers_mut().remove(name);
        }
    }

    *next.uri_mut() = target;
    Ok(next)
}

fn resolve_location(base: &Uri, location: &str) -> Result<Uri, TransportError> {
    let invalid = |reason: String| {
        TransportError::InvalidRequest(format!("bad redirect location '{}': {}", location, reason))
    };

    let base = reqwest::Url::parse(&base.to_string()).map_err(|e| invalid(e.to_string()))?;
    let target = base.join(location).map_err(|e| invalid(e.to_string()))?;

    if !matches!(target.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", target.scheme())));
    }

    target
        .as_str()
        .parse::<Uri>()
        .map_err(|e| invalid(e.to_string()))
}
