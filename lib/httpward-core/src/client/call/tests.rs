use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use http::{Method, StatusCode};

use super::*;
use crate::client::FormContent;

fn response_with_status(status: StatusCode) -> Response {
    let mut response = http::Response::new(String::new());
    *response.status_mut() = status;
    Response::from(response)
}

fn body_bytes(request: &reqwest::Request) -> Option<&[u8]> {
    request.body().and_then(reqwest::Body::as_bytes)
}

#[test]
fn test_request_spec_rejects_blank_url() {
    for url in ["", "   ", "\t\n"] {
        let result = RequestSpec::new(Method::GET, url, RequestBody::Empty);
        assert!(
            matches!(
                result,
                Err(HttpHelperError::InvalidArgument { argument: "url" })
            ),
            "url {url:?} should be rejected"
        );
    }
}

#[test]
fn test_request_spec_checks_url_before_body() {
    let result = RequestSpec::new(Method::POST, " ", RequestBody::Empty);
    assert!(matches!(
        result,
        Err(HttpHelperError::InvalidArgument { argument: "url" })
    ));
}

#[test]
fn test_request_spec_requires_body_for_post_put_patch() {
    let url = "http://localhost/";
    for method in [Method::POST, Method::PUT, Method::PATCH] {
        let result = RequestSpec::new(method.clone(), url, RequestBody::from("  "));
        assert!(
            matches!(
                result,
                Err(HttpHelperError::InvalidArgument { argument: "body" })
            ),
            "{method} with blank body should be rejected"
        );

        let result = RequestSpec::new(method.clone(), url, RequestBody::Empty);
        assert!(matches!(
            result,
            Err(HttpHelperError::InvalidArgument { argument: "body" })
        ));
    }
}

#[test]
fn test_request_spec_requires_form_content() {
    let result = RequestSpec::new(
        Method::POST,
        "http://localhost/",
        RequestBody::from(FormContent::new()),
    );
    assert!(matches!(
        result,
        Err(HttpHelperError::InvalidArgument {
            argument: "content"
        })
    ));
}

#[test]
fn test_request_spec_bodiless_methods() {
    let url = "http://localhost/items/1";
    for method in [Method::GET, Method::HEAD, Method::DELETE] {
        let request = RequestSpec::new(method.clone(), url, RequestBody::Empty)
            .expect("bodiless request should be valid");
        assert_eq!(request.method(), &method);
        assert_eq!(request.url(), url);
    }
}

#[test]
fn test_request_spec_defaults() {
    let request = RequestSpec::new(Method::GET, "http://localhost/", RequestBody::Empty)
        .expect("valid request");

    assert_eq!(request.content_type(), ContentType::None);
    assert!(request.headers().is_empty());
    assert!(!request.throw_on_bad_status());
}

#[test]
fn test_http_call_builder_collects_options() {
    let client = ();
    let url = "http://localhost/".to_string();
    let call = HttpCall::new(&client, Method::POST, url, "{}".into())
        .with_content_type(ContentType::ApplicationJson)
        .with_header("X-Request-ID", "abc")
        .with_header("Accept", "application/json")
        .throw_on_bad_status();

    let (_, request) = call.into_request().expect("valid call");
    assert_eq!(request.content_type(), ContentType::ApplicationJson);
    assert_eq!(request.headers().len(), 2);
    assert!(request.throw_on_bad_status());
}

#[test]
fn test_http_call_with_headers_replaces_previous() {
    let client = ();
    let url = "http://localhost/".to_string();
    let replacement = RequestHeaders::new().add_header("X-Second", "2");
    let call = HttpCall::new(&client, Method::GET, url, RequestBody::Empty)
        .with_header("X-First", "1")
        .with_headers(replacement.clone());

    let (_, request) = call.into_request().expect("valid call");
    assert_eq!(request.headers(), &replacement);
}

#[test]
fn test_http_call_debug_hides_body() {
    let client = ();
    let call = HttpCall::new(
        &client,
        Method::PUT,
        "http://localhost/".to_string(),
        "top secret".into(),
    );

    let debug = format!("{call:?}");
    assert!(debug.contains("PUT"));
    assert!(!debug.contains("top secret"));
}

#[test]
fn test_check_status_policy() {
    let ok = check_status(response_with_status(StatusCode::OK), true).expect("success passes");
    assert_eq!(ok.status(), StatusCode::OK);

    let passthrough = check_status(response_with_status(StatusCode::BAD_REQUEST), false)
        .expect("bad status is returned when not thrown");
    assert_eq!(passthrough.status(), StatusCode::BAD_REQUEST);

    let error = check_status(response_with_status(StatusCode::BAD_REQUEST), true)
        .expect_err("bad status should be thrown");
    assert!(matches!(
        error,
        HttpHelperError::BadStatus { status_code: 400 }
    ));

    let error = check_status(response_with_status(StatusCode::MOVED_PERMANENTLY), true)
        .expect_err("redirect is not a success");
    assert!(matches!(
        error,
        HttpHelperError::BadStatus { status_code: 301 }
    ));
}

#[test]
fn test_build_request_text_body_with_content_type() {
    let spec = RequestSpec::new(Method::POST, "http://localhost/users", r#"{"id":1}"#.into())
        .expect("valid request")
        .with_content_type(ContentType::ApplicationJson);

    let request = RequestInvoker::build_request(&spec, None).expect("request builds");

    assert_eq!(request.method(), Method::POST);
    assert_eq!(request.url().as_str(), "http://localhost/users");
    assert_eq!(
        request.headers().get(CONTENT_TYPE).expect("content type"),
        "application/json"
    );
    assert!(request.headers().get(AUTHORIZATION).is_none());
    assert_eq!(body_bytes(&request), Some(&br#"{"id":1}"#[..]));
}

#[test]
fn test_build_request_text_body_without_content_type() {
    let spec = RequestSpec::new(Method::PUT, "http://localhost/raw", "plain".into())
        .expect("valid request");

    let request = RequestInvoker::build_request(&spec, None).expect("request builds");

    assert!(request.headers().get(CONTENT_TYPE).is_none());
    assert_eq!(body_bytes(&request), Some(&b"plain"[..]));
}

#[test]
fn test_build_request_form_body() {
    let form = FormContent::new()
        .add_field("grant_type", "client_credentials")
        .add_field("scope", "read write");
    let spec = RequestSpec::new(Method::POST, "http://localhost/token", form.into())
        .expect("valid request")
        // text content type does not apply to forms
        .with_content_type(ContentType::ApplicationJson);

    let request = RequestInvoker::build_request(&spec, None).expect("request builds");

    assert_eq!(
        request.headers().get(CONTENT_TYPE).expect("content type"),
        "application/x-www-form-urlencoded"
    );
    assert_eq!(
        body_bytes(&request),
        Some(&b"grant_type=client_credentials&scope=read+write"[..])
    );
}

#[test]
fn test_build_request_headers_and_authorization() {
    let spec = RequestSpec::new(Method::GET, "http://localhost/", RequestBody::Empty)
        .expect("valid request")
        .with_headers(
            RequestHeaders::new()
                .add_header("X-Request-ID", "abc-123")
                .add_header("Accept", "text/plain"),
        );
    let authorization = HeaderValue::from_static("Bearer tok");

    let request =
        RequestInvoker::build_request(&spec, Some(authorization)).expect("request builds");

    let headers = request.headers();
    assert_eq!(
        headers.get("x-request-id").expect("custom header"),
        "abc-123"
    );
    assert_eq!(headers.get("accept").expect("custom header"), "text/plain");
    assert_eq!(
        headers.get(AUTHORIZATION).expect("authorization"),
        "Bearer tok"
    );
    assert!(body_bytes(&request).is_none());
}

#[test]
fn test_build_request_authorization_wins_over_custom_header() {
    let custom = RequestHeaders::new().add_header("Authorization", "Custom value");
    let spec = RequestSpec::new(Method::GET, "http://localhost/", RequestBody::Empty)
        .expect("valid request")
        .with_headers(custom);
    let authorization = HeaderValue::from_static("Basic abc");

    let request =
        RequestInvoker::build_request(&spec, Some(authorization.clone())).expect("request builds");

    let values: Vec<_> = request.headers().get_all(AUTHORIZATION).iter().collect();
    assert_eq!(values, vec![&authorization]);
}

#[test]
fn test_build_request_invalid_url() {
    let spec = RequestSpec::new(Method::GET, "not a url", RequestBody::Empty).expect("not blank");

    let result = RequestInvoker::build_request(&spec, None);
    assert!(matches!(result, Err(HttpHelperError::UrlError(_))));
}
