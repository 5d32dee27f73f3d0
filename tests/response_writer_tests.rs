use alb_bridge::api::response_writer::ProxyResponseWriter;
use alb_bridge::core::models::HeaderMode;
use alb_bridge::errors::CaptureError;
use http::header::{self, HeaderValue};

// Tests for response capture: status defaults, content sniffing and the
// conversion into a load balancer response.

#[test]
fn test_unwritten_response_fails() {
    let writer = ProxyResponseWriter::new(HeaderMode::Single);
    assert_eq!(
        writer.get_proxy_response().unwrap_err(),
        CaptureError::StatusNotSet
    );
}

#[test]
fn test_write_defaults_status_and_sniffs_content_type() {
    let mut writer = ProxyResponseWriter::new(HeaderMode::Single);
    assert_eq!(writer.write(b"<html><body>hi</body></html>"), 28);
    assert_eq!(writer.status(), Some(200));

    let response = writer.get_proxy_response().unwrap();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.status_description, "200 OK");
    assert_eq!(
        response.headers.get("content-type").map(String::as_str),
        Some("text/html; charset=utf-8")
    );
    assert_eq!(response.body, "<html><body>hi</body></html>");
}

#[test]
fn test_explicit_status_and_content_type_are_kept() {
    let mut writer = ProxyResponseWriter::new(HeaderMode::Single);
    writer
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    writer.write_header(201);
    writer.write(br#"{"id":1}"#);

    let response = writer.get_proxy_response().unwrap();
    assert_eq!(response.status_code, 201);
    assert_eq!(response.status_description, "201 Created");
    assert_eq!(
        response.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
}

#[test]
fn test_status_without_body_is_valid() {
    let mut writer = ProxyResponseWriter::new(HeaderMode::Single);
    writer.write_header(204);

    let response = writer.get_proxy_response().unwrap();
    assert_eq!(response.status_code, 204);
    assert!(response.body.is_empty());
    assert!(response.headers.is_empty(), "no body write, no sniffed type");
}

#[test]
fn test_out_of_range_status_fails() {
    for status in [0, 99, 600, 1000] {
        let mut writer = ProxyResponseWriter::new(HeaderMode::Single);
        writer.write_header(status);
        assert_eq!(
            writer.get_proxy_response().unwrap_err(),
            CaptureError::InvalidStatus(status),
            "status {status} should be rejected"
        );
    }
}

#[test]
fn test_unknown_status_has_bare_description() {
    let mut writer = ProxyResponseWriter::new(HeaderMode::Single);
    writer.write_header(299);
    assert_eq!(writer.get_proxy_response().unwrap().status_description, "299");
}

#[test]
fn test_non_utf8_body_is_base64() {
    let mut writer = ProxyResponseWriter::new(HeaderMode::Single);
    writer.write(&[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n', 0xFF]);

    let response = writer.get_proxy_response().unwrap();
    assert!(response.is_base64_encoded);
    assert_eq!(response.body, "iVBORw0KGgr/");
    assert_eq!(
        response.headers.get("content-type").map(String::as_str),
        Some("image/png")
    );
}

#[test]
fn test_multi_value_mode_keeps_every_value() {
    let mut writer = ProxyResponseWriter::new(HeaderMode::MultiValue);
    writer
        .headers_mut()
        .append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
    writer
        .headers_mut()
        .append(header::SET_COOKIE, HeaderValue::from_static("b=2"));
    writer.write(b"ok");

    let response = writer.get_proxy_response().unwrap();
    assert!(response.headers.is_empty());
    assert_eq!(
        response.multi_value_headers.get("set-cookie"),
        Some(&vec!["a=1".to_string(), "b=2".to_string()])
    );
}

#[test]
fn test_single_mode_keeps_first_value() {
    let mut writer = ProxyResponseWriter::new(HeaderMode::Single);
    writer
        .headers_mut()
        .append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
    writer
        .headers_mut()
        .append(header::SET_COOKIE, HeaderValue::from_static("b=2"));
    writer.write(b"ok");

    let response = writer.get_proxy_response().unwrap();
    assert!(response.multi_value_headers.is_empty());
    assert_eq!(
        response.headers.get("set-cookie").map(String::as_str),
        Some("a=1")
    );
}

#[test]
fn test_multiple_writes_append() {
    let mut writer = ProxyResponseWriter::new(HeaderMode::Single);
    writer.write(b"hello ");
    writer.write(b"world");
    assert_eq!(writer.get_proxy_response().unwrap().body, "hello world");
}
