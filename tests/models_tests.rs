use alb_bridge::core::models::{
    AlbTargetGroupRequest, HeaderMode, gateway_timeout, internal_server_error, status_description,
};

const SAMPLE_EVENT: &str = r#"{
    "requestContext": {
        "elb": {
            "targetGroupArn": "arn:aws:elasticloadbalancing:us-east-2:123456789012:targetgroup/lambda-279XGJDqGZ5rsrHC2Fjr/49e9d65c45c6791a"
        }
    },
    "httpMethod": "GET",
    "path": "/lambda",
    "queryStringParameters": {
        "query": "1234ABCD"
    },
    "multiValueQueryStringParameters": null,
    "headers": {
        "accept": "text/html,application/xhtml+xml",
        "host": "lambda-alb-123578498.us-east-2.elb.amazonaws.com",
        "x-forwarded-for": "72.12.164.125"
    },
    "multiValueHeaders": null,
    "body": null,
    "isBase64Encoded": false
}"#;

#[test]
fn test_deserialize_sample_event() {
    let event: AlbTargetGroupRequest = serde_json::from_str(SAMPLE_EVENT).unwrap();

    assert_eq!(event.http_method, "GET");
    assert_eq!(event.path, "/lambda");
    assert_eq!(
        event.query_string_parameters.get("query").map(String::as_str),
        Some("1234ABCD")
    );
    assert!(event.multi_value_query_string_parameters.is_empty());
    assert!(event.multi_value_headers.is_empty());
    assert!(event.body.is_empty());
    assert!(event.request_context.elb.target_group_arn.ends_with("49e9d65c45c6791a"));
    assert_eq!(event.header_mode(), HeaderMode::Single);
    assert_eq!(event.header("Host"), Some("lambda-alb-123578498.us-east-2.elb.amazonaws.com"));
}

#[test]
fn test_multi_value_event() {
    let json = r#"{
        "httpMethod": "POST",
        "path": "/",
        "multiValueHeaders": {
            "X-Forwarded-For": ["198.51.100.1, 10.0.0.1", "ignored"]
        }
    }"#;
    let event: AlbTargetGroupRequest = serde_json::from_str(json).unwrap();

    assert_eq!(event.header_mode(), HeaderMode::MultiValue);
    assert_eq!(event.header("x-forwarded-for"), Some("198.51.100.1, 10.0.0.1"));
    assert_eq!(event.header("host"), None);
    assert!(!event.is_base64_encoded);
}

#[test]
fn test_serialize_omits_empty_header_maps() {
    let value = serde_json::to_value(gateway_timeout()).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "statusCode": 504,
            "statusDescription": "504 Gateway Timeout",
            "body": "",
            "isBase64Encoded": false
        })
    );
}

#[test]
fn test_fixed_responses() {
    let response = internal_server_error();
    assert_eq!(response.status_code, 500);
    assert_eq!(response.status_description, "500 Internal Server Error");
    assert!(response.headers.is_empty());
}

#[test]
fn test_status_description() {
    assert_eq!(status_description(200), "200 OK");
    assert_eq!(status_description(404), "404 Not Found");
    assert_eq!(status_description(299), "299");
}
