use std::collections::BTreeMap;

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};

/// Load balancer target-group request, as delivered to the Lambda target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbTargetGroupRequest {
    pub http_method: String,
    #[serde(default, deserialize_with = "nullable")]
    pub path: String,
    #[serde(default, deserialize_with = "nullable")]
    pub query_string_parameters: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "nullable")]
    pub multi_value_query_string_parameters: BTreeMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "nullable")]
    pub multi_value_headers: BTreeMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub request_context: AlbRequestContext,
    #[serde(default)]
    pub is_base64_encoded: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub body: String,
}

impl AlbTargetGroupRequest {
    /// Multi-value mode is on when the target group delivered `multiValueHeaders`.
    #[must_use]
    pub fn header_mode(&self) -> HeaderMode {
        if self.multi_value_headers.is_empty() {
            HeaderMode::Single
        } else {
            HeaderMode::MultiValue
        }
    }

    /// Case-insensitive header lookup across both header maps.
    ///
    /// Returns the first value when the multi-value map carries several.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.multi_value_headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first().map(String::as_str))
            .or_else(|| {
                self.headers
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(name))
                    .map(|(_, v)| v.as_str())
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbRequestContext {
    #[serde(default)]
    pub elb: ElbContext,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElbContext {
    #[serde(default)]
    pub target_group_arn: String,
}

/// Response payload the load balancer expects back from the Lambda target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbTargetGroupResponse {
    pub status_code: u16,
    #[serde(default)]
    pub status_description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub multi_value_headers: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

/// Header convention of a target group: one value per name, or lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderMode {
    #[default]
    Single,
    MultiValue,
}

/// Renders a status the way the load balancer reports it, e.g. `"404 Not Found"`.
#[must_use]
pub fn status_description(status: u16) -> String {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("");
    format!("{status} {reason}").trim_end().to_string()
}

fn fixed_response(status: StatusCode) -> AlbTargetGroupResponse {
    AlbTargetGroupResponse {
        status_code: status.as_u16(),
        status_description: status_description(status.as_u16()),
        ..AlbTargetGroupResponse::default()
    }
}

/// Fixed 504 returned whenever an event cannot be proxied.
#[must_use]
pub fn gateway_timeout() -> AlbTargetGroupResponse {
    fixed_response(StatusCode::GATEWAY_TIMEOUT)
}

/// Fixed 500 returned when the client address cannot be resolved.
#[must_use]
pub fn internal_server_error() -> AlbTargetGroupResponse {
    fixed_response(StatusCode::INTERNAL_SERVER_ERROR)
}

// The load balancer sends `null` for empty maps and bodies.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
