//! Captures a handler's response and turns it into a load balancer payload.

use std::collections::BTreeMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use http::header::{self, HeaderMap, HeaderValue};

use crate::core::models::{AlbTargetGroupResponse, HeaderMode, status_description};
use crate::errors::CaptureError;
use crate::utils::mime::detect_content_type;

#[derive(Debug, Default)]
pub struct ProxyResponseWriter {
    mode: HeaderMode,
    headers: HeaderMap,
    body: Vec<u8>,
    status: Option<u16>,
}

impl ProxyResponseWriter {
    pub fn new(mode: HeaderMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn write_header(&mut self, status: u16) {
        self.status = Some(status);
    }

    /// Appends body bytes. A missing status becomes 200 and a missing
    /// content type is sniffed from these bytes.
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        if self.status.is_none() {
            self.status = Some(200);
        }
        if !self.headers.contains_key(header::CONTENT_TYPE) {
            self.headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(detect_content_type(bytes)),
            );
        }
        self.body.extend_from_slice(bytes);
        bytes.len()
    }

    pub fn get_proxy_response(&self) -> Result<AlbTargetGroupResponse, CaptureError> {
        let status = self.status.ok_or(CaptureError::StatusNotSet)?;
        if !(100..=599).contains(&status) {
            return Err(CaptureError::InvalidStatus(status));
        }

        let (body, is_base64_encoded) = match std::str::from_utf8(&self.body) {
            Ok(text) => (text.to_string(), false),
            Err(_) => (STANDARD.encode(&self.body), true),
        };

        let mut headers = BTreeMap::new();
        let mut multi_value_headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for name in self.headers.keys() {
            let mut values = self
                .headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
            match self.mode {
                HeaderMode::Single => {
                    if let Some(first) = values.next() {
                        headers.insert(name.as_str().to_string(), first);
                    }
                }
                HeaderMode::MultiValue => {
                    multi_value_headers.insert(name.as_str().to_string(), values.collect());
                }
            }
        }

        Ok(AlbTargetGroupResponse {
            status_code: status,
            status_description: status_description(status),
            headers,
            multi_value_headers,
            body,
            is_base64_encoded,
        })
    }
}
