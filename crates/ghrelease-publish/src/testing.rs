use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use ghrelease_core::BoxError;
use url::Url;

use crate::request::{HttpRequest, HttpResponse, Transport};

#[derive(Clone, Debug)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub length: Option<u64>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn query(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// Set when a tracked response body is dropped.
#[derive(Clone, Default)]
pub(crate) struct DropFlag {
    pub dropped: Arc<AtomicBool>,
}

struct TrackedBody {
    inner: Cursor<Vec<u8>>,
    flag: Option<DropFlag>,
}

impl Read for TrackedBody {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        if let Some(flag) = &self.flag {
            flag.dropped.store(true, Ordering::SeqCst);
        }
    }
}

/// Answers every request with a fixed status, remembering what was sent.
pub(crate) struct RecordingTransport {
    status: u16,
    response: String,
    failing_asset: Option<String>,
    flag: Option<DropFlag>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    pub fn created() -> Self {
        Self::with_response(201, "{}")
    }

    pub fn with_response(status: u16, response: &str) -> Self {
        Self {
            status,
            response: response.to_string(),
            failing_asset: None,
            flag: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers `500` for the upload whose `name` query equals `asset`.
    pub fn failing_on(mut self, asset: &str) -> Self {
        self.failing_asset = Some(asset.to_string());
        self
    }

    pub fn tracking(mut self, flag: &DropFlag) -> Self {
        self.flag = Some(flag.clone());
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn asset_names(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|request| request.query("name"))
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let mut body = Vec::new();
        let mut length = None;
        if let Some(payload) = request.body {
            length = payload.length();
            payload.into_reader().read_to_end(&mut body)?;
        }
        let recorded = RecordedRequest {
            method: request.method.to_string(),
            url: request.url,
            headers: request.headers,
            body,
            length,
        };

        let status = match (&self.failing_asset, recorded.query("name")) {
            (Some(failing), Some(name)) if *failing == name => 500,
            _ => self.status,
        };
        self.requests.lock().expect("requests lock").push(recorded);

        Ok(HttpResponse {
            status,
            body: Box::new(TrackedBody {
                inner: Cursor::new(self.response.clone().into_bytes()),
                flag: self.flag.clone(),
            }),
        })
    }
}

pub(crate) struct FailingTransport;

impl Transport for FailingTransport {
    fn send(&self, _request: HttpRequest) -> Result<HttpResponse, BoxError> {
        Err("connection refused".into())
    }
}
