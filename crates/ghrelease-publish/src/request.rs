//! Single-call HTTP primitive with a swappable transport.
//!
//! [`Request`] owns the base endpoint and resolves relative paths against it.
//! Sending is delegated to a [`Transport`], so tests can answer requests
//! without a network.

use std::io::Read;
use std::sync::Arc;

use ghrelease_core::{BoxError, Error};
use reqwest::blocking::{Body, Client};
use reqwest::{Method, StatusCode};
use url::Url;

pub type ResponseBody = Box<dyn Read + Send>;

/// Outgoing request body, with its length when known up front.
pub struct RequestBody {
    reader: Box<dyn Read + Send>,
    length: Option<u64>,
}

impl RequestBody {
    pub fn sized<R: Read + Send + 'static>(reader: R, length: u64) -> Self {
        Self {
            reader: Box::new(reader),
            length: Some(length),
        }
    }

    pub fn streamed<R: Read + Send + 'static>(reader: R) -> Self {
        Self {
            reader: Box::new(reader),
            length: None,
        }
    }

    pub fn length(&self) -> Option<u64> {
        self.length
    }

    pub fn into_reader(self) -> Box<dyn Read + Send> {
        self.reader
    }
}

pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

pub struct HttpResponse {
    pub status: u16,
    pub body: ResponseBody,
}

/// Sends one HTTP request and returns one HTTP response.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

/// Default transport backed by a blocking reqwest client.
///
/// No request timeout is configured; large assets may take a while.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(concat!("ghrelease/", env!("CARGO_PKG_VERSION")))
            .timeout(None)
            .build()
            .map_err(|err| Error::HttpClient {
                source: Box::new(err),
            })?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            let length = body.length();
            let reader = body.into_reader();
            builder = builder.body(match length {
                Some(length) => Body::sized(reader, length),
                None => Body::new(reader),
            });
        }
        let response = builder.send()?;
        Ok(HttpResponse {
            status: response.status().as_u16(),
            body: Box::new(response),
        })
    }
}

#[derive(Clone)]
pub struct Request {
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl Request {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self, Error> {
        let base_url = Url::parse(base_url).map_err(|source| Error::BaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            base_url,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a `POST` and requires `201 Created`.
    ///
    /// On success the caller owns the returned body. On any other status the
    /// body is read into the error and dropped here.
    pub fn process_post(
        &self,
        path: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
        body: RequestBody,
    ) -> Result<ResponseBody, Error> {
        let (mut response, status) = self.process(Method::POST, path, query, headers, Some(body))?;
        if status == StatusCode::CREATED.as_u16() {
            return Ok(response);
        }

        let mut raw = Vec::new();
        response
            .read_to_end(&mut raw)
            .map_err(|source| Error::UnreadableResponse { status, source })?;
        Err(Error::UnexpectedStatus {
            status,
            body: String::from_utf8_lossy(&raw).into_owned(),
        })
    }

    pub fn process(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
        body: Option<RequestBody>,
    ) -> Result<(ResponseBody, u16), Error> {
        let url = self.resolve(path, query);
        let method_name = method.to_string();
        let url_text = url.to_string();

        let request = HttpRequest {
            method,
            url,
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            body,
        };

        tracing::debug!(method = %method_name, url = %url_text, "sending request");
        let response = self
            .transport
            .send(request)
            .map_err(|source| Error::Transport {
                method: method_name,
                url: url_text,
                source,
            })?;
        Ok((response.body, response.status))
    }

    fn resolve(&self, path: &str, query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        url
    }
}
