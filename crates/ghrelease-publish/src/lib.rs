pub mod github;
pub mod release;
pub mod request;
pub mod walk;

#[cfg(test)]
pub(crate) mod testing;

pub use release::{PublishOutcome, Publisher};
pub use request::{HttpRequest, HttpResponse, Request, RequestBody, ReqwestTransport, Transport};
