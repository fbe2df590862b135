use std::sync::Arc;

use ghrelease_core::{Error, GithubConfig};
use ghrelease_publish::{PublishOutcome, Publisher, Request, ReqwestTransport, Transport};

pub struct PublishArgs {
    pub config: GithubConfig,
    pub base_url: String,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

pub fn run(args: PublishArgs) -> Result<PublishOutcome, Error> {
    let transport = ReqwestTransport::new()?;
    run_with_transport(args, Arc::new(transport))
}

/// Registers every pattern before walking, so a bad glob fails without
/// touching the network.
pub fn run_with_transport(
    args: PublishArgs,
    transport: Arc<dyn Transport>,
) -> Result<PublishOutcome, Error> {
    let request = Request::new(&args.base_url, transport)?;
    let mut publisher = Publisher::new(args.config, request);
    for pattern in &args.includes {
        publisher.add_include(pattern)?;
    }
    for pattern in &args.excludes {
        publisher.add_exclude(pattern)?;
    }

    let config = publisher.config();
    tracing::info!(
        repository = %config.repository(),
        release_id = %config.release_id(),
        workspace = %config.workspace().display(),
        includes = ?args.includes,
        excludes = ?args.excludes,
        "publishing release assets"
    );
    publisher.publish()
}
