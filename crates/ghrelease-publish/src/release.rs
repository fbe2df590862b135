use std::sync::mpsc::{self, SyncSender};
use std::thread;

use ghrelease_core::{Error, GithubConfig, GlobFilterSet};

use crate::github::send_file;
use crate::request::Request;
use crate::walk::walk_files;

const ACCEPTED_PATH_CAPACITY: usize = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Asset names, in upload order.
    pub uploaded: Vec<String>,
}

/// Walks a workspace and uploads every file the filters accept.
pub struct Publisher {
    config: GithubConfig,
    request: Request,
    filters: GlobFilterSet,
}

impl Publisher {
    pub fn new(config: GithubConfig, request: Request) -> Self {
        Self {
            config,
            request,
            filters: GlobFilterSet::new(),
        }
    }

    pub fn add_include(&mut self, pattern: &str) -> Result<(), Error> {
        self.filters.add_include(pattern)
    }

    pub fn add_exclude(&mut self, pattern: &str) -> Result<(), Error> {
        self.filters.add_exclude(pattern)
    }

    pub fn config(&self) -> &GithubConfig {
        &self.config
    }

    pub fn filters(&self) -> &GlobFilterSet {
        &self.filters
    }

    /// Uploads each accepted file in walk order, stopping at the first error.
    ///
    /// Accepted paths are reported on a background thread, which is drained
    /// before this returns.
    pub fn publish(&self) -> Result<PublishOutcome, Error> {
        let (sender, receiver) = mpsc::sync_channel::<String>(ACCEPTED_PATH_CAPACITY);
        let reporter = thread::spawn(move || {
            for path in receiver {
                tracing::info!(path = %path, "acceptable path");
            }
        });

        let result = self.walk_and_upload(&sender);

        drop(sender);
        if reporter.join().is_err() {
            tracing::warn!("accepted path reporter panicked");
        }

        result
    }

    fn walk_and_upload(&self, accepted: &SyncSender<String>) -> Result<PublishOutcome, Error> {
        let mut outcome = PublishOutcome::default();
        for candidate in walk_files(self.config.workspace()) {
            let candidate = candidate?;
            tracing::debug!(path = %candidate.relative, "have path");
            if !self.filters.matches(&candidate.relative) {
                continue;
            }

            // The reporter only stops once the sender is dropped.
            let _ = accepted.send(candidate.relative.clone());

            let name = send_file(&self.request, &self.config, &candidate.path)?;
            outcome.uploaded.push(name);
        }
        Ok(outcome)
    }
}
