use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::event::GithubEvent;

pub const DEFAULT_BASE_URL: &str = "https://uploads.github.com";

pub const AUTH_HEADER_ENV: &str = "AUTH_HEADER";
pub const GITHUB_EVENT_PATH_ENV: &str = "GITHUB_EVENT_PATH";
pub const GITHUB_REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const GITHUB_WORKSPACE_ENV: &str = "GITHUB_WORKSPACE";

/// Release coordinates and credentials for one publish run.
///
/// Built once, then handed to the publisher; nothing mutates it afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GithubConfig {
    auth: String,
    release_id: String,
    repository: String,
    token: String,
    workspace: PathBuf,
}

impl GithubConfig {
    pub fn new(
        auth: impl Into<String>,
        release_id: impl Into<String>,
        repository: impl Into<String>,
        token: impl Into<String>,
        workspace: impl Into<PathBuf>,
    ) -> Self {
        Self {
            auth: auth.into(),
            release_id: release_id.into(),
            repository: repository.into(),
            token: token.into(),
            workspace: workspace.into(),
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves every required key through `lookup`; the release id comes from
    /// the event file named by `GITHUB_EVENT_PATH`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| lookup(key).ok_or(Error::MissingEnv { key });

        let auth = require(AUTH_HEADER_ENV)?;
        let event_path = require(GITHUB_EVENT_PATH_ENV)?;
        let release_id = GithubEvent::from_path(Path::new(&event_path))?.release_id()?;
        let repository = require(GITHUB_REPOSITORY_ENV)?;
        let token = require(GITHUB_TOKEN_ENV)?;
        let workspace = require(GITHUB_WORKSPACE_ENV)?;

        tracing::debug!(repository = %repository, release_id = %release_id, "loaded github config");

        Ok(Self::new(auth, release_id, repository, token, workspace))
    }

    pub fn auth(&self) -> &str {
        &self.auth
    }

    pub fn release_id(&self) -> &str {
        &self.release_id
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::ErrorKind;

    fn write_event(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("event.json");
        std::fs::write(&path, contents).expect("write event");
        path
    }

    fn full_env(event_path: &Path) -> HashMap<&'static str, String> {
        let mut env = HashMap::new();
        env.insert(AUTH_HEADER_ENV, "secret".to_string());
        env.insert(GITHUB_EVENT_PATH_ENV, event_path.display().to_string());
        env.insert(GITHUB_REPOSITORY_ENV, "octo/widgets".to_string());
        env.insert(GITHUB_TOKEN_ENV, "ghs_token".to_string());
        env.insert(GITHUB_WORKSPACE_ENV, "/github/workspace".to_string());
        env
    }

    #[test]
    fn loads_every_field_from_lookup() {
        let dir = tempfile::tempdir().expect("temp dir");
        let event = write_event(dir.path(), r#"{"release":{"id":"98765"}}"#);
        let env = full_env(&event);

        let config = GithubConfig::from_lookup(|key| env.get(key).cloned()).expect("config");
        assert_eq!(config.auth(), "secret");
        assert_eq!(config.release_id(), "98765");
        assert_eq!(config.repository(), "octo/widgets");
        assert_eq!(config.token(), "ghs_token");
        assert_eq!(config.workspace(), Path::new("/github/workspace"));
    }

    #[test]
    fn missing_key_is_named_in_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let event = write_event(dir.path(), r#"{"release":{"id":"1"}}"#);
        let mut env = full_env(&event);
        env.remove(GITHUB_TOKEN_ENV);

        let error = GithubConfig::from_lookup(|key| env.get(key).cloned()).expect_err("error");
        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert!(error.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn bad_event_fails_before_remaining_keys() {
        let dir = tempfile::tempdir().expect("temp dir");
        let event = write_event(dir.path(), r#"{"release":{}}"#);
        let mut env = full_env(&event);
        env.remove(GITHUB_WORKSPACE_ENV);

        let error = GithubConfig::from_lookup(|key| env.get(key).cloned()).expect_err("error");
        assert!(matches!(error, Error::ReleaseIdMissing));
    }
}
