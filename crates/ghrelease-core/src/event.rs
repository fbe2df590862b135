use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::Error;

const RELEASE_ID_POINTER: &str = "/release/id";

/// Parsed contents of the workflow event payload.
#[derive(Clone, Debug)]
pub struct GithubEvent {
    data: Value,
}

impl GithubEvent {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).map_err(|source| Error::EventRead {
            path: path.to_path_buf(),
            source,
        })?;
        let data = serde_json::from_str(&contents).map_err(|source| Error::EventParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { data })
    }

    pub fn from_value(data: Value) -> Self {
        Self { data }
    }

    /// Evaluates `.release.id`; only a JSON string is accepted.
    pub fn release_id(&self) -> Result<String, Error> {
        match self.data.pointer(RELEASE_ID_POINTER) {
            None | Some(Value::Null) => Err(Error::ReleaseIdMissing),
            Some(Value::String(id)) => Ok(id.clone()),
            Some(other) => Err(Error::ReleaseIdNotString {
                value: other.to_string(),
            }),
        }
    }
}
