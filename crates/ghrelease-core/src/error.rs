use std::path::PathBuf;

/// Cause type returned by HTTP transports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Pattern,
    Filesystem,
    Transport,
    Protocol,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternRole {
    Inclusion,
    Exclusion,
}

impl std::fmt::Display for PatternRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternRole::Inclusion => write!(f, "inclusion"),
            PatternRole::Exclusion => write!(f, "exclusion"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing '{key}' environment variable; cannot proceed")]
    MissingEnv { key: &'static str },

    #[error("failed to read github event '{}'", .path.display())]
    EventRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse github event '{}'", .path.display())]
    EventParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("did not find release ID at '.release.id'")]
    ReleaseIdMissing,

    #[error("found release ID '{value}', could not cast to string")]
    ReleaseIdNotString { value: String },

    #[error("failed to parse URL '{url}'")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to compile '{pattern}' for {role}")]
    Pattern {
        pattern: String,
        role: PatternRole,
        #[source]
        source: globset::Error,
    },

    #[error("failed to walk workspace at '{}'", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open file '{}' for upload", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client")]
    HttpClient {
        #[source]
        source: BoxError,
    },

    #[error("failed to perform request '{method} {url}'")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("HTTP response ({status}) was not expected: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("HTTP response ({status}) was not expected and failed to read response")]
    UnreadableResponse {
        status: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to upload file '{}'", .path.display())]
    Upload {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingEnv { .. }
            | Error::EventRead { .. }
            | Error::EventParse { .. }
            | Error::ReleaseIdMissing
            | Error::ReleaseIdNotString { .. }
            | Error::BaseUrl { .. } => ErrorKind::Configuration,
            Error::Pattern { .. } => ErrorKind::Pattern,
            Error::Walk { .. } | Error::Open { .. } => ErrorKind::Filesystem,
            Error::HttpClient { .. } | Error::Transport { .. } => ErrorKind::Transport,
            Error::UnexpectedStatus { .. } | Error::UnreadableResponse { .. } => {
                ErrorKind::Protocol
            }
            Error::Upload { source, .. } => source.kind(),
        }
    }
}

/// Renders an error followed by each of its causes, separated by `": "`.
pub fn render_chain(error: &dyn std::error::Error) -> String {
    let mut rendered = error.to_string();
    let mut current = error.source();
    while let Some(cause) = current {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        current = cause.source();
    }
    rendered
}
