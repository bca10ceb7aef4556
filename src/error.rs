use std::path::PathBuf;

/// Failure to obtain the listing page.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// Server answered with anything other than 200 OK.
    #[error("unexpected status {status_code} from {url}")]
    Status { url: String, status_code: u16 },

    /// Request never completed (timeout, DNS, refused connection, truncated body).
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Saved page could not be read from disk.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport { source, .. } if source.is_timeout())
    }
}

/// Page content is not shaped like a listing at all.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("content is not a listing page: {0}")]
    NotAListing(&'static str),

    #[error("invalid selector {0:?}")]
    Selector(&'static str),
}

#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Fatal outcome of a run, tagged by the stage that failed.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("write failed: {0}")]
    Write(#[from] WriteError),
}

impl ScrapeError {
    pub fn stage(&self) -> &'static str {
        match self {
            ScrapeError::Fetch(_) => "fetch",
            ScrapeError::Write(_) => "write",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            ScrapeError::Fetch(_) => 2,
            ScrapeError::Write(_) => 3,
        }
    }
}
