use thiserror::Error;

/// A page did not match the shape its parser expects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{page} page: missing {field}")]
    MissingField {
        page: &'static str,
        field: &'static str,
    },

    #[error("{page} page: malformed {field} '{value}'")]
    Malformed {
        page: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("invalid CSS selector '{css}'")]
    InvalidSelector { css: &'static str },

    #[error("invalid pattern '{pattern}'")]
    InvalidPattern { pattern: &'static str },
}

/// Date text in neither of the governing body's formats.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot parse date '{input}' (expected {expected})")]
pub struct DateParseError {
    pub input: String,
    pub expected: &'static str,
}

/// Failure inside the data-acquisition layer.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Date(#[from] DateParseError),
}

/// Every way a rating estimate can fail. None of these are retried.
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("data acquisition failed: {0}")]
    Acquisition(AcquisitionError),

    #[error(transparent)]
    DateParse(#[from] DateParseError),

    #[error("rating schedule has no submission deadline after {now}")]
    ScheduleExhausted { now: i64 },

    #[error("no rated rounds inside the evaluation window")]
    InsufficientData,
}

impl From<AcquisitionError> for EstimateError {
    fn from(error: AcquisitionError) -> Self {
        match error {
            AcquisitionError::Date(date) => EstimateError::DateParse(date),
            other => EstimateError::Acquisition(other),
        }
    }
}

impl From<ParseError> for EstimateError {
    fn from(error: ParseError) -> Self {
        EstimateError::Acquisition(AcquisitionError::Parse(error))
    }
}
