use crate::data::stock::StockDetail;

pub type FsResult<T> = Result<T, FsError>;

#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("[CSV Error] {0}")]
    CsvError(#[from] ::csv::Error),

    #[error("[Data Load Error] [{origin}] {message}")]
    DataLoadError { origin: String, message: String },

    /// The live part of a stock detail could not be fetched or is incomplete,
    /// `partial` holds whatever could be assembled with nulls for the rest.
    #[error("[Data Unavailable] [{symbol}] {message}")]
    DataUnavailable {
        symbol: String,
        message: String,
        partial: Option<Box<StockDetail>>,
    },

    #[error("[HTTP Request Error] {0}")]
    HttpRequestError(#[from] ::reqwest::Error),

    #[error("[HTTP Middleware Error] {0}")]
    HttpMiddlewareError(#[from] ::reqwest_middleware::Error),

    #[error("[HTTP Status Error] [{request}] {status}")]
    HttpStatusError { status: String, request: String },

    #[error("[Index Not Found] Information for '{0}' is not available or the index is invalid")]
    IndexNotFound(String),

    #[error("[Invalid] {message}")]
    Invalid { code: &'static str, message: String },

    #[error("[IO Error] {0}")]
    IoError(#[from] std::io::Error),

    #[error("[Parse Config Error] {0}")]
    ParseConfigError(#[from] ::confy::ConfyError),

    #[error("[Parse Enum Error] {0}")]
    ParseEnumError(#[from] ::strum::ParseError),

    #[error("[Parse URL Error] {0}")]
    ParseUrlError(#[from] url::ParseError),

    #[error("[Serde JSON Error] {0}")]
    SerdeJsonError(#[from] ::serde_json::Error),

    #[error("[Symbol Not Found] Information for '{0}' is not available or the symbol is invalid")]
    SymbolNotFound(String),
}

impl FsError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::Invalid {
            code: "INVALID_ARGUMENT",
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::CsvError(_) => "CSV_ERROR",
            Self::DataLoadError { .. } => "DATA_LOAD_ERROR",
            Self::DataUnavailable { .. } => "DATA_UNAVAILABLE",
            Self::HttpRequestError(_) | Self::HttpMiddlewareError(_) => "HTTP_REQUEST_ERROR",
            Self::HttpStatusError { .. } => "HTTP_STATUS_ERROR",
            Self::IndexNotFound(_) => "INDEX_NOT_FOUND",
            Self::Invalid { code, .. } => *code,
            Self::IoError(_) => "IO_ERROR",
            Self::ParseConfigError(_) => "PARSE_CONFIG_ERROR",
            Self::ParseEnumError(_) => "PARSE_ENUM_ERROR",
            Self::ParseUrlError(_) => "PARSE_URL_ERROR",
            Self::SerdeJsonError(_) => "SERDE_JSON_ERROR",
            Self::SymbolNotFound(_) => "SYMBOL_NOT_FOUND",
        }
    }
}
