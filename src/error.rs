use crate::echonet::Property;
use thiserror::Error;

/// Why a hex register value was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("empty value")]
    Empty,

    #[error("odd number of hex digits")]
    OddLength,

    #[error("invalid hex digit")]
    InvalidDigit,

    #[error("does not fit in {bits} bits")]
    Overflow { bits: u32 },
}

/// Errors raised while decoding Echonet Lite smart-meter registers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EchonetError {
    #[error("unsupported epc={epc}")]
    UnsupportedProperty { epc: String },

    #[error("invalid value {value:?} for epc={property}: {reason}")]
    Parse {
        property: Property,
        value: String,
        reason: ParseFailure,
    },

    #[error("unexpected cumulative energy unit: e1=0x{code:x}")]
    UnexpectedUnitCode { code: u8 },
}

impl EchonetError {
    /// Stable label value used for the error counter
    pub fn kind(&self) -> &'static str {
        match self {
            EchonetError::UnsupportedProperty { .. } => "unsupported_property",
            EchonetError::Parse { .. } => "parse",
            EchonetError::UnexpectedUnitCode { .. } => "unexpected_unit_code",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("NatureRemo API error: {endpoint} returned code={status}")]
    NatureRemoApi { endpoint: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] EchonetError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExporterError>;
