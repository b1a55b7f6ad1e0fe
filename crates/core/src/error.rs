//! Error types for rival-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Value could not be interpreted as a color.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// LED identifier outside the logo/wheel pair.
    #[error("invalid LED: {0}")]
    InvalidLed(i64),

    /// LED style outside 1..=4.
    #[error("invalid style {0}, valid values are 1, 2, 3 and 4")]
    InvalidStyle(i64),

    /// CPI slot other than 1 or 2.
    #[error("invalid CPI slot: {0}")]
    InvalidCpiSlot(i64),

    /// CPI value out of range or not a multiple of 50.
    #[error("invalid CPI value {0}: must be a multiple of 50 between 50 and 6500")]
    InvalidCpiValue(i64),

    /// Polling rate the firmware cannot represent.
    #[error("invalid polling rate {0}, valid values are 1000, 500, 250 and 125")]
    InvalidPollingRate(i64),

    /// A profile value had the wrong shape for its key.
    #[error("expected {expected}, got {value}")]
    InvalidType {
        expected: &'static str,
        value: String,
    },

    /// A profile key carried a value its setter rejected.
    #[error("invalid value for `{field}`: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// No stored profile matched, or the stored document could not be parsed.
    #[error("profile error: {0}")]
    ProfileResolution(String),

    /// Hardware identity matches neither protocol variant.
    #[error("unsupported hardware: {0}")]
    UnsupportedHardware(String),

    /// Profile file read/write failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HID device communication failure.
    #[error("HID error: {0}")]
    Hid(String),

    /// Device not found during enumeration.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// Permission denied opening the hidraw node.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

impl Error {
    /// Wrap a setter failure with the profile key that caused it.
    pub fn in_field(self, field: &'static str) -> Self {
        Error::InvalidField {
            field,
            source: Box::new(self),
        }
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
