//! Unified error codes for the order board
//!
//! Error codes are organized by category:
//! - 4xxx: Order errors
//! - 6xxx: View errors (pagination, overlays, modals)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the frontend and the
/// terminal client can share the same numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Duplicate order id in a collection
    DuplicateOrderId = 4008,

    // ==================== 6xxx: View ====================
    /// Page size must be at least 1
    InvalidPageSize = 6001,
    /// Page outside `[1, total_pages]`
    PageOutOfRange = 6002,
    /// No modal is open
    NoActiveModal = 6101,
    /// Invalid amount entered in a modal
    InvalidAmount = 6102,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::DuplicateOrderId => "Duplicate order id",

            // View
            ErrorCode::InvalidPageSize => "Page size must be at least 1",
            ErrorCode::PageOutOfRange => "Page is out of range",
            ErrorCode::NoActiveModal => "No modal is open",
            ErrorCode::InvalidAmount => "Invalid amount",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            4001 => Ok(ErrorCode::OrderNotFound),
            4008 => Ok(ErrorCode::DuplicateOrderId),

            6001 => Ok(ErrorCode::InvalidPageSize),
            6002 => Ok(ErrorCode::PageOutOfRange),
            6101 => Ok(ErrorCode::NoActiveModal),
            6102 => Ok(ErrorCode::InvalidAmount),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::InvalidPageSize.code(), 6001);
        assert_eq!(ErrorCode::InvalidAmount.code(), 6102);
    }

    #[test]
    fn test_error_code_roundtrip_u16() {
        for code in [
            ErrorCode::OrderNotFound,
            ErrorCode::DuplicateOrderId,
            ErrorCode::InvalidPageSize,
            ErrorCode::PageOutOfRange,
            ErrorCode::NoActiveModal,
            ErrorCode::InvalidAmount,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
    }

    #[test]
    fn test_error_code_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");
        let code: ErrorCode = serde_json::from_str("6001").unwrap();
        assert_eq!(code, ErrorCode::InvalidPageSize);
        assert!(serde_json::from_str::<ErrorCode>("0").is_err());
    }
}
