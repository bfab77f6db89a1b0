//! Unified error system for the order board
//!
//! - [`ErrorCode`]: Standardized error codes
//! - [`BoardError`]: Error type with code, message and details
//!
//! # Error Code Ranges
//!
//! - 4xxx: Order errors
//! - 6xxx: View errors
//!
//! # Example
//!
//! ```
//! use board_core::error::{BoardError, ErrorCode};
//!
//! let err = BoardError::order_not_found(7);
//! assert_eq!(err.code, ErrorCode::OrderNotFound);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{BoardError, BoardResult};
