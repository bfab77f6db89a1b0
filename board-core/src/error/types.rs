//! Error types

use super::codes::ErrorCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Board error with structured error code and details
///
/// Every failure inside the board is local: the store absorbs these and keeps
/// its last valid state, so they only surface in logs and tests.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct BoardError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (ids, offending values)
    pub details: Option<HashMap<String, Value>>,
}

impl BoardError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// 订单不存在
    pub fn order_not_found(id: u64) -> Self {
        Self::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
            .with_detail("order_id", id)
    }

    /// 订单 ID 重复
    pub fn duplicate_order_id(id: u64) -> Self {
        Self::with_message(ErrorCode::DuplicateOrderId, format!("Duplicate order id {}", id))
            .with_detail("order_id", id)
    }

    /// Create an invalid page size error
    pub fn invalid_page_size(size: u32) -> Self {
        Self::new(ErrorCode::InvalidPageSize).with_detail("page_size", size)
    }

    /// Create a page out of range error
    pub fn page_out_of_range(page: u32, total_pages: u32) -> Self {
        Self::with_message(
            ErrorCode::PageOutOfRange,
            format!("Page {} is outside 1..={}", page, total_pages),
        )
        .with_detail("page", page)
        .with_detail("total_pages", total_pages)
    }

    /// Create a no active modal error
    pub fn no_active_modal() -> Self {
        Self::new(ErrorCode::NoActiveModal)
    }

    /// Create an invalid amount error
    pub fn invalid_amount(input: impl Into<String>) -> Self {
        let raw = input.into();
        Self::with_message(ErrorCode::InvalidAmount, format!("Invalid amount: {}", raw))
            .with_detail("input", raw)
    }
}

/// Result type for board operations
pub type BoardResult<T> = Result<T, BoardError>;
