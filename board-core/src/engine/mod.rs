//! OrderListEngine - 列表展示管线
//!
//! 纯函数，不持有任何状态:
//!
//! ```text
//! records → filter(仅挂起) → sort(优先级) → paginate(page, page_size) → rows
//! ```
//!
//! 每次变更 (挂起切换) 后都从完整记录集重新计算，不缓存派生列表。

pub mod pagination;
pub mod priority;

use std::collections::HashSet;

use crate::error::{BoardError, BoardResult};
use crate::models::{OrderId, OrderRecord};

pub use pagination::{
    DEFAULT_PAGE_SIZE, Page, PaginationParams, clamp_page, paginate, total_pages,
};
pub use priority::{INACTIVE_OVERTIME, compare_priority, effective_overtime, sort};

/// Keep only suspended records when `show_suspended_only` is set, identity otherwise
pub fn filter(records: &[OrderRecord], show_suspended_only: bool) -> Vec<&OrderRecord> {
    records
        .iter()
        .filter(|r| !show_suspended_only || r.is_suspended)
        .collect()
}

/// Copy of `records` with the suspend flag of `id` negated
///
/// Unknown ids leave the input untouched and report `OrderNotFound`.
pub fn toggle_suspend(records: &[OrderRecord], id: OrderId) -> BoardResult<Vec<OrderRecord>> {
    let idx = records
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| BoardError::order_not_found(id.0))?;

    let mut next = records.to_vec();
    next[idx].is_suspended = !next[idx].is_suspended;
    Ok(next)
}

/// `paginate(sort(filter(records, flag)), page, page_size)`
pub fn display(
    records: &[OrderRecord],
    params: PaginationParams,
    show_suspended_only: bool,
) -> Page<&OrderRecord> {
    let ordered = sort(filter(records, show_suspended_only));
    let page = paginate(&ordered, params.page, params.page_size);
    tracing::debug!(
        total = page.total,
        page = page.page,
        total_pages = page.total_pages,
        show_suspended_only,
        "Recomputed order list"
    );
    page
}

/// Check the id uniqueness invariant
pub fn ensure_unique_ids(records: &[OrderRecord]) -> BoardResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id) {
            return Err(BoardError::duplicate_order_id(record.id.0));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::models::OrderStatus;

    fn sample() -> Vec<OrderRecord> {
        vec![
            OrderRecord::new(1, OrderStatus::Completed, 5.0, 3.0).suspended(true),
            OrderRecord::new(2, OrderStatus::Error, 8.0, 1.0),
            OrderRecord::new(3, OrderStatus::PendingDispatch, 2.0, 1.0).suspended(true),
            OrderRecord::new(4, OrderStatus::Error, 1.0, 6.0),
        ]
    }

    #[test]
    fn test_filter_suspended_only() {
        let records = sample();
        let ids: Vec<u64> = filter(&records, true).iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_filter_identity() {
        let records = sample();
        let filtered = filter(&records, false);
        assert_eq!(filtered.len(), records.len());
        assert!(filtered.iter().zip(records.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_toggle_suspend() {
        let records = sample();
        let next = toggle_suspend(&records, OrderId(2)).unwrap();
        assert!(next[1].is_suspended);
        assert_eq!(next[0], records[0]);
        assert_eq!(next[2], records[2]);
        assert_eq!(next[3], records[3]);

        let back = toggle_suspend(&next, OrderId(2)).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_toggle_unknown_id() {
        let records = sample();
        let err = toggle_suspend(&records, OrderId(99)).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[test]
    fn test_display_pipeline() {
        let records = sample();
        let page = display(&records, PaginationParams::new(1, 2), false);
        let ids: Vec<u64> = page.data.iter().map(|r| r.id.0).collect();
        // 4 (超时6) → 3 (超时1, 待处理) → 2 (超时1) → 1 (已完成)
        assert_eq!(ids, vec![4, 3]);
        assert_eq!(page.total_pages, 2);

        let suspended = display(&records, PaginationParams::new(1, 20), true);
        let ids: Vec<u64> = suspended.data.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_ensure_unique_ids() {
        let mut records = sample();
        assert!(ensure_unique_ids(&records).is_ok());
        records.push(OrderRecord::new(2, OrderStatus::Void, 0.0, 0.0));
        assert_eq!(
            ensure_unique_ids(&records).unwrap_err().code,
            ErrorCode::DuplicateOrderId
        );
    }
}
