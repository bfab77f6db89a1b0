//! 订单优先级排序
//!
//! 比较顺序 (严格优先级):
//! 1. 终态订单 (已完成/作废/已退回) 的超时值视为 [`INACTIVE_OVERTIME`]
//! 2. 超时提醒降序
//! 3. 待处理优先
//! 4. 剩余时间升序
//!
//! 使用稳定排序，四个键都相同的订单保持输入顺序。

use std::cmp::Ordering;

use crate::models::OrderRecord;

/// 终态订单的超时哨兵值，低于任何真实超时值
pub const INACTIVE_OVERTIME: f64 = -9999.0;

/// Overtime value used for ordering
pub fn effective_overtime(record: &OrderRecord) -> f64 {
    if record.is_active() {
        record.overtime_alert
    } else {
        INACTIVE_OVERTIME
    }
}

/// `-0.0` 与 `0.0` 按相等比较
fn normalize_zero(hours: f64) -> f64 {
    hours + 0.0
}

/// Pairwise comparator, `Less` means `a` is shown first
pub fn compare_priority(a: &OrderRecord, b: &OrderRecord) -> Ordering {
    normalize_zero(effective_overtime(b))
        .total_cmp(&normalize_zero(effective_overtime(a)))
        .then_with(|| b.status.is_pending().cmp(&a.status.is_pending()))
        .then_with(|| {
            normalize_zero(a.remaining_time).total_cmp(&normalize_zero(b.remaining_time))
        })
}

/// Sort a list of records by display priority
pub fn sort(mut list: Vec<&OrderRecord>) -> Vec<&OrderRecord> {
    list.sort_by(|a, b| compare_priority(a, b));
    list
}
