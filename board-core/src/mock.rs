//! Mock 数据生成
//!
//! 看板没有后端，启动时在内存中生成一批售后订单。给定 seed 时结果可复现。

use chrono::{Duration, Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::models::{OrderId, OrderRecord, OrderStatus};

/// 默认生成数量
pub const DEFAULT_MOCK_COUNT: usize = 128;

/// 待处理订单上限
const MAX_PENDING: usize = 10;

const SOURCES: &[&str] = &["小程序", "电话", "美团", "转介绍", "抖音", "58同城"];
const NAMES: &[&str] = &["张三", "李四", "王五", "赵六", "孙七", "周八", "吴九", "郑十"];
const MASTERS: &[&str] = &["王师傅", "李师傅", "张师傅", "刘师傅", "陈师傅"];
const DISPATCHERS: &[&str] = &["客服A", "客服B", "客服C", "系统自动"];
const INITIATORS: &[&str] = &["用户自发", "系统生成", "客服代客"];
const REFUND_METHODS: &[&str] = &["原路退回", "微信转账", "支付宝", "线下现金"];
const ENTRY_STATUSES: &[&str] = &["已入账", "未入账", "挂账", "异常"];
const COMPLETION_TYPES: &[&str] = &["正常完结", "强制完结", "异常完结"];

/// Generate `count` orders relative to the local clock
pub fn generate_mock_orders(count: usize, seed: Option<u64>) -> Vec<OrderRecord> {
    generate_mock_orders_at(count, seed, Local::now().naive_local())
}

/// Generate `count` orders with creation times in the five days before `now`
pub fn generate_mock_orders_at(
    count: usize,
    seed: Option<u64>,
    now: NaiveDateTime,
) -> Vec<OrderRecord> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut pending = 0usize;
    let orders: Vec<OrderRecord> = (0..count)
        .map(|i| {
            let status = if pending < MAX_PENDING && i % 10 == 0 {
                pending += 1;
                OrderStatus::PendingDispatch
            } else {
                match i % 15 {
                    1 => OrderStatus::Void,
                    2 => OrderStatus::Returned,
                    3 => OrderStatus::Error,
                    _ => OrderStatus::Completed,
                }
            };
            mock_order(&mut rng, i, status, now)
        })
        .collect();

    tracing::info!(count = orders.len(), pending, "Generated mock orders");
    orders
}

fn mock_order(rng: &mut StdRng, i: usize, status: OrderStatus, now: NaiveDateTime) -> OrderRecord {
    let amount = Decimal::from(150 + (i % 20) as i64 * 20);
    let created_at = now - Duration::seconds(rng.gen_range(0..86_400 * 5));
    let completed_at = created_at + Duration::seconds(rng.gen_range(0..86_400));
    let is_completed = status == OrderStatus::Completed;
    let is_void = status == OrderStatus::Void;

    OrderRecord {
        id: OrderId(i as u64 + 1),
        status,
        remaining_time: f64::from(rng.gen_range(0u32..48)),
        overtime_alert: (rng.gen_range(0.0..24.0_f64) * 10.0).round() / 10.0,
        is_suspended: false,
        order_no: format!("ORD-{}", 20_230_000 + i),
        mobile: format!("13{}****{:04}", i % 9 + 1, (1000 + i) % 10_000),
        is_mall_order: rng.gen_bool(0.2),
        initiator: pick(INITIATORS, i),
        created_at,
        customer_name: pick(NAMES, i),
        source: pick(SOURCES, i),
        cashier_payment_amount: if rng.gen_bool(0.5) { amount } else { Decimal::ZERO },
        customer_request: if i % 5 == 0 { "加急处理" } else { "无特殊要求" }.to_string(),
        remark: if i % 8 == 0 { "客户要求下午上门".to_string() } else { String::new() },
        recorder_name: pick(DISPATCHERS, i),
        master_name: pick(MASTERS, i),
        revenue: amount * Decimal::new(3, 1),
        responsible_party: if i % 10 == 0 { "师傅" } else { "公司" }.to_string(),
        total_refund: if i % 20 == 0 { Decimal::from(50) } else { Decimal::ZERO },
        refund_method: (i % 20 == 0).then(|| pick(REFUND_METHODS, i)),
        entry_status: pick(ENTRY_STATUSES, i),
        completer_name: pick(DISPATCHERS, i + 2),
        completion_type: pick(COMPLETION_TYPES, i),
        completed_at: is_completed.then_some(completed_at),
        completion_note: if is_completed {
            "服务完成，客户满意".to_string()
        } else {
            String::new()
        },
        voider_name: is_void.then(|| "管理员".to_string()),
        void_reason: is_void.then(|| "客户取消".to_string()),
        total_amount: amount,
    }
}

fn pick(list: &[&str], i: usize) -> String {
    list[i % list.len()].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ensure_unique_ids;
    use chrono::NaiveDate;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_status_distribution() {
        let orders = generate_mock_orders_at(DEFAULT_MOCK_COUNT, Some(7), fixed_now());
        assert_eq!(orders.len(), 128);
        assert!(ensure_unique_ids(&orders).is_ok());

        let count = |s: OrderStatus| orders.iter().filter(|o| o.status == s).count();
        assert_eq!(count(OrderStatus::PendingDispatch), 10);
        assert_eq!(orders[0].status, OrderStatus::PendingDispatch);
        assert_eq!(orders[1].status, OrderStatus::Void);
        assert_eq!(orders[2].status, OrderStatus::Returned);
        assert_eq!(orders[3].status, OrderStatus::Error);
        assert_eq!(orders[4].status, OrderStatus::Completed);
        // 超过待处理上限后 i = 100 按 %15 规则落到已完成
        assert_eq!(orders[100].status, OrderStatus::Completed);
        assert_eq!(orders[106].status, OrderStatus::Void);
    }

    #[test]
    fn test_value_ranges() {
        let orders = generate_mock_orders_at(300, Some(11), fixed_now());
        for o in &orders {
            assert!((0.0..48.0).contains(&o.remaining_time));
            assert!((0.0..=24.0).contains(&o.overtime_alert));
            assert!(!o.is_suspended);
            assert!(o.created_at <= fixed_now());
            assert_eq!(o.completed_at.is_some(), o.status == OrderStatus::Completed);
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = generate_mock_orders_at(40, Some(3), fixed_now());
        let b = generate_mock_orders_at(40, Some(3), fixed_now());
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_fields() {
        let orders = generate_mock_orders_at(21, Some(1), fixed_now());
        assert_eq!(orders[0].order_no, "ORD-20230000");
        assert_eq!(orders[0].mobile, "131****1000");
        assert_eq!(orders[0].remark, "客户要求下午上门");
        assert_eq!(orders[20].refund_method.as_deref(), Some("原路退回"));
        assert_eq!(orders[1].void_reason.as_deref(), Some("客户取消"));
        assert_eq!(orders[5].total_amount, Decimal::from(250));
    }
}
