//! 列表管线性质测试
//!
//! 随机订单集合上验证排序优先级、稳定性、分页覆盖、挂起切换往返和筛选。

use board_core::engine::{self, PaginationParams, compare_priority};
use board_core::mock::generate_mock_orders;
use board_core::{BoardAction, BoardStore, OrderId, OrderRecord, OrderStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

const ROUNDS: u64 = 20;

/// 生成随机订单 (故意制造大量相同键)
fn random_orders(rng: &mut impl Rng, count: u64) -> Vec<OrderRecord> {
    (1..=count)
        .map(|id| {
            let status = OrderStatus::ALL[rng.gen_range(0..OrderStatus::ALL.len())];
            let remaining = f64::from(rng.gen_range(0u32..4));
            let overtime = f64::from(rng.gen_range(0u32..3));
            OrderRecord::new(id, status, remaining, overtime).suspended(rng.gen_bool(0.3))
        })
        .collect()
}

fn ids(list: &[&OrderRecord]) -> Vec<OrderId> {
    list.iter().map(|r| r.id).collect()
}

#[test]
fn active_always_precedes_inactive() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..ROUNDS {
        let records = random_orders(&mut rng, 60);
        let sorted = engine::sort(records.iter().collect());

        let first_inactive = sorted.iter().position(|r| !r.is_active());
        if let Some(idx) = first_inactive {
            assert!(
                sorted[idx..].iter().all(|r| !r.is_active()),
                "active order found after an inactive one"
            );
        }
    }
}

#[test]
fn equal_keys_keep_input_order() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..ROUNDS {
        let records = random_orders(&mut rng, 80);
        let sorted = engine::sort(records.iter().collect());

        for pair in sorted.windows(2) {
            if compare_priority(pair[0], pair[1]) == Ordering::Equal {
                assert!(pair[0].id < pair[1].id, "stable order broken");
            }
        }
    }
}

#[test]
fn pages_cover_list_exactly_once() {
    let mut rng = StdRng::seed_from_u64(3);
    for round in 0..ROUNDS {
        let count = rng.gen_range(0..120);
        let records = random_orders(&mut rng, count);
        let page_size = rng.gen_range(1..30);
        let flag = round % 2 == 0;

        let full = engine::sort(engine::filter(&records, flag));
        let first = engine::display(&records, PaginationParams::new(1, page_size), flag);

        let mut concatenated = Vec::new();
        for page in 1..=first.total_pages {
            let slice = engine::display(&records, PaginationParams::new(page, page_size), flag);
            assert!(slice.data.len() <= page_size as usize);
            concatenated.extend(ids(&slice.data));
        }
        assert_eq!(concatenated, ids(&full));
    }
}

#[test]
fn double_toggle_round_trips() {
    let mut rng = StdRng::seed_from_u64(4);
    let records = random_orders(&mut rng, 40);
    for id in [1, 17, 40] {
        let once = engine::toggle_suspend(&records, OrderId(id)).unwrap();
        assert_ne!(once, records);
        let twice = engine::toggle_suspend(&once, OrderId(id)).unwrap();
        assert_eq!(twice, records);
    }
}

#[test]
fn filter_selects_exactly_suspended() {
    let mut rng = StdRng::seed_from_u64(5);
    let records = random_orders(&mut rng, 100);

    let suspended = engine::filter(&records, true);
    let expected: Vec<&OrderRecord> = records.iter().filter(|r| r.is_suspended).collect();
    assert_eq!(suspended, expected);

    let all = engine::filter(&records, false);
    assert_eq!(all, records.iter().collect::<Vec<_>>());
}

#[test]
fn scenario_overtime_then_pending_then_remaining() {
    let a = OrderRecord::new(1, OrderStatus::Error, 10.0, 5.0);
    let b = OrderRecord::new(2, OrderStatus::PendingDispatch, 3.0, 5.0);
    let c = OrderRecord::new(3, OrderStatus::Error, 6.0, 8.0);

    let sorted = engine::sort(vec![&a, &b, &c]);
    assert_eq!(ids(&sorted), vec![OrderId(3), OrderId(2), OrderId(1)]);
}

#[test]
fn scenario_completed_with_huge_overtime_sorts_last() {
    let done = OrderRecord::new(1, OrderStatus::Completed, 0.0, 99.0);
    let fresh = OrderRecord::new(2, OrderStatus::Error, 47.0, 0.0);

    let sorted = engine::sort(vec![&done, &fresh]);
    assert_eq!(ids(&sorted), vec![OrderId(2), OrderId(1)]);
}

#[test]
fn scenario_second_page_of_25() {
    let records: Vec<OrderRecord> = (1..=25)
        .map(|i| OrderRecord::new(i, OrderStatus::Completed, 0.0, 0.0))
        .collect();

    let page = engine::display(&records, PaginationParams::new(2, 20), false);
    assert_eq!(page.data.len(), 5);
    assert_eq!(
        ids(&page.data),
        (21..=25).map(OrderId).collect::<Vec<_>>()
    );
}

#[test]
fn store_walks_mock_data() {
    let orders = generate_mock_orders(128, Some(42));
    let mut store = BoardStore::new(orders).unwrap();

    let view = store.view();
    assert_eq!(view.rows.total_pages, 7);
    assert_eq!(view.stats.pending, 10);
    // 第一页全部是处理中订单 (128 条中处理中订单少于 20 条时除外)
    let active_total = store.records().iter().filter(|r| r.is_active()).count();
    let first_page_active = view.rows.data.iter().filter(|r| r.is_active()).count();
    assert_eq!(first_page_active, active_total.min(20));

    let mut seen = 0;
    loop {
        seen += store.view().rows.data.len();
        if store.dispatch(BoardAction::NextPage) != board_core::ActionOutcome::Updated {
            break;
        }
    }
    assert_eq!(seen, 128);
    assert_eq!(store.state().page, 7);
}
