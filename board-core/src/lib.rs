//! board-core - 售后订单看板核心
//!
//! 没有后端、没有持久化，所有数据在内存中生成。本 crate 提供:
//!
//! - **模型** (`models`): 订单记录与状态
//! - **列表管线** (`engine`): 筛选 → 排序 → 分页，纯函数
//! - **状态控制器** (`store`): 唯一的订单集合与界面状态，动作分发
//! - **浮层定位** (`overlay`): 操作菜单/提示框的位置计算与关闭规则
//! - **展示辅助** (`format`, `announcement`): 金额/时间格式、跑马灯
//! - **Mock 数据** (`mock`)
//!
//! # Example
//!
//! ```
//! use board_core::{BoardAction, BoardStore, mock};
//!
//! let orders = mock::generate_mock_orders(25, Some(1));
//! let mut store = BoardStore::new(orders).unwrap();
//! store.dispatch(BoardAction::NextPage);
//!
//! let view = store.view();
//! assert_eq!(view.rows.page, 2);
//! assert_eq!(view.rows.data.len(), 5);
//! ```

pub mod action;
pub mod announcement;
pub mod engine;
pub mod error;
pub mod format;
pub mod mock;
pub mod models;
pub mod overlay;
pub mod store;

// Re-exports
pub use action::{BoardAction, RowAction};
pub use engine::{Page, PaginationParams};
pub use error::{BoardError, BoardResult, ErrorCode};
pub use models::{OrderId, OrderRecord, OrderStatus};
pub use overlay::{Anchor, Bounds, Overlay, OverlayEvent, OverlayKind, OverlaySize};
pub use store::{ActionOutcome, BoardStats, BoardStore, BoardView, CompletionDraft, ViewState};
