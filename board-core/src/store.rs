//! BoardStore - 看板状态控制器
//!
//! 持有唯一的订单集合和界面状态 (页码、每页数量、筛选开关、弹窗)，
//! 把只读引用交给无状态的 [`crate::engine`] 计算展示行。
//!
//! 页码策略: 筛选开关或每页数量变化时重置为 1；每次动作处理后
//! 都把页码夹到 `[1, max(1, total_pages)]`。

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::action::{BoardAction, RowAction};
use crate::engine::{self, DEFAULT_PAGE_SIZE, Page, PaginationParams};
use crate::error::{BoardError, BoardResult};
use crate::models::{OrderId, OrderRecord, OrderStatus};

/// 界面状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub page: u32,
    pub page_size: u32,
    pub show_suspended_only: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            show_suspended_only: false,
        }
    }
}

impl ViewState {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.page_size)
    }
}

/// 完成订单弹窗草稿
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionDraft {
    pub order_id: OrderId,
    pub order_no: String,
    /// 应收金额 (输入框默认值)
    pub amount_due: Decimal,
}

impl CompletionDraft {
    /// Parse the amount typed into the modal
    pub fn parse_amount(input: &str) -> BoardResult<Decimal> {
        let amount =
            Decimal::from_str(input.trim()).map_err(|_| BoardError::invalid_amount(input))?;
        if amount.is_sign_negative() {
            return Err(BoardError::invalid_amount(input));
        }
        Ok(amount)
    }
}

/// 动作处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// 状态已变化，需要重绘
    Updated,
    /// 无变化 (包括被吸收的错误)
    Unchanged,
    /// 仅回显提示
    Notice(String),
    /// 打开了完成订单弹窗
    ModalOpened(OrderId),
}

/// 数据概览
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total: usize,
    /// 待处理
    pub pending: usize,
    /// 已处理 (已完成)
    pub processed: usize,
    /// 挂起
    pub suspended: usize,
    /// 处理中且已超时
    pub active_overdue: usize,
}

impl BoardStats {
    pub fn collect(records: &[OrderRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            match r.status {
                OrderStatus::PendingDispatch => acc.pending += 1,
                OrderStatus::Completed => acc.processed += 1,
                _ => {}
            }
            if r.is_suspended {
                acc.suspended += 1;
            }
            if r.is_overdue() {
                acc.active_overdue += 1;
            }
            acc
        })
    }
}

/// 一次渲染所需的全部数据
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView<'a> {
    pub rows: Page<&'a OrderRecord>,
    pub stats: BoardStats,
    pub state: ViewState,
}

/// 看板状态控制器
#[derive(Debug, Clone)]
pub struct BoardStore {
    records: Vec<OrderRecord>,
    state: ViewState,
    completion: Option<CompletionDraft>,
}

impl BoardStore {
    /// Take ownership of a record collection, rejecting duplicate ids
    pub fn new(records: Vec<OrderRecord>) -> BoardResult<Self> {
        engine::ensure_unique_ids(&records)?;
        Ok(Self {
            records,
            state: ViewState::default(),
            completion: None,
        })
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.state.page_size = page_size.max(1);
        self.state.page = 1;
        self
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn completion(&self) -> Option<&CompletionDraft> {
        self.completion.as_ref()
    }

    pub fn find(&self, id: OrderId) -> Option<&OrderRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats::collect(&self.records)
    }

    /// Recompute the visible page from the full record set
    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            rows: engine::display(
                &self.records,
                self.state.pagination(),
                self.state.show_suspended_only,
            ),
            stats: self.stats(),
            state: self.state,
        }
    }

    fn filtered_len(&self) -> usize {
        engine::filter(&self.records, self.state.show_suspended_only).len()
    }

    fn total_pages(&self) -> u32 {
        engine::total_pages(self.filtered_len(), self.state.page_size)
    }

    fn clamp_page(&mut self) {
        let clamped = engine::clamp_page(self.state.page, self.total_pages());
        if clamped != self.state.page {
            tracing::debug!(from = self.state.page, to = clamped, "Clamped page");
            self.state.page = clamped;
        }
    }

    /// Apply one user action, then re-clamp the page
    pub fn dispatch(&mut self, action: BoardAction) -> ActionOutcome {
        tracing::info!(?action, "Dispatching board action");
        let outcome = self.apply(action);
        self.clamp_page();
        outcome
    }

    fn apply(&mut self, action: BoardAction) -> ActionOutcome {
        match action {
            BoardAction::SetPage(page) => {
                let params = PaginationParams::new(page, self.state.page_size);
                if let Err(e) = params.validate(self.filtered_len()) {
                    tracing::warn!(code = %e.code, "{}", e);
                }
                let target = engine::clamp_page(page, self.total_pages());
                self.set_page(target)
            }
            BoardAction::NextPage => {
                if self.state.page < self.total_pages() {
                    self.set_page(self.state.page + 1)
                } else {
                    ActionOutcome::Unchanged
                }
            }
            BoardAction::PrevPage => {
                if self.state.page > 1 {
                    self.set_page(self.state.page - 1)
                } else {
                    ActionOutcome::Unchanged
                }
            }
            BoardAction::SetPageSize(size) => {
                if size == 0 {
                    let e = BoardError::invalid_page_size(size);
                    tracing::warn!(code = %e.code, "{}", e);
                }
                let size = size.max(1);
                if size == self.state.page_size {
                    return ActionOutcome::Unchanged;
                }
                self.state.page_size = size;
                self.state.page = 1;
                ActionOutcome::Updated
            }
            BoardAction::SetShowSuspendedOnly(flag) => {
                if flag == self.state.show_suspended_only {
                    return ActionOutcome::Unchanged;
                }
                self.state.show_suspended_only = flag;
                self.state.page = 1;
                ActionOutcome::Updated
            }
            BoardAction::ToggleSuspend(id) => match engine::toggle_suspend(&self.records, id) {
                Ok(next) => {
                    self.records = next;
                    ActionOutcome::Updated
                }
                Err(e) => {
                    tracing::warn!(code = %e.code, "{}", e);
                    ActionOutcome::Unchanged
                }
            },
            BoardAction::Row { id, action } => self.apply_row(id, action),
            BoardAction::ConfirmCompletion { amount } => self.confirm_completion(amount),
            BoardAction::CancelCompletion => {
                if self.completion.take().is_some() {
                    ActionOutcome::Updated
                } else {
                    ActionOutcome::Unchanged
                }
            }
        }
    }

    fn set_page(&mut self, page: u32) -> ActionOutcome {
        if page == self.state.page {
            return ActionOutcome::Unchanged;
        }
        self.state.page = page;
        ActionOutcome::Updated
    }

    fn apply_row(&mut self, id: OrderId, action: RowAction) -> ActionOutcome {
        let Some((order_no, amount_due)) = self
            .find(id)
            .map(|order| (order.order_no.clone(), order.total_amount))
        else {
            let e = BoardError::order_not_found(id.0);
            tracing::warn!(code = %e.code, ?action, "{}", e);
            return ActionOutcome::Unchanged;
        };

        match action {
            RowAction::Complete => {
                self.completion = Some(CompletionDraft {
                    order_id: id,
                    order_no,
                    amount_due,
                });
                ActionOutcome::ModalOpened(id)
            }
            RowAction::ToggleSuspend => self.apply(BoardAction::ToggleSuspend(id)),
            RowAction::CopyOrder
            | RowAction::Invoice
            | RowAction::Details
            | RowAction::FindResources
            | RowAction::ReportError
            | RowAction::Void
            | RowAction::OtherPayment => {
                ActionOutcome::Notice(format!("已执行操作：{} (订单ID: {})", action.label(), id))
            }
        }
    }

    fn confirm_completion(&mut self, amount: Decimal) -> ActionOutcome {
        let Some(draft) = self.completion.take() else {
            let e = BoardError::no_active_modal();
            tracing::warn!(code = %e.code, "{}", e);
            return ActionOutcome::Unchanged;
        };
        if amount.is_sign_negative() {
            let e = BoardError::invalid_amount(amount.to_string());
            tracing::warn!(code = %e.code, "{}", e);
            self.completion = Some(draft);
            return ActionOutcome::Unchanged;
        }

        tracing::info!(order_id = %draft.order_id, %amount, "Completion confirmed");
        ActionOutcome::Notice(format!(
            "订单 {} 已确认完成，实收 ¥{}",
            draft.order_no,
            crate::format::format_currency(amount)
        ))
    }
}
