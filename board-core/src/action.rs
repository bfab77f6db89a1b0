//! 看板动作
//!
//! 所有用户操作都是封闭枚举，由 [`crate::store::BoardStore::dispatch`] 穷举匹配。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::OrderId;

/// 行操作菜单项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowAction {
    /// 复制订单
    CopyOrder,
    /// 开票
    Invoice,
    /// 完单 (打开完成订单弹窗)
    Complete,
    /// 详情
    Details,
    /// 查资源
    FindResources,
    /// 添加报错
    ReportError,
    /// 作废
    Void,
    /// 其他收款
    OtherPayment,
    /// 挂起 / 取消挂起
    ToggleSuspend,
}

impl RowAction {
    /// 菜单显示顺序
    pub const MENU: [RowAction; 9] = [
        RowAction::CopyOrder,
        RowAction::Invoice,
        RowAction::Complete,
        RowAction::Details,
        RowAction::FindResources,
        RowAction::ReportError,
        RowAction::Void,
        RowAction::OtherPayment,
        RowAction::ToggleSuspend,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            RowAction::CopyOrder => "复制订单",
            RowAction::Invoice => "开票",
            RowAction::Complete => "完单",
            RowAction::Details => "详情",
            RowAction::FindResources => "查资源",
            RowAction::ReportError => "添加报错",
            RowAction::Void => "作废",
            RowAction::OtherPayment => "其他收款",
            RowAction::ToggleSuspend => "挂起/取消挂起",
        }
    }
}

/// 看板动作
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum BoardAction {
    /// 跳转页码 (越界夹取)
    SetPage(u32),
    NextPage,
    PrevPage,
    /// 修改每页数量 (页码重置为 1)
    SetPageSize(u32),
    /// 仅显示挂起订单 (页码重置为 1)
    SetShowSuspendedOnly(bool),
    ToggleSuspend(OrderId),
    /// 行操作菜单
    Row { id: OrderId, action: RowAction },
    /// 完成订单弹窗 - 确认
    ConfirmCompletion { amount: Decimal },
    /// 完成订单弹窗 - 取消
    CancelCompletion,
}
