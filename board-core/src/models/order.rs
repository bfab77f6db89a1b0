//! Order Model

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 订单 ID (全局唯一，创建后不可变)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// 订单状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// 待处理 (等待派单)
    #[default]
    PendingDispatch,
    /// 已完成
    Completed,
    /// 作废
    Void,
    /// 已退回
    Returned,
    /// 报错
    Error,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::PendingDispatch,
        OrderStatus::Completed,
        OrderStatus::Void,
        OrderStatus::Returned,
        OrderStatus::Error,
    ];

    /// 是否仍在处理中
    ///
    /// Completed / Void / Returned 为终态，超时提醒对它们无意义。
    pub const fn is_active(&self) -> bool {
        !matches!(
            self,
            OrderStatus::Completed | OrderStatus::Void | OrderStatus::Returned
        )
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self, OrderStatus::PendingDispatch)
    }

    /// 界面显示文案
    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::PendingDispatch => "待处理",
            OrderStatus::Completed => "已完成",
            OrderStatus::Void => "作废",
            OrderStatus::Returned => "已退回",
            OrderStatus::Error => "报错",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 售后服务订单
///
/// 排序/筛选只读取 `id`, `status`, `remaining_time`, `overtime_alert`,
/// `is_suspended`；其余字段仅用于展示。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: OrderId,
    pub status: OrderStatus,
    /// 剩余时间 (小时)
    pub remaining_time: f64,
    /// 超时提醒 (小时)，未超时为 0
    pub overtime_alert: f64,
    /// 挂起标记 (用户可切换)
    #[serde(default)]
    pub is_suspended: bool,

    // === Display ===
    /// 订单号
    pub order_no: String,
    /// 手机号 (脱敏)
    pub mobile: String,
    /// 商城订单
    pub is_mall_order: bool,
    /// 发起人
    pub initiator: String,
    /// 创建时间
    pub created_at: NaiveDateTime,
    /// 客户名称
    pub customer_name: String,
    /// 订单来源
    pub source: String,
    /// 出纳付款金额
    pub cashier_payment_amount: Decimal,
    /// 客户诉求
    pub customer_request: String,
    /// 备注
    #[serde(default)]
    pub remark: String,
    /// 录单人
    pub recorder_name: String,
    /// 师傅
    pub master_name: String,
    /// 业绩
    pub revenue: Decimal,
    /// 责任方
    pub responsible_party: String,
    /// 总退款
    pub total_refund: Decimal,
    /// 退款方式
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_method: Option<String>,
    /// 入账状态
    pub entry_status: String,
    /// 办结人
    pub completer_name: String,
    /// 办结类型
    pub completion_type: String,
    /// 办结时间
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDateTime>,
    /// 完结说明
    #[serde(default)]
    pub completion_note: String,
    /// 作废人
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voider_name: Option<String>,
    /// 作废原因
    #[serde(skip_serializing_if = "Option::is_none")]
    pub void_reason: Option<String>,
    /// 应收金额
    pub total_amount: Decimal,
}

impl OrderRecord {
    /// Minimal record with empty display fields
    pub fn new(id: impl Into<OrderId>, status: OrderStatus, remaining_time: f64, overtime_alert: f64) -> Self {
        Self {
            id: id.into(),
            status,
            remaining_time,
            overtime_alert,
            is_suspended: false,
            order_no: String::new(),
            mobile: String::new(),
            is_mall_order: false,
            initiator: String::new(),
            created_at: NaiveDateTime::default(),
            customer_name: String::new(),
            source: String::new(),
            cashier_payment_amount: Decimal::ZERO,
            customer_request: String::new(),
            remark: String::new(),
            recorder_name: String::new(),
            master_name: String::new(),
            revenue: Decimal::ZERO,
            responsible_party: String::new(),
            total_refund: Decimal::ZERO,
            refund_method: None,
            entry_status: String::new(),
            completer_name: String::new(),
            completion_type: String::new(),
            completed_at: None,
            completion_note: String::new(),
            voider_name: None,
            void_reason: None,
            total_amount: Decimal::ZERO,
        }
    }

    pub fn suspended(mut self, is_suspended: bool) -> Self {
        self.is_suspended = is_suspended;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// 超时提醒是否需要高亮 (仅处理中订单)
    pub fn is_overdue(&self) -> bool {
        self.is_active() && self.overtime_alert > 0.0
    }
}
