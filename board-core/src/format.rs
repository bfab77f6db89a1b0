//! 展示格式化

use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::OrderRecord;

/// 金额: 整数不带小数，否则保留一位
pub fn format_currency(amount: Decimal) -> String {
    if amount.fract().is_zero() {
        amount.trunc().normalize().to_string()
    } else {
        format!("{:.1}", amount)
    }
}

/// 时间: `M-D HH:MM`
pub fn format_time(time: NaiveDateTime) -> String {
    format!(
        "{}-{} {:02}:{:02}",
        time.month(),
        time.day(),
        time.hour(),
        time.minute()
    )
}

/// Optional timestamp, `-` when absent
pub fn format_optional_time(time: Option<NaiveDateTime>) -> String {
    time.map(format_time).unwrap_or_else(|| "-".to_string())
}

/// Overtime cell text: `/` for finished orders, hours otherwise
pub fn format_overtime(record: &OrderRecord) -> String {
    if record.is_active() {
        format!("{}", record.overtime_alert)
    } else {
        "/".to_string()
    }
}

/// 剩余时间紧急程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainingUrgency {
    /// 少于 12 小时
    Critical,
    /// 少于 24 小时
    Warning,
    Normal,
}

impl RemainingUrgency {
    pub fn classify(hours: f64) -> Self {
        if hours < 12.0 {
            Self::Critical
        } else if hours < 24.0 {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// Empty text shown as `-`
pub fn or_dash(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}

/// Cut to `max_chars`, appending `…` when something was dropped
pub fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
    if text.chars().count() <= max_chars {
        return (text.to_string(), false);
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    (out, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;
    use chrono::NaiveDate;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Decimal::new(150, 0)), "150");
        assert_eq!(format_currency(Decimal::new(15000, 2)), "150");
        assert_eq!(format_currency(Decimal::new(1575, 1)), "157.5");
        assert_eq!(format_currency(Decimal::new(4505, 1)), "450.5");
        assert_eq!(format_currency(Decimal::ZERO), "0");
    }

    #[test]
    fn test_format_time() {
        let t = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(format_time(t), "3-7 09:05");
        assert_eq!(format_optional_time(None), "-");
    }

    #[test]
    fn test_format_overtime() {
        let active = OrderRecord::new(1, OrderStatus::Error, 1.0, 3.5);
        let done = OrderRecord::new(2, OrderStatus::Completed, 1.0, 3.5);
        assert_eq!(format_overtime(&active), "3.5");
        assert_eq!(format_overtime(&done), "/");
    }

    #[test]
    fn test_urgency() {
        assert_eq!(RemainingUrgency::classify(0.0), RemainingUrgency::Critical);
        assert_eq!(RemainingUrgency::classify(11.9), RemainingUrgency::Critical);
        assert_eq!(RemainingUrgency::classify(12.0), RemainingUrgency::Warning);
        assert_eq!(RemainingUrgency::classify(23.0), RemainingUrgency::Warning);
        assert_eq!(RemainingUrgency::classify(24.0), RemainingUrgency::Normal);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("客户要求下午上门", 20), ("客户要求下午上门".to_string(), false));
        assert_eq!(truncate_chars("客户要求下午上门", 5), ("客户要求…".to_string(), true));
        assert_eq!(or_dash(""), "-");
    }
}
