//! Floating overlay positioning (action menus, tooltips)
//!
//! Position is computed once when the overlay opens and never tracked
//! afterwards. Callers render the overlay on a top-level layer, after the
//! table, so the table's scroll area never clips it.
//!
//! Units are whatever the caller measures in (pixels, terminal cells).

use serde::{Deserialize, Serialize};

use crate::models::OrderId;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Half-open containment test
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Overlay dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlaySize {
    pub width: i32,
    pub height: i32,
}

impl OverlaySize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Top-left corner of a placed overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayPosition {
    pub top: i32,
    pub left: i32,
}

/// 相对触发元素的摆放方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// 触发元素下方，右边缘对齐 (操作菜单)
    BelowEnd,
    /// 触发元素上方，水平居中 (提示框)
    AboveCenter,
}

/// Placement plus the gap between trigger and overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub placement: Placement,
    pub gap: i32,
}

impl Anchor {
    /// 操作菜单: 下方 5 个单位，右对齐
    pub const MENU: Anchor = Anchor {
        placement: Placement::BelowEnd,
        gap: 5,
    };

    /// 提示框: 上方居中
    pub const TOOLTIP: Anchor = Anchor {
        placement: Placement::AboveCenter,
        gap: 4,
    };

    pub const fn with_gap(mut self, gap: i32) -> Self {
        self.gap = gap;
        self
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::MENU
    }
}

/// Place an overlay next to its trigger using the menu anchor
pub fn compute_overlay_position(
    trigger: Bounds,
    overlay: OverlaySize,
    viewport: Bounds,
) -> OverlayPosition {
    compute_anchored_position(Anchor::MENU, trigger, overlay, viewport)
}

/// Place an overlay next to its trigger, flipping vertically when the
/// preferred side overflows and the other side fits, then clamping into the
/// viewport. Overlays larger than the viewport pin to its top/left edge.
pub fn compute_anchored_position(
    anchor: Anchor,
    trigger: Bounds,
    overlay: OverlaySize,
    viewport: Bounds,
) -> OverlayPosition {
    let below = trigger.bottom() + anchor.gap;
    let above = trigger.y - anchor.gap - overlay.height;
    let fits_below = below + overlay.height <= viewport.bottom();
    let fits_above = above >= viewport.y;

    let (top, left) = match anchor.placement {
        Placement::BelowEnd => {
            let top = if !fits_below && fits_above { above } else { below };
            (top, trigger.right() - overlay.width)
        }
        Placement::AboveCenter => {
            let top = if !fits_above && fits_below { below } else { above };
            (top, trigger.x + (trigger.width - overlay.width) / 2)
        }
    };

    OverlayPosition {
        top: clamp_axis(top, overlay.height, viewport.y, viewport.bottom()),
        left: clamp_axis(left, overlay.width, viewport.x, viewport.right()),
    }
}

fn clamp_axis(start: i32, len: i32, min: i32, max: i32) -> i32 {
    let upper = (max - len).max(min);
    start.clamp(min, upper)
}

/// 浮层类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayKind {
    /// 行操作菜单
    ActionMenu(OrderId),
    /// 截断文本提示
    Tooltip(OrderId),
}

/// 关闭浮层的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    /// 指针按下 (任意按钮)
    PointerDown { x: i32, y: i32 },
    /// 任意祖先滚动
    Scroll,
}

/// An open overlay with its position frozen at open time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub kind: OverlayKind,
    pub trigger: Bounds,
    pub bounds: Bounds,
}

impl Overlay {
    pub fn open(
        kind: OverlayKind,
        anchor: Anchor,
        trigger: Bounds,
        size: OverlaySize,
        viewport: Bounds,
    ) -> Self {
        let pos = compute_anchored_position(anchor, trigger, size, viewport);
        tracing::debug!(?kind, top = pos.top, left = pos.left, "Overlay opened");
        Self {
            kind,
            trigger,
            bounds: Bounds::new(pos.left, pos.top, size.width, size.height),
        }
    }

    /// Pointer-down outside both trigger and overlay, or any scroll
    ///
    /// Presses on the trigger are left to the trigger's own toggle handler.
    pub fn should_dismiss(&self, event: OverlayEvent) -> bool {
        match event {
            OverlayEvent::Scroll => true,
            OverlayEvent::PointerDown { x, y } => {
                !self.trigger.contains(x, y) && !self.bounds.contains(x, y)
            }
        }
    }
}
