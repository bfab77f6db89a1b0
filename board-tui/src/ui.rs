//! 看板绘制
//!
//! 浮层 (操作菜单、提示框、完成订单弹窗) 在表格之后绘制，
//! 不受表格区域裁剪。

use board_core::format::{
    RemainingUrgency, format_currency, format_optional_time, format_overtime, format_time, or_dash,
    truncate_chars,
};
use board_core::{OrderRecord, OrderStatus, OverlayKind, Page};
use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap,
};

use crate::app::{App, TOOLTIP_MAX_WIDTH, to_rect};

/// 操作列 (点击打开菜单)
pub const ACTION_COLUMN: usize = 0;
/// 客户诉求列 (提示框锚点)
pub const REQUEST_COLUMN: usize = 10;
pub const COLUMN_COUNT: usize = 17;

const HEADERS: [&str; COLUMN_COUNT] = [
    "操作", "状态", "剩余", "超时", "挂起", "订单号", "手机号", "客户", "来源", "创建时间",
    "客户诉求", "备注", "师傅", "应收", "责任方", "办结时间", "完结说明",
];

const WIDTHS: [Constraint; COLUMN_COUNT] = [
    Constraint::Length(6),
    Constraint::Length(6),
    Constraint::Length(5),
    Constraint::Length(5),
    Constraint::Length(4),
    Constraint::Length(12),
    Constraint::Length(13),
    Constraint::Length(6),
    Constraint::Length(8),
    Constraint::Length(11),
    Constraint::Length(12),
    Constraint::Length(10),
    Constraint::Length(6),
    Constraint::Length(7),
    Constraint::Length(6),
    Constraint::Length(11),
    Constraint::Length(10),
];

const COLUMN_SPACING: u16 = 1;

// 截断字符数 (中文占两列)
const REQUEST_CHARS: usize = 6;
const REMARK_CHARS: usize = 5;
const NOTE_CHARS: usize = 5;

const ORANGE: Color = Color::Rgb(255, 165, 0);

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let [banner, stats, table, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(2),
    ])
    .areas(area);

    app.geometry.viewport = area;
    app.geometry.banner = banner;

    render_banner(frame, app, banner);
    render_stats(frame, app, stats);
    render_table(frame, app, table);
    render_footer(frame, app, footer);
    render_overlay(frame, app);
    render_completion(frame, app);
}

fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.marquee.is_paused() {
        " 📢 通知公告 (暂停) "
    } else {
        " 📢 通知公告 "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    let text = app.marquee.window(usize::from(inner.width));
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::Yellow))
            .block(block),
        area,
    );
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.store.stats();
    let state = app.store.state();
    let filter = if state.show_suspended_only {
        Span::styled(" [仅看挂起] ", Style::default().fg(Color::Black).bg(Color::Yellow))
    } else {
        Span::raw("")
    };
    let line = Line::from(vec![
        Span::styled(" 售后订单 ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("总数 {} ", stats.total)),
        Span::styled(
            format!("待处理 {} ", stats.pending),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("已处理 {} ", stats.processed),
            Style::default().fg(Color::Green),
        ),
        Span::raw(format!("挂起 {} ", stats.suspended)),
        Span::styled(
            format!("超时 {} ", stats.active_overdue),
            Style::default().fg(Color::Red),
        ),
        filter,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn status_style(status: OrderStatus) -> Style {
    let color = match status {
        OrderStatus::PendingDispatch => Color::Yellow,
        OrderStatus::Completed => Color::Green,
        OrderStatus::Void => Color::DarkGray,
        OrderStatus::Returned => Color::Magenta,
        OrderStatus::Error => Color::Red,
    };
    Style::default().fg(color)
}

fn remaining_style(record: &OrderRecord) -> Style {
    if !record.is_active() {
        return Style::default().fg(Color::DarkGray);
    }
    match RemainingUrgency::classify(record.remaining_time) {
        RemainingUrgency::Critical => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        RemainingUrgency::Warning => Style::default().fg(ORANGE),
        RemainingUrgency::Normal => Style::default(),
    }
}

fn truncated(text: &str, max_chars: usize) -> String {
    truncate_chars(or_dash(text), max_chars).0
}

fn order_row(record: &OrderRecord) -> Row<'static> {
    let mobile = if record.is_mall_order {
        format!("{}商", record.mobile)
    } else {
        record.mobile.clone()
    };
    let overtime_style = if record.is_overdue() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let cells = vec![
        Cell::from("操作▾").style(Style::default().fg(Color::Cyan)),
        Cell::from(record.status.label()).style(status_style(record.status)),
        Cell::from(format!("{}h", record.remaining_time)).style(remaining_style(record)),
        Cell::from(format_overtime(record)).style(overtime_style),
        Cell::from(if record.is_suspended { "挂" } else { "" })
            .style(Style::default().fg(Color::Yellow)),
        Cell::from(record.order_no.clone()),
        Cell::from(mobile),
        Cell::from(record.customer_name.clone()),
        Cell::from(record.source.clone()),
        Cell::from(format_time(record.created_at)),
        Cell::from(truncated(&record.customer_request, REQUEST_CHARS)),
        Cell::from(truncated(&record.remark, REMARK_CHARS)),
        Cell::from(record.master_name.clone()),
        Cell::from(format!("¥{}", format_currency(record.total_amount))),
        Cell::from(record.responsible_party.clone()),
        Cell::from(format_optional_time(record.completed_at)),
        Cell::from(truncated(&record.completion_note, NOTE_CHARS)),
    ];

    let row = Row::new(cells);
    if record.is_suspended {
        row.style(Style::default().add_modifier(Modifier::ITALIC))
    } else {
        row
    }
}

fn render_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let view = app.store.view();
    let block = Block::default()
        .title(format!(" 订单列表 第 {}/{} 页 ", view.rows.page, view.rows.total_pages))
        .borders(Borders::ALL);
    let inner = block.inner(area);

    // 与 Table 内部列布局一致，供鼠标命中检测
    app.geometry.body = Rect {
        y: inner.y.saturating_add(1),
        height: inner.height.saturating_sub(1),
        ..inner
    };
    app.geometry.columns = Layout::horizontal(WIDTHS)
        .flex(Flex::Start)
        .spacing(COLUMN_SPACING)
        .split(Rect::new(inner.x, 0, inner.width, 1))
        .to_vec();

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
        .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::White));
    let rows: Vec<Row> = view.rows.data.iter().map(|r| order_row(r)).collect();

    let table = Table::new(rows, WIDTHS)
        .header(header)
        .block(block)
        .flex(Flex::Start)
        .column_spacing(COLUMN_SPACING)
        .row_highlight_style(Style::default().bg(Color::DarkGray));

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.store.view().rows;
    let (first, last) = rows.display_range();
    let mut spans = vec![
        Span::raw(format!(" 显示 {} 到 {} 条，共 {} 条订单", first, last, rows.total)),
        Span::styled(
            format!("   每页 {} 条   ", rows.limit),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    spans.extend(pager(&rows));
    let summary = Line::from(spans);

    let second = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            format!(" {}", notice),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            " ←/→ 翻页  ↑/↓ 选择  空格 挂起  f 仅看挂起  +/- 每页  Enter 操作  t 详情  p 暂停公告  q 退出",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(vec![summary, second]), area);
}

fn pager_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    }
}

/// 翻页按钮，首页/末页时置灰
fn pager<T>(rows: &Page<T>) -> [Span<'static>; 3] {
    [
        Span::styled("‹ 上一页", pager_style(rows.has_prev())),
        Span::raw(format!(" {}/{} ", rows.page, rows.total_pages)),
        Span::styled("下一页 ›", pager_style(rows.has_next())),
    ]
}

/// Full text of the fields that the table truncates
pub fn tooltip_lines(record: &OrderRecord) -> Vec<String> {
    let mut lines = Vec::new();
    let fields = [
        ("客户诉求", record.customer_request.as_str()),
        ("备注", record.remark.as_str()),
        ("完结说明", record.completion_note.as_str()),
        ("作废原因", record.void_reason.as_deref().unwrap_or("")),
    ];
    for (label, text) in fields {
        if !text.is_empty() {
            lines.push(format!("{}: {}", label, text));
        }
    }
    lines
}

/// Tooltip size including borders, wrapping to the maximum width
pub fn tooltip_size(lines: &[String], viewport_width: u16) -> (u16, u16) {
    let max_inner = TOOLTIP_MAX_WIDTH.min(viewport_width).saturating_sub(2).max(1);
    let widest = lines
        .iter()
        .map(|l| Line::from(l.as_str()).width())
        .max()
        .unwrap_or(0);
    let inner = u16::try_from(widest).unwrap_or(u16::MAX).clamp(1, max_inner);
    let height: usize = lines
        .iter()
        .map(|l| Line::from(l.as_str()).width().max(1).div_ceil(usize::from(inner)))
        .sum();
    (inner + 2, u16::try_from(height).unwrap_or(u16::MAX).saturating_add(2))
}

fn render_overlay(frame: &mut Frame, app: &App) {
    let Some(overlay) = app.overlay else {
        return;
    };
    let rect = to_rect(overlay.bounds).intersection(frame.area());

    match overlay.kind {
        OverlayKind::ActionMenu(id) => {
            let items: Vec<ListItem> = app
                .menu_labels(id)
                .into_iter()
                .map(ListItem::new)
                .collect();
            let list = List::new(items)
                .block(
                    Block::default()
                        .title(format!(" #{} ", id))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                )
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            let mut state = ListState::default().with_selected(Some(app.menu_cursor));
            frame.render_widget(Clear, rect);
            frame.render_stateful_widget(list, rect, &mut state);
        }
        OverlayKind::Tooltip(id) => {
            let lines: Vec<Line> = app
                .store
                .find(id)
                .map(tooltip_lines)
                .unwrap_or_default()
                .into_iter()
                .map(Line::from)
                .collect();
            let tooltip = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .style(Style::default().fg(Color::White).bg(Color::Black))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(Clear, rect);
            frame.render_widget(tooltip, rect);
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_completion(frame: &mut Frame, app: &App) {
    let Some(draft) = app.store.completion() else {
        return;
    };
    let rect = centered(frame.area(), 44, 8);
    let block = Block::default()
        .title(" 完成订单 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(rect);

    let label = "实收金额: ";
    let lines = vec![
        Line::from(format!("订单号: {}", draft.order_no)),
        Line::from(format!("应收金额: ¥{}", format_currency(draft.amount_due))),
        Line::from(vec![
            Span::raw(label),
            Span::styled(
                app.amount_input.value(),
                Style::default().add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter 确认  Esc 取消",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);

    let label_width = u16::try_from(Line::from(label).width()).unwrap_or(0);
    let cursor = u16::try_from(app.amount_input.visual_cursor()).unwrap_or(0);
    let x = (inner.x + label_width + cursor).min(inner.right().saturating_sub(1));
    frame.set_cursor_position(Position::new(x, inner.y + 2));
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::BoardStore;
    use board_core::announcement::Marquee;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_pager_greys_out_edges() {
        let items: Vec<u32> = (1..=45).collect();

        let first = pager(&board_core::engine::paginate(&items, 1, 20));
        assert_eq!(first[0].style, pager_style(false));
        assert_eq!(first[1].content, " 1/3 ");
        assert_eq!(first[2].style, pager_style(true));

        let middle = pager(&board_core::engine::paginate(&items, 2, 20));
        assert_eq!(middle[0].style, pager_style(true));
        assert_eq!(middle[2].style, pager_style(true));

        let last = pager(&board_core::engine::paginate(&items, 3, 20));
        assert_eq!(last[0].style, pager_style(true));
        assert_eq!(last[2].style, pager_style(false));
    }

    #[test]
    fn test_tooltip_lines_skip_empty() {
        let mut record = OrderRecord::new(1, OrderStatus::Error, 1.0, 0.0);
        record.customer_request = "加急处理".to_string();
        assert_eq!(tooltip_lines(&record), vec!["客户诉求: 加急处理".to_string()]);
    }

    #[test]
    fn test_tooltip_size_wraps() {
        let lines = vec!["a".repeat(100)];
        let (w, h) = tooltip_size(&lines, 200);
        assert_eq!(w, TOOLTIP_MAX_WIDTH);
        assert_eq!(h, 100usize.div_ceil(46) as u16 + 2);
    }

    #[test]
    fn test_draw_records_geometry() {
        let orders = board_core::mock::generate_mock_orders(30, Some(3));
        let store = BoardStore::new(orders).unwrap();
        let mut app = App::new(store, Marquee::default());
        let mut terminal = Terminal::new(TestBackend::new(200, 40)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        assert_eq!(app.geometry.viewport, Rect::new(0, 0, 200, 40));
        assert_eq!(app.geometry.columns.len(), COLUMN_COUNT);
        // 边框 + 表头
        assert_eq!(app.geometry.body.y, 3 + 1 + 1 + 1);
        assert_eq!(app.geometry.columns[ACTION_COLUMN].x, 1);

        let buffer = terminal.backend().buffer();
        // 宽字符后的占位格不计
        let footer: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 38)].symbol().to_string())
            .collect::<String>()
            .replace(' ', "");
        assert!(footer.contains("显示1到20条，共30条订单"));
    }
}
