//! 看板交互状态
//!
//! 键盘/鼠标事件翻译成 [`BoardAction`]，交给 [`BoardStore`] 处理。
//! 浮层位置在打开时由 [`Overlay::open`] 计算一次，此后不再跟随。

use std::io;
use std::time::{Duration, Instant};

use board_core::announcement::Marquee;
use board_core::format::format_currency;
use board_core::{
    ActionOutcome, Anchor, BoardAction, BoardStore, Bounds, CompletionDraft, OrderId, Overlay,
    OverlayEvent, OverlayKind, OverlaySize, RowAction,
};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::widgets::TableState;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::ui;

/// 每页数量循环档位
pub const PAGE_SIZES: [u32; 4] = [10, 20, 50, 100];

/// 操作菜单宽度 (含边框)
pub const MENU_WIDTH: u16 = 18;

/// 提示框最大宽度 (含边框)
pub const TOOLTIP_MAX_WIDTH: u16 = 48;

/// 上一帧的布局，用于鼠标命中检测和浮层定位
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub viewport: Rect,
    pub banner: Rect,
    /// 表格数据区 (不含表头和边框)
    pub body: Rect,
    /// 各列在一行内的位置
    pub columns: Vec<Rect>,
}

impl Geometry {
    /// Cell rectangle of a column on the given visible line
    fn cell(&self, column: usize, line: u16) -> Option<Rect> {
        let col = self.columns.get(column)?;
        if line >= self.body.height {
            return None;
        }
        Some(Rect::new(col.x, self.body.y + line, col.width, 1))
    }
}

pub struct App {
    pub store: BoardStore,
    pub marquee: Marquee,
    /// 当前页内选中行
    pub selected: usize,
    pub table_state: TableState,
    pub overlay: Option<Overlay>,
    pub menu_cursor: usize,
    /// 完成订单弹窗的实收金额输入
    pub amount_input: Input,
    pub notice: Option<String>,
    pub geometry: Geometry,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: BoardStore, marquee: Marquee) -> Self {
        Self {
            store,
            marquee,
            selected: 0,
            table_state: TableState::default().with_selected(Some(0)),
            overlay: None,
            menu_cursor: 0,
            amount_input: Input::default(),
            notice: None,
            geometry: Geometry::default(),
            should_quit: false,
        }
    }

    /// Ids of the rows on the current page, in display order
    pub fn page_ids(&self) -> Vec<OrderId> {
        self.store.view().rows.data.iter().map(|r| r.id).collect()
    }

    pub fn selected_id(&self) -> Option<OrderId> {
        self.page_ids().get(self.selected).copied()
    }

    /// Menu entries for the given order, with the suspend label resolved
    pub fn menu_labels(&self, id: OrderId) -> Vec<&'static str> {
        let suspended = self.store.find(id).is_some_and(|r| r.is_suspended);
        RowAction::MENU
            .iter()
            .map(|action| match action {
                RowAction::ToggleSuspend if suspended => "取消挂起",
                RowAction::ToggleSuspend => "挂起",
                other => other.label(),
            })
            .collect()
    }

    fn dispatch(&mut self, action: BoardAction) {
        let page_before = self.store.state().page;
        let outcome = self.store.dispatch(action);
        self.handle_outcome(outcome);

        if self.store.state().page != page_before {
            self.selected = 0;
        }
        let rows = self.store.view().rows.data.len();
        self.selected = self.selected.min(rows.saturating_sub(1));
        self.table_state.select(Some(self.selected));
    }

    fn handle_outcome(&mut self, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::Updated | ActionOutcome::Unchanged => {}
            ActionOutcome::Notice(text) => {
                self.notice = Some(text);
            }
            ActionOutcome::ModalOpened(_) => {
                if let Some(draft) = self.store.completion() {
                    self.amount_input = Input::new(format_currency(draft.amount_due));
                }
            }
        }
    }

    // ========== Keyboard ==========

    pub fn on_key(&mut self, key: KeyEvent) {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return;
        }

        if self.store.completion().is_some() {
            self.on_completion_key(key);
            return;
        }

        match self.overlay.map(|o| o.kind) {
            Some(OverlayKind::ActionMenu(id)) => self.on_menu_key(id, key),
            Some(OverlayKind::Tooltip(_)) => {
                // 任意键关闭提示框
                self.overlay = None;
            }
            None => self.on_board_key(key),
        }
    }

    fn on_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.notice = None,
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => {
                self.dispatch(BoardAction::PrevPage)
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => {
                self.dispatch(BoardAction::NextPage)
            }
            KeyCode::Home | KeyCode::Char('g') => self.dispatch(BoardAction::SetPage(1)),
            KeyCode::End | KeyCode::Char('G') => {
                let last = self.store.view().rows.total_pages;
                self.dispatch(BoardAction::SetPage(last));
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Char('f') => {
                let flag = !self.store.state().show_suspended_only;
                self.dispatch(BoardAction::SetShowSuspendedOnly(flag));
            }
            KeyCode::Char(' ') => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(BoardAction::ToggleSuspend(id));
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.cycle_page_size(true),
            KeyCode::Char('-') => self.cycle_page_size(false),
            KeyCode::Char('p') => self.marquee.toggle_pause(),
            KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    let line = self.visible_line(self.selected);
                    self.open_menu(id, line);
                }
            }
            KeyCode::Char('t') => {
                if let Some(id) = self.selected_id() {
                    let line = self.visible_line(self.selected);
                    self.open_tooltip(id, line);
                }
            }
            _ => {}
        }
    }

    fn on_menu_key(&mut self, id: OrderId, key: KeyEvent) {
        let len = RowAction::MENU.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.overlay = None,
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_cursor = (self.menu_cursor + len - 1) % len;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_cursor = (self.menu_cursor + 1) % len;
            }
            KeyCode::Enter => self.choose_menu_item(id, self.menu_cursor),
            _ => {}
        }
    }

    fn on_completion_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.dispatch(BoardAction::CancelCompletion);
                self.amount_input.reset();
            }
            KeyCode::Enter => match CompletionDraft::parse_amount(self.amount_input.value()) {
                Ok(amount) => {
                    self.dispatch(BoardAction::ConfirmCompletion { amount });
                    if self.store.completion().is_none() {
                        self.amount_input.reset();
                    }
                }
                Err(e) => {
                    tracing::warn!(code = %e.code, "{}", e);
                    self.notice = Some(e.to_string());
                }
            },
            _ => {
                self.amount_input.handle_event(&Event::Key(key));
            }
        }
    }

    fn choose_menu_item(&mut self, id: OrderId, index: usize) {
        self.overlay = None;
        if let Some(&action) = RowAction::MENU.get(index) {
            self.dispatch(BoardAction::Row { id, action });
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let rows = self.store.view().rows.data.len();
        if rows == 0 {
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(rows - 1);
        self.table_state.select(Some(self.selected));
    }

    fn cycle_page_size(&mut self, up: bool) {
        let current = self.store.state().page_size;
        let next = if up {
            PAGE_SIZES.iter().copied().find(|&s| s > current)
        } else {
            PAGE_SIZES.iter().rev().copied().find(|&s| s < current)
        };
        if let Some(size) = next {
            self.dispatch(BoardAction::SetPageSize(size));
        }
    }

    // ========== Mouse ==========

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                // 鼠标悬停公告栏时暂停滚动
                let hovered = self.geometry.banner.contains((x, y).into());
                self.marquee.set_hovered(hovered);
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if self
                    .overlay
                    .is_some_and(|o| o.should_dismiss(OverlayEvent::Scroll))
                {
                    self.overlay = None;
                }
                if self.store.completion().is_none() {
                    let delta = if mouse.kind == MouseEventKind::ScrollUp { -1 } else { 1 };
                    self.move_selection(delta);
                }
            }
            MouseEventKind::Down(button) => {
                if self.store.completion().is_some() {
                    return;
                }
                self.on_pointer_down(button, x, y);
            }
            _ => {}
        }
    }

    fn on_pointer_down(&mut self, button: MouseButton, x: u16, y: u16) {
        let pointer = OverlayEvent::PointerDown {
            x: i32::from(x),
            y: i32::from(y),
        };

        if let Some(overlay) = self.overlay {
            if overlay.bounds.contains(i32::from(x), i32::from(y)) {
                if let (OverlayKind::ActionMenu(id), MouseButton::Left) = (overlay.kind, button) {
                    // 边框内第一行对应第一个菜单项，点击边框不触发
                    let line = i32::from(y) - overlay.bounds.y;
                    if line > 0 && line < overlay.bounds.height - 1 {
                        if let Some(index) = usize::try_from(line - 1)
                            .ok()
                            .filter(|&i| i < RowAction::MENU.len())
                        {
                            self.choose_menu_item(id, index);
                        }
                    }
                }
                return;
            }
            if !overlay.should_dismiss(pointer) {
                // 再次点击触发元素: 收起
                self.overlay = None;
                return;
            }
            self.overlay = None;
        }

        if button != MouseButton::Left {
            return;
        }
        let Some(line) = self.line_at(y) else {
            return;
        };
        let index = self.table_state.offset() + usize::from(line);
        let Some(id) = self.page_ids().get(index).copied() else {
            return;
        };
        self.selected = index;
        self.table_state.select(Some(index));

        if self
            .geometry
            .cell(ui::ACTION_COLUMN, line)
            .is_some_and(|cell| cell.contains((x, y).into()))
        {
            self.open_menu(id, Some(line));
        }
    }

    fn line_at(&self, y: u16) -> Option<u16> {
        let body = self.geometry.body;
        (y >= body.y && y < body.bottom()).then(|| y - body.y)
    }

    /// Visible line of a page row given the table's scroll offset
    fn visible_line(&self, index: usize) -> Option<u16> {
        let line = index.checked_sub(self.table_state.offset())?;
        u16::try_from(line)
            .ok()
            .filter(|&l| l < self.geometry.body.height)
    }

    // ========== Overlays ==========

    fn open_menu(&mut self, id: OrderId, line: Option<u16>) {
        let trigger = line
            .and_then(|l| self.geometry.cell(ui::ACTION_COLUMN, l))
            .unwrap_or_default();
        let size = OverlaySize::new(
            i32::from(MENU_WIDTH),
            RowAction::MENU.len() as i32 + 2,
        );
        self.menu_cursor = 0;
        self.overlay = Some(Overlay::open(
            OverlayKind::ActionMenu(id),
            Anchor::MENU.with_gap(0),
            to_bounds(trigger),
            size,
            to_bounds(self.geometry.viewport),
        ));
    }

    fn open_tooltip(&mut self, id: OrderId, line: Option<u16>) {
        let Some(record) = self.store.find(id) else {
            return;
        };
        let lines = ui::tooltip_lines(record);
        if lines.is_empty() {
            return;
        }
        let trigger = line
            .and_then(|l| self.geometry.cell(ui::REQUEST_COLUMN, l))
            .unwrap_or_default();
        let (width, height) = ui::tooltip_size(&lines, self.geometry.viewport.width);
        self.overlay = Some(Overlay::open(
            OverlayKind::Tooltip(id),
            Anchor::TOOLTIP.with_gap(0),
            to_bounds(trigger),
            OverlaySize::new(i32::from(width), i32::from(height)),
            to_bounds(self.geometry.viewport),
        ));
    }

    pub fn on_tick(&mut self) {
        self.marquee.tick();
    }
}

pub fn to_bounds(rect: Rect) -> Bounds {
    Bounds::new(
        i32::from(rect.x),
        i32::from(rect.y),
        i32::from(rect.width),
        i32::from(rect.height),
    )
}

pub fn to_rect(bounds: Bounds) -> Rect {
    fn clamp(v: i32) -> u16 {
        v.clamp(0, i32::from(u16::MAX)) as u16
    }
    Rect::new(
        clamp(bounds.x),
        clamp(bounds.y),
        clamp(bounds.width),
        clamp(bounds.height),
    )
}

/// Draw, poll input, and advance the marquee until the user quits
pub fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, tick_rate: Duration) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.on_key(key),
                Event::Mouse(mouse) => app.on_mouse(mouse),
                Event::Resize(_, _) => {
                    // 视口变化不移动已打开的浮层，直接收起
                    app.overlay = None;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            tracing::info!("Board closed by user");
            return Ok(());
        }
    }
}
