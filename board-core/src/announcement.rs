//! 通知公告跑马灯

/// Built-in announcements shown when none are configured
pub const DEFAULT_ANNOUNCEMENTS: &[&str] = &[
    "📢 系统升级通知：今晚 24:00 将进行系统维护，预计耗时 30 分钟。",
    "🔥 10月业绩pk赛圆满结束，恭喜华东大区获得冠军！",
    "⚠️ 请各位接单员注意：近期客户反馈电话未接通率较高，请保持电话畅通。",
    "💡 新功能上线：现已支持批量导出财务报表，欢迎试用。",
];

const SEPARATOR: &str = "    ";

/// Horizontally scrolling banner text
#[derive(Debug, Clone)]
pub struct Marquee {
    chars: Vec<char>,
    offset: usize,
    /// 用户手动暂停
    paused: bool,
    /// 指针悬停在公告栏上
    hovered: bool,
}

impl Marquee {
    pub fn new<S: AsRef<str>>(announcements: &[S]) -> Self {
        let text = announcements
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        let mut chars: Vec<char> = text.chars().collect();
        if !chars.is_empty() {
            chars.extend(SEPARATOR.chars());
        }
        Self {
            chars,
            offset: 0,
            paused: false,
            hovered: false,
        }
    }

    /// Advance one character unless paused
    pub fn tick(&mut self) {
        if self.is_paused() || self.chars.is_empty() {
            return;
        }
        self.offset = (self.offset + 1) % self.chars.len();
    }

    /// 悬停暂停，离开后恢复；不影响手动暂停
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused || self.hovered
    }

    /// `width` characters starting at the current offset, wrapping around
    pub fn window(&self, width: usize) -> String {
        if self.chars.is_empty() {
            return String::new();
        }
        self.chars
            .iter()
            .cycle()
            .skip(self.offset)
            .take(width)
            .collect()
    }
}

impl Default for Marquee {
    fn default() -> Self {
        Self::new(DEFAULT_ANNOUNCEMENTS)
    }
}
