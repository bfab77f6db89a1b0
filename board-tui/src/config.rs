use board_core::announcement::DEFAULT_ANNOUNCEMENTS;
use board_core::engine::DEFAULT_PAGE_SIZE;
use board_core::mock::DEFAULT_MOCK_COUNT;
use clap::Parser;

/// 看板配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | BOARD_PAGE_SIZE | 20 | 每页数量 |
/// | BOARD_ORDER_COUNT | 128 | Mock 订单数量 |
/// | BOARD_SEED | (随机) | Mock 数据种子 |
/// | BOARD_TICK_MS | 200 | 跑马灯刷新间隔(毫秒) |
/// | BOARD_ANNOUNCEMENTS | (内置) | 公告，`|` 分隔 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | ./logs | 日志目录 (终端被界面占用，日志只写文件) |
///
/// 命令行参数优先于环境变量。
#[derive(Debug, Clone)]
pub struct Config {
    pub page_size: u32,
    pub order_count: usize,
    pub seed: Option<u64>,
    pub tick_ms: u64,
    pub announcements: Vec<String>,
    pub log_level: String,
    pub log_dir: String,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self {
            page_size: std::env::var("BOARD_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PAGE_SIZE),
            order_count: std::env::var("BOARD_ORDER_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MOCK_COUNT),
            seed: std::env::var("BOARD_SEED").ok().and_then(|v| v.parse().ok()),
            tick_ms: std::env::var("BOARD_TICK_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(200),
            announcements: std::env::var("BOARD_ANNOUNCEMENTS")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.split('|').map(|a| a.trim().to_string()).collect())
                .unwrap_or_else(|| DEFAULT_ANNOUNCEMENTS.iter().map(|a| a.to_string()).collect()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".into()),
        }
    }

    /// 命令行覆盖
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(size) = cli.page_size {
            self.page_size = size;
        }
        if let Some(count) = cli.orders {
            self.order_count = count;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(ms) = cli.tick_ms {
            self.tick_ms = ms;
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
        if let Some(dir) = &cli.log_dir {
            self.log_dir = dir.clone();
        }
        self.page_size = self.page_size.max(1);
        self.tick_ms = self.tick_ms.max(16);
        self
    }
}

/// 售后订单看板
#[derive(Debug, Parser)]
#[command(name = "order-board", version, about = "Terminal order-management board")]
pub struct Cli {
    /// 每页数量
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Mock 订单数量
    #[arg(long)]
    pub orders: Option<usize>,

    /// Mock 数据种子
    #[arg(long)]
    pub seed: Option<u64>,

    /// 跑马灯刷新间隔(毫秒)
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// 日志级别
    #[arg(long)]
    pub log_level: Option<String>,

    /// 日志目录
    #[arg(long)]
    pub log_dir: Option<String>,

    /// 输出第一页 JSON 后退出 (不启动界面)
    #[arg(long)]
    pub dump_json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            page_size: 20,
            order_count: 128,
            seed: None,
            tick_ms: 200,
            announcements: vec!["a".into()],
            log_level: "info".into(),
            log_dir: "./logs".into(),
        }
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "order-board",
            "--page-size",
            "50",
            "--seed",
            "9",
            "--log-level",
            "debug",
        ]);
        let config = base().with_cli(&cli);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.order_count, 128);
        assert!(!cli.dump_json);
    }

    #[test]
    fn test_cli_coerces_limits() {
        let cli = Cli::parse_from(["order-board", "--page-size", "0", "--tick-ms", "1"]);
        let config = base().with_cli(&cli);
        assert_eq!(config.page_size, 1);
        assert_eq!(config.tick_ms, 16);
    }
}
