//! Logging Infrastructure
//!
//! 终端由界面独占，日志只写入按天滚动的文件；目录不可用时丢弃。

use std::path::Path;

/// Initialize the logger with optional file output
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_ansi(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok() {
            let file_appender = tracing_appender::rolling::daily(log_path, "order-board");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.with_writer(std::io::sink).init();
}
