use log::{Level, LevelFilter, Log, Metadata, Record};

// 標準エラー出力へのロガー
// 出力形式: [LEVEL](file:line) message
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("{}", format_record(record));
    }

    fn flush(&self) {}
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

fn format_record(record: &Record<'_>) -> String {
    format!(
        "[{}]({}:{}) {}",
        level_label(record.level()),
        record.file().unwrap_or("?"),
        record.line().unwrap_or(0),
        record.args()
    )
}

// 2回目以降の呼び出しはレベルの変更のみ
pub fn init_logger(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

#[test]
fn test_format_record() {
    let record = Record::builder()
        .args(format_args!("strategy: {}", "General"))
        .level(Level::Info)
        .file(Some("src/advisor/strategy.rs"))
        .line(Some(42))
        .build();
    assert_eq!(
        format_record(&record),
        "[INFO](src/advisor/strategy.rs:42) strategy: General"
    );
}
