use std::fmt;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const JSON_FORMAT: &str = "json";

/// 日誌檔設定，對應設定檔的 LOG_FILENAME / LOG_LEVEL / LOG_FORMAT
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub filename: String,
    pub level: String,
    pub format: String,
}

/// 標準等級名稱轉成過濾器；無法辨識時使用 INFO
pub fn parse_level(name: &str) -> LevelFilter {
    match name.trim().to_ascii_uppercase().as_str() {
        "NOTSET" | "TRACE" => LevelFilter::TRACE,
        "DEBUG" => LevelFilter::DEBUG,
        "WARNING" | "WARN" => LevelFilter::WARN,
        "ERROR" | "CRITICAL" | "FATAL" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        Level::ERROR => "ERROR",
    }
}

/// 以 `%(asctime)s - %(levelname)s - %(message)s` 樣板輸出一行一事件
pub struct LineFormat {
    template: String,
}

impl LineFormat {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self, timestamp: &str, level: &str, target: &str, message: &str) -> String {
        self.template
            .replace("%(asctime)s", timestamp)
            .replace("%(levelname)s", level)
            .replace("%(name)s", target)
            .replace("%(message)s", message)
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        ctx.format_fields(Writer::new(&mut message), event)?;

        let timestamp = chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S,%3f")
            .to_string();
        let metadata = event.metadata();
        let line = self.render(
            &timestamp,
            level_name(metadata.level()),
            metadata.target(),
            &message,
        );

        writeln!(writer, "{}", line)
    }
}

/// 日誌檔一律寫入（附加模式）；`verbose` 時另外輸出到主控台
pub fn init_logger(settings: &LogSettings, verbose: bool) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.filename)?;
    let level = parse_level(&settings.level);

    let file_layer = if settings.format.eq_ignore_ascii_case(JSON_FORMAT) {
        tracing_subscriber::fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .with_filter(level)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .event_format(LineFormat::new(settings.format.clone()))
            .with_writer(Mutex::new(file))
            .with_filter(level)
            .boxed()
    };

    let console_layer = verbose.then(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("berry_extract=debug,info"));

        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .with_filter(filter)
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(())
}
