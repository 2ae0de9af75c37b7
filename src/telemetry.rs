use prometheus::register_int_counter;
use prometheus::register_int_counter_vec;
use prometheus::IntCounter;
use prometheus::IntCounterVec;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUIZ_QUESTIONS_SERVED: IntCounterVec = register_int_counter_vec!(
        "quiz_questions_served_total",
        "Number of questions served to quiz players",
        &["category"]
    )
    .unwrap();
    pub static ref QUIZ_ROUNDS_EXHAUSTED: IntCounter = register_int_counter!(
        "quiz_rounds_exhausted_total",
        "Number of quiz requests with no questions left"
    )
    .unwrap();
}

const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn";

/// `INCLUDE_SPAN_EVENTS=true` logs span enter/exit, `full` also new/close.
fn span_events(setting: Option<&str>) -> FmtSpan {
    match setting.map(str::to_ascii_lowercase).as_deref() {
        Some("true") => FmtSpan::ENTER | FmtSpan::EXIT,
        Some("full") => FmtSpan::FULL,
        _ => FmtSpan::NONE,
    }
}

/// Log filter from `LOG_LEVEL`, falling back to info with sqlx statement logs muted.
pub fn init_tracing() {
    let span_setting = std::env::var("INCLUDE_SPAN_EVENTS").ok();
    let fmt_layer = fmt::layer().with_span_events(span_events(span_setting.as_deref()));
    let filter_layer = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|error| {
        if std::env::var_os("LOG_LEVEL").is_some() {
            eprintln!("Ignoring invalid LOG_LEVEL: {error}");
        }
        EnvFilter::new(DEFAULT_DIRECTIVES)
    });

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
