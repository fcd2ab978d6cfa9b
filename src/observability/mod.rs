//! 可观测性：tracing 日志初始化（输出到 stderr，stdout 只留给行程文本）

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 默认 info，verbose 时 debug；RUST_LOG 可覆盖
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
