use tracing_subscriber::EnvFilter;

/// 診断ログの初期化
///
/// `RUST_LOG` があればそれを使う。なければ通常は warn、`--verbose` で info。
pub fn init(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());

    // 二重初期化（テストなど）は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
