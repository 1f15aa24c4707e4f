use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize diagnostic logging for the CLI binaries.
///
/// Defaults to `warn` unless overridden by `SUBGEN_LOG`. Output goes to
/// stderr so progress lines and summaries keep stdout to themselves.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_env_var("SUBGEN_LOG")
        .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
    }
}
