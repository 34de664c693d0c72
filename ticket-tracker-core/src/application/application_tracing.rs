use super::ApplicationEnv;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

///
/// Dependencies that log every command or connection on debug level.
/// They are kept at warn unless the directives name them explicitly.
///
const NOISY_TARGETS: [&str; 2] = ["mongodb", "hyper"];

pub fn setup_tracing(env: &ApplicationEnv) -> anyhow::Result<()> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(log_filter(env.console_log_level, &env.log_directives)?);

    let file_appender = tracing_appender::rolling::hourly(&env.log_directory, &env.log_filename);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(log_filter(env.file_log_level, &env.log_directives)?);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(())
}

fn log_filter(level: LevelFilter, directives: &str) -> anyhow::Result<EnvFilter> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .parse(directives)?;

    for target in NOISY_TARGETS {
        if !directives.contains(target) {
            filter = filter.add_directive(format!("{target}=warn").parse()?);
        }
    }

    Ok(filter)
}
