use chrono::Local;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[derive(Clone, Copy)]
struct CustomTimer;

impl FormatTime for CustomTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%m%dT%H:%M:%S%.3f"))
    }
}

/// Install the stdout subscriber. The filter comes from the report config,
/// never from the environment.
pub fn init(level: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(CustomTimer)
                .with_target(false)
                .with_writer(std::io::stdout)
                .with_filter(tracing_subscriber::EnvFilter::try_new(level)?),
        )
        .try_init()?;

    Ok(())
}
