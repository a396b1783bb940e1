use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber once, honoring RUST_LOG (default "info").
/// Output goes to stderr: stdout carries the protocol stream.
pub fn init() {
    init_with(None);
}

pub fn init_with(filter: Option<&str>) {
    let directive = filter
        .map(str::to_owned)
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

/// Span handed to a component at construction; its events nest under it.
pub fn component_span(component: &'static str) -> tracing::Span {
    tracing::info_span!("component", name = component)
}

/// Log a metrics-like line until a real sink/exporter is added.
pub fn log_metric(parent: &tracing::Span, op: &str, metric: &str, value: f64) {
    tracing::info!(parent: parent, op = op, metric = metric, value = value, "metric");
}
