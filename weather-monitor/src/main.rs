use anyhow::Result;
use weather_monitor::{
    alert::TemperatureAlert,
    config::AppConfig,
    metrics_server,
    observability,
    pipeline::Pipeline,
    scheduler::Scheduler,
    shutdown,
    sinks::SqliteSummarySink,
    sources::OpenWeatherSource,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    observability::init_tracing();

    let cfg = AppConfig::load()?;

    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr)?;
    }

    let sink = SqliteSummarySink::open(&cfg.store.path).await?;
    let source = OpenWeatherSource::new(&cfg.api)?;
    let pipeline = Pipeline::new(
        source,
        TemperatureAlert::new(cfg.alert.temperature_threshold_c),
        sink,
        cfg.locations.clone(),
    );

    tracing::info!(
        locations = ?cfg.locations,
        threshold_c = cfg.alert.temperature_threshold_c,
        fetch_every_secs = cfg.schedule.fetch_interval_secs,
        print_every_secs = cfg.schedule.print_interval_secs,
        db = %cfg.store.path.display(),
        "weather monitoring started"
    );

    let mut scheduler = Scheduler::new(&cfg.schedule);
    let outcome = scheduler.run(&pipeline, shutdown_signal()).await;

    let stats = scheduler.stats();
    tracing::info!(fetch_cycles = stats.fetch_cycles, prints = stats.prints, "scheduler stopped");
    shutdown::finalize(&pipeline.sink, &cfg.store.path, outcome).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for interrupt; running until killed");
        std::future::pending::<()>().await;
    }
}
