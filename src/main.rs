use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod api;
mod config;
mod handler;
mod http;
mod logger;
mod repository;
mod server;

use repository::StaticHeroRepository;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config path as the first argument, extension may be omitted
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Worker threads default to the number of CPU cores
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    let state = Arc::new(config::AppState::new(
        &cfg,
        Arc::new(StaticHeroRepository::new()),
    ));
    let active_connections = Arc::new(AtomicUsize::new(0));

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&addr, &cfg);

    let drain_timeout = cfg.performance.connection_timeout();

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(
            listener,
            state,
            Arc::clone(&active_connections),
            Arc::clone(&signals.shutdown),
        ))
        .await?;

    // Connection tasks live on the LocalSet, so drain before dropping it
    let remaining = local
        .run_until(server::drain_connections(active_connections, drain_timeout))
        .await;
    logger::log_drain_result(remaining);

    if signals.is_shutdown_requested() {
        logger::log_info("Shutdown complete");
    }
    Ok(())
}
