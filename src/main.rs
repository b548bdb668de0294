use std::sync::Arc;

mod config;
mod handler;
mod http;
mod identity;
mod logger;
mod routing;
mod server;
mod subscription;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = config::ConfigSource::detect(std::env::args().nth(1), |key| {
        std::env::var(key).ok()
    });
    let cfg = match config::Config::load(&source) {
        Ok(cfg) => cfg,
        Err(e) => {
            logger::log_error(&format!("Failed to load configuration: {e}"));
            return Err(e.into());
        }
    };
    logger::init(&cfg.logging)?;

    // Worker threads default to the number of CPU cores
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let state = Arc::new(config::AppState::new(cfg)?);

    let listener = match server::create_reusable_listener(addr) {
        Ok(listener) => listener,
        Err(e) => {
            logger::log_error(&format!("Failed to bind {addr}: {e}"));
            return Err(e.into());
        }
    };

    let shutdown = Arc::new(server::ShutdownSignal::new());
    server::start_signal_handler(Arc::clone(&shutdown))?;

    logger::log_server_start(&addr, &state);
    server::start_server_loop(listener, state, shutdown).await;
    logger::log_info("Server stopped");
    Ok(())
}
