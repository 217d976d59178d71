use anyhow::Result;
use birthscraper::{
    config::Config,
    server::{routes, AppState},
};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};
use warp::Filter;

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) config + logging ─────────────────────────────────────────
    let cfg = Config::from_env()?;
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(cfg.log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();
    info!(
        normalize = ?cfg.normalize,
        selector = %cfg.result_table_selector,
        output_dir = ?cfg.output_dir,
        "starting birth record extractor"
    );

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) routes ───────────────────────────────────────────────────
    let state = Arc::new(AppState::from_config(&cfg));
    let verify_enabled = state.automation.is_some();
    let routes = routes(state).with(warp::trace::request());

    // ─── 3) serve ────────────────────────────────────────────────────
    info!("Server starting on port {}", cfg.port);
    info!("Health check: http://localhost:{}/health", cfg.port);
    info!("Extract endpoint: POST http://localhost:{}/extract", cfg.port);
    if !verify_enabled {
        info!(
            site = %cfg.site_url,
            "no page automation backend; /verify and /verify/complete answer 503"
        );
    }
    warp::serve(routes).run(([0, 0, 0, 0], cfg.port)).await;

    Ok(())
}
