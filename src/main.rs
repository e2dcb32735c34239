use mimalloc::MiMalloc;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let loaded = sql_handoff::Config::load();
    let loglevel = loaded
        .as_ref()
        .map(|cfg| cfg.loglevel.clone())
        .unwrap_or_else(|_| "info".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(loglevel));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };

    info!(
        sql_file = %cfg.sql_file.display(),
        preview_width = cfg.preview_width,
        check_connection = cfg.check_connection,
        proxy = %cfg.proxy.as_deref().unwrap_or("<none>")
    );

    match sql_handoff::run(&cfg, std::io::stdout()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
