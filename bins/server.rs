use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging(format: &str) {
    common::utils::logging::init_logging(format);
    info!(service = "directory", event = "logger_init", format, "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    // load .env before reading config so RUST_LOG / CONFIG_PATH apply
    dotenv().ok();

    let cfg = match configs::AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "directory", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    init_logging(&cfg.logging.format);

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "directory",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "directory", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "directory",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "directory service starting"
    );

    rt.block_on(async move {
        match server::run(cfg).await {
            Ok(()) => {
                info!(service = "directory", event = "stop", %service_id, pid, "directory service stopped");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "directory", event = "run_failed", %service_id, error = %e, "directory service failed");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
