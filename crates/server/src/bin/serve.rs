use server::{cache, config, health, openapi, state::AppState, telemetry};

#[tokio::main]
async fn main() {
    // Installed without `LogTracer`: the global `log` slot belongs to the
    // OpenTelemetry bridge, which receives events through `log-always`.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("STARTUP_ERROR failed to install tracing subscriber: {}", err);
        std::process::exit(1);
    }

    let config = config::load_config();
    if config.features.telemetry {
        telemetry::init_telemetry(&config.telemetry);
    }
    health::record_start_time();

    let datasets = cache::shared_cache();
    match datasets.get() {
        Ok(dataset) => tracing::info!(
            path = %datasets.path().display(),
            cases = dataset.len(),
            "case table ready"
        ),
        Err(err) => {
            eprintln!("STARTUP_ERROR {}", err);
            std::process::exit(1);
        }
    }

    let mut router = openapi::api_router(AppState::new(datasets));
    if config.features.telemetry {
        router = router.layer(telemetry::OtelTraceLayer);
    }
    let router = router
        .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
        .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
            tower_http::request_id::MakeRequestUuid,
        ));

    let listener = match tokio::net::TcpListener::bind(&config.server.bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!(
                "STARTUP_ERROR failed to bind {}: {}",
                config.server.bind_addr, err
            );
            std::process::exit(1);
        }
    };

    tracing::info!(bind_addr = %config.server.bind_addr, "casebook listening");

    if let Err(err) = axum::serve(listener, router).await {
        eprintln!("STARTUP_ERROR {}", err);
        std::process::exit(1);
    }
}
