use std::{net::SocketAddr, process::ExitCode, str::FromStr};

use axum::http::{HeaderValue, Method};
use likes::{bootstrap::Bootstrap, dependencies::config, routes::create_routes};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
	println!("Environment Variable Is Being Set...");
	let config = match config() {
		Ok(config) => config,
		Err(err) => {
			eprintln!("Invalid configuration : {}", err);
			return ExitCode::FAILURE;
		}
	};

	// ! Tracing
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			// axum logs rejections from built-in extractors with the `axum::rejection`
			// target, at `TRACE` level. `axum::rejection=trace` enables showing those events
			format!("likes={},tower_http=debug,axum::rejection=trace", config.log_level).into()
		}))
		.with(tracing_subscriber::fmt::layer())
		.init();

	// ! Connection
	tracing::info!("Connections Are Being Pooled...");
	let service = match Bootstrap::like_service().await {
		Ok(service) => service,
		Err(err) => {
			tracing::error!("Failed to bootstrap like service : {}", err);
			return ExitCode::FAILURE;
		}
	};

	let origins = config
		.allow_origins
		.split(',')
		.filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
		.collect::<Vec<_>>();

	let app = create_routes(service).layer(
		ServiceBuilder::new()
			.layer(TraceLayer::new_for_http())
			.layer(CorsLayer::new().allow_origin(origins).allow_methods([Method::GET, Method::POST])),
	);

	let addr = match SocketAddr::from_str(&config.server_ip_port) {
		Ok(addr) => addr,
		Err(err) => {
			tracing::error!("Invalid SERVER_IP_PORT `{}` : {}", config.server_ip_port, err);
			return ExitCode::FAILURE;
		}
	};

	tracing::info!("Start Web Server on {}", addr);
	if let Err(err) = axum::Server::bind(&addr).serve(app.into_make_service()).await {
		tracing::error!("Server error : {}", err);
		return ExitCode::FAILURE;
	}
	ExitCode::SUCCESS
}
