use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use board_server::arrivals::{ArrivalsClient, ArrivalsConfig, MockArrivalSource};
use board_server::board::{ArrivalSource, BoardController, StopLocationSource};
use board_server::stops::{StopLocationClient, StopsConfig};
use board_server::web::{AppState, create_router, default_popular_stops};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Stop location client (base URL overridable for testing)
    let mut stops_config = StopsConfig::new();
    if let Ok(url) = std::env::var("STOPS_BASE_URL") {
        stops_config = stops_config.with_base_url(url);
    }
    let stops =
        StopLocationClient::new(stops_config).expect("Failed to create stop location client");

    // Arrival source: live feed, or canned files when MOCK_DATA_DIR is set
    match std::env::var("MOCK_DATA_DIR") {
        Ok(dir) => {
            let arrivals =
                MockArrivalSource::new(&dir).expect("Failed to load mock arrival data");
            println!(
                "Serving mock arrival data from {dir} (stops: {:?})",
                arrivals.available_stops()
            );
            serve(arrivals, stops).await;
        }
        Err(_) => {
            let mut config = ArrivalsConfig::new();
            if let Ok(url) = std::env::var("ARRIVALS_BASE_URL") {
                config = config.with_base_url(url);
            }
            let arrivals = ArrivalsClient::new(config).expect("Failed to create arrivals client");
            serve(arrivals, stops).await;
        }
    }
}

async fn serve<A, S>(arrivals: A, stops: S)
where
    A: ArrivalSource + Send + Sync + 'static,
    S: StopLocationSource + Send + Sync + 'static,
{
    let controller = BoardController::new(arrivals, stops);
    let state = AppState::new(controller, default_popular_stops());

    // Static assets live next to the crate; override when running from
    // elsewhere.
    let static_dir =
        std::env::var("STATIC_DIR").unwrap_or_else(|_| "board-server/static".to_string());
    let app = create_router(state, &static_dir);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Bus Arrival Board listening on http://{addr}");
    println!();
    println!("Open http://{addr} in your browser for the web interface.");
    println!();
    println!("Endpoints:");
    println!("  GET  /health  - Health check");
    println!("  GET  /board   - Arrivals for a stop (?id=<stopId>)");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
