// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{congestion, health_check, index};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/congestion", get(congestion))
        .route("/healthz", get(health_check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard::Dashboard;
    use crate::domain::card::DashboardView;
    use crate::infrastructure::http_probe::HttpImageProbe;
    use crate::infrastructure::http_source::HttpOccupancySource;
    use crate::infrastructure::test_support::serve;
    use crate::presentation::html::PageRenderer;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    const PAYLOAD: &str = r#"[
        {"location_name": "Library", "current": 30, "capacity": 100, "level": "low"},
        {"location_name": "Cafeteria", "current": 95, "capacity": 100, "level": "high", "camera_id": "cafe"},
        {"location_name": "Gym", "current": 120, "capacity": 100, "level": "high"}
    ]"#;

    /// Occupancy provider that also hosts the camera images.
    async fn provider(healthy: Arc<AtomicBool>) -> SocketAddr {
        async fn locations(State(healthy): State<Arc<AtomicBool>>) -> axum::response::Response {
            if healthy.load(Ordering::SeqCst) {
                PAYLOAD.into_response()
            } else {
                (StatusCode::INTERNAL_SERVER_ERROR, "provider down").into_response()
            }
        }

        let router = Router::new()
            .route("/api/congestion", get(locations))
            .route("/cafe.jpg", get(|| async { "jpeg" }))
            .with_state(healthy);
        serve(router).await
    }

    async fn app(provider: SocketAddr, interval: Duration) -> (SocketAddr, Arc<Dashboard>) {
        let source = HttpOccupancySource::new(
            format!("http://{provider}/api/congestion"),
            Duration::from_secs(5),
        )
        .unwrap();
        let probe = HttpImageProbe::new(format!("http://{provider}"), Duration::from_secs(5)).unwrap();

        let dashboard = Arc::new(
            Dashboard::mount(Arc::new(source), Arc::new(probe), interval)
                .await
                .unwrap(),
        );
        let state = Arc::new(AppState {
            dashboard: dashboard.clone(),
            renderer: PageRenderer::new().unwrap(),
        });

        (serve(build_router(state)).await, dashboard)
    }

    #[tokio::test]
    async fn test_healthz() {
        let (addr, _dashboard) = app(provider(Arc::new(AtomicBool::new(true))).await, Duration::from_secs(60)).await;

        let body = reqwest::get(format!("http://{addr}/healthz")).await.unwrap().text().await.unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_index_renders_cards() {
        let (addr, _dashboard) = app(provider(Arc::new(AtomicBool::new(true))).await, Duration::from_secs(60)).await;

        let response = reqwest::get(format!("http://{addr}/")).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);

        let html = response.text().await.unwrap();
        assert!(html.contains("Library"));
        assert!(html.contains("Cafeteria"));
        assert!(html.contains("120% 利用中"));
        assert_eq!(html.matches("混雑しています").count(), 2);
    }

    #[tokio::test]
    async fn test_api_reports_cards_and_images() {
        let (addr, _dashboard) = app(provider(Arc::new(AtomicBool::new(true))).await, Duration::from_secs(60)).await;

        // let the background probe finish
        tokio::time::sleep(Duration::from_millis(300)).await;

        let body: serde_json::Value = reqwest::get(format!("http://{addr}/api/congestion"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let locations = body["locations"].as_array().unwrap();
        assert_eq!(locations.len(), 3);
        assert_eq!(locations[0]["percentage"], 30);
        assert_eq!(locations[0]["label"], "空いている");
        assert_eq!(locations[0]["warning"], false);
        assert_eq!(locations[0]["image"], "absent");
        assert_eq!(locations[1]["warning"], true);
        assert_eq!(locations[1]["image"], "present");
        assert!(locations[1]["image_url"].as_str().unwrap().ends_with("/cafe.jpg"));
        assert_eq!(locations[2]["percentage"], 120);
        assert!(body["last_updated"].is_string());
    }

    #[tokio::test]
    async fn test_failed_refresh_is_page_level_failure() {
        let healthy = Arc::new(AtomicBool::new(true));
        let (addr, dashboard) = app(provider(healthy.clone()).await, Duration::from_millis(200)).await;
        let mut updates = dashboard.subscribe();

        healthy.store(false, Ordering::SeqCst);
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                updates.changed().await.unwrap();
                if matches!(&**updates.borrow_and_update(), DashboardView::Failed { .. }) {
                    break;
                }
            }
        })
        .await
        .unwrap();
        dashboard.unmount();

        let response = reqwest::get(format!("http://{addr}/")).await.unwrap();
        assert_eq!(response.status().as_u16(), 502);
        assert!(response.text().await.unwrap().contains("provider down"));

        let response = reqwest::get(format!("http://{addr}/api/congestion")).await.unwrap();
        assert_eq!(response.status().as_u16(), 502);
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("500"));
    }
}
