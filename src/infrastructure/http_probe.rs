// HEAD-based camera image probe
use crate::application::image_probe::ImageProbe;
use crate::domain::card::ImageState;
use crate::domain::location::camera_image_path;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpImageProbe {
    client: reqwest::Client,
    base_url: String,
}

impl HttpImageProbe {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ImageProbe for HttpImageProbe {
    async fn probe(&self, camera_id: &str) -> ImageState {
        let url = self.image_url(camera_id);

        match self.client.head(&url).send().await {
            Ok(response) if response.status().is_success() => ImageState::Present,
            Ok(response) => {
                tracing::debug!("image probe {} answered {}", url, response.status());
                ImageState::Absent
            }
            Err(e) => {
                tracing::debug!("image probe {} failed: {}", url, e);
                ImageState::Absent
            }
        }
    }

    fn image_url(&self, camera_id: &str) -> String {
        format!("{}{}", self.base_url, camera_image_path(camera_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_support::{closed_addr, serve};
    use axum::routing::get;
    use axum::Router;

    fn probe_for(base_url: String) -> HttpImageProbe {
        HttpImageProbe::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_image_url_escapes_camera_id() {
        let probe = probe_for("http://cams.local/".to_string());
        assert_eq!(probe.image_url("cafe"), "http://cams.local/cafe.jpg");
        assert_eq!(probe.image_url("gate a/b"), "http://cams.local/gate%20a%2Fb.jpg");
    }

    #[tokio::test]
    async fn test_existing_image_is_present() {
        let router = Router::new().route("/cafe.jpg", get(|| async { "jpeg bytes" }));
        let addr = serve(router).await;
        let probe = probe_for(format!("http://{addr}"));

        assert_eq!(probe.probe("cafe").await, ImageState::Present);
    }

    #[tokio::test]
    async fn test_missing_image_is_absent() {
        let addr = serve(Router::new()).await;
        let probe = probe_for(format!("http://{addr}"));

        assert_eq!(probe.probe("nowhere").await, ImageState::Absent);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_absent() {
        let addr = closed_addr().await;
        let probe = probe_for(format!("http://{addr}"));

        assert_eq!(probe.probe("cafe").await, ImageState::Absent);
    }
}
