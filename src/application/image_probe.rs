// Camera image existence check
use crate::domain::card::ImageState;
use async_trait::async_trait;

#[async_trait]
pub trait ImageProbe: Send + Sync {
    /// Resolves to `Present` or `Absent`; failures are folded into `Absent`.
    async fn probe(&self, camera_id: &str) -> ImageState;

    /// Public URL of the camera's still image.
    fn image_url(&self, camera_id: &str) -> String;
}
