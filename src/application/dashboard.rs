// Dashboard service - Holds the current view and drives its refresh cycle
use crate::application::image_probe::ImageProbe;
use crate::application::occupancy_source::{LoadError, OccupancySource};
use crate::application::refresh::RefreshTask;
use crate::domain::card::{DashboardView, ImageState, LocationCard, Snapshot};
use crate::domain::location::LocationRecord;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{debug, error, info};

/// A mounted dashboard. Mounting performs the initial load and starts the
/// refresh timer; unmounting (or dropping) cancels it.
pub struct Dashboard {
    state: Arc<DashboardState>,
    refresh: RefreshTask,
    interval: Duration,
}

struct DashboardState {
    source: Arc<dyn OccupancySource>,
    probe: Arc<dyn ImageProbe>,
    view: watch::Sender<Arc<DashboardView>>,
    images: RwLock<HashMap<String, ImageState>>,
    probe_generation: AtomicU64,
}

impl Dashboard {
    pub async fn mount(
        source: Arc<dyn OccupancySource>,
        probe: Arc<dyn ImageProbe>,
        interval: Duration,
    ) -> Result<Self, LoadError> {
        let records = source.fetch_locations().await?;
        info!("initial load returned {} locations", records.len());

        let (view, _) = watch::channel(Arc::new(DashboardView::Ready(Snapshot::new(
            records.clone(),
            now_label(),
        ))));

        let state = Arc::new(DashboardState {
            source,
            probe,
            view,
            images: RwLock::new(HashMap::new()),
            probe_generation: AtomicU64::new(0),
        });
        state.spawn_probes(&records);

        let tick_state = state.clone();
        let refresh = RefreshTask::start(interval, move || {
            let state = tick_state.clone();
            async move { state.refresh().await }
        });

        Ok(Self {
            state,
            refresh,
            interval,
        })
    }

    pub fn unmount(&self) {
        if self.refresh.is_active() {
            info!("unmounting dashboard");
        }
        self.refresh.stop();
    }

    pub fn is_mounted(&self) -> bool {
        self.refresh.is_active()
    }

    pub fn refresh_interval(&self) -> Duration {
        self.interval
    }

    pub fn view(&self) -> Arc<DashboardView> {
        self.state.view.borrow().clone()
    }

    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardView>> {
        self.state.view.subscribe()
    }

    /// Build one card per record, in provider order, using the image states
    /// known at this moment.
    pub async fn cards(&self, snapshot: &Snapshot) -> Vec<LocationCard> {
        let images = self.state.images.read().await;

        snapshot
            .records
            .iter()
            .map(|record| match record.camera() {
                Some(camera_id) => {
                    let image = images
                        .get(camera_id)
                        .copied()
                        .unwrap_or(ImageState::Unknown);
                    LocationCard::new(record, image, Some(self.state.probe.image_url(camera_id)))
                }
                None => LocationCard::new(record, ImageState::Absent, None),
            })
            .collect()
    }
}

impl DashboardState {
    async fn refresh(self: Arc<Self>) {
        match self.source.fetch_locations().await {
            Ok(records) => {
                info!("refresh returned {} locations", records.len());
                self.spawn_probes(&records);
                self.view
                    .send_replace(Arc::new(DashboardView::Ready(Snapshot::new(records, now_label()))));
            }
            Err(e) => {
                error!("refresh failed: {e}");
                self.view.send_replace(Arc::new(DashboardView::Failed {
                    error: e.to_string(),
                    at: now_label(),
                }));
            }
        }
    }

    /// Probe every distinct camera in the background. Previous results stay
    /// visible until the new ones land. Only the latest batch may write, and
    /// it drops cameras that left the payload.
    fn spawn_probes(self: &Arc<Self>, records: &[LocationRecord]) {
        let generation = self.probe_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut seen = HashSet::new();
        let camera_ids: Vec<String> = records
            .iter()
            .filter_map(|r| r.camera())
            .filter(|id| seen.insert(*id))
            .map(str::to_string)
            .collect();

        let state = self.clone();
        tokio::spawn(async move {
            let results = join_all(camera_ids.iter().map(|id| state.probe.probe(id))).await;

            let mut images = state.images.write().await;
            if state.probe_generation.load(Ordering::SeqCst) != generation {
                debug!("discarding probe batch {generation}, superseded");
                return;
            }

            images.retain(|camera_id, _| camera_ids.contains(camera_id));
            for (camera_id, image) in camera_ids.into_iter().zip(results) {
                debug!("camera {camera_id}: {image:?}");
                images.insert(camera_id, image);
            }
        });
    }
}

fn now_label() -> String {
    chrono::Local::now().format("%-H:%M:%S").to_string()
}
