//! Application state
//!
//! Every collaborator the pipeline touches hangs off `AppState` behind a
//! trait object, so tests can substitute fakes for the probe, the storages,
//! and the record store without standing up external processes or services.

use cliphost_core::Config;
use cliphost_db::VideoStore;
use cliphost_processing::MediaProbe;
use cliphost_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoStore>,
    pub thumbnail_storage: Arc<dyn Storage>,
    pub video_storage: Arc<dyn Storage>,
    pub probe: Arc<dyn MediaProbe>,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
