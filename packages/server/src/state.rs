use std::sync::Arc;

use crate::config::AppConfig;
use crate::directory::CampusVerifier;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub campuses: Arc<dyn CampusVerifier>,
    pub config: AppConfig,
}
