use std::sync::Arc;

use coursekit_content::{
    ContentStore, InMemoryContentStore, InMemoryProfileStore, InMemoryProgressStore, ProfileStore,
    ProgressStore,
};

/// Stores shared by all routes.
///
/// Held behind traits so a persistent backend can be swapped in without
/// touching handlers.
pub struct AppServices {
    pub content: Arc<dyn ContentStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub progress: Arc<dyn ProgressStore>,
}

pub fn build_services() -> AppServices {
    AppServices {
        content: Arc::new(InMemoryContentStore::new()),
        profiles: Arc::new(InMemoryProfileStore::new()),
        progress: Arc::new(InMemoryProgressStore::new()),
    }
}
