//! End-to-end test: the simulated transport behind the lifecycle manager.
//!
//! Runs under a paused clock, so the 200 ms tick pacing costs no wall
//! time.

use std::sync::Arc;

use llamapocket_core::{
    DownloadEvent, ModelCatalog, ModelId, ModelLifecycleManager, ModelState,
};
use llamapocket_download::SimulatedDownloadClient;

#[tokio::test(start_paused = true)]
async fn manager_downloads_through_the_simulation() {
    let catalog = ModelCatalog::builtin();
    let client = Arc::new(SimulatedDownloadClient::default());
    let (manager, mut rx) = ModelLifecycleManager::new(&catalog, client);
    let id = ModelId::new("tinyllama-1.1b");

    manager.download(&id).await.unwrap();

    assert_eq!(
        manager.descriptor(&id).await.unwrap().state,
        ModelState::Downloaded
    );
    assert_eq!(manager.current_model_id().await, Some(id));
    assert_eq!(
        manager.storage_info().await.used_bytes,
        600 * 1024 * 1024
    );

    let mut fractions = Vec::new();
    let mut completed = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            DownloadEvent::Progress { fraction, .. } => fractions.push(fraction),
            DownloadEvent::Completed { .. } => completed = true,
            _ => {}
        }
    }
    assert!(completed);
    assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(fractions.last(), Some(&1.0));
}

#[tokio::test]
async fn bundled_model_downloads_instantly() {
    let catalog = ModelCatalog::builtin();
    let client = Arc::new(SimulatedDownloadClient::instant());
    let (manager, _rx) = ModelLifecycleManager::new(&catalog, client);
    let id = ModelId::new("llama3-8b-gguf");

    manager.download(&id).await.unwrap();
    assert_eq!(
        manager.descriptor(&id).await.unwrap().state,
        ModelState::Downloaded
    );
}
