use crate::page::PageSnapshot;

/// Notifications consumed by the rendering layer.
#[async_trait::async_trait]
pub trait FlowEventPort: Send + Sync {
    async fn on_page_loaded(&self, page: PageSnapshot);
    async fn on_page_tree_changed(&self);
    async fn on_finish(&self);
}
