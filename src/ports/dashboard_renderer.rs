//! DashboardRenderer port - the rendering surface fed by the refresh loop.

use async_trait::async_trait;

use crate::domain::dashboard::DashboardState;

/// Receives the outcome of every refresh cycle.
#[async_trait]
pub trait DashboardRenderer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Renders one cycle's state. Failures are logged by the caller and do
    /// not stop the refresh loop.
    async fn render(&self, state: &DashboardState) -> Result<(), RenderError>;
}

/// Errors raised by a rendering surface.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Render output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render surface unavailable: {0}")]
    Unavailable(String),
}
