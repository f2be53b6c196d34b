//! Sends each cycle to several renderers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::dashboard::DashboardState;
use crate::ports::{DashboardRenderer, RenderError};

/// Renders to every inner renderer in order.
///
/// A failing renderer does not stop the others; the last error is returned.
#[derive(Clone, Default)]
pub struct FanoutRenderer {
    renderers: Vec<Arc<dyn DashboardRenderer>>,
}

impl FanoutRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, renderer: Arc<dyn DashboardRenderer>) -> Self {
        self.renderers.push(renderer);
        self
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

#[async_trait]
impl DashboardRenderer for FanoutRenderer {
    fn name(&self) -> &'static str {
        "fanout"
    }

    async fn render(&self, state: &DashboardState) -> Result<(), RenderError> {
        let mut last_error = None;
        for renderer in &self.renderers {
            if let Err(err) = renderer.render(state).await {
                tracing::warn!(renderer = renderer.name(), error = %err, "Renderer failed");
                last_error = Some(err);
            }
        }
        match last_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
