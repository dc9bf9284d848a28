//! Versioned handle to the current model snapshot.

use std::sync::Arc;
use wupkit_parser::WallModel;

/// The single handle collaborators hold on to.
///
/// Snapshots are immutable. An edit builds a complete new model and swaps
/// it in, so readers never observe a half-applied change.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    model: Arc<WallModel>,
    generation: u64,
}

impl ModelHandle {
    pub fn new(model: WallModel) -> Self {
        Self {
            model: Arc::new(model),
            generation: 0,
        }
    }

    pub fn model(&self) -> &WallModel {
        &self.model
    }

    /// Shared pointer to the current snapshot
    pub fn snapshot(&self) -> Arc<WallModel> {
        Arc::clone(&self.model)
    }

    /// Number of swaps since the handle was created
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the snapshot, returning the new generation
    pub fn swap(&mut self, model: WallModel) -> u64 {
        self.model = Arc::new(model);
        self.generation += 1;
        self.generation
    }
}
