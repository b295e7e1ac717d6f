use serde::{Deserialize, Serialize};

use crate::config::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SafeAreaInsets {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

/// Host-provided context. Only affects layout, never the simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameContext {
    #[serde(default)]
    pub safe_area: SafeAreaInsets,
    #[serde(default)]
    pub added_to_client: bool,
}

impl FrameContext {
    /// Horizontal and vertical padding the host should leave around the game.
    pub fn padding(&self) -> (f32, f32) {
        let insets = &self.safe_area;
        (insets.left + insets.right, insets.top + insets.bottom)
    }
}

impl Validate for FrameContext {
    fn validate(&self) -> Result<(), String> {
        let insets = &self.safe_area;
        let values = [insets.top, insets.bottom, insets.left, insets.right];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err("safe_area insets must be finite and non-negative".to_string());
        }
        Ok(())
    }
}
