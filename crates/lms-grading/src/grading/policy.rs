use serde::{Deserialize, Serialize};

use super::aggregate::ComponentMaximums;
use super::domain::SubjectArea;
use super::scale::GradeScale;
use crate::config::GradingConfig;

/// Everything the engine needs to turn raw scores into grades and printed documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingPolicy {
    pub maximums: ComponentMaximums,
    pub scale: GradeScale,
    /// Learning areas in the order documents print them.
    pub areas: Vec<SubjectArea>,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            maximums: ComponentMaximums::default(),
            scale: GradeScale::default(),
            areas: SubjectArea::standard(),
        }
    }
}

impl GradingPolicy {
    pub fn from_config(config: &GradingConfig) -> Self {
        Self {
            maximums: config.maximums,
            scale: GradeScale::new(config.scale_mode),
            areas: SubjectArea::standard(),
        }
    }
}
