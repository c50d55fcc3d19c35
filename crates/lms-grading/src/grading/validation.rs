use super::aggregate::ComponentMaximums;
use super::domain::{GradeRecord, ScoreComponent, ScoreComponents};
use super::scale::ScaleMode;

/// Malformed input rejected before it can reach an average.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{component} score {score} must be a non-negative number")]
    InvalidScore {
        component: ScoreComponent,
        score: f64,
    },
    #[error("{component} score entered but no maximum is configured for it")]
    MissingMaximum { component: ScoreComponent },
    #[error("{component} maximum {maximum} must be greater than zero")]
    InvalidMaximum {
        component: ScoreComponent,
        maximum: f64,
    },
    #[error("{component} score {score} exceeds its maximum {maximum}")]
    ScoreAboveMaximum {
        component: ScoreComponent,
        score: f64,
        maximum: f64,
    },
    #[error("subject instance {subject_instance} has invalid credits {credits}")]
    InvalidCredits {
        subject_instance: String,
        credits: f64,
    },
}

/// Checks one component score against its configured maximum.
pub(crate) fn check_component(
    component: ScoreComponent,
    score: f64,
    maximums: &ComponentMaximums,
) -> Result<f64, ValidationError> {
    if !score.is_finite() || score < 0.0 {
        return Err(ValidationError::InvalidScore { component, score });
    }

    let maximum = maximums
        .get(component)
        .ok_or(ValidationError::MissingMaximum { component })?;
    if !maximum.is_finite() || maximum <= 0.0 {
        return Err(ValidationError::InvalidMaximum { component, maximum });
    }

    Ok(maximum)
}

/// Strict grading additionally refuses scores above their maximum; lenient grading lets the
/// percentage exceed 100 and relies on the scale to clamp it.
pub fn validate_components(
    components: &ScoreComponents,
    maximums: &ComponentMaximums,
    mode: ScaleMode,
) -> Result<(), ValidationError> {
    for (component, score) in components.entered() {
        let maximum = check_component(component, score, maximums)?;
        if mode == ScaleMode::Strict && score > maximum {
            return Err(ValidationError::ScoreAboveMaximum {
                component,
                score,
                maximum,
            });
        }
    }
    Ok(())
}

pub fn validate_credits(record: &GradeRecord) -> Result<(), ValidationError> {
    let credits = record.subject.credits;
    if !credits.is_finite() || credits <= 0.0 {
        return Err(ValidationError::InvalidCredits {
            subject_instance: record.subject.id.0.clone(),
            credits,
        });
    }
    Ok(())
}

/// Ingestion gate for repository rows.
pub fn validate_record(
    record: &GradeRecord,
    maximums: &ComponentMaximums,
    mode: ScaleMode,
) -> Result<(), ValidationError> {
    validate_credits(record)?;
    validate_components(&record.components, maximums, mode)
}
