use serde::{Deserialize, Serialize};

use super::domain::{
    GradeRecord, GradingPeriodId, ScoreComponent, ScoreComponents, StudentId, SubjectInstanceId,
};
use super::policy::GradingPolicy;
use super::scale::{thai_descriptor_for_point, ScaleError};
use super::validation::{check_component, validate_components, ValidationError};

/// Maximum attainable score per component. A component without a maximum is not part of the
/// grading configuration and may not be entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentMaximums {
    pub classwork: Option<f64>,
    pub midterm: Option<f64>,
    #[serde(rename = "final")]
    pub final_exam: Option<f64>,
    pub behavior: Option<f64>,
}

impl Default for ComponentMaximums {
    /// 30/20/50 split common to Thai secondary schools; behavior is reported separately.
    fn default() -> Self {
        Self {
            classwork: Some(30.0),
            midterm: Some(20.0),
            final_exam: Some(50.0),
            behavior: None,
        }
    }
}

impl ComponentMaximums {
    pub fn get(&self, component: ScoreComponent) -> Option<f64> {
        match component {
            ScoreComponent::Classwork => self.classwork,
            ScoreComponent::Midterm => self.midterm,
            ScoreComponent::FinalExam => self.final_exam,
            ScoreComponent::Behavior => self.behavior,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregatedScore {
    pub total_score: f64,
    pub max_score: f64,
    pub percentage: f64,
}

/// Sums the entered components over the sum of their own maximums. Returns `Ok(None)` when
/// nothing has been entered: ungraded is not the same as zero.
pub fn aggregate(
    components: &ScoreComponents,
    maximums: &ComponentMaximums,
) -> Result<Option<AggregatedScore>, ValidationError> {
    let mut total_score = 0.0;
    let mut max_score = 0.0;
    let mut entered = 0usize;

    for (component, score) in components.entered() {
        let maximum = check_component(component, score, maximums)?;
        total_score += score;
        max_score += maximum;
        entered += 1;
    }

    if entered == 0 {
        return Ok(None);
    }

    Ok(Some(AggregatedScore {
        total_score,
        max_score,
        percentage: 100.0 * total_score / max_score,
    }))
}

/// Values derived from a grade's components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeResult {
    pub total_score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub grade_point: f64,
    pub grade_label: &'static str,
    pub descriptor: &'static str,
}

impl GradeResult {
    pub(crate) fn derive(
        components: &ScoreComponents,
        policy: &GradingPolicy,
    ) -> Result<Option<Self>, GradeError> {
        validate_components(components, &policy.maximums, policy.scale.mode)?;
        let Some(score) = aggregate(components, &policy.maximums)? else {
            return Ok(None);
        };

        let grade_point = policy.scale.point_for_percentage(score.percentage)?;
        let grade_label = policy.scale.label_for_point(grade_point)?;

        Ok(Some(Self {
            total_score: score.total_score,
            max_score: score.max_score,
            percentage: score.percentage,
            grade_point,
            grade_label,
            descriptor: thai_descriptor_for_point(grade_point),
        }))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Scale(#[from] ScaleError),
}

/// A student's grade in one subject instance. The derived score fields are private and are
/// recomputed from the components on every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grade {
    student_id: StudentId,
    subject_instance_id: SubjectInstanceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    grading_period_id: Option<GradingPeriodId>,
    components: ScoreComponents,
    #[serde(skip_serializing_if = "Option::is_none")]
    remarks: Option<String>,
    #[serde(flatten)]
    result: Option<GradeResult>,
}

impl Grade {
    pub fn compute(
        student_id: StudentId,
        subject_instance_id: SubjectInstanceId,
        components: ScoreComponents,
        policy: &GradingPolicy,
    ) -> Result<Self, GradeError> {
        let result = GradeResult::derive(&components, policy)?;
        Ok(Self {
            student_id,
            subject_instance_id,
            grading_period_id: None,
            components,
            remarks: None,
            result,
        })
    }

    pub fn from_record(record: &GradeRecord, policy: &GradingPolicy) -> Result<Self, GradeError> {
        let grade = Self::compute(
            record.student_id.clone(),
            record.subject.id.clone(),
            record.components,
            policy,
        )?;
        Ok(grade
            .with_grading_period(record.grading_period_id.clone())
            .with_remarks(record.remarks.clone()))
    }

    pub fn with_grading_period(mut self, grading_period_id: Option<GradingPeriodId>) -> Self {
        self.grading_period_id = grading_period_id;
        self
    }

    pub fn with_remarks(mut self, remarks: Option<String>) -> Self {
        self.remarks = remarks;
        self
    }

    /// Replaces the component scores. On error the grade is left untouched.
    pub fn update_components(
        &mut self,
        components: ScoreComponents,
        policy: &GradingPolicy,
    ) -> Result<(), GradeError> {
        let result = GradeResult::derive(&components, policy)?;
        self.components = components;
        self.result = result;
        Ok(())
    }

    pub fn set_remarks(&mut self, remarks: Option<String>) {
        self.remarks = remarks;
    }

    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    pub fn subject_instance_id(&self) -> &SubjectInstanceId {
        &self.subject_instance_id
    }

    pub fn grading_period_id(&self) -> Option<&GradingPeriodId> {
        self.grading_period_id.as_ref()
    }

    pub fn components(&self) -> &ScoreComponents {
        &self.components
    }

    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }

    pub fn result(&self) -> Option<&GradeResult> {
        self.result.as_ref()
    }

    pub fn is_graded(&self) -> bool {
        self.result.is_some()
    }

    pub fn total_score(&self) -> Option<f64> {
        self.result.map(|result| result.total_score)
    }

    pub fn percentage(&self) -> Option<f64> {
        self.result.map(|result| result.percentage)
    }

    pub fn grade_point(&self) -> Option<f64> {
        self.result.map(|result| result.grade_point)
    }

    pub fn grade_label(&self) -> Option<&'static str> {
        self.result.map(|result| result.grade_label)
    }
}
