use serde::Serialize;
use ts_rs::TS;

use super::data::FormData;
use super::error::ValidationError;
use super::fields::Field;
use super::form::Form;
use super::staff::{StaffSubmission, StaffSubmissionForStudentForm};
use crate::context::{ExerciseContext, UserProfile};

/// 教师创建并评审的提交，额外指定评分人
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct TeacherSubmission {
    #[serde(flatten)]
    #[ts(flatten)]
    pub submission: StaffSubmission,
    pub grader: UserProfile,
}

/// 评分人必须是课程实例的教职人员
pub struct TeacherCreateAndAssessSubmissionForm<'a> {
    form: Form<'a>,
}

impl<'a> TeacherCreateAndAssessSubmissionForm<'a> {
    pub fn new(exercise: &'a dyn ExerciseContext) -> Self {
        let staff = exercise.course_instance().get_course_staff();
        let form =
            StaffSubmissionForStudentForm::build(exercise).field(Field::profile_choice("grader", staff));
        Self { form }
    }

    pub fn form(&self) -> &Form<'a> {
        &self.form
    }

    pub fn validate(&self, data: &FormData) -> Result<TeacherSubmission, ValidationError> {
        let mut cleaned = self.form.clean(data)?;
        let grader = cleaned.require_profile("grader")?;
        Ok(TeacherSubmission {
            submission: StaffSubmission::from_cleaned(&mut cleaned)?,
            grader,
        })
    }
}
