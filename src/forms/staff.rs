use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use super::data::FormData;
use super::error::ValidationError;
use super::fields::Field;
use super::form::{CleanedData, Form};
use super::review::{SubmissionReview, SubmissionReviewForm};
use crate::context::{ExerciseContext, UserProfile};

pub const MSG_STUDENTS_BLANK: &str =
    "Both students and students_by_student_id must not be blank.";
pub const MSG_STUDENTS_BOTH: &str = "Use students or students_by_student_id but not both.";

/// 学生选择，两种输入方式互斥
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "channel", content = "students", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub enum StudentSelection {
    /// 通过档案主键直接选择
    Direct(Vec<UserProfile>),
    /// 通过学号选择
    ByStudentId(Vec<UserProfile>),
}

impl StudentSelection {
    pub fn profiles(&self) -> &[UserProfile] {
        match self {
            StudentSelection::Direct(p) | StudentSelection::ByStudentId(p) => p,
        }
    }
}

/// 教职人员代学生创建并评审的提交
///
/// `submission_time` 是学生实际把作业交给课程人员的时间。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct StaffSubmission {
    #[serde(flatten)]
    #[ts(flatten)]
    pub review: SubmissionReview,
    pub submission_time: DateTime<Utc>,
    pub students: StudentSelection,
}

impl StaffSubmission {
    pub(crate) fn from_cleaned(cleaned: &mut CleanedData) -> Result<Self, ValidationError> {
        let review = SubmissionReview::from_cleaned(cleaned)?;
        let submission_time = cleaned.require_datetime("submission_time")?;

        let direct = cleaned.take_profiles("students");
        let students = if direct.is_empty() {
            StudentSelection::ByStudentId(cleaned.take_profiles("students_by_student_id"))
        } else {
            StudentSelection::Direct(direct)
        };

        Ok(Self {
            review,
            submission_time,
            students,
        })
    }
}

/// 教职人员代学生提交表单
///
/// 两个学生字段的可选范围在构造时由练习所属课程实例的选课名单决定。
/// 提交约束（提交次数、截止时间）检查在此处有意不启用。
pub struct StaffSubmissionForStudentForm<'a> {
    form: Form<'a>,
}

impl<'a> StaffSubmissionForStudentForm<'a> {
    pub fn new(exercise: &'a dyn ExerciseContext) -> Self {
        Self {
            form: Self::build(exercise),
        }
    }

    pub(crate) fn build(exercise: &'a dyn ExerciseContext) -> Form<'a> {
        let students = exercise.course_instance().get_students();
        let student_ids: Vec<String> = students
            .iter()
            .filter_map(|p| p.student_id.clone())
            .collect();

        SubmissionReviewForm::build(exercise)
            .field(Field::datetime("submission_time"))
            .field(Field::profile_multiple_choice("students", students).optional())
            .field(
                Field::typed_multiple_choice("students_by_student_id", student_ids, move |id| {
                    exercise.get_by_student_id(id)
                })
                .optional(),
            )
            .rule(|data| {
                let direct = !data.profiles("students").is_empty();
                let by_id = !data.profiles("students_by_student_id").is_empty();
                if !direct && !by_id {
                    Err(MSG_STUDENTS_BLANK.to_string())
                } else {
                    Ok(())
                }
            })
            .rule(|data| {
                let direct = !data.profiles("students").is_empty();
                let by_id = !data.profiles("students_by_student_id").is_empty();
                if direct && by_id {
                    Err(MSG_STUDENTS_BOTH.to_string())
                } else {
                    Ok(())
                }
            })
    }

    pub fn form(&self) -> &Form<'a> {
        &self.form
    }

    pub fn validate(&self, data: &FormData) -> Result<StaffSubmission, ValidationError> {
        let mut cleaned = self.form.clean(data)?;
        StaffSubmission::from_cleaned(&mut cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ExerciseSnapshot;
    use crate::forms::fields::{MSG_REQUIRED, invalid_choice_message};
    use crate::forms::review::max_points_message;

    fn profile(id: i64, student_id: Option<&str>) -> UserProfile {
        UserProfile {
            id,
            username: format!("user{id}"),
            student_id: student_id.map(str::to_string),
        }
    }

    fn exercise() -> ExerciseSnapshot {
        ExerciseSnapshot::new(10)
            .with_students(vec![
                profile(1, Some("100001")),
                profile(2, Some("100002")),
                profile(3, None),
            ])
            .with_staff(vec![profile(50, None)])
    }

    fn base_data() -> FormData {
        FormData::new()
            .with("points", "8")
            .with("feedback", "Returned on paper")
            .with("submission_time", "2024-02-10 14:00:00")
    }

    #[test]
    fn test_both_channels_empty_rejected() {
        let exercise = exercise();
        let form = StaffSubmissionForStudentForm::new(&exercise);

        let err = form.validate(&base_data()).unwrap_err();
        assert_eq!(err.non_field_errors, vec![MSG_STUDENTS_BLANK]);
        assert!(err.non_field_errors[0].contains("must not be blank"));
    }

    #[test]
    fn test_both_channels_filled_rejected() {
        let exercise = exercise();
        let form = StaffSubmissionForStudentForm::new(&exercise);

        let err = form
            .validate(
                &base_data()
                    .with("students", "1")
                    .with("students_by_student_id", "100002"),
            )
            .unwrap_err();
        assert_eq!(err.non_field_errors, vec![MSG_STUDENTS_BOTH]);
    }

    #[test]
    fn test_direct_selection_accepted() {
        let exercise = exercise();
        let form = StaffSubmissionForStudentForm::new(&exercise);

        let submission = form
            .validate(&base_data().with_list("students", ["1", "3"]))
            .unwrap();
        assert_eq!(submission.review.points, 8);
        assert_eq!(
            submission.students,
            StudentSelection::Direct(vec![profile(1, Some("100001")), profile(3, None)])
        );
        assert_eq!(
            submission.submission_time.to_rfc3339(),
            "2024-02-10T14:00:00+00:00"
        );
    }

    #[test]
    fn test_student_id_selection_accepted() {
        let exercise = exercise();
        let form = StaffSubmissionForStudentForm::new(&exercise);

        let submission = form
            .validate(&base_data().with("students_by_student_id", "100002"))
            .unwrap();
        assert_eq!(
            submission.students,
            StudentSelection::ByStudentId(vec![profile(2, Some("100002"))])
        );
        assert_eq!(submission.students.profiles().len(), 1);
    }

    #[test]
    fn test_choices_come_from_enrollment() {
        let exercise = exercise();
        let form = StaffSubmissionForStudentForm::new(&exercise);

        let students = form.form().get_field("students").unwrap().describe();
        let values: Vec<_> = students.choices.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["1", "2", "3"]);

        // 没有学号的学生不出现在学号选项中
        let by_id = form
            .form()
            .get_field("students_by_student_id")
            .unwrap()
            .describe();
        let values: Vec<_> = by_id.choices.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["100001", "100002"]);
    }

    #[test]
    fn test_staff_member_is_not_a_valid_student() {
        let exercise = exercise();
        let form = StaffSubmissionForStudentForm::new(&exercise);

        let err = form
            .validate(&base_data().with("students", "50"))
            .unwrap_err();
        assert_eq!(err.field("students"), [invalid_choice_message("50")]);
        // 字段失败后选择为空，规则同样报告
        assert_eq!(err.non_field_errors, vec![MSG_STUDENTS_BLANK]);
    }

    #[test]
    fn test_review_rule_runs_first() {
        let exercise = exercise();
        let form = StaffSubmissionForStudentForm::new(&exercise);

        let err = form
            .validate(
                &FormData::new()
                    .with("points", "11")
                    .with("submission_time", "2024-02-10 14:00:00"),
            )
            .unwrap_err();
        assert_eq!(err.non_field_errors, vec![max_points_message(10)]);
    }

    #[test]
    fn test_submission_time_required() {
        let exercise = exercise();
        let form = StaffSubmissionForStudentForm::new(&exercise);

        let err = form
            .validate(&FormData::new().with("points", "1").with("students", "1"))
            .unwrap_err();
        assert_eq!(err.field("submission_time"), [MSG_REQUIRED.to_string()]);
    }
}
