use serde::Serialize;

use crate::errors::FormsError;

/// 对外暴露的表单种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    SubmissionReview,
    SubmissionCallback,
    StaffSubmission,
    TeacherSubmission,
    Exercise,
}

impl FormKind {
    pub const SUBMISSION_REVIEW: &'static str = "submission-review";
    pub const SUBMISSION_CALLBACK: &'static str = "submission-callback";
    pub const STAFF_SUBMISSION: &'static str = "staff-submission";
    pub const TEACHER_SUBMISSION: &'static str = "teacher-submission";
    pub const EXERCISE: &'static str = "exercise";

    /// 是否需要练习上下文才能构造
    pub fn requires_exercise(&self) -> bool {
        matches!(
            self,
            FormKind::SubmissionReview | FormKind::StaffSubmission | FormKind::TeacherSubmission
        )
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FormKind::SubmissionReview => FormKind::SUBMISSION_REVIEW,
            FormKind::SubmissionCallback => FormKind::SUBMISSION_CALLBACK,
            FormKind::StaffSubmission => FormKind::STAFF_SUBMISSION,
            FormKind::TeacherSubmission => FormKind::TEACHER_SUBMISSION,
            FormKind::Exercise => FormKind::EXERCISE,
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for FormKind {
    type Err = FormsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            FormKind::SUBMISSION_REVIEW => Ok(FormKind::SubmissionReview),
            FormKind::SUBMISSION_CALLBACK => Ok(FormKind::SubmissionCallback),
            FormKind::STAFF_SUBMISSION => Ok(FormKind::StaffSubmission),
            FormKind::TEACHER_SUBMISSION => Ok(FormKind::TeacherSubmission),
            FormKind::EXERCISE => Ok(FormKind::Exercise),
            _ => Err(FormsError::unknown_form(format!("Unknown form: {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_kind_round_trip_names() {
        for kind in [
            FormKind::SubmissionReview,
            FormKind::SubmissionCallback,
            FormKind::StaffSubmission,
            FormKind::TeacherSubmission,
            FormKind::Exercise,
        ] {
            assert_eq!(kind.to_string().parse::<FormKind>().ok(), Some(kind));
        }
        let err = "grading".parse::<FormKind>().unwrap_err();
        assert!(matches!(err, FormsError::UnknownForm(_)));
    }

    #[test]
    fn test_requires_exercise() {
        assert!(FormKind::StaffSubmission.requires_exercise());
        assert!(!FormKind::SubmissionCallback.requires_exercise());
        assert!(!FormKind::Exercise.requires_exercise());
    }
}
