use serde::Serialize;
use ts_rs::TS;

use super::data::FormData;
use super::error::ValidationError;
use super::fields::Field;
use super::form::{CleanedData, Form};
use crate::context::ExerciseContext;

pub const POINTS_HELP_TEXT: &str =
    "Possible penalties are not applied - the points are set as given.";
pub const FEEDBACK_HELP_TEXT: &str = "HTML formatting is allowed";

pub fn max_points_message(max_points: i64) -> String {
    format!(
        "The maximum points for this exercise is {max_points} and the given points is more than that."
    )
}

/// 人工评审结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct SubmissionReview {
    pub points: i64,
    /// 允许 HTML
    pub feedback: String,
}

impl SubmissionReview {
    pub(crate) fn from_cleaned(cleaned: &mut CleanedData) -> Result<Self, ValidationError> {
        Ok(Self {
            points: cleaned.require_integer("points")?,
            feedback: cleaned.take_text("feedback"),
        })
    }
}

/// 提交评审表单
///
/// 分数不得超过练习满分。
pub struct SubmissionReviewForm<'a> {
    form: Form<'a>,
}

impl<'a> SubmissionReviewForm<'a> {
    pub fn new(exercise: &'a dyn ExerciseContext) -> Self {
        Self {
            form: Self::build(exercise),
        }
    }

    /// 构建基础字段与规则，扩展表单在此基础上追加
    pub(crate) fn build(exercise: &'a dyn ExerciseContext) -> Form<'a> {
        Form::new()
            .field(
                Field::integer("points")
                    .min_value(0)
                    .help_text(POINTS_HELP_TEXT),
            )
            .field(Field::text("feedback").optional().help_text(FEEDBACK_HELP_TEXT))
            .rule(move |data| {
                let max_points = exercise.max_points();
                match data.integer("points") {
                    Some(points) if points > max_points => Err(max_points_message(max_points)),
                    _ => Ok(()),
                }
            })
    }

    pub fn form(&self) -> &Form<'a> {
        &self.form
    }

    pub fn validate(&self, data: &FormData) -> Result<SubmissionReview, ValidationError> {
        let mut cleaned = self.form.clean(data)?;
        SubmissionReview::from_cleaned(&mut cleaned)
    }
}
