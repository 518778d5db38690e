use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::data::FormData;
use super::error::ValidationError;
use super::fields::Field;
use super::form::Form;

pub const MSG_POINTS_OVER_MAX: &str = "Points greater than maximum points are not allowed.";
pub const MSG_POINTS_NEGATIVE: &str = "Points lower than zero are not allowed.";

/// 分数区间检查的触发条件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeCheck {
    /// 两个值都存在即检查
    #[default]
    Present,
    /// 兼容旧行为：任一值为 0 时跳过检查
    Truthy,
}

impl std::str::FromStr for RangeCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(RangeCheck::Present),
            "truthy" => Ok(RangeCheck::Truthy),
            _ => Err(format!("Invalid range check mode: {s}")),
        }
    }
}

/// 自动评测回调结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct GradingCallback {
    pub points: i64,
    pub max_points: i64,
    pub feedback: String,
    pub grading_payload: String,
    pub error: bool,
}

/// 评测回调表单，满分由回调自身携带，不需要练习上下文
pub struct SubmissionCallbackForm {
    form: Form<'static>,
}

impl Default for SubmissionCallbackForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionCallbackForm {
    pub fn new() -> Self {
        Self::with_range_check(RangeCheck::default())
    }

    pub fn with_range_check(range_check: RangeCheck) -> Self {
        let form = Form::new()
            .field(Field::integer("points").min_value(0))
            .field(Field::integer("max_points").min_value(0))
            .field(Field::text("feedback").optional())
            .field(Field::text("grading_payload").optional())
            .field(Field::boolean("error"))
            .rule(move |data| {
                let (Some(points), Some(max_points)) =
                    (data.integer("points"), data.integer("max_points"))
                else {
                    return Ok(());
                };

                if range_check == RangeCheck::Truthy && (points == 0 || max_points == 0) {
                    return Ok(());
                }

                if points > max_points {
                    return Err(MSG_POINTS_OVER_MAX.to_string());
                }
                if points < 0 {
                    return Err(MSG_POINTS_NEGATIVE.to_string());
                }
                Ok(())
            });

        Self { form }
    }

    pub fn form(&self) -> &Form<'static> {
        &self.form
    }

    pub fn validate(&self, data: &FormData) -> Result<GradingCallback, ValidationError> {
        let mut cleaned = self.form.clean(data)?;
        Ok(GradingCallback {
            points: cleaned.require_integer("points")?,
            max_points: cleaned.require_integer("max_points")?,
            feedback: cleaned.take_text("feedback"),
            grading_payload: cleaned.take_text("grading_payload"),
            error: cleaned.boolean("error").unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::fields::min_value_message;

    fn callback(points: &str, max_points: &str) -> FormData {
        FormData::new()
            .with("points", points)
            .with("max_points", max_points)
    }

    #[test]
    fn test_accepts_points_within_maximum() {
        let result = SubmissionCallbackForm::new()
            .validate(
                &callback("5", "10")
                    .with("feedback", "<pre>ok</pre>")
                    .with("grading_payload", "{\"tests\": 3}"),
            )
            .unwrap();

        assert_eq!(
            result,
            GradingCallback {
                points: 5,
                max_points: 10,
                feedback: "<pre>ok</pre>".into(),
                grading_payload: "{\"tests\": 3}".into(),
                error: false,
            }
        );
    }

    #[test]
    fn test_rejects_points_over_maximum() {
        let err = SubmissionCallbackForm::new()
            .validate(&callback("11", "10"))
            .unwrap_err();
        assert_eq!(err.non_field_errors, vec![MSG_POINTS_OVER_MAX]);
    }

    #[test]
    fn test_negative_points_rejected_by_field() {
        let err = SubmissionCallbackForm::new()
            .validate(&callback("-3", "10"))
            .unwrap_err();
        assert_eq!(err.field("points"), [min_value_message(0)]);
    }

    #[test]
    fn test_zero_points_always_accepted() {
        for mode in [RangeCheck::Present, RangeCheck::Truthy] {
            let result = SubmissionCallbackForm::with_range_check(mode)
                .validate(&callback("0", "10"))
                .unwrap();
            assert_eq!(result.points, 0);
        }
    }

    #[test]
    fn test_zero_maximum_depends_on_mode() {
        let err = SubmissionCallbackForm::with_range_check(RangeCheck::Present)
            .validate(&callback("5", "0"))
            .unwrap_err();
        assert_eq!(err.non_field_errors, vec![MSG_POINTS_OVER_MAX]);

        let result = SubmissionCallbackForm::with_range_check(RangeCheck::Truthy)
            .validate(&callback("5", "0"))
            .unwrap();
        assert_eq!((result.points, result.max_points), (5, 0));
    }

    #[test]
    fn test_error_flag_passed_through() {
        let result = SubmissionCallbackForm::new()
            .validate(&callback("0", "10").with("error", "true"))
            .unwrap();
        assert!(result.error);
    }

    #[test]
    fn test_range_check_from_str() {
        assert_eq!("truthy".parse::<RangeCheck>(), Ok(RangeCheck::Truthy));
        assert_eq!("present".parse::<RangeCheck>(), Ok(RangeCheck::Present));
        assert!("sometimes".parse::<RangeCheck>().is_err());
    }
}
