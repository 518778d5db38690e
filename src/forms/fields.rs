//! 表单字段定义与字段级清洗
//!
//! 每个字段独立地把原始字符串值清洗为 [`CleanedValue`]，失败时返回一条面向用户的错误信息。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use ts_rs::TS;

use super::form::CleanedValue;
use crate::context::UserProfile;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_INVALID_INTEGER: &str = "Enter a whole number.";
pub const MSG_INVALID_DATETIME: &str = "Enter a valid date/time.";
pub const MSG_INVALID_CHOICE_SINGLE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

// 整数输入允许形如 "5.0" 的写法
static TRAILING_DECIMAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.0*\s*$").expect("Invalid trailing decimal regex"));

const DATETIME_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

pub fn min_value_message(limit: i64) -> String {
    format!("Ensure this value is greater than or equal to {limit}.")
}

pub fn invalid_choice_message(value: &str) -> String {
    format!("Select a valid choice. {value} is not one of the available choices.")
}

pub fn invalid_pk_message(value: &str) -> String {
    format!("“{value}” is not a valid value.")
}

/// 学号到用户档案的转换函数
pub type Coerce<'a> = Box<dyn Fn(&str) -> Option<UserProfile> + 'a>;

pub enum FieldKind<'a> {
    Integer {
        min_value: Option<i64>,
    },
    Text,
    Boolean,
    DateTime,
    /// 以档案主键为取值的多选
    ProfileMultipleChoice {
        choices: Vec<UserProfile>,
    },
    /// 字符串多选，选中值经 `coerce` 转换为档案
    TypedMultipleChoice {
        choices: Vec<String>,
        coerce: Coerce<'a>,
    },
    /// 以档案主键为取值的单选
    ProfileChoice {
        choices: Vec<UserProfile>,
    },
}

impl FieldKind<'_> {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Integer { .. } => "integer",
            FieldKind::Text => "text",
            FieldKind::Boolean => "boolean",
            FieldKind::DateTime => "datetime",
            FieldKind::ProfileMultipleChoice { .. } => "profile_multiple_choice",
            FieldKind::TypedMultipleChoice { .. } => "typed_multiple_choice",
            FieldKind::ProfileChoice { .. } => "profile_choice",
        }
    }
}

pub struct Field<'a> {
    pub name: &'static str,
    pub required: bool,
    pub help_text: Option<&'static str>,
    pub kind: FieldKind<'a>,
}

/// 选项（用于渲染）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

/// 字段描述，携带构造时确定的选项集合
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceOption>,
}

impl<'a> Field<'a> {
    fn new(name: &'static str, kind: FieldKind<'a>) -> Self {
        Self {
            name,
            required: true,
            help_text: None,
            kind,
        }
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer { min_value: None })
    }

    pub fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// 布尔字段默认可选，未提交即为 false
    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean).optional()
    }

    pub fn datetime(name: &'static str) -> Self {
        Self::new(name, FieldKind::DateTime)
    }

    pub fn profile_multiple_choice(name: &'static str, choices: Vec<UserProfile>) -> Self {
        Self::new(name, FieldKind::ProfileMultipleChoice { choices })
    }

    pub fn typed_multiple_choice(
        name: &'static str,
        choices: Vec<String>,
        coerce: impl Fn(&str) -> Option<UserProfile> + 'a,
    ) -> Self {
        Self::new(
            name,
            FieldKind::TypedMultipleChoice {
                choices,
                coerce: Box::new(coerce),
            },
        )
    }

    pub fn profile_choice(name: &'static str, choices: Vec<UserProfile>) -> Self {
        Self::new(name, FieldKind::ProfileChoice { choices })
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn help_text(mut self, text: &'static str) -> Self {
        self.help_text = Some(text);
        self
    }

    /// 仅对整数字段生效
    pub fn min_value(mut self, limit: i64) -> Self {
        if let FieldKind::Integer { min_value } = &mut self.kind {
            *min_value = Some(limit);
        }
        self
    }

    /// 清洗原始值
    ///
    /// - `Ok(Some(_))`：清洗成功
    /// - `Ok(None)`：可选字段未填写，不写入清洗结果
    /// - `Err(_)`：面向用户的错误信息
    pub fn clean(&self, raw: &[String]) -> Result<Option<CleanedValue>, String> {
        match &self.kind {
            FieldKind::Integer { min_value } => self.clean_integer(raw, *min_value),
            FieldKind::Text => {
                let value = last_trimmed(raw);
                if value.is_empty() && self.required {
                    return Err(MSG_REQUIRED.to_string());
                }
                Ok(Some(CleanedValue::Text(value.to_string())))
            }
            FieldKind::Boolean => {
                let value = last_trimmed(raw);
                let checked = !value.is_empty()
                    && !value.eq_ignore_ascii_case("false")
                    && value != "0";
                if !checked && self.required {
                    return Err(MSG_REQUIRED.to_string());
                }
                Ok(Some(CleanedValue::Boolean(checked)))
            }
            FieldKind::DateTime => {
                let value = last_trimmed(raw);
                if value.is_empty() {
                    return if self.required {
                        Err(MSG_REQUIRED.to_string())
                    } else {
                        Ok(None)
                    };
                }
                parse_datetime(value)
                    .map(|dt| Some(CleanedValue::DateTime(dt)))
                    .ok_or_else(|| MSG_INVALID_DATETIME.to_string())
            }
            FieldKind::ProfileMultipleChoice { choices } => {
                self.clean_profile_multiple_choice(raw, choices)
            }
            FieldKind::TypedMultipleChoice { choices, coerce } => {
                self.clean_typed_multiple_choice(raw, choices, coerce)
            }
            FieldKind::ProfileChoice { choices } => {
                let value = last_trimmed(raw);
                if value.is_empty() {
                    return if self.required {
                        Err(MSG_REQUIRED.to_string())
                    } else {
                        Ok(None)
                    };
                }
                value
                    .parse::<i64>()
                    .ok()
                    .and_then(|pk| choices.iter().find(|p| p.id == pk))
                    .map(|p| Some(CleanedValue::Profile(p.clone())))
                    .ok_or_else(|| MSG_INVALID_CHOICE_SINGLE.to_string())
            }
        }
    }

    fn clean_integer(
        &self,
        raw: &[String],
        min_value: Option<i64>,
    ) -> Result<Option<CleanedValue>, String> {
        let value = last_trimmed(raw);
        if value.is_empty() {
            return if self.required {
                Err(MSG_REQUIRED.to_string())
            } else {
                Ok(None)
            };
        }

        let normalized = TRAILING_DECIMAL_RE.replace(value, "");
        let number = normalized
            .parse::<i64>()
            .map_err(|_| MSG_INVALID_INTEGER.to_string())?;

        if let Some(limit) = min_value {
            if number < limit {
                return Err(min_value_message(limit));
            }
        }

        Ok(Some(CleanedValue::Integer(number)))
    }

    fn clean_profile_multiple_choice(
        &self,
        raw: &[String],
        choices: &[UserProfile],
    ) -> Result<Option<CleanedValue>, String> {
        let values = non_blank(raw);
        if values.is_empty() {
            return if self.required {
                Err(MSG_REQUIRED.to_string())
            } else {
                Ok(Some(CleanedValue::Profiles(Vec::new())))
            };
        }

        // 先检查主键格式，再检查是否在可选范围内
        let mut keys = Vec::with_capacity(values.len());
        for value in &values {
            let pk = value
                .parse::<i64>()
                .map_err(|_| invalid_pk_message(value))?;
            keys.push((pk, *value));
        }

        let mut selected: Vec<UserProfile> = Vec::with_capacity(keys.len());
        for (pk, value) in keys {
            let profile = choices
                .iter()
                .find(|p| p.id == pk)
                .ok_or_else(|| invalid_choice_message(value))?;
            if !selected.iter().any(|p| p.id == pk) {
                selected.push(profile.clone());
            }
        }

        Ok(Some(CleanedValue::Profiles(selected)))
    }

    fn clean_typed_multiple_choice(
        &self,
        raw: &[String],
        choices: &[String],
        coerce: &Coerce<'a>,
    ) -> Result<Option<CleanedValue>, String> {
        let values = non_blank(raw);
        if values.is_empty() {
            return if self.required {
                Err(MSG_REQUIRED.to_string())
            } else {
                Ok(Some(CleanedValue::Profiles(Vec::new())))
            };
        }

        if let Some(invalid) = values.iter().find(|v| !choices.iter().any(|c| c.as_str() == **v)) {
            return Err(invalid_choice_message(invalid));
        }

        let mut selected: Vec<UserProfile> = Vec::with_capacity(values.len());
        for value in values {
            let profile = coerce(value).ok_or_else(|| invalid_choice_message(value))?;
            if !selected.iter().any(|p| p.id == profile.id) {
                selected.push(profile);
            }
        }

        Ok(Some(CleanedValue::Profiles(selected)))
    }

    pub fn describe(&self) -> FieldDescriptor {
        let (min_value, choices) = match &self.kind {
            FieldKind::Integer { min_value } => (*min_value, Vec::new()),
            FieldKind::ProfileMultipleChoice { choices } | FieldKind::ProfileChoice { choices } => (
                None,
                choices
                    .iter()
                    .map(|p| ChoiceOption {
                        value: p.id.to_string(),
                        label: p.username.clone(),
                    })
                    .collect(),
            ),
            FieldKind::TypedMultipleChoice { choices, .. } => (
                None,
                choices
                    .iter()
                    .map(|c| ChoiceOption {
                        value: c.clone(),
                        label: c.clone(),
                    })
                    .collect(),
            ),
            FieldKind::Text | FieldKind::Boolean | FieldKind::DateTime => (None, Vec::new()),
        };

        FieldDescriptor {
            name: self.name.to_string(),
            kind: self.kind.as_str().to_string(),
            required: self.required,
            help_text: self.help_text.map(str::to_string),
            min_value,
            choices,
        }
    }
}

fn last_trimmed(raw: &[String]) -> &str {
    raw.last().map(|v| v.trim()).unwrap_or_default()
}

fn non_blank(raw: &[String]) -> Vec<&str> {
    raw.iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect()
}

/// 解析时间输入，不带时区的值按 UTC 处理
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = DATETIME_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    DATE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn raw(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn profile(id: i64, student_id: Option<&str>) -> UserProfile {
        UserProfile {
            id,
            username: format!("user{id}"),
            student_id: student_id.map(str::to_string),
        }
    }

    #[test]
    fn test_integer_field() {
        let field = Field::integer("points").min_value(0);

        assert_eq!(
            field.clean(&raw(&[" 7 "])),
            Ok(Some(CleanedValue::Integer(7)))
        );
        assert_eq!(
            field.clean(&raw(&["5.0"])),
            Ok(Some(CleanedValue::Integer(5)))
        );
        assert_eq!(field.clean(&raw(&["5.5"])), Err(MSG_INVALID_INTEGER.into()));
        assert_eq!(field.clean(&raw(&["abc"])), Err(MSG_INVALID_INTEGER.into()));
        assert_eq!(field.clean(&raw(&["-1"])), Err(min_value_message(0)));
        assert_eq!(field.clean(&[]), Err(MSG_REQUIRED.into()));
        assert_eq!(field.optional().clean(&raw(&[""])), Ok(None));
    }

    #[test]
    fn test_text_field() {
        let required = Field::text("name");
        assert_eq!(required.clean(&raw(&["  "])), Err(MSG_REQUIRED.into()));

        let optional = Field::text("feedback").optional();
        assert_eq!(
            optional.clean(&[]),
            Ok(Some(CleanedValue::Text(String::new())))
        );
        assert_eq!(
            optional.clean(&raw(&[" <b>good</b> "])),
            Ok(Some(CleanedValue::Text("<b>good</b>".into())))
        );
    }

    #[test]
    fn test_boolean_field() {
        let field = Field::boolean("error");
        for (input, expected) in [
            (vec![], false),
            (raw(&["false"]), false),
            (raw(&["False"]), false),
            (raw(&["0"]), false),
            (raw(&["true"]), true),
            (raw(&["on"]), true),
        ] {
            assert_eq!(
                field.clean(&input),
                Ok(Some(CleanedValue::Boolean(expected)))
            );
        }
    }

    #[test]
    fn test_parse_datetime_formats() {
        let dt = parse_datetime("2024-03-01T12:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 10);

        let dt = parse_datetime("2024-03-01 12:30").unwrap();
        assert_eq!((dt.day(), dt.hour(), dt.minute()), (1, 12, 30));

        let dt = parse_datetime("03/01/2024").unwrap();
        assert_eq!((dt.month(), dt.day(), dt.hour()), (3, 1, 0));

        assert!(parse_datetime("yesterday").is_none());
    }

    #[test]
    fn test_datetime_field() {
        let field = Field::datetime("submission_time");
        assert_eq!(field.clean(&[]), Err(MSG_REQUIRED.into()));
        assert_eq!(
            field.clean(&raw(&["not a date"])),
            Err(MSG_INVALID_DATETIME.into())
        );
        assert!(matches!(
            field.clean(&raw(&["2024-03-01 08:00:00"])),
            Ok(Some(CleanedValue::DateTime(_)))
        ));
    }

    #[test]
    fn test_profile_multiple_choice() {
        let field = Field::profile_multiple_choice(
            "students",
            vec![profile(1, None), profile(2, None)],
        )
        .optional();

        assert_eq!(
            field.clean(&raw(&["2", "1", "2"])),
            Ok(Some(CleanedValue::Profiles(vec![
                profile(2, None),
                profile(1, None)
            ])))
        );
        assert_eq!(
            field.clean(&[]),
            Ok(Some(CleanedValue::Profiles(Vec::new())))
        );
        assert_eq!(field.clean(&raw(&["x"])), Err(invalid_pk_message("x")));
        assert_eq!(field.clean(&raw(&["1", "3"])), Err(invalid_choice_message("3")));
    }

    #[test]
    fn test_typed_multiple_choice() {
        let known = vec![profile(1, Some("s1"))];
        let field = Field::typed_multiple_choice(
            "students_by_student_id",
            vec!["s1".to_string(), "s2".to_string()],
            |id| known.iter().find(|p| p.student_id.as_deref() == Some(id)).cloned(),
        )
        .optional();

        assert_eq!(
            field.clean(&raw(&["s1"])),
            Ok(Some(CleanedValue::Profiles(vec![profile(1, Some("s1"))])))
        );
        assert_eq!(field.clean(&raw(&["s9"])), Err(invalid_choice_message("s9")));
        // 在选项内但查找失败
        assert_eq!(field.clean(&raw(&["s2"])), Err(invalid_choice_message("s2")));
    }

    #[test]
    fn test_profile_choice() {
        let field = Field::profile_choice("grader", vec![profile(7, None)]);
        assert_eq!(
            field.clean(&raw(&["7"])),
            Ok(Some(CleanedValue::Profile(profile(7, None))))
        );
        assert_eq!(field.clean(&raw(&["8"])), Err(MSG_INVALID_CHOICE_SINGLE.into()));
        assert_eq!(field.clean(&raw(&["seven"])), Err(MSG_INVALID_CHOICE_SINGLE.into()));
        assert_eq!(field.clean(&[]), Err(MSG_REQUIRED.into()));
    }

    #[test]
    fn test_describe_lists_choices() {
        let field = Field::profile_choice("grader", vec![profile(7, None)]);
        let descriptor = field.describe();
        assert_eq!(descriptor.kind, "profile_choice");
        assert_eq!(
            descriptor.choices,
            vec![ChoiceOption {
                value: "7".into(),
                label: "user7".into()
            }]
        );

        let descriptor = Field::integer("points").min_value(0).help_text("hint").describe();
        assert_eq!(descriptor.min_value, Some(0));
        assert_eq!(descriptor.help_text.as_deref(), Some("hint"));
    }
}
