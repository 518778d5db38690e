//! 练习定义表单
//!
//! 主要是展示分组：把练习记录的可编辑字段分成 "Exercise"、"Grading"、"Groups" 三组。
//! `order` 与 `course_module` 不可在此编辑。

use serde::Serialize;
use ts_rs::TS;

use super::data::FormData;
use super::error::ValidationError;
use super::fields::Field;
use super::form::Form;

pub const MSG_POINTS_TO_PASS_OVER_MAX: &str =
    "Points to pass cannot be greater than the maximum points.";
pub const MSG_GROUP_SIZE_ORDER: &str =
    "Minimum group size cannot be greater than the maximum group size.";

/// 字段分组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fieldset {
    pub legend: &'static str,
    pub fields: &'static [&'static str],
}

pub const EXERCISE_FIELDSETS: &[Fieldset] = &[
    Fieldset {
        legend: "Exercise",
        fields: &["name", "description", "category"],
    },
    Fieldset {
        legend: "Grading",
        fields: &[
            "max_submissions",
            "max_points",
            "points_to_pass",
            "allow_assistant_grading",
        ],
    },
    Fieldset {
        legend: "Groups",
        fields: &["min_group_size", "max_group_size"],
    },
];

/// 不允许在练习表单中编辑的字段
pub const EXCLUDED_FIELDS: &[&str] = &["order", "course_module"];

/// 按分组顺序列出全部可编辑字段
pub fn editable_fields() -> impl Iterator<Item = &'static str> {
    EXERCISE_FIELDSETS
        .iter()
        .flat_map(|fieldset| fieldset.fields.iter().copied())
}

pub fn is_editable(field: &str) -> bool {
    !EXCLUDED_FIELDS.contains(&field) && editable_fields().any(|f| f == field)
}

/// 练习定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct ExerciseDefinition {
    pub name: String,
    pub description: String,
    pub category: i64,
    pub max_submissions: i64,
    pub max_points: i64,
    pub points_to_pass: i64,
    pub allow_assistant_grading: bool,
    pub min_group_size: i64,
    pub max_group_size: i64,
}

pub struct BaseExerciseForm {
    form: Form<'static>,
}

impl Default for BaseExerciseForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseExerciseForm {
    pub fn new() -> Self {
        let form = Form::new()
            .field(Field::text("name"))
            .field(Field::text("description").optional())
            .field(Field::integer("category").min_value(0))
            .field(Field::integer("max_submissions").min_value(0))
            .field(Field::integer("max_points").min_value(0))
            .field(Field::integer("points_to_pass").min_value(0))
            .field(Field::boolean("allow_assistant_grading"))
            .field(Field::integer("min_group_size").min_value(1))
            .field(Field::integer("max_group_size").min_value(1))
            .rule(|data| {
                match (data.integer("points_to_pass"), data.integer("max_points")) {
                    (Some(to_pass), Some(max)) if to_pass > max => {
                        Err(MSG_POINTS_TO_PASS_OVER_MAX.to_string())
                    }
                    _ => Ok(()),
                }
            })
            .rule(|data| {
                match (data.integer("min_group_size"), data.integer("max_group_size")) {
                    (Some(min), Some(max)) if min > max => Err(MSG_GROUP_SIZE_ORDER.to_string()),
                    _ => Ok(()),
                }
            });

        Self { form }
    }

    pub fn fieldsets(&self) -> &'static [Fieldset] {
        EXERCISE_FIELDSETS
    }

    pub fn form(&self) -> &Form<'static> {
        &self.form
    }

    pub fn validate(&self, data: &FormData) -> Result<ExerciseDefinition, ValidationError> {
        let mut cleaned = self.form.clean(data)?;
        Ok(ExerciseDefinition {
            name: cleaned.take_text("name"),
            description: cleaned.take_text("description"),
            category: cleaned.require_integer("category")?,
            max_submissions: cleaned.require_integer("max_submissions")?,
            max_points: cleaned.require_integer("max_points")?,
            points_to_pass: cleaned.require_integer("points_to_pass")?,
            allow_assistant_grading: cleaned.boolean("allow_assistant_grading").unwrap_or(false),
            min_group_size: cleaned.require_integer("min_group_size")?,
            max_group_size: cleaned.require_integer("max_group_size")?,
        })
    }
}
