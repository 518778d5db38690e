use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

use crate::forms::{FieldDescriptor, Fieldset, ValidationError};

/// 表单校验失败时的数据
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct FormErrorsResponse {
    pub field_errors: BTreeMap<String, Vec<String>>,
    pub non_field_errors: Vec<String>,
}

impl From<ValidationError> for FormErrorsResponse {
    fn from(err: ValidationError) -> Self {
        Self {
            field_errors: err.field_errors,
            non_field_errors: err.non_field_errors,
        }
    }
}

/// 字段分组
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct FieldsetResponse {
    pub legend: String,
    pub fields: Vec<String>,
}

impl From<&Fieldset> for FieldsetResponse {
    fn from(fieldset: &Fieldset) -> Self {
        Self {
            legend: fieldset.legend.to_string(),
            fields: fieldset.fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// 表单结构：字段描述（含构造时确定的选项）与可选的分组
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct FormSchemaResponse {
    pub form: String,
    pub fields: Vec<FieldDescriptor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fieldsets: Vec<FieldsetResponse>,
}
