use serde::Deserialize;
use ts_rs::TS;

use crate::context::ExerciseSnapshot;
use crate::forms::FormData;

/// 需要练习上下文的表单请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct ExerciseFormRequest {
    pub exercise: ExerciseSnapshot,
    #[serde(default)]
    #[ts(type = "Record<string, string | number | boolean | null | Array<string | number | boolean>>")]
    pub data: FormData,
}

/// 表单结构查询请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct FormSchemaRequest {
    #[serde(default)]
    pub exercise: Option<ExerciseSnapshot>,
}
