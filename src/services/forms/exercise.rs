use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FormService, validation_response};
use crate::forms::{BaseExerciseForm, EXERCISE_FIELDSETS, FormData};
use crate::models::ApiResponse;
use crate::models::forms::entities::FormKind;
use crate::models::forms::responses::FieldsetResponse;

/// 校验练习定义
/// POST /forms/exercise
pub async fn validate_exercise(
    _service: &FormService,
    _request: &HttpRequest,
    data: FormData,
) -> ActixResult<HttpResponse> {
    let form = BaseExerciseForm::new();
    Ok(validation_response(FormKind::Exercise, form.validate(&data)))
}

/// 获取练习表单分组
/// GET /forms/exercise/fieldsets
pub async fn get_exercise_fieldsets(
    _service: &FormService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let fieldsets: Vec<FieldsetResponse> =
        EXERCISE_FIELDSETS.iter().map(FieldsetResponse::from).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(fieldsets, "查询成功")))
}
