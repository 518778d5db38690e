pub mod callback;
pub mod exercise;
pub mod review;
pub mod schema;
pub mod staff;
pub mod teacher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::config::FormsConfig;
use crate::forms::{FormData, ValidationError};
use crate::models::forms::entities::FormKind;
use crate::models::forms::requests::{ExerciseFormRequest, FormSchemaRequest};
use crate::models::forms::responses::FormErrorsResponse;
use crate::models::{ApiResponse, ErrorCode};

pub struct FormService;

impl FormService {
    pub fn new_lazy() -> Self {
        Self
    }

    /// 表单配置：来自 app data，未注册时使用默认值
    pub(crate) fn get_config(&self, request: &HttpRequest) -> FormsConfig {
        request
            .app_data::<web::Data<FormsConfig>>()
            .map(|config| config.get_ref().clone())
            .unwrap_or_default()
    }

    /// 校验评审表单
    pub async fn validate_review(
        &self,
        request: &HttpRequest,
        req: ExerciseFormRequest,
    ) -> ActixResult<HttpResponse> {
        review::validate_review(self, request, req).await
    }

    /// 校验评测回调
    pub async fn validate_callback(
        &self,
        request: &HttpRequest,
        data: FormData,
    ) -> ActixResult<HttpResponse> {
        callback::validate_callback(self, request, data).await
    }

    /// 校验教职人员代学生提交
    pub async fn validate_staff_submission(
        &self,
        request: &HttpRequest,
        req: ExerciseFormRequest,
    ) -> ActixResult<HttpResponse> {
        staff::validate_staff_submission(self, request, req).await
    }

    /// 校验教师代学生提交
    pub async fn validate_teacher_submission(
        &self,
        request: &HttpRequest,
        req: ExerciseFormRequest,
    ) -> ActixResult<HttpResponse> {
        teacher::validate_teacher_submission(self, request, req).await
    }

    /// 校验练习定义
    pub async fn validate_exercise(
        &self,
        request: &HttpRequest,
        data: FormData,
    ) -> ActixResult<HttpResponse> {
        exercise::validate_exercise(self, request, data).await
    }

    /// 获取练习表单分组
    pub async fn get_exercise_fieldsets(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        exercise::get_exercise_fieldsets(self, request).await
    }

    /// 获取表单结构
    pub async fn get_form_schema(
        &self,
        request: &HttpRequest,
        form: &str,
        req: FormSchemaRequest,
    ) -> ActixResult<HttpResponse> {
        schema::get_form_schema(self, request, form, req).await
    }
}

/// 把校验结果转换为统一响应
pub(crate) fn validation_response<T>(
    form: FormKind,
    result: Result<T, ValidationError>,
) -> HttpResponse
where
    T: Serialize + TS,
{
    match result {
        Ok(data) => {
            debug!("Form '{}' validated successfully", form);
            HttpResponse::Ok().json(ApiResponse::success(data, "表单校验通过"))
        }
        Err(err) => {
            debug!("Form '{}' rejected: {}", form, err);
            HttpResponse::BadRequest().json(ApiResponse::error(
                ErrorCode::FormValidationFailed,
                FormErrorsResponse::from(err),
                "表单校验失败",
            ))
        }
    }
}
