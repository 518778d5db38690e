use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::forms::FormData;
use crate::models::forms::requests::{ExerciseFormRequest, FormSchemaRequest};
use crate::services::FormService;

// 懒加载的全局 FormService 实例
static FORM_SERVICE: Lazy<FormService> = Lazy::new(FormService::new_lazy);

// 评审表单
pub async fn validate_review(
    req: HttpRequest,
    body: web::Json<ExerciseFormRequest>,
) -> ActixResult<HttpResponse> {
    FORM_SERVICE.validate_review(&req, body.into_inner()).await
}

// 评测回调
pub async fn validate_callback(
    req: HttpRequest,
    body: web::Json<FormData>,
) -> ActixResult<HttpResponse> {
    FORM_SERVICE.validate_callback(&req, body.into_inner()).await
}

// 教职人员代学生提交
pub async fn validate_staff_submission(
    req: HttpRequest,
    body: web::Json<ExerciseFormRequest>,
) -> ActixResult<HttpResponse> {
    FORM_SERVICE
        .validate_staff_submission(&req, body.into_inner())
        .await
}

// 教师代学生提交并指定评分人
pub async fn validate_teacher_submission(
    req: HttpRequest,
    body: web::Json<ExerciseFormRequest>,
) -> ActixResult<HttpResponse> {
    FORM_SERVICE
        .validate_teacher_submission(&req, body.into_inner())
        .await
}

// 练习定义
pub async fn validate_exercise(
    req: HttpRequest,
    body: web::Json<FormData>,
) -> ActixResult<HttpResponse> {
    FORM_SERVICE.validate_exercise(&req, body.into_inner()).await
}

// 练习表单分组
pub async fn get_exercise_fieldsets(req: HttpRequest) -> ActixResult<HttpResponse> {
    FORM_SERVICE.get_exercise_fieldsets(&req).await
}

// 表单结构
pub async fn get_form_schema(
    req: HttpRequest,
    path: web::Path<String>,
    body: Option<web::Json<FormSchemaRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    FORM_SERVICE
        .get_form_schema(&req, &path.into_inner(), body)
        .await
}

// 配置路由
pub fn configure_forms_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/forms")
            .route("/submission-review", web::post().to(validate_review))
            .route("/submission-callback", web::post().to(validate_callback))
            .route(
                "/staff-submission",
                web::post().to(validate_staff_submission),
            )
            .route(
                "/teacher-submission",
                web::post().to(validate_teacher_submission),
            )
            .route("/exercise", web::post().to(validate_exercise))
            .route("/exercise/fieldsets", web::get().to(get_exercise_fieldsets))
            .route("/{form}/schema", web::post().to(get_form_schema)),
    );
}
