use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FormService, validation_response};
use crate::forms::StaffSubmissionForStudentForm;
use crate::models::forms::entities::FormKind;
use crate::models::forms::requests::ExerciseFormRequest;

/// 校验教职人员代学生提交
/// POST /forms/staff-submission
pub async fn validate_staff_submission(
    _service: &FormService,
    _request: &HttpRequest,
    req: ExerciseFormRequest,
) -> ActixResult<HttpResponse> {
    // 学生选项范围来自请求携带的课程实例
    let form = StaffSubmissionForStudentForm::new(&req.exercise);
    Ok(validation_response(
        FormKind::StaffSubmission,
        form.validate(&req.data),
    ))
}
