use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FormService, validation_response};
use crate::forms::TeacherCreateAndAssessSubmissionForm;
use crate::models::forms::entities::FormKind;
use crate::models::forms::requests::ExerciseFormRequest;

/// 校验教师代学生提交
/// POST /forms/teacher-submission
pub async fn validate_teacher_submission(
    _service: &FormService,
    _request: &HttpRequest,
    req: ExerciseFormRequest,
) -> ActixResult<HttpResponse> {
    let form = TeacherCreateAndAssessSubmissionForm::new(&req.exercise);
    Ok(validation_response(
        FormKind::TeacherSubmission,
        form.validate(&req.data),
    ))
}
