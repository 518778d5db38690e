use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FormService, validation_response};
use crate::forms::SubmissionReviewForm;
use crate::models::forms::entities::FormKind;
use crate::models::forms::requests::ExerciseFormRequest;

/// 校验评审表单
/// POST /forms/submission-review
pub async fn validate_review(
    _service: &FormService,
    _request: &HttpRequest,
    req: ExerciseFormRequest,
) -> ActixResult<HttpResponse> {
    let form = SubmissionReviewForm::new(&req.exercise);
    Ok(validation_response(
        FormKind::SubmissionReview,
        form.validate(&req.data),
    ))
}
