use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FormService, validation_response};
use crate::forms::{FormData, SubmissionCallbackForm};
use crate::models::forms::entities::FormKind;

/// 校验评测回调
/// POST /forms/submission-callback
pub async fn validate_callback(
    service: &FormService,
    request: &HttpRequest,
    data: FormData,
) -> ActixResult<HttpResponse> {
    let config = service.get_config(request);
    let form = SubmissionCallbackForm::with_range_check(config.callback_range_check);
    Ok(validation_response(
        FormKind::SubmissionCallback,
        form.validate(&data),
    ))
}
