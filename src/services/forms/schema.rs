use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::FormService;
use crate::config::FormsConfig;
use crate::context::ExerciseSnapshot;
use crate::errors::{FormsError, Result};
use crate::forms::{
    BaseExerciseForm, EXERCISE_FIELDSETS, FieldDescriptor, StaffSubmissionForStudentForm,
    SubmissionCallbackForm, SubmissionReviewForm, TeacherCreateAndAssessSubmissionForm,
};
use crate::models::forms::entities::FormKind;
use crate::models::forms::requests::FormSchemaRequest;
use crate::models::forms::responses::{FieldsetResponse, FormSchemaResponse};
use crate::models::{ApiResponse, ErrorCode};

fn require_exercise(
    kind: FormKind,
    exercise: Option<&ExerciseSnapshot>,
) -> Result<&ExerciseSnapshot> {
    exercise.ok_or_else(|| FormsError::context_lookup(format!("表单 {kind} 需要提供练习上下文")))
}

fn describe(
    kind: FormKind,
    exercise: Option<&ExerciseSnapshot>,
    config: &FormsConfig,
) -> Result<Vec<FieldDescriptor>> {
    let fields = match kind {
        FormKind::SubmissionCallback => {
            SubmissionCallbackForm::with_range_check(config.callback_range_check)
                .form()
                .describe()
        }
        FormKind::Exercise => BaseExerciseForm::new().form().describe(),
        FormKind::SubmissionReview => {
            SubmissionReviewForm::new(require_exercise(kind, exercise)?)
                .form()
                .describe()
        }
        FormKind::StaffSubmission => {
            StaffSubmissionForStudentForm::new(require_exercise(kind, exercise)?)
                .form()
                .describe()
        }
        FormKind::TeacherSubmission => {
            TeacherCreateAndAssessSubmissionForm::new(require_exercise(kind, exercise)?)
                .form()
                .describe()
        }
    };
    Ok(fields)
}

/// 获取表单结构（字段、选项与分组）
/// POST /forms/{form}/schema
pub async fn get_form_schema(
    service: &FormService,
    request: &HttpRequest,
    form: &str,
    req: FormSchemaRequest,
) -> ActixResult<HttpResponse> {
    let kind = match form.parse::<FormKind>() {
        Ok(kind) => kind,
        Err(e) => {
            debug!("{}", e);
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FormUnknown,
                format!("表单不存在: {form}"),
            )));
        }
    };

    let config = service.get_config(request);
    let fields = match describe(kind, req.exercise.as_ref(), &config) {
        Ok(fields) => fields,
        Err(e) => {
            debug!("{}", e);
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FormContextMissing,
                e.message(),
            )));
        }
    };

    let fieldsets = if kind == FormKind::Exercise {
        EXERCISE_FIELDSETS
            .iter()
            .map(FieldsetResponse::from)
            .collect()
    } else {
        Vec::new()
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        FormSchemaResponse {
            form: kind.to_string(),
            fields,
            fieldsets,
        },
        "查询成功",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_requires_exercise_for_bound_forms() {
        let config = FormsConfig::default();
        for kind in [
            FormKind::SubmissionReview,
            FormKind::StaffSubmission,
            FormKind::TeacherSubmission,
        ] {
            let err = describe(kind, None, &config).unwrap_err();
            assert!(matches!(err, FormsError::ContextLookup(_)));
            assert!(kind.requires_exercise());
        }

        assert_eq!(describe(FormKind::SubmissionCallback, None, &config).unwrap().len(), 5);
        assert_eq!(describe(FormKind::Exercise, None, &config).unwrap().len(), 9);
    }

    #[test]
    fn test_describe_review_with_exercise() {
        let exercise = ExerciseSnapshot::new(3);
        let fields =
            describe(FormKind::SubmissionReview, Some(&exercise), &FormsConfig::default()).unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["points", "feedback"]);
    }
}
