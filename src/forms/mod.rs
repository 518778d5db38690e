//! 表单校验层
//!
//! 每个表单由有序字段和有序规则组成。扩展表单通过组合基础表单的字段与规则构建：
//! 评审表单 → 教职人员代交表单 → 教师代交表单。
//! 依赖课程数据的选项范围在构造时从 [`crate::context::ExerciseContext`] 计算。

pub mod callback;
pub mod data;
pub mod error;
pub mod exercise;
pub mod fields;
pub mod form;
pub mod review;
pub mod staff;
pub mod teacher;

pub use callback::{GradingCallback, RangeCheck, SubmissionCallbackForm};
pub use data::FormData;
pub use error::ValidationError;
pub use exercise::{BaseExerciseForm, EXERCISE_FIELDSETS, ExerciseDefinition, Fieldset};
pub use fields::{ChoiceOption, Field, FieldDescriptor, FieldKind};
pub use form::{CleanedData, CleanedValue, Form, Rule};
pub use review::{SubmissionReview, SubmissionReviewForm};
pub use staff::{StaffSubmission, StaffSubmissionForStudentForm, StudentSelection};
pub use teacher::{TeacherCreateAndAssessSubmissionForm, TeacherSubmission};
