pub mod common;
pub mod forms;

pub use common::response::ApiResponse;

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000-1999
    BadRequest = 1000,

    // 表单错误 4000-4999
    FormValidationFailed = 4000,
    FormUnknown = 4001,
    FormContextMissing = 4002,
}
