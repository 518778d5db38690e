use actix_web::{HttpRequest, HttpResponse, error, web};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

/// 带大小限制与统一错误处理的 JSON 提取器配置
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}

/// JSON 请求体解析失败时返回统一格式的错误响应
pub fn json_error_handler(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Invalid JSON payload for {}: {}", req.path(), err);

    let response = match &err {
        error::JsonPayloadError::Overflow { .. }
        | error::JsonPayloadError::OverflowKnownLength { .. } => HttpResponse::PayloadTooLarge()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, "请求体过大")),
        error::JsonPayloadError::ContentType => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::BadRequest, "请求体必须是 application/json"),
        ),
        other => HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("请求体格式错误: {other}"),
        )),
    };

    error::InternalError::from_response(err, response).into()
}
