//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 表单层自身的校验失败使用 [`crate::forms::ValidationError`]，
//! 在需要跨层传递时可以转换为 [`FormsError::Validation`]。

use std::fmt;

use crate::forms::ValidationError;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_forms_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum FormsError {
            $($variant(String),)*
        }

        impl FormsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(FormsError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(FormsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(FormsError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl FormsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        FormsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_forms_errors! {
    Configuration("E001", "Configuration Error"),
    Validation("E002", "Validation Error"),
    ContextLookup("E003", "Context Lookup Error"),
    UnknownForm("E004", "Unknown Form"),
}

impl FormsError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for FormsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for FormsError {}

// 为常见的错误类型实现 From trait
impl From<ValidationError> for FormsError {
    fn from(err: ValidationError) -> Self {
        FormsError::Validation(err.messages().join("; "))
    }
}

impl From<config::ConfigError> for FormsError {
    fn from(err: config::ConfigError) -> Self {
        FormsError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FormsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(FormsError::configuration("test").code(), "E001");
        assert_eq!(FormsError::validation("test").code(), "E002");
        assert_eq!(FormsError::unknown_form("test").code(), "E004");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            FormsError::context_lookup("test").error_type(),
            "Context Lookup Error"
        );
        assert_eq!(
            FormsError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = FormsError::validation("points: Enter a whole number.");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Enter a whole number."));
    }

    #[test]
    fn test_from_validation_error_joins_messages() {
        let mut err = ValidationError::default();
        err.add_field_error("points", "This field is required.");
        err.add_non_field_error("Both students and students_by_student_id must not be blank.");

        let converted = FormsError::from(err);
        assert_eq!(converted.code(), "E002");
        assert_eq!(
            converted.message(),
            "points: This field is required.; Both students and students_by_student_id must not be blank."
        );
    }
}
