use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// 表单校验失败
///
/// 字段级错误按字段名归类，表单级规则产生的错误放在 `non_field_errors`。
/// 调用方应当携带这些信息重新渲染表单，失败本身不是致命错误。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field_errors: BTreeMap<String, Vec<String>>,
    pub non_field_errors: Vec<String>,
}

impl ValidationError {
    /// 只包含一条表单级错误
    pub fn non_field<T: Into<String>>(message: T) -> Self {
        let mut err = Self::default();
        err.add_non_field_error(message);
        err
    }

    pub fn add_field_error<T: Into<String>>(&mut self, field: &str, message: T) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field_error<T: Into<String>>(&mut self, message: T) {
        self.non_field_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.non_field_errors.is_empty()
    }

    /// 某个字段的错误列表
    pub fn field(&self, field: &str) -> &[String] {
        self.field_errors
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 展平后的全部错误信息，字段错误带上字段名前缀
    pub fn messages(&self) -> Vec<String> {
        self.field_errors
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field}: {m}")))
            .chain(self.non_field_errors.iter().cloned())
            .collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_order() {
        let mut err = ValidationError::non_field("form level");
        err.add_field_error("students", "second");
        err.add_field_error("points", "first");

        assert_eq!(
            err.messages(),
            vec!["points: first", "students: second", "form level"]
        );
        assert!(!err.is_empty());
        assert_eq!(err.field("points"), ["first".to_string()]);
        assert!(err.field("grader").is_empty());
    }
}
