use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, de::Error};
use serde_json::Value;

/// 原始表单输入
///
/// 字段名到原始字符串值列表的映射。多选字段（如 `students`）可以携带多个值，
/// 单值字段读取最后一个值。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    values: BTreeMap<String, Vec<String>>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个值
    pub fn append<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.values
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// 构建器形式的 [`FormData::append`]
    pub fn with<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.append(name, value);
        self
    }

    /// 构建器形式，一次写入多个值
    pub fn with_list<K, I, V>(mut self, name: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let entry = self.values.entry(name.into()).or_default();
        entry.extend(values.into_iter().map(Into::into));
        self
    }

    /// 单值读取，返回最后一个值
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// 读取全部值
    pub fn get_list(&self, name: &str) -> &[String] {
        self.values
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = FormData::new();
        for (name, value) in iter {
            data.append(name, value);
        }
        data
    }
}

// JSON 标量转为原始字符串，null 视为未提交
fn scalar_to_raw(name: &str, value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(format!(
            "字段 '{name}' 的值必须是字符串、数字、布尔值或它们组成的数组"
        )),
    }
}

impl<'de> Deserialize<'de> for FormData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut values = BTreeMap::new();

        for (name, value) in raw {
            let list = match &value {
                Value::Array(items) => items
                    .iter()
                    .map(|item| scalar_to_raw(&name, item))
                    .filter_map(Result::transpose)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(D::Error::custom)?,
                other => scalar_to_raw(&name, other)
                    .map_err(D::Error::custom)?
                    .into_iter()
                    .collect(),
            };
            values.insert(name, list);
        }

        Ok(FormData { values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_last_value() {
        let data = FormData::new().with("points", "3").with("points", "7");
        assert_eq!(data.get("points"), Some("7"));
        assert_eq!(data.get_list("points").len(), 2);
        assert_eq!(data.get("feedback"), None);
        assert!(data.get_list("feedback").is_empty());
    }

    #[test]
    fn test_deserialize_mixed_json() {
        let data: FormData = serde_json::from_str(
            r#"{"points": 5, "error": true, "feedback": "ok", "students": [1, "2"], "grader": null}"#,
        )
        .unwrap();

        assert_eq!(data.get("points"), Some("5"));
        assert_eq!(data.get("error"), Some("true"));
        assert_eq!(data.get("feedback"), Some("ok"));
        assert_eq!(data.get_list("students"), ["1".to_string(), "2".to_string()]);
        assert!(data.contains("grader"));
        assert_eq!(data.get("grader"), None);
    }

    #[test]
    fn test_deserialize_rejects_nested_objects() {
        let result: Result<FormData, _> = serde_json::from_str(r#"{"points": {"value": 5}}"#);
        assert!(result.is_err());

        let result: Result<FormData, _> = serde_json::from_str(r#"{"students": [[1]]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_iterator() {
        let data: FormData = [("students", "1"), ("students", "4")].into_iter().collect();
        assert_eq!(data.get_list("students"), ["1".to_string(), "4".to_string()]);
    }
}
