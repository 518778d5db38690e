use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::data::FormData;
use super::error::ValidationError;
use super::fields::{Field, FieldDescriptor, MSG_REQUIRED};
use crate::context::UserProfile;

/// 清洗后的字段值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanedValue {
    Integer(i64),
    Text(String),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Profiles(Vec<UserProfile>),
    Profile(UserProfile),
}

/// 清洗结果，清洗失败的字段不会出现在这里
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedData {
    values: BTreeMap<&'static str, CleanedValue>,
}

impl CleanedData {
    pub fn insert(&mut self, name: &'static str, value: CleanedValue) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&CleanedValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(CleanedValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(CleanedValue::Text(v)) => Some(v),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(CleanedValue::Boolean(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn datetime(&self, name: &str) -> Option<DateTime<Utc>> {
        match self.get(name) {
            Some(CleanedValue::DateTime(v)) => Some(*v),
            _ => None,
        }
    }

    /// 多选字段，缺失时为空
    pub fn profiles(&self, name: &str) -> &[UserProfile] {
        match self.get(name) {
            Some(CleanedValue::Profiles(v)) => v,
            _ => &[],
        }
    }

    pub fn profile(&self, name: &str) -> Option<&UserProfile> {
        match self.get(name) {
            Some(CleanedValue::Profile(v)) => Some(v),
            _ => None,
        }
    }

    /// 取出多选字段的所有权
    pub fn take_profiles(&mut self, name: &str) -> Vec<UserProfile> {
        match self.values.remove(name) {
            Some(CleanedValue::Profiles(v)) => v,
            _ => Vec::new(),
        }
    }

    pub fn take_text(&mut self, name: &str) -> String {
        match self.values.remove(name) {
            Some(CleanedValue::Text(v)) => v,
            _ => String::new(),
        }
    }

    pub fn take_profile(&mut self, name: &str) -> Option<UserProfile> {
        match self.values.remove(name) {
            Some(CleanedValue::Profile(v)) => Some(v),
            _ => None,
        }
    }

    /// 读取必填整数字段，缺失时返回字段错误
    pub fn require_integer(&self, name: &str) -> Result<i64, ValidationError> {
        self.integer(name).ok_or_else(|| missing(name))
    }

    pub fn require_datetime(&self, name: &str) -> Result<DateTime<Utc>, ValidationError> {
        self.datetime(name).ok_or_else(|| missing(name))
    }

    pub fn require_profile(&mut self, name: &str) -> Result<UserProfile, ValidationError> {
        self.take_profile(name).ok_or_else(|| missing(name))
    }
}

fn missing(name: &str) -> ValidationError {
    let mut err = ValidationError::default();
    err.add_field_error(name, MSG_REQUIRED);
    err
}

/// 表单级规则：读取清洗结果，失败时返回一条错误信息
pub type Rule<'a> = Box<dyn Fn(&CleanedData) -> Result<(), String> + 'a>;

/// 有序字段列表 + 有序规则列表
///
/// 字段错误全部收集；随后规则按顺序执行，第一条失败的规则终止规则链。
/// 规则在存在字段错误时同样会执行，所需的值缺失时应当直接放行。
#[derive(Default)]
pub struct Form<'a> {
    fields: Vec<Field<'a>>,
    rules: Vec<Rule<'a>>,
}

impl<'a> Form<'a> {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// 追加字段，同名字段会被替换并保持原位置
    pub fn field(mut self, field: Field<'a>) -> Self {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    pub fn rule(mut self, rule: impl Fn(&CleanedData) -> Result<(), String> + 'a) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn fields(&self) -> &[Field<'a>] {
        &self.fields
    }

    pub fn get_field(&self, name: &str) -> Option<&Field<'a>> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn describe(&self) -> Vec<FieldDescriptor> {
        self.fields.iter().map(Field::describe).collect()
    }

    pub fn clean(&self, data: &FormData) -> Result<CleanedData, ValidationError> {
        let mut cleaned = CleanedData::default();
        let mut errors = ValidationError::default();

        for field in &self.fields {
            match field.clean(data.get_list(field.name)) {
                Ok(Some(value)) => cleaned.insert(field.name, value),
                Ok(None) => {}
                Err(message) => errors.add_field_error(field.name, message),
            }
        }

        if let Some(message) = self.rules.iter().find_map(|rule| rule(&cleaned).err()) {
            errors.add_non_field_error(message);
        }

        if errors.is_empty() {
            Ok(cleaned)
        } else {
            debug!("Form validation failed: {}", errors);
            Err(errors)
        }
    }
}
