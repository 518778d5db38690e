//! Exercise Forms - 课程练习与提交表单校验服务
//!
//! 为练习、学生提交与教师评分提供输入校验规则与字段推导逻辑。
//!
//! # 架构
//! - `config`: 配置管理
//! - `context`: 校验上下文（练习、课程实例、用户档案）
//! - `errors`: 统一错误处理
//! - `forms`: 表单校验核心
//! - `models`: API 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `utils`: 工具函数

pub mod config;
pub mod context;
pub mod errors;
pub mod forms;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod utils;
