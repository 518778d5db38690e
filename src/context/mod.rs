//! 校验上下文
//!
//! 练习、课程实例和用户档案都属于外部数据模型，这里只定义校验所需的只读接口。
//! 每次校验调用由调用方提供一个上下文实例。

pub mod snapshot;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub use snapshot::{CourseInstanceSnapshot, ExerciseSnapshot};

/// 用户档案引用（学生或课程教职人员）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub student_id: Option<String>,
}

/// 课程实例：提供选课学生与教职人员
pub trait CourseInstance {
    fn get_students(&self) -> Vec<UserProfile>;
    fn get_course_staff(&self) -> Vec<UserProfile>;
}

/// 练习上下文
pub trait ExerciseContext {
    /// 练习的满分，非负
    fn max_points(&self) -> i64;
    fn course_instance(&self) -> &dyn CourseInstance;
    /// 通过学号查找用户档案
    fn get_by_student_id(&self, student_id: &str) -> Option<UserProfile>;
}
