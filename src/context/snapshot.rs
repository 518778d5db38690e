use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{CourseInstance, ExerciseContext, UserProfile};

/// 课程实例快照，由调用方随请求一并提交
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct CourseInstanceSnapshot {
    #[serde(default)]
    pub students: Vec<UserProfile>,
    #[serde(default)]
    pub staff: Vec<UserProfile>,
}

/// 练习快照，`max_points` 不允许为负数
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forms.ts")]
pub struct ExerciseSnapshot {
    pub max_points: u32,
    #[serde(default)]
    pub course_instance: CourseInstanceSnapshot,
}

impl ExerciseSnapshot {
    pub fn new(max_points: u32) -> Self {
        Self {
            max_points,
            course_instance: CourseInstanceSnapshot::default(),
        }
    }

    pub fn with_students(mut self, students: Vec<UserProfile>) -> Self {
        self.course_instance.students = students;
        self
    }

    pub fn with_staff(mut self, staff: Vec<UserProfile>) -> Self {
        self.course_instance.staff = staff;
        self
    }
}

impl CourseInstance for CourseInstanceSnapshot {
    fn get_students(&self) -> Vec<UserProfile> {
        self.students.clone()
    }

    fn get_course_staff(&self) -> Vec<UserProfile> {
        self.staff.clone()
    }
}

impl ExerciseContext for ExerciseSnapshot {
    fn max_points(&self) -> i64 {
        i64::from(self.max_points)
    }

    fn course_instance(&self) -> &dyn CourseInstance {
        &self.course_instance
    }

    // 学号在全体已知档案中查找，不限于选课学生
    fn get_by_student_id(&self, student_id: &str) -> Option<UserProfile> {
        self.course_instance
            .students
            .iter()
            .chain(self.course_instance.staff.iter())
            .find(|p| p.student_id.as_deref() == Some(student_id))
            .cloned()
    }
}
