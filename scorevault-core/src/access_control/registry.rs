use crate::principal::Principal;
use std::collections::HashMap;

/// Teachers allowed to write scores. Unknown principals are unauthorized.
#[derive(Debug, Clone, Default)]
pub struct TeacherRegistry {
    teachers: HashMap<Principal, bool>,
}

impl TeacherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the teacher was not authorized before.
    pub fn authorize(&mut self, teacher: Principal) -> bool {
        self.teachers.insert(teacher, true) != Some(true)
    }

    /// Returns `true` if the teacher was authorized before. Unknown teachers
    /// are left untouched.
    pub fn deauthorize(&mut self, teacher: &Principal) -> bool {
        match self.teachers.get_mut(teacher) {
            Some(flag) => std::mem::replace(flag, false),
            None => false,
        }
    }

    pub fn is_authorized(&self, teacher: &Principal) -> bool {
        self.teachers.get(teacher).copied().unwrap_or(false)
    }
}
