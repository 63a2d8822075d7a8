//! Record Store Layer
//!
//! One encrypted score slot per student. Records are created on first write,
//! overwritten in place afterwards and never deleted. Only the latest handle
//! is kept.

use crate::{coprocessor::CipherHandle, principal::Principal};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ScoreRecord {
    pub handle: CipherHandle,
    pub exists: bool,
    /// Teacher who wrote the current handle.
    pub writer: Principal,
}

/// What an upsert did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: HashMap<Principal, ScoreRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `handle` as the score of `student`, replacing any previous one.
    pub fn upsert(
        &mut self,
        student: Principal,
        handle: CipherHandle,
        writer: Principal,
    ) -> SubmitOutcome {
        match self.records.get_mut(&student) {
            Some(record) if record.exists => {
                record.handle = handle;
                record.writer = writer;
                SubmitOutcome::Updated
            }
            _ => {
                self.records.insert(student, ScoreRecord { handle, exists: true, writer });
                SubmitOutcome::Created
            }
        }
    }

    pub fn has_score(&self, student: &Principal) -> bool {
        self.records.get(student).is_some_and(|record| record.exists)
    }

    pub fn get(&self, student: &Principal) -> Option<&ScoreRecord> {
        self.records.get(student).filter(|record| record.exists)
    }

    pub fn last_writer(&self, student: &Principal) -> Option<Principal> {
        self.get(student).map(|record| record.writer)
    }

    /// Number of students holding a record.
    pub fn student_count(&self) -> usize {
        self.records.values().filter(|record| record.exists).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coprocessor::{EncryptedType, HandleId};

    fn handle(byte: u8) -> CipherHandle {
        CipherHandle::new(HandleId([byte; 32]), EncryptedType::Uint32, vec![byte])
    }

    #[test]
    fn test_upsert_creates_then_updates() {
        let mut store = RecordStore::new();
        let student = Principal::from_key_material(b"student");
        let t1 = Principal::from_key_material(b"t1");
        let t2 = Principal::from_key_material(b"t2");

        assert_eq!(store.student_count(), 0);
        assert!(!store.has_score(&student));
        assert!(store.get(&student).is_none());

        assert_eq!(store.upsert(student, handle(1), t1), SubmitOutcome::Created);
        assert_eq!(store.last_writer(&student), Some(t1));

        assert_eq!(store.upsert(student, handle(2), t2), SubmitOutcome::Updated);
        assert_eq!(store.last_writer(&student), Some(t2));
        assert_eq!(store.get(&student).unwrap().handle.id(), HandleId([2; 32]));
        assert_eq!(store.student_count(), 1);
    }

    #[test]
    fn test_student_count_is_distinct_students() {
        let mut store = RecordStore::new();
        let teacher = Principal::from_key_material(b"teacher");

        for i in 0..5u8 {
            let student = Principal::new([i + 1; 20]);
            store.upsert(student, handle(i), teacher);
            store.upsert(student, handle(i + 100), teacher);
        }

        assert_eq!(store.student_count(), 5);
    }
}
