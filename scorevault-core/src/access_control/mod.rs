//! Access Control Layer
//!
//! Role and grant checks for the engine. Every check takes the caller
//! [`Principal`] explicitly; nothing here reads ambient state.
//!
//! # Roles
//!
//! - **Owner**: fixed at construction. Manages the teacher registry.
//! - **Teachers**: principals the owner has authorized. Only they write scores.
//! - **Students**: the principal a record is keyed by. A student always reads
//!   their own record and may grant read access to others.
//!
//! # Handle grants
//!
//! Decryption happens outside the engine, so read permissions are also
//! recorded per ciphertext handle. A decrypting collaborator asks
//! [`AccessControl::is_allowed`] before releasing plaintext:
//!
//! - a score handle is readable by its student, by everyone the student has
//!   granted (including grants made after the score was written) and by the
//!   teacher who wrote it;
//! - a threshold result handle is readable by the principal that asked for it.

mod grants;
mod handles;
mod registry;

pub use grants::AccessGrants;
pub use registry::TeacherRegistry;

use crate::{
    coprocessor::HandleId,
    error::{EngineError, Result},
    log::debug,
    principal::Principal,
};
use handles::HandleGrants;

#[derive(Debug, Clone)]
pub struct AccessControl {
    owner: Principal,
    teachers: TeacherRegistry,
    grants: AccessGrants,
    handles: HandleGrants,
}

impl AccessControl {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `owner` is the null principal.
    pub fn new(owner: Principal) -> Result<Self> {
        ensure_not_null(&owner, "owner")?;
        Ok(Self {
            owner,
            teachers: TeacherRegistry::new(),
            grants: AccessGrants::new(),
            handles: HandleGrants::default(),
        })
    }

    pub fn owner(&self) -> Principal {
        self.owner
    }

    pub fn ensure_owner(&self, caller: &Principal) -> Result<()> {
        if *caller == self.owner {
            Ok(())
        } else {
            debug!("{caller} is not the owner");
            Err(EngineError::Unauthorized(format!("{caller} is not the owner")))
        }
    }

    /// Returns whether the registry changed.
    pub fn authorize_teacher(&mut self, caller: &Principal, teacher: Principal) -> Result<bool> {
        self.ensure_owner(caller)?;
        ensure_not_null(&teacher, "teacher")?;
        Ok(self.teachers.authorize(teacher))
    }

    /// Returns whether the registry changed. Deauthorizing a principal that
    /// was never authorized succeeds without effect.
    pub fn deauthorize_teacher(&mut self, caller: &Principal, teacher: &Principal) -> Result<bool> {
        self.ensure_owner(caller)?;
        Ok(self.teachers.deauthorize(teacher))
    }

    pub fn is_authorized_teacher(&self, teacher: &Principal) -> bool {
        self.teachers.is_authorized(teacher)
    }

    pub fn ensure_teacher(&self, caller: &Principal) -> Result<()> {
        if self.is_authorized_teacher(caller) {
            Ok(())
        } else {
            debug!("{caller} is not an authorized teacher");
            Err(EngineError::Unauthorized(format!("{caller} is not an authorized teacher")))
        }
    }

    /// Records that `grantee` may read `student`'s record.
    ///
    /// Returns whether a new grant was stored. Granting to oneself and
    /// repeating an existing grant both succeed without effect. The caller is
    /// responsible for checking that `student` owns a record.
    pub fn grant(&mut self, student: Principal, grantee: Principal) -> Result<bool> {
        ensure_not_null(&grantee, "grantee")?;
        if grantee == student {
            return Ok(false);
        }
        Ok(self.grants.insert(student, grantee))
    }

    pub fn can_read(&self, record_owner: &Principal, requester: &Principal) -> bool {
        requester == record_owner || self.grants.contains(record_owner, requester)
    }

    pub fn ensure_can_read(&self, record_owner: &Principal, requester: &Principal) -> Result<()> {
        if self.can_read(record_owner, requester) {
            Ok(())
        } else {
            debug!("{requester} may not read the record of {record_owner}");
            Err(EngineError::Unauthorized(format!(
                "{requester} may not read the record of {record_owner}"
            )))
        }
    }

    /// Makes a freshly stored score handle decryptable by its student (and
    /// their grantees) and by the teacher who wrote it.
    pub fn allow_score_handle(&mut self, handle: HandleId, student: Principal, writer: Principal) {
        self.handles.allow_student(handle, student);
        self.handles.allow(handle, writer);
    }

    pub fn allow_handle(&mut self, handle: HandleId, principal: Principal) {
        self.handles.allow(handle, principal);
    }

    pub fn is_allowed(&self, handle: &HandleId, requester: &Principal) -> bool {
        self.handles.get(handle).is_some_and(|access| {
            access.principals.contains(requester)
                || access.students.iter().any(|student| self.can_read(student, requester))
        })
    }
}

pub(crate) fn ensure_not_null(principal: &Principal, role: &str) -> Result<()> {
    if principal.is_null() {
        Err(EngineError::InvalidArgument(format!("{role} must not be the null principal")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principals() -> (Principal, Principal, Principal, Principal) {
        (
            Principal::from_key_material(b"owner"),
            Principal::from_key_material(b"teacher"),
            Principal::from_key_material(b"student"),
            Principal::from_key_material(b"school"),
        )
    }

    #[test]
    fn test_null_owner_is_rejected() {
        assert!(matches!(
            AccessControl::new(Principal::NULL),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_only_owner_manages_teachers() {
        let (owner, teacher, student, _) = principals();
        let mut ac = AccessControl::new(owner).unwrap();

        assert!(matches!(
            ac.authorize_teacher(&student, teacher),
            Err(EngineError::Unauthorized(_))
        ));
        assert!(!ac.is_authorized_teacher(&teacher));

        assert!(ac.authorize_teacher(&owner, teacher).unwrap());
        assert!(ac.ensure_teacher(&teacher).is_ok());

        assert!(matches!(
            ac.deauthorize_teacher(&teacher, &teacher),
            Err(EngineError::Unauthorized(_))
        ));
        assert!(ac.deauthorize_teacher(&owner, &teacher).unwrap());
        assert!(ac.ensure_teacher(&teacher).is_err());
    }

    #[test]
    fn test_null_teacher_is_rejected() {
        let (owner, ..) = principals();
        let mut ac = AccessControl::new(owner).unwrap();

        assert!(matches!(
            ac.authorize_teacher(&owner, Principal::NULL),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_grant_semantics() {
        let (owner, _, student, school) = principals();
        let mut ac = AccessControl::new(owner).unwrap();

        assert!(ac.can_read(&student, &student));
        assert!(!ac.can_read(&student, &school));

        assert!(!ac.grant(student, student).unwrap());
        assert!(ac.grant(student, school).unwrap());
        assert!(!ac.grant(student, school).unwrap());
        assert!(ac.can_read(&student, &school));
        assert!(!ac.can_read(&school, &student));

        assert!(matches!(ac.grant(student, Principal::NULL), Err(EngineError::InvalidArgument(_))));
    }

    #[test]
    fn test_score_handle_follows_later_grants() {
        let (owner, teacher, student, school) = principals();
        let mut ac = AccessControl::new(owner).unwrap();
        let handle = HandleId([4u8; 32]);

        ac.allow_score_handle(handle, student, teacher);
        assert!(ac.is_allowed(&handle, &student));
        assert!(ac.is_allowed(&handle, &teacher));
        assert!(!ac.is_allowed(&handle, &school));
        assert!(!ac.is_allowed(&handle, &owner));

        ac.grant(student, school).unwrap();
        assert!(ac.is_allowed(&handle, &school));
    }

    #[test]
    fn test_unknown_handle_is_denied() {
        let (owner, _, student, _) = principals();
        let mut ac = AccessControl::new(owner).unwrap();
        let result = HandleId([8u8; 32]);

        assert!(!ac.is_allowed(&result, &student));
        ac.allow_handle(result, student);
        assert!(ac.is_allowed(&result, &student));
        assert!(!ac.is_allowed(&HandleId([9u8; 32]), &student));
    }

    #[test]
    fn test_handle_grants_grow_per_handle() {
        let (owner, teacher, student, school) = principals();
        let mut ac = AccessControl::new(owner).unwrap();
        let score = HandleId([1u8; 32]);

        ac.allow_score_handle(score, student, teacher);
        ac.allow_handle(score, school);
        assert_eq!(ac.handles.len(), 1);

        for i in 2..=4u8 {
            ac.allow_handle(HandleId([i; 32]), school);
        }
        assert_eq!(ac.handles.len(), 4);
        assert!((2..=4u8).all(|i| ac.is_allowed(&HandleId([i; 32]), &school)));
        assert!(ac.is_allowed(&score, &student));
    }
}
