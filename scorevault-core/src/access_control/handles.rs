use crate::{coprocessor::HandleId, principal::Principal};
use std::collections::{BTreeSet, HashMap};

/// Who may ask a collaborator to decrypt a handle.
#[derive(Debug, Clone, Default)]
pub(crate) struct HandleAccess {
    /// Record owners: the owner and everyone who can read their record.
    pub(crate) students: BTreeSet<Principal>,
    /// Principals granted this handle directly.
    pub(crate) principals: BTreeSet<Principal>,
}

/// Per-handle decryption grants.
///
/// Entries are never removed: a superseded score handle stays decryptable by
/// whoever could decrypt it when it was current.
///
/// Memory grows with every handle the engine hands out. Each score write and
/// each threshold check mints a fresh ciphertext, so every query adds one
/// entry that lives as long as the engine. Granting the same handle again
/// reuses its entry.
#[derive(Debug, Clone, Default)]
pub(crate) struct HandleGrants {
    handles: HashMap<HandleId, HandleAccess>,
}

impl HandleGrants {
    pub(crate) fn allow_student(&mut self, handle: HandleId, student: Principal) {
        self.handles.entry(handle).or_default().students.insert(student);
    }

    pub(crate) fn allow(&mut self, handle: HandleId, principal: Principal) {
        self.handles.entry(handle).or_default().principals.insert(principal);
    }

    pub(crate) fn get(&self, handle: &HandleId) -> Option<&HandleAccess> {
        self.handles.get(handle)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.handles.len()
    }
}
