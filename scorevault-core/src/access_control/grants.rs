use crate::principal::Principal;
use std::collections::{BTreeSet, HashMap};

/// Standing read permissions from a student to other principals.
///
/// There is no revocation: once granted, a grantee keeps access for the
/// lifetime of the engine.
#[derive(Debug, Clone, Default)]
pub struct AccessGrants {
    grants: HashMap<Principal, BTreeSet<Principal>>,
}

impl AccessGrants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the pair was not present before.
    pub fn insert(&mut self, student: Principal, grantee: Principal) -> bool {
        self.grants.entry(student).or_default().insert(grantee)
    }

    pub fn contains(&self, student: &Principal, grantee: &Principal) -> bool {
        self.grants.get(student).is_some_and(|grantees| grantees.contains(grantee))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grants_are_directional() {
        let mut grants = AccessGrants::new();
        let student = Principal::from_key_material(b"student");
        let school = Principal::from_key_material(b"school");

        assert!(grants.insert(student, school));
        assert!(!grants.insert(student, school));

        assert!(grants.contains(&student, &school));
        assert!(!grants.contains(&school, &student));
    }
}
