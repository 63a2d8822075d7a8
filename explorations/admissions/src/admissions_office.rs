use crate::types::{Decision, Role, SystemError, SystemResult};
use cosmian_crypto_core::bytes_ser_de::Serializable;
use scorevault_core::{
    coprocessor::{EncryptedInput, SealedCoprocessor},
    engine::ScoreVault,
    log::info,
    principal::Principal,
};
use std::{collections::HashMap, sync::Arc};

/// Drives the engine on behalf of named participants and performs the
/// off-engine decryption each of them would do in their own wallet.
pub struct AdmissionsOffice {
    coprocessor: Arc<SealedCoprocessor>,
    vault: ScoreVault<Arc<SealedCoprocessor>>,
    participants: HashMap<String, (Principal, Role)>,
}

impl AdmissionsOffice {
    pub fn new(coprocessor: SealedCoprocessor, registrar: &str) -> SystemResult<Self> {
        let coprocessor = Arc::new(coprocessor);
        let registrar_id = Principal::from_key_material(registrar.as_bytes());
        let vault = ScoreVault::new(registrar_id, Arc::clone(&coprocessor))?;

        let mut participants = HashMap::new();
        participants.insert(registrar.to_string(), (registrar_id, Role::Registrar));
        Ok(Self { coprocessor, vault, participants })
    }

    pub fn vault(&self) -> &ScoreVault<Arc<SealedCoprocessor>> {
        &self.vault
    }

    /// Registers a participant. The identity is derived from the name.
    pub fn enroll(&mut self, name: &str, role: Role) -> Principal {
        let id = Principal::from_key_material(name.as_bytes());
        self.participants.insert(name.to_string(), (id, role));
        id
    }

    pub fn principal(&self, name: &str) -> SystemResult<Principal> {
        self.participants
            .get(name)
            .map(|(id, _)| *id)
            .ok_or_else(|| SystemError::UnknownParticipant(name.to_string()))
    }

    pub fn role(&self, name: &str) -> SystemResult<Role> {
        self.participants
            .get(name)
            .map(|(_, role)| *role)
            .ok_or_else(|| SystemError::UnknownParticipant(name.to_string()))
    }

    /// Resolves `name`, refusing participants enrolled under another role.
    fn acting_as(&self, name: &str, expected: Role) -> SystemResult<Principal> {
        match self.participants.get(name) {
            Some((id, role)) if *role == expected => Ok(*id),
            Some(_) => Err(SystemError::WrongRole { name: name.to_string(), expected }),
            None => Err(SystemError::UnknownParticipant(name.to_string())),
        }
    }

    pub fn hire_teacher(&mut self, registrar: &str, teacher: &str) -> SystemResult<()> {
        let caller = self.acting_as(registrar, Role::Registrar)?;
        let teacher = self.acting_as(teacher, Role::Teacher)?;
        self.vault.authorize_teacher(&caller, teacher)?;
        Ok(())
    }

    pub fn dismiss_teacher(&mut self, registrar: &str, teacher: &str) -> SystemResult<()> {
        let caller = self.acting_as(registrar, Role::Registrar)?;
        let teacher = self.acting_as(teacher, Role::Teacher)?;
        self.vault.deauthorize_teacher(&caller, teacher)?;
        Ok(())
    }

    /// The teacher encrypts client-side and ships the input over the wire.
    pub fn record_score(&mut self, teacher: &str, student: &str, score: u32) -> SystemResult<()> {
        let caller = self.acting_as(teacher, Role::Teacher)?;
        let student = self.acting_as(student, Role::Student)?;

        let input = self.coprocessor.encrypt_u32(score, &caller)?;
        let wire = input
            .serialize()
            .map_err(|e| SystemError::Transport(format!("Serialization failed: {e}")))?;
        let received = EncryptedInput::deserialize(&wire)
            .map_err(|e| SystemError::Transport(format!("Deserialization failed: {e}")))?;

        self.vault.submit_score(&caller, student, &received)?;
        Ok(())
    }

    /// `reader` fetches `student`'s handle and decrypts it in their wallet.
    pub fn view_score(&self, reader: &str, student: &str) -> SystemResult<u32> {
        let reader = self.principal(reader)?;
        let student = self.principal(student)?;
        let handle = self.vault.get_student_score(&reader, &student)?;
        Ok(self.coprocessor.user_decrypt_u32(&handle, &reader, &self.vault)?)
    }

    pub fn share_with(&mut self, student: &str, grantee: &str) -> SystemResult<()> {
        let caller = self.acting_as(student, Role::Student)?;
        let grantee = self.principal(grantee)?;
        self.vault.grant_access(&caller, grantee)?;
        Ok(())
    }

    pub fn check_applicant(
        &mut self,
        school: &str,
        applicant: &str,
        cutoff: u32,
    ) -> SystemResult<Decision> {
        let caller = self.acting_as(school, Role::School)?;
        let applicant = self.acting_as(applicant, Role::Student)?;
        let verdict = self.vault.meets_admission_threshold(&caller, &applicant, cutoff)?;
        let meets = self.coprocessor.user_decrypt_bool(&verdict, &caller, &self.vault)?;
        Ok(Decision::from(meets))
    }

    /// Screens every applicant against `cutoff`. Applicants without a score
    /// are rejected.
    #[tracing::instrument(skip(self, applicants), fields(num_applicants = applicants.len()))]
    pub fn review_applicants(
        &mut self,
        school: &str,
        applicants: &[&str],
        cutoff: u32,
    ) -> SystemResult<Vec<(String, Decision)>> {
        let caller = self.acting_as(school, Role::School)?;
        let ids = applicants
            .iter()
            .map(|name| self.acting_as(name, Role::Student))
            .collect::<SystemResult<Vec<_>>>()?;

        let verdicts = self.vault.batch_check_admission_threshold(&caller, &ids, cutoff)?;

        let mut decisions = Vec::with_capacity(verdicts.len());
        for (name, verdict) in applicants.iter().zip(&verdicts) {
            let meets = self.coprocessor.user_decrypt_bool(verdict, &caller, &self.vault)?;
            decisions.push((name.to_string(), Decision::from(meets)));
        }
        info!("{school} reviewed {} applicants at cutoff {cutoff}", decisions.len());
        Ok(decisions)
    }
}
