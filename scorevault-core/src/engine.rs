//! Engine façade.
//!
//! [`ScoreVault`] threads the caller identity through every operation:
//!
//! ```text
//! caller ─▶ access control gate ─▶ record store ─▶ threshold engine ─▶ handle(s)
//! ```
//!
//! Every operation validates its inputs and runs its collaborator calls before
//! touching state, so a failed call leaves the engine exactly as it was and
//! emits no event.

use crate::{
    access_control::{AccessControl, ensure_not_null},
    configuration::{Configuration, DefaultLabel, ScoreVaultConfiguration},
    coprocessor::{
        CipherHandle, EncryptedInput, EncryptedType, HandleAcl, HandleId, HomomorphicBackend,
    },
    error::{EngineError, Result},
    events::{EngineEvent, EventLog},
    log::{debug, warn},
    principal::Principal,
    records::{RecordStore, SubmitOutcome},
    threshold::ThresholdEngine,
};
use std::marker::PhantomData;

pub struct ScoreVault<B, TC = ScoreVaultConfiguration<DefaultLabel>> {
    access: AccessControl,
    records: RecordStore,
    events: EventLog,
    backend: B,
    _config: PhantomData<TC>,
}

impl<B: HomomorphicBackend, TC: Configuration> ScoreVault<B, TC> {
    /// Creates an engine owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `owner` is the null principal.
    pub fn new(owner: Principal, backend: B) -> Result<Self> {
        Ok(Self {
            access: AccessControl::new(owner)?,
            records: RecordStore::new(),
            events: EventLog::new(),
            backend,
            _config: PhantomData,
        })
    }

    pub fn owner(&self) -> Principal {
        self.access.owner()
    }

    // ------------------------------------------------------------------
    // Teacher registry
    // ------------------------------------------------------------------

    #[tracing::instrument(skip_all, fields(caller = %caller, teacher = %teacher))]
    pub fn authorize_teacher(&mut self, caller: &Principal, teacher: Principal) -> Result<()> {
        if self.access.authorize_teacher(caller, teacher)? {
            self.events.push(EngineEvent::TeacherAuthorized { teacher });
        }
        Ok(())
    }

    /// Deauthorizing a principal that was never authorized is a no-op.
    #[tracing::instrument(skip_all, fields(caller = %caller, teacher = %teacher))]
    pub fn deauthorize_teacher(&mut self, caller: &Principal, teacher: Principal) -> Result<()> {
        if self.access.deauthorize_teacher(caller, &teacher)? {
            self.events.push(EngineEvent::TeacherDeauthorized { teacher });
        }
        Ok(())
    }

    pub fn is_authorized_teacher(&self, teacher: &Principal) -> bool {
        self.access.is_authorized_teacher(teacher)
    }

    // ------------------------------------------------------------------
    // Grants
    // ------------------------------------------------------------------

    /// Lets `grantee` read the caller's score record.
    ///
    /// Granting to oneself and repeating a grant succeed without effect.
    /// Grants cannot be revoked.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `grantee` is the null principal
    /// - `NotFound` if the caller has no score record
    #[tracing::instrument(skip_all, fields(caller = %caller, grantee = %grantee))]
    pub fn grant_access(&mut self, caller: &Principal, grantee: Principal) -> Result<()> {
        ensure_not_null(&grantee, "grantee")?;
        if !self.records.has_score(caller) {
            debug!("{caller} has no record to share");
            return Err(EngineError::NotFound(format!("no score record for {caller}")));
        }
        if self.access.grant(*caller, grantee)? {
            self.events.push(EngineEvent::AccessGranted { student: *caller, grantee });
        }
        Ok(())
    }

    pub fn can_read(&self, record_owner: &Principal, requester: &Principal) -> bool {
        self.access.can_read(record_owner, requester)
    }

    // ------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------

    /// Stores an encrypted score for `student`, replacing any previous one.
    ///
    /// The input must be an `euint32` whose proof binds it to the caller.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the caller is not an authorized teacher
    /// - `InvalidArgument` if `student` is null or the input is not an `euint32`
    /// - `Coprocessor` if the collaborator rejects the input
    #[tracing::instrument(skip_all, fields(caller = %caller, student = %student))]
    pub fn submit_score(
        &mut self,
        caller: &Principal,
        student: Principal,
        input: &EncryptedInput,
    ) -> Result<()> {
        self.access.ensure_teacher(caller)?;
        ensure_not_null(&student, "student")?;
        let found = input.handle.encrypted_type();
        if found != EncryptedType::Uint32 {
            return Err(EngineError::InvalidArgument(format!(
                "expected an {} score, got {found}",
                EncryptedType::Uint32
            )));
        }

        let handle = self.backend.verify_input(input, caller).inspect_err(|e| {
            warn!("Rejected score input from {caller}: {e}");
        })?;

        let id = handle.id();
        let event = match self.records.upsert(student, handle, *caller) {
            SubmitOutcome::Created => EngineEvent::ScoreSubmitted { student, teacher: *caller },
            SubmitOutcome::Updated => EngineEvent::ScoreUpdated { student, teacher: *caller },
        };
        self.access.allow_score_handle(id, student, *caller);
        self.events.push(event);
        Ok(())
    }

    pub fn has_score(&self, student: &Principal) -> bool {
        self.records.has_score(student)
    }

    /// Returns the stored handle of `student`, unchanged.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `student` has no record
    /// - `Unauthorized` if the caller is neither the student nor a grantee
    #[tracing::instrument(skip_all, fields(caller = %caller, student = %student))]
    pub fn get_student_score(
        &self,
        caller: &Principal,
        student: &Principal,
    ) -> Result<CipherHandle> {
        let record = self
            .records
            .get(student)
            .ok_or_else(|| EngineError::NotFound(format!("no score record for {student}")))?;
        self.access.ensure_can_read(student, caller)?;
        Ok(record.handle.clone())
    }

    pub fn get_total_students_with_scores(&self) -> u64 {
        self.records.student_count() as u64
    }

    /// Teacher who wrote the current score of `student`.
    pub fn last_writer(&self, student: &Principal) -> Option<Principal> {
        self.records.last_writer(student)
    }

    // ------------------------------------------------------------------
    // Threshold checks
    // ------------------------------------------------------------------

    /// Encrypted `score(student) >= threshold`, decryptable by the caller.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `threshold` is above 100 or `student` is null
    /// - `NotFound` if `student` has no record
    /// - `Coprocessor` if the comparison fails
    #[tracing::instrument(
        skip_all,
        fields(caller = %caller, student = %student, threshold = threshold)
    )]
    pub fn meets_admission_threshold(
        &mut self,
        caller: &Principal,
        student: &Principal,
        threshold: u32,
    ) -> Result<CipherHandle> {
        ThresholdEngine::<B, TC>::validate_threshold(threshold)?;
        ensure_not_null(student, "student")?;
        let record = self
            .records
            .get(student)
            .ok_or_else(|| EngineError::NotFound(format!("no score record for {student}")))?;

        let result =
            ThresholdEngine::<B, TC>::new(&self.backend).evaluate(&record.handle, threshold)?;
        self.access.allow_handle(result.id(), *caller);
        Ok(result)
    }

    /// Checks every student independently against `threshold`.
    ///
    /// Students without a record, including the null principal, get an
    /// encryption of `false`. The result has one handle per input, in order,
    /// each decryptable by the caller.
    #[tracing::instrument(
        skip_all,
        fields(caller = %caller, num_students = students.len(), threshold = threshold)
    )]
    pub fn batch_check_admission_threshold(
        &mut self,
        caller: &Principal,
        students: &[Principal],
        threshold: u32,
    ) -> Result<Vec<CipherHandle>> {
        let scores: Vec<Option<&CipherHandle>> = students
            .iter()
            .map(|student| self.records.get(student).map(|record| &record.handle))
            .collect();
        let results =
            ThresholdEngine::<B, TC>::new(&self.backend).evaluate_batch(&scores, threshold)?;

        for result in &results {
            self.access.allow_handle(result.id(), *caller);
        }
        Ok(results)
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn events(&self) -> &[EngineEvent] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain()
    }
}

impl<B, TC> HandleAcl for ScoreVault<B, TC> {
    fn is_allowed(&self, handle: &HandleId, requester: &Principal) -> bool {
        self.access.is_allowed(handle, requester)
    }
}
