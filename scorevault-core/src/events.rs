//! Engine notifications.
//!
//! Events are appended only after an operation has fully committed, once per
//! state change. Each event is also logged.

use crate::{log::info, principal::Principal};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    ScoreSubmitted { student: Principal, teacher: Principal },
    ScoreUpdated { student: Principal, teacher: Principal },
    TeacherAuthorized { teacher: Principal },
    TeacherDeauthorized { teacher: Principal },
    AccessGranted { student: Principal, grantee: Principal },
}

impl fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScoreSubmitted { student, teacher } => {
                write!(f, "ScoreSubmitted(student={student}, teacher={teacher})")
            }
            Self::ScoreUpdated { student, teacher } => {
                write!(f, "ScoreUpdated(student={student}, teacher={teacher})")
            }
            Self::TeacherAuthorized { teacher } => write!(f, "TeacherAuthorized({teacher})"),
            Self::TeacherDeauthorized { teacher } => write!(f, "TeacherDeauthorized({teacher})"),
            Self::AccessGranted { student, grantee } => {
                write!(f, "AccessGranted(student={student}, grantee={grantee})")
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<EngineEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: EngineEvent) {
        info!("{event}");
        self.events.push(event);
    }

    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Removes and returns every event recorded so far.
    pub fn drain(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }
}
