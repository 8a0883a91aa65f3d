//! Arena session: the timed, monitored coding phase.
//!
//! The session is a plain state machine. Timers, the code runner, the
//! submitter and the realtime emitter are driven from the outside
//! (`usecase::arena`), which feeds ticks and page signals in and carries
//! out the commands that come back.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    countdown::{Countdown, format_mm_ss},
    error::ArenaError,
    notice::Notice,
    route::{Navigation, Route},
    value_object::{ParticipantId, RoomId},
};

/// Length of an arena session
pub const ARENA_DURATION_SECS: u32 = 1800;

/// Why a participant was flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CheatReason {
    TabSwitch,
    FullscreenExit,
    CopyPaste,
}

impl CheatReason {
    pub fn message(&self) -> &'static str {
        match self {
            CheatReason::TabSwitch => "Tab switching detected",
            CheatReason::FullscreenExit => "Exited fullscreen mode",
            CheatReason::CopyPaste => "Copy/paste attempt detected",
        }
    }
}

impl fmt::Display for CheatReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<CheatReason> for String {
    fn from(value: CheatReason) -> Self {
        value.message().to_string()
    }
}

impl TryFrom<String> for CheatReason {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        [
            CheatReason::TabSwitch,
            CheatReason::FullscreenExit,
            CheatReason::CopyPaste,
        ]
        .into_iter()
        .find(|r| r.message() == value)
        .ok_or(value)
    }
}

/// Something the page observed that may be suspicious
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSignal {
    VisibilityChanged { hidden: bool },
    FullscreenChanged { active: bool },
    KeyDown { key: String, ctrl: bool, meta: bool },
}

impl PageSignal {
    /// Map the signal to a cheat reason, if it is one
    pub fn classify(&self) -> Option<CheatReason> {
        match self {
            PageSignal::VisibilityChanged { hidden: true } => Some(CheatReason::TabSwitch),
            PageSignal::FullscreenChanged { active: false } => Some(CheatReason::FullscreenExit),
            PageSignal::KeyDown { key, ctrl, meta }
                if (*ctrl || *meta) && matches!(key.to_ascii_lowercase().as_str(), "c" | "v") =>
            {
                Some(CheatReason::CopyPaste)
            }
            _ => None,
        }
    }
}

/// Payload of the outbound `cheat-detected` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheatReport {
    pub participant_id: ParticipantId,
    pub reason: CheatReason,
}

/// Incident kept in the session log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheatIncident {
    pub reason: CheatReason,
    /// Unix milliseconds
    pub detected_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaExit {
    Submitted,
    Disqualified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaPhase {
    /// Editing, possibly with a run in flight
    Active,
    Submitting,
    Terminated(ArenaExit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    Manual,
    /// The deadline ran out
    Forced,
}

#[derive(Debug, Clone)]
pub struct ArenaSession {
    room_id: RoomId,
    participant_id: ParticipantId,
    deadline: Countdown,
    phase: ArenaPhase,
    running: bool,
    output: Option<String>,
    cheat_modal: Option<CheatReason>,
    incidents: Vec<CheatIncident>,
}

impl ArenaSession {
    /// Create a session whose deadline is already running
    pub fn new(room_id: RoomId, participant_id: ParticipantId, duration_secs: u32) -> Self {
        let mut deadline = Countdown::new(duration_secs);
        deadline.start();
        Self {
            room_id,
            participant_id,
            deadline,
            phase: ArenaPhase::Active,
            running: false,
            output: None,
            cheat_modal: None,
            incidents: Vec::new(),
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn participant_id(&self) -> &ParticipantId {
        &self.participant_id
    }

    pub fn phase(&self) -> ArenaPhase {
        self.phase
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.phase, ArenaPhase::Terminated(_))
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == ArenaPhase::Submitting
    }

    pub fn remaining(&self) -> u32 {
        self.deadline.remaining()
    }

    /// Remaining time as `MM:SS`
    pub fn time_left(&self) -> String {
        format_mm_ss(self.deadline.remaining())
    }

    pub fn progress(&self) -> f64 {
        self.deadline.progress()
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Reason shown in the disqualification modal, the latest one wins
    pub fn cheat_modal(&self) -> Option<CheatReason> {
        self.cheat_modal
    }

    pub fn incidents(&self) -> &[CheatIncident] {
        &self.incidents
    }

    /// One second passed. Returns `Forced` when the deadline triggers a submission.
    ///
    /// Once the deadline has passed, every tick that finds the session
    /// `Active` forces a submission, so a failed submit at zero is retried.
    pub fn tick(&mut self) -> Option<SubmitKind> {
        if self.is_terminated() {
            return None;
        }
        self.deadline.tick();
        if self.phase == ArenaPhase::Active && self.deadline.is_expired() {
            self.phase = ArenaPhase::Submitting;
            return Some(SubmitKind::Forced);
        }
        None
    }

    pub fn begin_run(&mut self) -> Result<(), ArenaError> {
        if self.is_terminated() {
            return Err(ArenaError::SessionOver);
        }
        if self.running {
            return Err(ArenaError::AlreadyRunning);
        }
        self.running = true;
        self.output = None;
        Ok(())
    }

    pub fn finish_run(&mut self, output: String) {
        self.running = false;
        if !self.is_terminated() {
            self.output = Some(output);
        }
    }

    /// Enter the submitting state. A second call while in flight is rejected.
    pub fn begin_submit(&mut self) -> Result<(), ArenaError> {
        match self.phase {
            ArenaPhase::Active => {
                self.phase = ArenaPhase::Submitting;
                Ok(())
            }
            ArenaPhase::Submitting => Err(ArenaError::AlreadySubmitting),
            ArenaPhase::Terminated(_) => Err(ArenaError::SessionOver),
        }
    }

    pub fn finish_submit(&mut self) -> Result<Navigation, ArenaError> {
        if self.phase != ArenaPhase::Submitting {
            return Err(ArenaError::SessionOver);
        }
        self.phase = ArenaPhase::Terminated(ArenaExit::Submitted);
        self.deadline.cancel();
        Ok(Navigation::with_notice(
            Route::Results(self.room_id.clone()),
            Notice::info(
                "Solution Submitted!",
                "Your solution has been submitted successfully.",
            ),
        ))
    }

    /// The submission failed; the submit action becomes available again.
    pub fn fail_submit(&mut self) {
        if self.phase == ArenaPhase::Submitting {
            self.phase = ArenaPhase::Active;
        }
    }

    /// Record a page signal. Returns the report to emit when it counts as cheating.
    pub fn observe(&mut self, signal: &PageSignal, now_millis: i64) -> Option<CheatReport> {
        if self.is_terminated() {
            return None;
        }
        let reason = signal.classify()?;
        self.cheat_modal = Some(reason);
        self.incidents.push(CheatIncident {
            reason,
            detected_at: now_millis,
        });
        Some(CheatReport {
            participant_id: self.participant_id.clone(),
            reason,
        })
    }

    /// The participant accepted the disqualification from the modal.
    pub fn confirm_disqualification(&mut self) -> Result<Navigation, ArenaError> {
        if self.is_terminated() {
            return Err(ArenaError::SessionOver);
        }
        let reason = self.cheat_modal.ok_or(ArenaError::NoPendingIncident)?;
        self.phase = ArenaPhase::Terminated(ArenaExit::Disqualified);
        self.deadline.cancel();
        Ok(Navigation::with_notice(
            Route::Dashboard,
            Notice::destructive("Disqualified", reason.message()),
        ))
    }
}
