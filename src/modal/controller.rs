use super::form::FormDraft;
use crate::shared::FieldName;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    #[error("modal is already open")]
    AlreadyOpen,
    #[error("modal is not open")]
    NotOpen,
    #[error("a submission is already in flight")]
    SubmitInFlight,
    #[error("no submission is in flight")]
    NotSubmitting,
}

/// What the one-shot `submit` observed from the caller-supplied side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Completed,
    Failed(String),
}

/// Open/submit/cancel lifecycle for one entity-creation dialog. The
/// controller owns the draft and performs no I/O of its own; side effects
/// live in the submission closure supplied by the caller.
///
/// A host with its own event loop can stretch a submission over two calls:
/// `begin_submit` hands out the draft and raises the in-flight guard,
/// `finish_submit` applies the outcome. While in flight, `cancel`, `open`
/// and draft edits are rejected, so one instance can never overlap
/// submissions.
#[derive(Debug, Clone, Default)]
pub struct ModalController {
    payload: Option<FormDraft>,
    submitting: bool,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.payload.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn draft(&self) -> Option<&FormDraft> {
        self.payload.as_ref()
    }

    /// Opens the dialog with an optional pre-filled draft. Reopening an open
    /// instance is a caller bug; concurrent dialogs need separate instances.
    pub fn open(&mut self, initial_draft: Option<FormDraft>) -> Result<(), ModalError> {
        if self.is_open() {
            return Err(ModalError::AlreadyOpen);
        }
        self.payload = Some(initial_draft.unwrap_or_default());
        self.submitting = false;
        Ok(())
    }

    /// Replaces one raw field value in the open draft.
    pub fn set_field(&mut self, name: FieldName, value: String) -> Result<(), ModalError> {
        if self.submitting {
            return Err(ModalError::SubmitInFlight);
        }
        let Some(draft) = self.payload.as_mut() else {
            return Err(ModalError::NotOpen);
        };
        draft.insert(name, value);
        Ok(())
    }

    /// Starts a submission: raises the in-flight guard and hands the caller
    /// a copy of the draft to work with.
    pub fn begin_submit(&mut self) -> Result<FormDraft, ModalError> {
        if self.submitting {
            return Err(ModalError::SubmitInFlight);
        }
        let Some(draft) = self.payload.as_ref() else {
            return Err(ModalError::NotOpen);
        };
        let draft = draft.clone();
        self.submitting = true;
        Ok(draft)
    }

    /// Applies a submission outcome. Success closes the dialog and discards
    /// the draft; failure keeps it open with the draft intact so the user
    /// can correct and retry.
    pub fn finish_submit(&mut self, outcome: Result<(), String>) -> Result<(), ModalError> {
        if !self.submitting {
            return Err(ModalError::NotSubmitting);
        }
        self.submitting = false;
        if outcome.is_ok() {
            self.payload = None;
        }
        Ok(())
    }

    /// One-shot submission for synchronous hosts. The side effect runs
    /// exactly once per call; its failure is reported in the outcome, not
    /// as a lifecycle error.
    pub fn submit<F>(&mut self, on_submit: F) -> Result<SubmitOutcome, ModalError>
    where
        F: FnOnce(&FormDraft) -> Result<(), String>,
    {
        let draft = self.begin_submit()?;
        let result = on_submit(&draft);
        let outcome = match &result {
            Ok(()) => SubmitOutcome::Completed,
            Err(message) => SubmitOutcome::Failed(message.clone()),
        };
        self.finish_submit(result)?;
        Ok(outcome)
    }

    /// Closes the dialog and discards the draft. No confirmation step is
    /// part of this contract; a closed modal cancels as a no-op. Cannot run
    /// mid-submission.
    pub fn cancel(&mut self) -> Result<(), ModalError> {
        if self.submitting {
            return Err(ModalError::SubmitInFlight);
        }
        self.payload = None;
        Ok(())
    }
}
