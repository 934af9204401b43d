//! Document intake: candidate selection and the one-shot upload.

use docqa_client::AnalysisService;
use docqa_core::{CandidateFile, ErrorKind, Phase, SessionError};

use crate::{Guard, Outcome, OutcomeStatus, SessionController};

impl<S: AnalysisService> SessionController<S> {
    /// Offer a file as the session's document.
    ///
    /// Ignored while an upload or question is in flight. A candidate whose
    /// declared type is not `application/pdf` sets
    /// [`ErrorKind::InvalidFileType`] and changes nothing else; the
    /// previously selected document, if any, stays selected.
    ///
    /// Selecting while `document_ready` goes back to `document_selected`.
    /// The transcript of the uploaded document is kept until the new one
    /// uploads successfully.
    pub fn select_candidate(&self, candidate: CandidateFile) -> Outcome {
        let mut state = self.lock();
        if !state.phase.accepts_selection() {
            return Self::ignored(&state, Guard::WrongPhase, "select");
        }

        match candidate.accept() {
            Ok(document) => {
                tracing::debug!(
                    file = %document.info().name,
                    bytes = document.info().size_bytes,
                    "document selected"
                );
                state.document = Some(document);
                state.last_error = None;
                state.transition(Phase::DocumentSelected);
                self.completed(&mut state)
            }
            Err(kind) => {
                tracing::debug!(%kind, "candidate rejected");
                state.last_error = Some(SessionError::from(kind));
                Outcome {
                    status: OutcomeStatus::Failed(kind),
                    snapshot: self.commit(&mut state),
                }
            }
        }
    }

    /// Send the selected document to the service.
    ///
    /// On success the session becomes `document_ready` with an empty
    /// transcript. On failure it returns to `document_selected` with
    /// [`ErrorKind::UploadFailed`]; the same document can be sent again.
    pub async fn upload(&self) -> Outcome {
        let (document, epoch) = {
            let mut state = self.lock();
            if !state.phase.accepts_upload() {
                return Self::ignored(&state, Guard::WrongPhase, "upload");
            }
            let Some(document) = state.document.clone() else {
                return Self::ignored(&state, Guard::NoDocument, "upload");
            };
            state.last_error = None;
            state.transition(Phase::Uploading);
            self.commit(&mut state);
            (document, state.epoch)
        };

        let result = self.service().upload(&document).await;

        let mut state = self.lock();
        if state.epoch != epoch {
            return Self::superseded(&state, "upload");
        }
        match result {
            Ok(()) => {
                tracing::info!(file = %document.info().name, "document ready");
                state.transcript.clear();
                state.transition(Phase::DocumentReady);
                self.completed(&mut state)
            }
            Err(error) => {
                tracing::warn!(file = %document.info().name, %error, "upload failed");
                state.last_error = Some(SessionError::from(ErrorKind::UploadFailed));
                state.transition(Phase::DocumentSelected);
                Outcome {
                    status: OutcomeStatus::Failed(ErrorKind::UploadFailed),
                    snapshot: self.commit(&mut state),
                }
            }
        }
    }
}
