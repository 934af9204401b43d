//! Scripted stand-in for the Document Analysis Service.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use docqa_client::{AnalysisService, ServiceError};
use docqa_config::SessionConfig;
use docqa_core::{CandidateFile, Document, PDF_MEDIA_TYPE};
use docqa_session::SessionController;
use tokio::sync::Notify;

/// Replies are consumed in order; an exhausted script answers with success.
#[derive(Default)]
pub struct ScriptedService {
    uploads: Mutex<VecDeque<Result<(), ServiceError>>>,
    answers: Mutex<VecDeque<Result<Option<String>, ServiceError>>>,
    uploaded: Mutex<Vec<(String, Vec<u8>)>>,
    asked: Mutex<Vec<String>>,
    /// When set, every call parks here until the test releases it.
    gate: Option<Arc<Notify>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn upload_ok(self) -> Self {
        self.uploads.lock().unwrap().push_back(Ok(()));
        self
    }

    pub fn upload_fails(self) -> Self {
        self.uploads.lock().unwrap().push_back(Err(server_error()));
        self
    }

    pub fn answer(self, answer: &str) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push_back(Ok(Some(answer.to_string())));
        self
    }

    pub fn no_answer(self) -> Self {
        self.answers.lock().unwrap().push_back(Ok(None));
        self
    }

    pub fn ask_fails(self) -> Self {
        self.answers.lock().unwrap().push_back(Err(server_error()));
        self
    }

    pub fn uploaded(&self) -> Vec<(String, Vec<u8>)> {
        self.uploaded.lock().unwrap().clone()
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

impl AnalysisService for ScriptedService {
    async fn upload(&self, document: &Document) -> Result<(), ServiceError> {
        self.uploaded
            .lock()
            .unwrap()
            .push((document.info().name.clone(), document.contents().to_vec()));
        self.wait_for_gate().await;
        self.uploads.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn ask(&self, question: &str) -> Result<Option<String>, ServiceError> {
        self.asked.lock().unwrap().push(question.to_string());
        self.wait_for_gate().await;
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Some(format!("answer to {question}"))))
    }
}

pub fn server_error() -> ServiceError {
    ServiceError::Api {
        status: 500,
        message: "index build failed".to_string(),
    }
}

pub fn controller(service: ScriptedService) -> SessionController<ScriptedService> {
    SessionController::new(service, SessionConfig::default())
}

pub fn pdf(name: &str) -> CandidateFile {
    CandidateFile::new(name, PDF_MEDIA_TYPE, format!("%PDF-1.7 {name}").into_bytes())
}

/// Select and upload `name`, asserting the session ends up ready.
pub async fn ready_with(controller: &SessionController<ScriptedService>, name: &str) {
    assert!(controller.select_candidate(pdf(name)).is_completed());
    assert!(controller.upload().await.is_completed());
}
