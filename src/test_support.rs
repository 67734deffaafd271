//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::state::Widget;
use crate::service::{ChatService, InitResponse, ProcessResponse, ServiceError};

/// Creates a test Widget with a short send delay.
pub fn test_widget() -> Widget {
    Widget::new("Hi there!", Duration::from_millis(5))
}

/// In-memory `ChatService` that replays scripted results and records calls.
#[derive(Default)]
pub struct ScriptedService {
    init: Option<InitResponse>,
    replies: Mutex<VecDeque<Result<String, ServiceError>>>,
    init_calls: Mutex<usize>,
    processed: Mutex<Vec<(Option<String>, String)>>,
    removed: Mutex<Vec<String>>,
}

impl ScriptedService {
    pub fn with_session(session_id: &str, greeting: &str) -> Self {
        Self {
            init: Some(InitResponse {
                session_id: session_id.to_string(),
                response: greeting.to_string(),
            }),
            ..Default::default()
        }
    }

    pub fn push_reply(&self, reply: Result<&str, ServiceError>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(reply.map(str::to_string));
    }

    pub fn init_calls(&self) -> usize {
        *self.init_calls.lock().unwrap()
    }

    pub fn processed(&self) -> Vec<(Option<String>, String)> {
        self.processed.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn init_session(&self) -> Result<InitResponse, ServiceError> {
        *self.init_calls.lock().unwrap() += 1;
        self.init
            .clone()
            .ok_or_else(|| ServiceError::Network("no init scripted".to_string()))
    }

    async fn process_message(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<ProcessResponse, ServiceError> {
        self.processed
            .lock()
            .unwrap()
            .push((session_id.map(str::to_string), message.to_string()));
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(response)) => Ok(ProcessResponse {
                response,
                session_id: None,
            }),
            Some(Err(e)) => Err(e),
            None => Err(ServiceError::Network("no reply scripted".to_string())),
        }
    }

    async fn remove_session(&self, session_id: &str) -> Result<(), ServiceError> {
        self.removed.lock().unwrap().push(session_id.to_string());
        Ok(())
    }
}
