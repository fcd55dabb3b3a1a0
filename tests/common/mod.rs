//! Shared helpers for integration tests: a scripted transport that
//! records every request, and a clipboard that records what was copied.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use passwordy::api::{ApiClient, ApiRequest, ApiResponse, Transport};
use passwordy::clipboard::Clipboard;
use passwordy::errors::{PasswordyError, Result};
use serde_json::{json, Value};
use uuid::Uuid;

pub const PREFIX: &str = "/api/v1";

enum Reply {
    Respond(ApiResponse),
    Fail(String),
}

/// Answers requests from a queue, in order, and keeps a copy of each one.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: Value) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Reply::Respond(ApiResponse::new(status, body.to_string())));
        self
    }

    pub fn respond_raw(&self, status: u16, body: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Reply::Respond(ApiResponse::new(status, body)));
        self
    }

    /// Next request fails before reaching the server.
    pub fn fail(&self, message: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Reply::Fail(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.borrow_mut().push(request.clone());
        match self.replies.borrow_mut().pop_front() {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(PasswordyError::Transport(message)),
            None => Err(PasswordyError::Transport(format!(
                "unscripted request: {} {}",
                request.method, request.path
            ))),
        }
    }
}

pub fn client(transport: &ScriptedTransport) -> ApiClient<&ScriptedTransport> {
    ApiClient::new(transport, PREFIX)
}

/// Clipboard that remembers every text it was given.
#[derive(Default)]
pub struct RecordingClipboard {
    pub copied: Vec<String>,
    pub broken: bool,
}

impl Clipboard for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.broken {
            return Err(PasswordyError::Clipboard("no display".into()));
        }
        self.copied.push(text.to_string());
        Ok(())
    }
}

pub fn user_json(username: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "username": username,
        "created_at": "2024-03-01T09:30:00"
    })
}

pub fn item_json(id: Uuid, account_name: &str) -> Value {
    json!({
        "id": id,
        "user_id": Uuid::new_v4(),
        "account_name": account_name,
        "url": "github.com",
        "login": "octocat",
        "password_masked": "********",
        "created_at": "2024-03-01T09:30:00Z",
        "updated_at": null
    })
}

pub fn token_json() -> Value {
    json!({"access_token": "eyJ.test.token", "token_type": "bearer"})
}
