//! Mock transports and repositories for isolating layers in tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use mockall::mock;
use reqwest::Method;

use crate::domain::contact::Contact;
use crate::domain::types::ContactId;
use crate::forms::contact::ContactForm;
use crate::http::{ApiRequest, ApiResponse, HttpTransport, TransportError};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ContactReader, ContactWriter};

mock! {
    pub Transport {}

    #[async_trait]
    impl HttpTransport for Transport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
    }
}

mock! {
    pub Repository {}

    #[async_trait]
    impl ContactReader for Repository {
        async fn list_contacts(&self) -> RepositoryResult<Vec<Contact>>;
    }

    #[async_trait]
    impl ContactWriter for Repository {
        async fn upsert_contact(
            &self,
            form: ContactForm,
            id: Option<ContactId>,
        ) -> RepositoryResult<Contact>;
        async fn delete_contact(&self, id: Option<ContactId>) -> RepositoryResult<bool>;
    }
}

/// Transport replaying canned responses in order and recording every request.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: impl IntoIterator<Item = ApiResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Method and path of every request received so far.
    pub fn calls(&self) -> Vec<(Method, String)> {
        self.requests()
            .into_iter()
            .map(|request| {
                let path = request.path();
                (request.method, path)
            })
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let path = request.path();
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        self.responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front())
            .ok_or_else(|| TransportError(format!("no scripted response left for {path}")))
    }
}
