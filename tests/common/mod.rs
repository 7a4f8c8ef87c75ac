#![allow(dead_code)]

use ad_studio::domain::completion::{AiError, ChatPrompt, CompletionClient, CompletionOptions};
use ad_studio::domain::entities::{Client, Service, ServiceCategory};
use ad_studio::domain::repositories::ClientRepository;
use ad_studio::error::AppError;
use ad_studio::state::AppState;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Client store backed by a map.
pub struct InMemoryClientRepository {
    clients: HashMap<String, Client>,
    healthy: bool,
}

impl Default for InMemoryClientRepository {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryClientRepository {
    pub fn new(clients: Vec<Client>) -> Self {
        Self {
            clients: clients.into_iter().map(|c| (c.id.clone(), c)).collect(),
            healthy: true,
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            clients: HashMap::new(),
            healthy: false,
        }
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Client>, AppError> {
        if !self.healthy {
            return Err(AppError::internal("Database error: connection refused"));
        }
        Ok(self.clients.get(id).cloned())
    }

    async fn list(&self, only_active: bool) -> Result<Vec<Client>, AppError> {
        let mut clients: Vec<Client> = self
            .clients
            .values()
            .filter(|c| !only_active || c.is_active)
            .cloned()
            .collect();
        clients.sort_by(|a, b| a.business_name.cmp(&b.business_name));
        Ok(clients)
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}

/// What the stub answers to a completion request.
#[derive(Clone)]
pub enum StubReply {
    Content(String),
    Empty,
    Status(u16, String),
    NotConfigured,
}

/// Completion client returning a canned reply and recording every prompt.
pub struct StubCompletionClient {
    reply: StubReply,
    configured: bool,
    calls: Mutex<Vec<(ChatPrompt, CompletionOptions)>>,
}

impl StubCompletionClient {
    pub fn replying(content: &str) -> Self {
        Self::with_reply(StubReply::Content(content.to_string()))
    }

    pub fn with_reply(reply: StubReply) -> Self {
        Self {
            reply,
            configured: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            reply: StubReply::NotConfigured,
            configured: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(ChatPrompt, CompletionOptions)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> ChatPrompt {
        self.calls()
            .last()
            .map(|(prompt, _)| prompt.clone())
            .expect("no completion request was made")
    }
}

#[async_trait]
impl CompletionClient for StubCompletionClient {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete_json(
        &self,
        prompt: &ChatPrompt,
        options: &CompletionOptions,
    ) -> Result<String, AiError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.clone(), *options));

        match &self.reply {
            StubReply::Content(content) => Ok(content.clone()),
            StubReply::Empty => Err(AiError::EmptyResponse),
            StubReply::Status(status, body) => Err(AiError::Status {
                status: *status,
                body: body.clone(),
            }),
            StubReply::NotConfigured => Err(AiError::NotConfigured),
        }
    }

    async fn ping(&self) -> Result<(), AiError> {
        if self.configured {
            Ok(())
        } else {
            Err(AiError::NotConfigured)
        }
    }
}

pub fn create_test_state(
    repository: InMemoryClientRepository,
    completion: Arc<StubCompletionClient>,
) -> AppState {
    AppState::new(Arc::new(repository), completion)
}

pub fn service(id: &str, name: &str, description: &str, category: ServiceCategory) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        url: None,
    }
}

pub fn acme_client() -> Client {
    Client {
        id: "client-1".to_string(),
        user_id: "user-1".to_string(),
        business_name: "Acme Plumbing".to_string(),
        contact_email: Some("owner@acme.example".to_string()),
        city: Some("Denver".to_string()),
        industry: Some("home services".to_string()),
        website: Some("https://acme.example".to_string()),
        description: Some("Family-owned plumbing company".to_string()),
        services: vec![
            service(
                "svc-1",
                "Drain Cleaning",
                "Same-day drain cleaning",
                ServiceCategory::Service,
            ),
            service(
                "svc-2",
                "Water Heaters",
                "Tankless water heater installation",
                ServiceCategory::Product,
            ),
        ],
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn google_request() -> serde_json::Value {
    serde_json::json!({
        "businessName": "Acme Plumbing",
        "businessDescription": "24/7 emergency plumbing",
        "targetAudience": "homeowners in Denver",
        "keyFeatures": ["Licensed", "Same-day service"],
        "callToAction": "Call Today"
    })
}

pub fn facebook_request() -> serde_json::Value {
    let mut body = google_request();
    body["objective"] = serde_json::json!("leads");
    body
}
