//! Client entity as stored in the client document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of offering a client service represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Product,
    Service,
    Digital,
    Consulting,
    Other,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Product => "product",
            ServiceCategory::Service => "service",
            ServiceCategory::Digital => "digital",
            ServiceCategory::Consulting => "consulting",
            ServiceCategory::Other => "other",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A business offering embedded in a client record.
///
/// Services are stored inside their owning client document and are never
/// modified once attached to a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: ServiceCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A client business the team writes ad copy for.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: String,
    pub user_id: String,
    pub business_name: String,
    pub contact_email: Option<String>,
    pub city: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub services: Vec<Service>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Looks up an embedded service by its id.
    pub fn find_service(&self, service_id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == service_id)
    }
}
