//! PostgreSQL implementation of client repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::{Client, Service};
use crate::domain::repositories::ClientRepository;
use crate::error::AppError;

/// PostgreSQL repository for client documents.
///
/// Services are embedded in the `services` JSONB column, mirroring the
/// document layout clients are created with.
pub struct PgClientRepository {
    pool: Arc<PgPool>,
}

impl PgClientRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ClientRow {
    id: String,
    user_id: String,
    business_name: String,
    contact_email: Option<String>,
    city: Option<String>,
    industry: Option<String>,
    website: Option<String>,
    description: Option<String>,
    services: Json<Vec<Service>>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(r: ClientRow) -> Self {
        Client {
            id: r.id,
            user_id: r.user_id,
            business_name: r.business_name,
            contact_email: r.contact_email,
            city: r.city,
            industry: r.industry,
            website: r.website,
            description: r.description,
            services: r.services.0,
            is_active: r.is_active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Client>, AppError> {
        let row = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, user_id, business_name, contact_email, city, industry, website,
                   description, services, is_active, created_at, updated_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Client::from))
    }

    async fn list(&self, only_active: bool) -> Result<Vec<Client>, AppError> {
        let rows = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, user_id, business_name, contact_email, city, industry, website,
                   description, services, is_active, created_at, updated_at
            FROM clients
            WHERE ($1::boolean IS NULL OR is_active = $1)
            ORDER BY business_name, id
            "#,
        )
        .bind(if only_active { Some(true) } else { None })
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn health_check(&self) -> bool {
        match sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Database health check failed: {}", e);
                false
            }
        }
    }
}
