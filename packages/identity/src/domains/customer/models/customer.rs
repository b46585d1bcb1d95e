use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::{CredentialId, CustomerId};

/// Customer row - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub credential_id: CredentialId,
    pub first_name: String,
    pub last_name: String,
    pub mobile_phone: String,
    pub created_at: DateTime<Utc>,
}

/// What signup returns to the caller: the profile with every
/// credential-side field stripped.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerProfile {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub mobile_phone: String,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerProfile {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            mobile_phone: c.mobile_phone,
            created_at: c.created_at,
        }
    }
}

impl Customer {
    /// Find a customer by mobile phone
    pub async fn find_by_phone(phone: &str, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM customers WHERE mobile_phone = $1")
            .bind(phone)
            .fetch_optional(pool)
            .await
    }
}
