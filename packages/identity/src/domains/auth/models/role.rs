use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;

use crate::common::RoleId;

/// The fixed set of system roles.
///
/// Stored as snake_case text in `roles.role_title`; rows are seeded by
/// migration so lookups never miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleTitle {
    IndividualCustomer,
    CorporateCustomer,
    Staff,
    Admin,
}

impl RoleTitle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IndividualCustomer => "individual_customer",
            Self::CorporateCustomer => "corporate_customer",
            Self::Staff => "staff",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for RoleTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleTitle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual_customer" => Ok(Self::IndividualCustomer),
            "corporate_customer" => Ok(Self::CorporateCustomer),
            "staff" => Ok(Self::Staff),
            "admin" => Ok(Self::Admin),
            other => Err(anyhow::anyhow!("unknown role title: {other}")),
        }
    }
}

/// Role row - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Role {
    pub id: RoleId,
    pub role_title: String,
}

impl Role {
    /// Find a role by its title
    pub async fn find_by_title(title: RoleTitle, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM roles WHERE role_title = $1")
            .bind(title.as_str())
            .fetch_optional(pool)
            .await
    }
}
