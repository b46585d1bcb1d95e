use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{CustomerId, WishlistId};

/// Wishlist row - SQL persistence layer
///
/// Created with its customer at signup; listing entries are managed by
/// the listings crate.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Wishlist {
    pub id: WishlistId,
    pub customer_id: CustomerId,
    pub created_at: DateTime<Utc>,
}

impl Wishlist {
    /// Find a wishlist by its owning customer
    pub async fn find_by_customer(
        customer_id: CustomerId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM customer_wishlists WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_optional(pool)
            .await
    }
}
