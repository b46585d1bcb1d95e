use sqlx::PgPool;

use crate::common::{CredentialId, CustomerId, WishlistId};
use crate::domains::customer::models::{Customer, Wishlist};

use super::credential::AuthCredential;
use super::role::Role;

/// Create the full account aggregate in one transaction: credential with
/// its role link, customer profile, and the profile's wishlist.
///
/// Any failure rolls everything back - no orphaned credential or
/// wishlist-less profile is ever visible. The unique constraints on
/// `cred_login` and `mobile_phone` decide concurrent signups for the same
/// phone; the caller maps that conflict to a validation error.
pub async fn create_account(
    first_name: &str,
    last_name: &str,
    mobile_phone: &str,
    password_hash: &str,
    role: &Role,
    pool: &PgPool,
) -> Result<(AuthCredential, Customer, Wishlist), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let credential = sqlx::query_as::<_, AuthCredential>(
        r#"
        INSERT INTO auth_credentials (id, cred_login, cred_password)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(CredentialId::new())
    .bind(mobile_phone)
    .bind(password_hash)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO credential_roles (credential_id, role_id) VALUES ($1, $2)")
        .bind(credential.id)
        .bind(role.id)
        .execute(&mut *tx)
        .await?;

    let customer = sqlx::query_as::<_, Customer>(
        r#"
        INSERT INTO customers (id, credential_id, first_name, last_name, mobile_phone)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(CustomerId::new())
    .bind(credential.id)
    .bind(first_name)
    .bind(last_name)
    .bind(mobile_phone)
    .fetch_one(&mut *tx)
    .await?;

    let wishlist = sqlx::query_as::<_, Wishlist>(
        r#"
        INSERT INTO customer_wishlists (id, customer_id)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(WishlistId::new())
    .bind(customer.id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok((credential, customer, wishlist))
}
