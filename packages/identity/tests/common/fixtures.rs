//! Test fixtures built through the public service and model APIs.

use anyhow::Result;
use identity_core::domains::auth::{AuthService, SignUpRequest};
use identity_core::domains::customer::models::CustomerProfile;

/// Run the full request-challenge + signup flow for a phone number.
pub async fn sign_up_customer(
    auth: &AuthService,
    phone: &str,
    password: &str,
) -> Result<CustomerProfile> {
    let challenge = auth.request_verify_phone(phone).await?;
    let profile = auth
        .sign_up(SignUpRequest {
            first_name: "Test".to_string(),
            last_name: "Customer".to_string(),
            mobile_phone: phone.to_string(),
            password: password.to_string(),
            verify_otp: challenge.code,
        })
        .await?;
    Ok(profile)
}

/// Fresh phone number per call; tests share one database, so every test
/// works with its own destinations.
pub fn test_phone() -> String {
    let digits = uuid::Uuid::new_v4().as_u128() % 100_000_000;
    format!("09{:08}", digits)
}
