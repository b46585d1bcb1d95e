// Auth persistence layer - SQL queries live on the model types

pub mod credential;
pub mod role;
pub mod session;
pub mod signup;
pub mod verify_otp;

pub use credential::{AuthCredential, CredentialWithRoles};
pub use role::{Role, RoleTitle};
pub use session::Session;
pub use signup::create_account;
pub use verify_otp::{VerifyOtp, VerifyPurpose};
