//! Customer domain - profile and wishlist rows created alongside a
//! credential at signup. Profile CRUD beyond that lives in the customer
//! management crate.

pub mod models;

pub use models::{Customer, CustomerProfile, Wishlist};
