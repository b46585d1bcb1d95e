pub mod customer;
pub mod wishlist;

pub use customer::{Customer, CustomerProfile};
pub use wishlist::Wishlist;
