//! Data-transfer shapes shared between the storefront and admin binaries.
//!
//! These are plain records: serde-serializable, no I/O, no business rules
//! beyond trivial accessors. Repositories in the binaries map database rows
//! into them; route handlers map them into view structs.

pub mod cart;
pub mod category;
pub mod manufacturer;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem};
pub use category::Category;
pub use manufacturer::Manufacturer;
pub use product::Product;
pub use user::User;
