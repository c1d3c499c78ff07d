pub mod bookings;
pub mod orders;
pub mod wallets;
pub mod wishlists;
pub mod revenue;

pub use bookings::*;
pub use orders::*;
pub use wallets::*;
pub use wishlists::*;
pub use revenue::*;
