//! 예약, 주문, 지갑, 위시리스트 엔티티

pub mod booking;
pub mod order;
pub mod wallet;
pub mod wishlist;

pub use booking::{Booking, BookingKind, BookingStatus};
pub use order::{Order, OrderItem, OrderStatus};
pub use wallet::Wallet;
pub use wishlist::{Wishlist, WishlistKind};
