//! 예약, 주문, 지갑, 위시리스트, 매출 서비스

pub mod wallet_service;
pub mod booking_service;
pub mod order_service;
pub mod wishlist_service;
pub mod revenue_service;

pub use wallet_service::WalletService;
pub use booking_service::{BookingService, ExternalBooking};
pub use order_service::OrderService;
pub use wishlist_service::WishlistService;
pub use revenue_service::RevenueService;
