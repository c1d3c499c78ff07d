//! 예약, 주문, 지갑, 위시리스트 리포지토리

pub mod booking_repo;
pub mod order_repo;
pub mod wallet_repo;
pub mod wishlist_repo;

pub use booking_repo::BookingRepository;
pub use order_repo::OrderRepository;
pub use wallet_repo::WalletRepository;
pub use wishlist_repo::WishlistRepository;
