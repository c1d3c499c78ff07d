//! # Domain Entities
//!
//! MongoDB에 저장되는 영속 엔티티들입니다. 모든 문서는 `_id`(ObjectId),
//! `created_at`, `updated_at`(BSON DateTime)을 가지며 다른 문서는 ObjectId로 참조합니다.
//!
//! | 엔티티 | 컬렉션 |
//! |--------|--------|
//! | [`User`] | `users` |
//! | [`Activity`] | `activities` |
//! | [`Itinerary`] | `itineraries` |
//! | [`HistoricalPlace`] | `historical_places` |
//! | [`Tag`] / [`Category`] | `tags` / `categories` |
//! | [`Product`] | `products` |
//! | [`Transportation`] | `transportations` |
//! | [`Booking`] / [`Order`] | `bookings` / `orders` |
//! | [`Wallet`] / [`Wishlist`] | `wallets` / `wishlists` |
//! | [`Complaint`] / [`Notification`] | `complaints` / `notifications` |

pub mod users;
pub mod common;
pub mod catalog;
pub mod commerce;
pub mod support;

pub use users::*;
pub use common::{average_rating, GeoLocation, PaymentMethod, Rating};
pub use catalog::*;
pub use commerce::*;
pub use support::*;
