//! 카탈로그 엔티티
//!
//! 관광객이 탐색하고 예약/구매하는 콘텐츠입니다. 모든 평점은 내장 배열로
//! 저장되고 평균은 조회 시 계산합니다.

pub mod activity;
pub mod itinerary;
pub mod place;
pub mod tag;
pub mod product;
pub mod transportation;

pub use activity::Activity;
pub use itinerary::Itinerary;
pub use place::{HistoricalPlace, TicketPrices};
pub use tag::{Category, Tag, TagKind};
pub use product::Product;
pub use transportation::Transportation;
