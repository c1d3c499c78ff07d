//! 카탈로그(활동, 일정, 장소, 태그, 상품, 교통편) 리포지토리

pub mod activity_repo;
pub mod itinerary_repo;
pub mod place_repo;
pub mod tag_repo;
pub mod product_repo;
pub mod transportation_repo;

pub use activity_repo::ActivityRepository;
pub use itinerary_repo::ItineraryRepository;
pub use place_repo::PlaceRepository;
pub use tag_repo::{CategoryRepository, TagRepository};
pub use product_repo::ProductRepository;
pub use transportation_repo::TransportationRepository;
