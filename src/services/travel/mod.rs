//! 외부 여행 API(호텔/항공) 프록시 서비스

pub mod travel_service;

pub use travel_service::TravelService;
