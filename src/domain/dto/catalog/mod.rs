pub mod common;
pub mod activities;
pub mod itineraries;
pub mod places;
pub mod tags;
pub mod products;
pub mod transportation;

pub use common::*;
pub use activities::*;
pub use itineraries::*;
pub use places::*;
pub use tags::*;
pub use products::*;
pub use transportation::*;
