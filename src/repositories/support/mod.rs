//! 불만 접수와 알림 리포지토리

pub mod complaint_repo;
pub mod notification_repo;

pub use complaint_repo::ComplaintRepository;
pub use notification_repo::NotificationRepository;
