//! 불만 접수와 알림 서비스

pub mod complaint_service;
pub mod notification_service;

pub use complaint_service::ComplaintService;
pub use notification_service::NotificationService;
