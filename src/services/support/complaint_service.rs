//! 불만 접수 서비스
//!
//! 관광객은 자신의 불만만 조회할 수 있고, 관리자는 전체를 상태별로 조회하며
//! 답변과 상태 변경을 담당합니다.

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::support::{
    ComplaintQuery, ComplaintResponse, CreateComplaintRequest, ReplyComplaintRequest,
};
use crate::domain::entities::{Complaint, ComplaintStatus};
use crate::domain::models::filters::SortOrder;
use crate::repositories::base::parse_object_id;
use crate::repositories::support::ComplaintRepository;
use singleton_macro::service;

#[service(name = "complaint")]
pub struct ComplaintService {
    complaint_repo: Arc<ComplaintRepository>,
}

impl ComplaintService {
    pub async fn file(&self, tourist: ObjectId, request: CreateComplaintRequest) -> Result<ComplaintResponse, AppError> {
        let now = DateTime::now();
        let complaint = Complaint {
            id: None,
            title: request.title.trim().to_string(),
            body: request.body.trim().to_string(),
            tourist,
            status: ComplaintStatus::Pending,
            reply: None,
            replied_at: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.complaint_repo.create(complaint).await?;
        log::info!("📝 불만 접수: {} (tourist {})", created.title, tourist);
        Ok(created.into())
    }

    /// 관리자는 전체, 그 외는 본인 접수분만. 기본 정렬은 최신순.
    pub async fn list(&self, user: &AuthenticatedUser, query: ComplaintQuery) -> Result<Vec<ComplaintResponse>, AppError> {
        let owner = if user.is_admin() { None } else { Some(user.object_id()?) };
        let newest_first = !matches!(query.sort, Some(SortOrder::Asc));

        let complaints = self
            .complaint_repo
            .find_all(owner.as_ref(), query.status, newest_first)
            .await?;
        Ok(complaints.into_iter().map(ComplaintResponse::from).collect())
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: &str) -> Result<ComplaintResponse, AppError> {
        let complaint = self.find(id).await?;

        if !user.is_admin() && complaint.tourist != user.object_id()? {
            return Err(AppError::AuthorizationError("본인이 접수한 불만만 조회할 수 있습니다".to_string()));
        }
        Ok(complaint.into())
    }

    /// 답변 등록 (해결 처리 포함)
    pub async fn reply(&self, id: &str, request: ReplyComplaintRequest) -> Result<ComplaintResponse, AppError> {
        let id = parse_object_id(id)?;

        self.complaint_repo
            .reply(&id, request.reply.trim())
            .await?
            .map(ComplaintResponse::from)
            .ok_or_else(|| AppError::NotFound("불만 접수를 찾을 수 없습니다".to_string()))
    }

    pub async fn update_status(&self, id: &str, status: ComplaintStatus) -> Result<ComplaintResponse, AppError> {
        let id = parse_object_id(id)?;

        self.complaint_repo
            .update_status(&id, status)
            .await?
            .map(ComplaintResponse::from)
            .ok_or_else(|| AppError::NotFound("불만 접수를 찾을 수 없습니다".to_string()))
    }

    async fn find(&self, id: &str) -> Result<Complaint, AppError> {
        let id = parse_object_id(id)?;
        self.complaint_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("불만 접수를 찾을 수 없습니다".to_string()))
    }
}
