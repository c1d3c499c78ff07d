//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use mongodb::bson::oid::ObjectId;

use crate::core::AppError;
use crate::domain::auth::{AuthMode, AuthenticatedUser, RequiredRole};
use crate::domain::entities::users::User;
use crate::repositories::users::UserRepository;
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
    pub check_account: bool,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let required_role = self.required_role.clone();
        let check_account = self.check_account;

        Box::pin(async move {
            let token_service = TokenService::instance();
            let auth_result = extract_user_from_request(&req, &token_service);

            match (&mode, auth_result) {
                (AuthMode::Required, Err(err)) => {
                    log::warn!("인증 실패: {} ({})", err, req.path());
                    return Ok(reject(req, AppError::AuthenticationError("유효한 인증 토큰이 필요합니다".to_string())));
                }
                (AuthMode::Required, Ok(user)) => {
                    if let Some(ref required) = required_role {
                        if !required.is_satisfied(user.role) {
                            log::warn!("권한 부족: 사용자 {} ({}), 필요 권한: {:?}", user.user_id, user.role, required);
                            return Ok(reject(req, AppError::AuthorizationError("접근 권한이 부족합니다".to_string())));
                        }
                    }

                    // 삭제되거나 거절된 계정의 토큰은 만료 전이라도 거부
                    if check_account {
                        if let Err(err) = verify_account(&user).await {
                            log::warn!("계정 확인 실패: 사용자 {} ({})", user.user_id, err);
                            return Ok(reject(req, err));
                        }
                    }

                    log::debug!("인증 성공: 사용자 {} ({})", user.user_id, user.role);
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Ok(user)) => {
                    // 선택적 모드에서는 역할이 맞지 않으면 익명으로 진행
                    let allowed = required_role.as_ref().is_none_or(|r| r.is_satisfied(user.role));
                    if allowed {
                        log::debug!("선택적 인증 성공: 사용자 {}", user.user_id);
                        req.extensions_mut().insert(user);
                    }
                }
                (AuthMode::Optional, Err(_)) => {
                    log::debug!("선택적 인증: 토큰 없음, 요청 진행");
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 오류 응답으로 요청을 종료
fn reject<B>(req: ServiceRequest, error: AppError) -> ServiceResponse<EitherBody<B>> {
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, error.error_response()).map_into_right_body()
}

/// 요청에서 JWT 토큰을 추출하고 검증
fn extract_user_from_request(req: &ServiceRequest, token_service: &TokenService) -> Result<AuthenticatedUser, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_token(token)?;

    Ok(AuthenticatedUser {
        user_id: claims.sub,
        role: claims.role,
        username: claims.username,
    })
}

/// 토큰 주인 계정이 아직 존재하고 거절되지 않았는지 확인
async fn verify_account(user: &AuthenticatedUser) -> Result<(), AppError> {
    let id = ObjectId::parse_str(&user.user_id)
        .map_err(|_| AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()))?;
    let account = UserRepository::instance().find_by_id(&id).await?;
    account_check(account.as_ref())
}

fn account_check(account: Option<&User>) -> Result<(), AppError> {
    match account {
        Some(user) if user.can_log_in() => Ok(()),
        Some(_) => Err(AppError::AuthenticationError("이용이 거절된 계정입니다".to_string())),
        None => Err(AppError::AuthenticationError("계정을 찾을 수 없습니다".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::{AccountStatus, Role, RoleProfile};

    fn seller(status: AccountStatus) -> User {
        let mut user = User::new(
            "bazaar".to_string(),
            "bazaar@example.com".to_string(),
            "hash".to_string(),
            Role::Seller,
            RoleProfile::Seller(Default::default()),
        );
        user.status = status;
        user
    }

    #[test]
    fn test_deleted_account_is_unauthenticated() {
        assert!(matches!(account_check(None), Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_rejected_account_is_unauthenticated() {
        let rejected = seller(AccountStatus::Rejected);
        assert!(matches!(account_check(Some(&rejected)), Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_pending_and_accepted_accounts_pass() {
        assert!(account_check(Some(&seller(AccountStatus::Pending))).is_ok());
        assert!(account_check(Some(&seller(AccountStatus::Accepted))).is_ok());
    }
}
