//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 JWT 토큰을 검증하고 사용자 정보를 추출합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::auth::{AuthMode, RequiredRole};
use crate::domain::entities::users::Role;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
    /// 필수 모드에서 토큰 주인 계정이 살아 있는지 DB로 확인
    check_account: bool,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
            check_account: true,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
            check_account: true,
        }
    }

    /// 계정 조회 없이 토큰만 검증 (DB 없는 테스트용)
    #[cfg(test)]
    pub(crate) fn token_only(mut self) -> Self {
        self.check_account = false;
        self
    }

    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증 미들웨어 생성
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 특정 역할 요구 인증 미들웨어 생성
    pub fn required_with_role(role: Role) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Single(role))
    }

    /// 복수 역할 중 하나 요구 인증 미들웨어 생성
    pub fn required_with_roles(roles: &[Role]) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Any(roles.to_vec()))
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
            check_account: self.check_account,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    use crate::domain::auth::{AuthenticatedUser, OptionalUser};
    use crate::domain::entities::users::{RoleProfile, User};
    use crate::services::auth::TokenService;
    use mongodb::bson::oid::ObjectId;

    fn token_for(role: Role, profile: RoleProfile) -> String {
        let mut user = User::new(
            "tester".to_string(),
            "tester@example.com".to_string(),
            "hash".to_string(),
            role,
            profile,
        );
        user.id = Some(ObjectId::new());
        TokenService::instance().generate_token(&user).unwrap()
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.role.as_str())
    }

    async fn maybe(user: OptionalUser) -> HttpResponse {
        match user.0 {
            Some(u) => HttpResponse::Ok().body(u.username),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    #[actix_web::test]
    async fn test_required_role_gating() {
        let app = test::init_service(
            App::new().service(
                web::scope("/admin")
                    .wrap(AuthMiddleware::required_with_role(Role::Admin).token_only())
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let anonymous = test::TestRequest::get().uri("/admin").to_request();
        assert_eq!(test::call_service(&app, anonymous).await.status(), StatusCode::UNAUTHORIZED);

        let seller = token_for(Role::Seller, RoleProfile::Seller(Default::default()));
        let forbidden = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", seller)))
            .to_request();
        assert_eq!(test::call_service(&app, forbidden).await.status(), StatusCode::FORBIDDEN);

        let admin = token_for(Role::Admin, RoleProfile::Staff);
        let allowed = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", admin)))
            .to_request();
        let body = test::call_and_read_body(&app, allowed).await;
        assert_eq!(body, web::Bytes::from_static(b"admin"));
    }

    #[actix_web::test]
    async fn test_malformed_header_is_unauthorized() {
        let app = test::init_service(
            App::new().service(
                web::scope("/me")
                    .wrap(AuthMiddleware::required())
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", "Token abc"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_optional_mode_allows_anonymous() {
        let app = test::init_service(
            App::new().service(
                web::scope("/public")
                    .wrap(AuthMiddleware::optional())
                    .route("", web::get().to(maybe)),
            ),
        )
        .await;

        let anonymous = test::TestRequest::get().uri("/public").to_request();
        assert_eq!(test::call_and_read_body(&app, anonymous).await, web::Bytes::from_static(b"anonymous"));

        let token = token_for(Role::Seller, RoleProfile::Seller(Default::default()));
        let known = test::TestRequest::get()
            .uri("/public")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_and_read_body(&app, known).await, web::Bytes::from_static(b"tester"));
    }
}
