//! # Route Configuration Module
//!
//! 모든 HTTP 라우트를 기능별로 등록합니다.
//!
//! ## 인증 레벨
//!
//! | 스코프 | 미들웨어 |
//! |--------|----------|
//! | `/api/{role}/register`, `/health`, `/uploads` | 없음 |
//! | `/api/auth`, 카탈로그(`tags`, `categories`, `activities`, `itineraries`, `places`, `products`, `transportation`), `hotels`, `flights` | 선택적 인증 |
//! | `/api/profile`, `/api/complaints`, `/api/notifications` | 필수 인증 |
//! | `/api/bookings`, `/api/orders`, `/api/wallet`, `/api/wishlist` | 관광객 |
//! | `/api/revenue` | 광고주, 투어 가이드, 판매자 |
//! | `/api/admin` | 관리자 |
//!
//! 선택적 인증 스코프의 변경 엔드포인트는 핸들러에서 `AuthenticatedUser`를 요구하므로
//! 토큰 없이 호출하면 401이 됩니다.

use actix_web::web;
use serde_json::json;

use crate::config::UploadConfig;
use crate::domain::entities::users::Role;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_account_routes(cfg);
    configure_catalog_routes(cfg);
    configure_commerce_routes(cfg);
    configure_support_routes(cfg);
    configure_travel_routes(cfg);

    cfg.service(actix_files::Files::new(UploadConfig::public_prefix(), UploadConfig::root_dir()));
}

/// 가입/로그인 라우트
///
/// 관광객 가입(JSON)은 `{role}` 경로보다 먼저 등록되어야 합니다.
///
/// ```bash
/// curl -X POST http://localhost:8080/api/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"identifier":"nile_crafts","password":"password123"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::register_tourist)
        .service(handlers::auth::register_provider);

    cfg.service(
        web::scope("/api/auth")
            .wrap(AuthMiddleware::optional())
            .service(handlers::auth::login)
            .service(handlers::auth::me)
            .service(handlers::auth::change_password),
    );
}

fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/profile")
            .wrap(AuthMiddleware::required())
            .service(handlers::profile::get_profile)
            .service(handlers::profile::update_profile)
            .service(handlers::profile::accept_terms)
            .service(handlers::profile::upload_picture)
            .service(handlers::profile::upload_logo),
    );

    cfg.service(
        web::scope("/api/admin")
            .wrap(AuthMiddleware::required_with_role(Role::Admin))
            .service(handlers::admin::list_users)
            .service(handlers::admin::update_user_status)
            .service(handlers::admin::delete_user)
            .service(handlers::admin::create_account)
            .service(handlers::admin::platform_revenue),
    );
}

/// 카탈로그 라우트
///
/// 목록/상세는 익명 접근이 가능하고, `/mine`은 `/{id}`보다 먼저 등록합니다.
fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/tags")
            .wrap(AuthMiddleware::optional())
            .service(handlers::tags::list_tags)
            .service(handlers::tags::create_tag)
            .service(handlers::tags::update_tag)
            .service(handlers::tags::delete_tag),
    );

    cfg.service(
        web::scope("/api/categories")
            .wrap(AuthMiddleware::optional())
            .service(handlers::tags::list_categories)
            .service(handlers::tags::create_category)
            .service(handlers::tags::rename_category)
            .service(handlers::tags::delete_category),
    );

    cfg.service(
        web::scope("/api/activities")
            .wrap(AuthMiddleware::optional())
            .service(handlers::activities::list_activities)
            .service(handlers::activities::my_activities)
            .service(handlers::activities::get_activity)
            .service(handlers::activities::create_activity)
            .service(handlers::activities::update_activity)
            .service(handlers::activities::delete_activity)
            .service(handlers::activities::rate_activity)
            .service(handlers::activities::flag_activity),
    );

    cfg.service(
        web::scope("/api/itineraries")
            .wrap(AuthMiddleware::optional())
            .service(handlers::itineraries::list_itineraries)
            .service(handlers::itineraries::my_itineraries)
            .service(handlers::itineraries::get_itinerary)
            .service(handlers::itineraries::create_itinerary)
            .service(handlers::itineraries::update_itinerary)
            .service(handlers::itineraries::set_activation)
            .service(handlers::itineraries::delete_itinerary)
            .service(handlers::itineraries::rate_itinerary)
            .service(handlers::itineraries::flag_itinerary),
    );

    cfg.service(
        web::scope("/api/places")
            .wrap(AuthMiddleware::optional())
            .service(handlers::places::list_places)
            .service(handlers::places::my_places)
            .service(handlers::places::get_place)
            .service(handlers::places::create_place)
            .service(handlers::places::update_place)
            .service(handlers::places::add_place_picture)
            .service(handlers::places::delete_place),
    );

    cfg.service(
        web::scope("/api/products")
            .wrap(AuthMiddleware::optional())
            .service(handlers::products::list_products)
            .service(handlers::products::my_products)
            .service(handlers::products::get_product)
            .service(handlers::products::create_product)
            .service(handlers::products::update_product)
            .service(handlers::products::upload_product_picture)
            .service(handlers::products::archive_product)
            .service(handlers::products::delete_product)
            .service(handlers::products::rate_product),
    );

    cfg.service(
        web::scope("/api/transportation")
            .wrap(AuthMiddleware::optional())
            .service(handlers::transportation::list_transportation)
            .service(handlers::transportation::my_transportation)
            .service(handlers::transportation::get_transportation)
            .service(handlers::transportation::create_transportation)
            .service(handlers::transportation::update_transportation)
            .service(handlers::transportation::delete_transportation),
    );
}

fn configure_commerce_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/bookings")
            .wrap(AuthMiddleware::required_with_role(Role::Tourist))
            .service(handlers::bookings::create_booking)
            .service(handlers::bookings::list_bookings)
            .service(handlers::bookings::get_booking)
            .service(handlers::bookings::cancel_booking),
    );

    cfg.service(
        web::scope("/api/orders")
            .wrap(AuthMiddleware::required_with_role(Role::Tourist))
            .service(handlers::orders::place_order)
            .service(handlers::orders::list_orders)
            .service(handlers::orders::cancel_order),
    );

    cfg.service(
        web::scope("/api/wallet")
            .wrap(AuthMiddleware::required_with_role(Role::Tourist))
            .service(handlers::wallet::get_wallet)
            .service(handlers::wallet::redeem_points),
    );

    cfg.service(
        web::scope("/api/wishlist")
            .wrap(AuthMiddleware::required_with_role(Role::Tourist))
            .service(handlers::wishlist::get_wishlist)
            .service(handlers::wishlist::add_to_wishlist)
            .service(handlers::wishlist::remove_from_wishlist),
    );

    cfg.service(
        web::scope("/api/revenue")
            .wrap(AuthMiddleware::required_with_roles(&[
                Role::Advertiser,
                Role::TourGuide,
                Role::Seller,
            ]))
            .service(handlers::revenue::my_revenue),
    );
}

fn configure_support_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/complaints")
            .wrap(AuthMiddleware::required())
            .service(handlers::support::file_complaint)
            .service(handlers::support::list_complaints)
            .service(handlers::support::get_complaint)
            .service(handlers::support::reply_complaint)
            .service(handlers::support::update_complaint_status),
    );

    cfg.service(
        web::scope("/api/notifications")
            .wrap(AuthMiddleware::required())
            .service(handlers::support::list_notifications)
            .service(handlers::support::mark_notification_read),
    );
}

/// 외부 여행 API 프록시. 검색은 익명 허용, 예약은 관광객만.
fn configure_travel_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/hotels")
            .wrap(AuthMiddleware::optional())
            .service(handlers::travel::search_hotels)
            .service(handlers::travel::book_hotel),
    );

    cfg.service(
        web::scope("/api/flights")
            .wrap(AuthMiddleware::optional())
            .service(handlers::travel::search_flights)
            .service(handlers::travel::book_flight),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "tourism_marketplace_backend",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z",
///   "features": { "database": "MongoDB", "dependency_injection": "Service Registry" }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "dependency_injection": "Service Registry"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_health_check_reports_healthy() {
        let app = test::init_service(App::new().service(health_check)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], env!("CARGO_PKG_NAME"));
    }

    #[actix_web::test]
    async fn test_unknown_route_is_not_found() {
        let app = test::init_service(App::new().service(health_check)).await;
        let req = test::TestRequest::get().uri("/nope").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
