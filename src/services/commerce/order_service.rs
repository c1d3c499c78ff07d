//! # 주문 서비스
//!
//! 관광객의 상품 주문과 취소를 처리합니다. 재고는 항목별로 원자적으로
//! 차감하고, 어느 항목이든 재고가 부족하면 이미 차감한 항목을 되돌린 뒤 409로 응답합니다.
//! 결제 후 주문 저장이 실패하면 지갑 결제분을 환불하고 재고를 복구합니다.

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};

use crate::core::errors::AppError;
use crate::domain::dto::commerce::{CreateOrderRequest, OrderReceipt, OrderResponse};
use crate::domain::entities::{Order, OrderItem, OrderStatus};
use crate::domain::models::pricing::round_currency;
use crate::repositories::base::parse_object_id;
use crate::repositories::catalog::ProductRepository;
use crate::repositories::commerce::OrderRepository;
use singleton_macro::service;
use crate::services::commerce::WalletService;
use crate::services::support::NotificationService;
use crate::utils::string_utils::clean_optional_string;

/// 주문 합계 (통화 단위 반올림)
fn order_total(items: &[OrderItem]) -> f64 {
    round_currency(items.iter().map(OrderItem::subtotal).sum())
}

#[service(name = "order")]
pub struct OrderService {
    order_repo: Arc<OrderRepository>,
    product_repo: Arc<ProductRepository>,
    wallet_service: Arc<WalletService>,
    notification_service: Arc<NotificationService>,
}

impl OrderService {
    pub async fn place(&self, tourist: &ObjectId, request: CreateOrderRequest) -> Result<OrderReceipt, AppError> {
        let mut lines = Vec::with_capacity(request.items.len());
        for line in &request.items {
            lines.push((parse_object_id(&line.product)?, line.quantity));
        }

        let items = self.take_stock(&lines).await?;
        let total = order_total(&items);

        if let Err(e) = self.wallet_service.charge(tourist, total, request.payment_method).await {
            self.restock(&items).await;
            return Err(e);
        }

        let compensation_items = items.clone();
        let now = DateTime::now();
        let order = Order {
            id: None,
            tourist: *tourist,
            items,
            total,
            payment_method: request.payment_method,
            status: OrderStatus::Placed,
            delivery_address: clean_optional_string(request.delivery_address),
            created_at: now,
            updated_at: now,
        };

        let order = match self.order_repo.create(order).await {
            Ok(order) => order,
            Err(e) => {
                log::error!("주문 저장 실패, 결제 보상 진행 ({}): {}", tourist, e);
                self.wallet_service.reverse_charge(tourist, total, request.payment_method).await;
                self.restock(&compensation_items).await;
                return Err(e);
            }
        };
        let points_earned = self.wallet_service.award_points(tourist, total).await;

        log::info!("🧾 주문 완료: {} {}개 항목, {} (포인트 +{})", tourist, order.items.len(), total, points_earned);
        Ok(OrderReceipt { order: order.into(), points_earned })
    }

    pub async fn list(&self, tourist: &ObjectId) -> Result<Vec<OrderResponse>, AppError> {
        let orders = self.order_repo.find_by_tourist(tourist).await?;
        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    /// 주문 취소 (지갑 환불, 재고 복구)
    pub async fn cancel(&self, tourist: &ObjectId, id: &str) -> Result<OrderResponse, AppError> {
        let id = parse_object_id(id)?;
        let order = self
            .order_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("주문을 찾을 수 없습니다".to_string()))?;

        if order.tourist != *tourist {
            return Err(AppError::AuthorizationError("본인의 주문만 취소할 수 있습니다".to_string()));
        }

        let cancelled = self
            .order_repo
            .cancel(&id)
            .await?
            .ok_or_else(|| AppError::ConflictError("이미 취소된 주문입니다".to_string()))?;

        self.wallet_service.refund(tourist, cancelled.total).await?;
        self.restock(&cancelled.items).await;

        log::info!("❎ 주문 취소: {} ({})", id, tourist);
        Ok(cancelled.into())
    }

    /// 항목별 재고 차감. 실패 시 앞서 차감한 항목을 복구합니다.
    async fn take_stock(&self, lines: &[(ObjectId, i64)]) -> Result<Vec<OrderItem>, AppError> {
        let mut taken: Vec<OrderItem> = Vec::with_capacity(lines.len());

        for (product_id, quantity) in lines {
            let outcome = self.take_one(product_id, *quantity).await;
            match outcome {
                Ok(item) => taken.push(item),
                Err(e) => {
                    self.restock(&taken).await;
                    return Err(e);
                }
            }
        }
        Ok(taken)
    }

    async fn take_one(&self, product_id: &ObjectId, quantity: i64) -> Result<OrderItem, AppError> {
        let product = match self.product_repo.take_stock(product_id, quantity).await? {
            Some(product) => product,
            None => {
                let existing = self.product_repo.find_by_id(product_id).await?;
                return Err(match existing {
                    None => AppError::NotFound("상품을 찾을 수 없습니다".to_string()),
                    Some(p) if p.archived => AppError::ConflictError(format!("'{}'은(는) 판매 중지된 상품입니다", p.name)),
                    Some(p) => AppError::ConflictError(format!("'{}'의 재고가 부족합니다 (남은 수량 {})", p.name, p.quantity)),
                });
            }
        };

        if product.quantity == 0 {
            self.notification_service
                .notify(product.seller, format!("상품 '{}'의 재고가 모두 소진되었습니다", product.name))
                .await;
        }

        Ok(OrderItem {
            product: *product_id,
            name: product.name,
            quantity,
            unit_price: product.price,
            seller: product.seller,
        })
    }

    async fn restock(&self, items: &[OrderItem]) {
        for item in items {
            if let Err(e) = self.product_repo.restock(&item.product, item.quantity).await {
                log::error!("재고 복구 실패 ({} x{}): {}", item.product, item.quantity, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(unit_price: f64, quantity: i64) -> OrderItem {
        OrderItem {
            product: ObjectId::new(),
            name: "Papyrus".to_string(),
            quantity,
            unit_price,
            seller: ObjectId::new(),
        }
    }

    #[test]
    fn test_order_total_sums_subtotals() {
        let items = vec![item(19.99, 3), item(5.5, 2)];
        assert_eq!(order_total(&items), 70.97);
    }

    #[test]
    fn test_empty_total_is_zero() {
        assert_eq!(order_total(&[]), 0.0);
    }
}
