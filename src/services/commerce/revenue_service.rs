//! # 매출 서비스
//!
//! 제공자(광고주, 투어 가이드, 판매자)의 항목별 매출과 관리자용 플랫폼 수익을 계산합니다.
//! 확정 예약과 접수된 주문만 집계하며 플랫폼 수수료는 총 매출의 10%입니다.

use std::collections::BTreeMap;
use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::commerce::{PlatformRevenue, RevenueLine, RevenueReport};
use crate::domain::entities::users::Role;
use crate::domain::entities::{Booking, Order};
use crate::domain::models::pricing::{round_currency, RevenueBreakdown};
use crate::repositories::commerce::{BookingRepository, OrderRepository};
use singleton_macro::service;

/// 항목별 누적 (이름, 수량, 총액)
type Tally = BTreeMap<ObjectId, (String, i64, f64)>;

fn into_lines(tally: Tally) -> Vec<RevenueLine> {
    let mut lines: Vec<RevenueLine> = tally
        .into_iter()
        .map(|(item, (name, units, gross))| RevenueLine {
            item: item.to_hex(),
            name,
            units,
            breakdown: RevenueBreakdown::from_gross(gross),
        })
        .collect();
    lines.sort_by(|a, b| b.breakdown.gross.total_cmp(&a.breakdown.gross));
    lines
}

/// 확정 예약의 항목별 매출
fn booking_lines(bookings: &[Booking]) -> Vec<RevenueLine> {
    let mut tally = Tally::new();
    for booking in bookings {
        let Some(item) = booking.item else { continue };
        let entry = tally.entry(item).or_insert_with(|| (booking.item_name.clone(), 0, 0.0));
        entry.1 += 1;
        entry.2 += booking.amount;
    }
    into_lines(tally)
}

/// 주문 중 특정 판매자 상품의 항목별 매출
fn order_lines(orders: &[Order], seller: &ObjectId) -> Vec<RevenueLine> {
    let mut tally = Tally::new();
    for item in orders.iter().flat_map(|o| o.items.iter()).filter(|i| i.seller == *seller) {
        let entry = tally.entry(item.product).or_insert_with(|| (item.name.clone(), 0, 0.0));
        entry.1 += item.quantity;
        entry.2 += item.subtotal();
    }
    into_lines(tally)
}

fn report(items: Vec<RevenueLine>) -> RevenueReport {
    let gross = items.iter().map(|l| l.breakdown.gross).sum();
    RevenueReport { totals: RevenueBreakdown::from_gross(gross), items }
}

fn platform_revenue(bookings: &[Booking], orders: &[Order]) -> PlatformRevenue {
    // 외부 여행 API 예약은 제공자가 없어 수수료 대상이 아님
    let booking_gross = bookings.iter().filter(|b| b.provider.is_some()).map(|b| b.amount).sum();
    let order_gross = orders.iter().map(|o| o.total).sum();

    let bookings = RevenueBreakdown::from_gross(booking_gross);
    let orders = RevenueBreakdown::from_gross(order_gross);
    PlatformRevenue {
        total_platform_fee: round_currency(bookings.platform_fee + orders.platform_fee),
        bookings,
        orders,
    }
}

#[service(name = "revenue")]
pub struct RevenueService {
    booking_repo: Arc<BookingRepository>,
    order_repo: Arc<OrderRepository>,
}

impl RevenueService {
    /// 로그인한 제공자의 매출 보고서
    pub async fn provider_report(&self, user: &AuthenticatedUser) -> Result<RevenueReport, AppError> {
        user.require_any(&[Role::Advertiser, Role::TourGuide, Role::Seller])?;
        let provider = user.object_id()?;

        let lines = if user.has_role(Role::Seller) {
            let orders = self.order_repo.find_placed_by_seller(&provider).await?;
            order_lines(&orders, &provider)
        } else {
            let bookings = self.booking_repo.find_confirmed_by_provider(&provider).await?;
            booking_lines(&bookings)
        };

        Ok(report(lines))
    }

    pub async fn platform(&self) -> Result<PlatformRevenue, AppError> {
        let bookings = self.booking_repo.find_confirmed().await?;
        let orders = self.order_repo.find_placed().await?;
        Ok(platform_revenue(&bookings, &orders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{BookingKind, BookingStatus, OrderItem, OrderStatus, PaymentMethod};
    use mongodb::bson::DateTime;

    fn booking(item: ObjectId, amount: f64, provider: Option<ObjectId>) -> Booking {
        Booking {
            id: Some(ObjectId::new()),
            tourist: ObjectId::new(),
            kind: BookingKind::Activity,
            item: Some(item),
            item_name: "Desert safari".to_string(),
            provider,
            amount,
            payment_method: PaymentMethod::Card,
            status: BookingStatus::Confirmed,
            scheduled_at: DateTime::now(),
            external_reference: None,
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    fn order(items: Vec<OrderItem>) -> Order {
        let total = items.iter().map(OrderItem::subtotal).sum();
        Order {
            id: Some(ObjectId::new()),
            tourist: ObjectId::new(),
            items,
            total,
            payment_method: PaymentMethod::Wallet,
            status: OrderStatus::Placed,
            delivery_address: None,
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    #[test]
    fn test_booking_lines_group_by_item() {
        let provider = Some(ObjectId::new());
        let safari = ObjectId::new();
        let bookings = vec![booking(safari, 100.0, provider), booking(safari, 100.0, provider), booking(ObjectId::new(), 50.0, provider)];

        let report = report(booking_lines(&bookings));

        assert_eq!(report.items.len(), 2);
        assert_eq!(report.items[0].units, 2);
        assert_eq!(report.items[0].breakdown.platform_fee, 20.0);
        assert_eq!(report.totals.gross, 250.0);
        assert_eq!(report.totals.platform_fee, 25.0);
        assert_eq!(report.totals.net, 225.0);
    }

    #[test]
    fn test_order_lines_only_count_own_products() {
        let seller = ObjectId::new();
        let mine = OrderItem { product: ObjectId::new(), name: "Scarab".to_string(), quantity: 2, unit_price: 30.0, seller };
        let theirs = OrderItem { product: ObjectId::new(), name: "Lamp".to_string(), quantity: 1, unit_price: 80.0, seller: ObjectId::new() };

        let lines = order_lines(&[order(vec![mine, theirs])], &seller);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].units, 2);
        assert_eq!(lines[0].breakdown.gross, 60.0);
        assert_eq!(lines[0].breakdown.net, 54.0);
    }

    #[test]
    fn test_platform_revenue_skips_external_bookings() {
        let bookings = vec![booking(ObjectId::new(), 200.0, Some(ObjectId::new())), booking(ObjectId::new(), 900.0, None)];
        let item = OrderItem { product: ObjectId::new(), name: "Scarf".to_string(), quantity: 1, unit_price: 100.0, seller: ObjectId::new() };

        let revenue = platform_revenue(&bookings, &[order(vec![item])]);

        assert_eq!(revenue.bookings.gross, 200.0);
        assert_eq!(revenue.orders.platform_fee, 10.0);
        assert_eq!(revenue.total_platform_fee, 30.0);
    }
}
