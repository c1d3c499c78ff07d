//! 목록 필터와 정렬
//!
//! 목록 조회는 후보 문서를 가져온 뒤 여기의 조건식으로 걸러냅니다.
//! 쿼리 문자열의 ID는 필터 생성 시점에 ObjectId로 검증됩니다(잘못된 형식은 400).

use std::cmp::Ordering;

use chrono::{Days, NaiveDate};
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;
use crate::domain::entities::{average_rating, Activity, Itinerary, Product};
use crate::utils::string_utils::contains_ignore_case;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Price,
    Rating,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// 선택적 ObjectId 쿼리 파라미터를 파싱합니다.
pub fn parse_optional_id(value: Option<&str>, field: &str) -> Result<Option<ObjectId>, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            ObjectId::parse_str(v.trim())
                .map_err(|_| AppError::ValidationError(format!("{} 값이 유효한 ID가 아닙니다", field)))
        })
        .transpose()
}

/// 날짜(포함) 범위를 BSON 시각 구간 `[from, to)`로 변환합니다.
fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> (Option<DateTime>, Option<DateTime>) {
    let to_millis = |d: NaiveDate| d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp_millis());

    let from = start.and_then(to_millis).map(DateTime::from_millis);
    let to = end
        .and_then(|d| d.checked_add_days(Days::new(1)))
        .and_then(to_millis)
        .map(DateTime::from_millis);
    (from, to)
}

fn within(value: DateTime, from: Option<DateTime>, to: Option<DateTime>) -> bool {
    from.is_none_or(|f| value >= f) && to.is_none_or(|t| value < t)
}

fn price_within(price: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.is_none_or(|m| price >= m) && max.is_none_or(|m| price <= m)
}

/// 액티비티 목록 쿼리 파라미터
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityQuery {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub min_rating: Option<f64>,
    pub search: Option<String>,
    pub sort_by: Option<SortField>,
    pub order: Option<SortOrder>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub from: Option<DateTime>,
    pub to: Option<DateTime>,
    pub category: Option<ObjectId>,
    pub tag: Option<ObjectId>,
    pub min_rating: Option<f64>,
    pub search: Option<String>,
}

impl TryFrom<&ActivityQuery> for ActivityFilter {
    type Error = AppError;

    fn try_from(query: &ActivityQuery) -> Result<Self, Self::Error> {
        let (from, to) = date_range(query.start_date, query.end_date);
        Ok(Self {
            min_price: query.min_price,
            max_price: query.max_price,
            from,
            to,
            category: parse_optional_id(query.category.as_deref(), "category")?,
            tag: parse_optional_id(query.tag.as_deref(), "tag")?,
            min_rating: query.min_rating,
            search: query.search.clone().filter(|s| !s.trim().is_empty()),
        })
    }
}

impl ActivityFilter {
    /// 예정된(미래) 액티비티 중 표시 제외되지 않은 것만 대상
    pub fn matches(&self, activity: &Activity, now: DateTime) -> bool {
        activity.date > now
            && !activity.flagged
            && price_within(activity.price, self.min_price, self.max_price)
            && within(activity.date, self.from, self.to)
            && self.category.is_none_or(|c| activity.category == c)
            && self.tag.is_none_or(|t| activity.tags.contains(&t))
            && self.min_rating.is_none_or(|r| average_rating(&activity.ratings) >= r)
            && self.search.as_deref().is_none_or(|s| {
                contains_ignore_case(&activity.name, s)
                    || activity.description.as_deref().is_some_and(|d| contains_ignore_case(d, s))
                    || contains_ignore_case(&activity.location.address, s)
            })
    }
}

pub fn sort_activities(items: &mut [Activity], field: Option<SortField>, order: SortOrder) {
    let Some(field) = field else { return };
    items.sort_by(|a, b| {
        let ordering = match field {
            SortField::Price => compare_f64(a.price, b.price),
            SortField::Rating => compare_f64(average_rating(&a.ratings), average_rating(&b.ratings)),
            SortField::Date => a.date.cmp(&b.date),
        };
        order.apply(ordering)
    });
}

/// 일정 목록 쿼리 파라미터
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItineraryQuery {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub tag: Option<String>,
    pub language: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<SortField>,
    pub order: Option<SortOrder>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct ItineraryFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub from: Option<DateTime>,
    pub to: Option<DateTime>,
    pub tag: Option<ObjectId>,
    pub language: Option<String>,
    pub search: Option<String>,
}

impl TryFrom<&ItineraryQuery> for ItineraryFilter {
    type Error = AppError;

    fn try_from(query: &ItineraryQuery) -> Result<Self, Self::Error> {
        let (from, to) = date_range(query.start_date, query.end_date);
        Ok(Self {
            min_price: query.min_price,
            max_price: query.max_price,
            from,
            to,
            tag: parse_optional_id(query.tag.as_deref(), "tag")?,
            language: query.language.clone().filter(|s| !s.trim().is_empty()),
            search: query.search.clone().filter(|s| !s.trim().is_empty()),
        })
    }
}

impl ItineraryFilter {
    /// 활성 상태이며 앞으로 진행일이 남은 일정만 대상
    pub fn matches(&self, itinerary: &Itinerary, now: DateTime) -> bool {
        let upcoming: Vec<DateTime> = itinerary
            .available_dates
            .iter()
            .copied()
            .filter(|d| *d > now)
            .collect();

        itinerary.active
            && !itinerary.flagged
            && !upcoming.is_empty()
            && price_within(itinerary.price, self.min_price, self.max_price)
            && (self.from.is_none() && self.to.is_none()
                || upcoming.iter().any(|d| within(*d, self.from, self.to)))
            && self.tag.is_none_or(|t| itinerary.tags.contains(&t))
            && self
                .language
                .as_deref()
                .is_none_or(|l| itinerary.language.eq_ignore_ascii_case(l.trim()))
            && self.search.as_deref().is_none_or(|s| {
                contains_ignore_case(&itinerary.name, s)
                    || itinerary.locations.iter().any(|loc| contains_ignore_case(loc, s))
            })
    }
}

pub fn sort_itineraries(items: &mut [Itinerary], field: Option<SortField>, order: SortOrder, now: DateTime) {
    let Some(field) = field else { return };
    items.sort_by(|a, b| {
        let ordering = match field {
            SortField::Price => compare_f64(a.price, b.price),
            SortField::Rating => compare_f64(average_rating(&a.ratings), average_rating(&b.ratings)),
            SortField::Date => a.next_date_after(now).cmp(&b.next_date_after(now)),
        };
        order.apply(ordering)
    });
}

/// 상품 목록 쿼리 파라미터
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
    pub sort_by: Option<SortField>,
    pub order: Option<SortOrder>,
    /// 판매자/관리자만 보관된 상품 포함 가능
    #[serde(default)]
    pub include_archived: bool,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
    pub include_archived: bool,
}

impl From<&ProductQuery> for ProductFilter {
    fn from(query: &ProductQuery) -> Self {
        Self {
            min_price: query.min_price,
            max_price: query.max_price,
            search: query.search.clone().filter(|s| !s.trim().is_empty()),
            include_archived: query.include_archived,
        }
    }
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        (self.include_archived || !product.archived)
            && price_within(product.price, self.min_price, self.max_price)
            && self.search.as_deref().is_none_or(|s| contains_ignore_case(&product.name, s))
    }
}

pub fn sort_products(items: &mut [Product], field: Option<SortField>, order: SortOrder) {
    let Some(field) = field else { return };
    items.sort_by(|a, b| {
        let ordering = match field {
            SortField::Price => compare_f64(a.price, b.price),
            SortField::Rating => compare_f64(average_rating(&a.ratings), average_rating(&b.ratings)),
            SortField::Date => a.created_at.cmp(&b.created_at),
        };
        order.apply(ordering)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{GeoLocation, Rating};

    const DAY: i64 = 86_400_000;

    fn now() -> DateTime {
        DateTime::from_millis(1_780_000_000_000)
    }

    fn activity(name: &str, price: f64, days_ahead: i64, ratings: &[i32]) -> Activity {
        let at = DateTime::from_millis(now().timestamp_millis() + days_ahead * DAY);
        Activity {
            id: Some(ObjectId::new()),
            name: name.to_string(),
            description: None,
            date: at,
            location: GeoLocation { address: "Giza".to_string(), lat: None, lng: None },
            price,
            special_discount: 0.0,
            category: ObjectId::new(),
            tags: vec![],
            booking_open: true,
            flagged: false,
            advertiser: ObjectId::new(),
            ratings: ratings
                .iter()
                .map(|r| Rating { tourist: ObjectId::new(), rating: *r, comment: None, created_at: at })
                .collect(),
            created_at: at,
            updated_at: at,
        }
    }

    fn product(name: &str, price: f64, archived: bool) -> Product {
        Product {
            id: Some(ObjectId::new()),
            name: name.to_string(),
            picture: None,
            description: String::new(),
            price,
            quantity: 3,
            sales: 0,
            seller: ObjectId::new(),
            archived,
            ratings: vec![],
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn test_activity_filter_excludes_past_and_flagged() {
        let filter = ActivityFilter::default();
        let mut flagged = activity("Felucca ride", 50.0, 3, &[]);
        flagged.flagged = true;

        assert!(filter.matches(&activity("Desert safari", 80.0, 2, &[]), now()));
        assert!(!filter.matches(&activity("Old tour", 80.0, -1, &[]), now()));
        assert!(!filter.matches(&flagged, now()));
    }

    #[test]
    fn test_activity_filter_budget_rating_and_search() {
        let filter = ActivityFilter {
            min_price: Some(20.0),
            max_price: Some(100.0),
            min_rating: Some(4.0),
            search: Some("safari".to_string()),
            ..Default::default()
        };

        assert!(filter.matches(&activity("Desert Safari", 80.0, 2, &[5, 4]), now()));
        assert!(!filter.matches(&activity("Desert Safari", 180.0, 2, &[5]), now()));
        assert!(!filter.matches(&activity("Desert Safari", 80.0, 2, &[3]), now()));
        assert!(!filter.matches(&activity("Nile cruise", 80.0, 2, &[5]), now()));
    }

    #[test]
    fn test_activity_category_filter() {
        let target = activity("Diving", 60.0, 4, &[]);
        let filter = ActivityFilter { category: Some(target.category), ..Default::default() };

        assert!(filter.matches(&target, now()));
        assert!(!filter.matches(&activity("Snorkeling", 60.0, 4, &[]), now()));
    }

    #[test]
    fn test_malformed_category_id_is_rejected() {
        let query = ActivityQuery { category: Some("not-an-id".to_string()), ..Default::default() };
        assert!(matches!(ActivityFilter::try_from(&query), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_sort_activities_by_price_desc() {
        let mut items = vec![
            activity("a", 10.0, 1, &[]),
            activity("b", 30.0, 1, &[]),
            activity("c", 20.0, 1, &[]),
        ];
        sort_activities(&mut items, Some(SortField::Price), SortOrder::Desc);

        let names: Vec<_> = items.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_product_filter_hides_archived() {
        let filter = ProductFilter { search: Some("papyrus".to_string()), ..Default::default() };

        assert!(filter.matches(&product("Papyrus scroll", 15.0, false)));
        assert!(!filter.matches(&product("Papyrus scroll", 15.0, true)));

        let with_archived = ProductFilter { include_archived: true, ..filter };
        assert!(with_archived.matches(&product("Papyrus scroll", 15.0, true)));
    }

    #[test]
    fn test_date_range_is_inclusive_of_end_day() {
        let day = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let (from, to) = date_range(Some(day), Some(day));

        let (from, to) = (from.unwrap(), to.unwrap());
        assert_eq!(to.timestamp_millis() - from.timestamp_millis(), DAY);
    }
}
