//! 페이지네이션 어댑터
//!
//! 저장소가 돌려준 원시 페이지를 wire 객체 목록과 페이지 메타데이터로 이루어진
//! 봉투(envelope)로 변환합니다.

use serde::Serialize;

use crate::core::errors::AppResult;
use crate::projection::wire::WireObject;

/// 저장소가 반환하는 원시 페이지
#[derive(Debug, Clone)]
pub struct RawPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub per_page: u64,
    pub current_page: u64,
    /// 저장소가 이미 계산했다면 그대로 사용합니다.
    pub last_page: Option<u64>,
}

impl<T> RawPage<T> {
    pub fn new(items: Vec<T>, total: u64, per_page: u64, current_page: u64) -> Self {
        Self {
            items,
            total,
            per_page,
            current_page,
            last_page: None,
        }
    }
}

/// 페이지 봉투
///
/// ```json
/// {
///   "data": [ ... ],
///   "total": 3,
///   "per_page": 2,
///   "current_page": 1,
///   "last_page": 2,
///   "from": 1,
///   "to": 2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageEnvelope {
    pub data: Vec<WireObject>,
    pub total: u64,
    pub per_page: u64,
    pub current_page: u64,
    pub last_page: u64,
    pub from: Option<u64>,
    pub to: Option<u64>,
}

/// 원시 페이지를 봉투로 변환합니다.
///
/// 항목 순서를 유지하고 `total`/`per_page`/`current_page`는 그대로 전달합니다.
/// `current_page`는 범위를 벗어나도 조정하지 않습니다.
pub fn paginate<T, F>(raw: RawPage<T>, mut projector: F) -> AppResult<PageEnvelope>
where
    F: FnMut(&T) -> AppResult<WireObject>,
{
    let data = raw.items.iter().map(&mut projector).collect::<AppResult<Vec<_>>>()?;
    let pages = raw.last_page.unwrap_or_else(|| last_page(raw.total, raw.per_page));

    let (from, to) = if data.is_empty() {
        (None, None)
    } else {
        let from = raw.current_page.saturating_sub(1).saturating_mul(raw.per_page).saturating_add(1);
        (Some(from), Some(from.saturating_add(data.len() as u64 - 1)))
    };

    Ok(PageEnvelope {
        data,
        total: raw.total,
        per_page: raw.per_page,
        current_page: raw.current_page,
        last_page: pages,
        from,
        to,
    })
}

/// `max(ceil(total / per_page), 1)`. `per_page`가 0이면 한 페이지로 봅니다.
pub fn last_page(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 1;
    }
    total.div_ceil(per_page).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::wire::WireValue;
    use serde_json::json;

    fn projector(id: &i64) -> AppResult<WireObject> {
        let mut object = WireObject::new();
        object.insert("id", WireValue::Scalar(json!(id)));
        Ok(object)
    }

    #[test]
    fn test_first_page_of_three_items() {
        let raw = RawPage::new(vec![1, 2], 3, 2, 1);

        let page = paginate(raw, projector).unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].get("id").unwrap().as_scalar(), Some(&json!(1)));
        assert_eq!(page.data[1].get("id").unwrap().as_scalar(), Some(&json!(2)));
        assert_eq!(page.total, 3);
        assert_eq!(page.per_page, 2);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.last_page, 2);
        assert_eq!((page.from, page.to), (Some(1), Some(2)));
    }

    #[test]
    fn test_empty_page_is_not_an_error() {
        let raw: RawPage<i64> = RawPage::new(vec![], 0, 15, 1);

        let page = paginate(raw, projector).unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.last_page, 1);
        assert_eq!((page.from, page.to), (None, None));
    }

    #[test]
    fn test_huge_current_page_saturates_bounds() {
        let raw = RawPage::new(vec![1, 2], 2, 100, u64::MAX);

        let page = paginate(raw, projector).unwrap();

        assert_eq!(page.current_page, u64::MAX);
        assert_eq!((page.from, page.to), (Some(u64::MAX), Some(u64::MAX)));
    }

    #[test]
    fn test_out_of_range_page_is_not_clamped() {
        let raw: RawPage<i64> = RawPage::new(vec![], 3, 2, 9);

        let page = paginate(raw, projector).unwrap();

        assert_eq!(page.current_page, 9);
        assert_eq!(page.last_page, 2);
    }

    #[test]
    fn test_supplied_last_page_is_kept() {
        let mut raw = RawPage::new(vec![1], 1, 2, 1);
        raw.last_page = Some(5);

        assert_eq!(paginate(raw, projector).unwrap().last_page, 5);
    }

    #[test]
    fn test_envelope_serializes_with_pagination_keys() {
        let page = paginate(RawPage::new(vec![4], 1, 10, 1), projector).unwrap();

        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({
                "data": [{"id": 4}],
                "total": 1,
                "per_page": 10,
                "current_page": 1,
                "last_page": 1,
                "from": 1,
                "to": 1
            })
        );
    }

    #[test]
    fn test_last_page_with_zero_per_page() {
        assert_eq!(last_page(10, 0), 1);
        assert_eq!(last_page(10, 3), 4);
    }
}
