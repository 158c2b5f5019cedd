//! 페이지 요청과 메모리 슬라이싱

use crate::projection::RawPage;

/// 1부터 시작하는 페이지 요청
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// 건너뛸 항목 수. 표현 범위를 넘으면 `usize::MAX`로 포화됩니다.
    fn offset(&self) -> usize {
        let offset = self.page.saturating_sub(1).saturating_mul(self.per_page);
        usize::try_from(offset).unwrap_or(usize::MAX)
    }

    /// 정렬된 전체 목록에서 요청한 페이지를 잘라 원시 페이지로 만듭니다.
    ///
    /// 범위를 벗어난 페이지는 빈 항목과 원래 `current_page`를 그대로 가집니다.
    pub fn slice<T>(&self, items: Vec<T>) -> RawPage<T> {
        let total = items.len() as u64;
        let page: Vec<T> = items
            .into_iter()
            .skip(self.offset())
            .take(usize::try_from(self.per_page).unwrap_or(usize::MAX))
            .collect();
        RawPage::new(page, total, self.per_page, self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_second_page() {
        let raw = PageRequest::new(2, 2).slice(vec![1, 2, 3]);

        assert_eq!(raw.items, vec![3]);
        assert_eq!(raw.total, 3);
        assert_eq!(raw.current_page, 2);
    }

    #[test]
    fn test_slice_out_of_range_keeps_requested_page() {
        let raw = PageRequest::new(9, 2).slice(vec![1, 2, 3]);

        assert!(raw.items.is_empty());
        assert_eq!(raw.current_page, 9);
    }

    #[test]
    fn test_huge_page_saturates_to_empty() {
        let raw = PageRequest::new(922_337_203_685_477_580, 100).slice(vec![1, 2, 3]);

        assert!(raw.items.is_empty());
        assert_eq!(raw.total, 3);
        assert_eq!(raw.current_page, 922_337_203_685_477_580);
    }
}
