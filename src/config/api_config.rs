//! API 동작 설정 (페이지네이션, Rate Limiting)

use std::env;

use log::{error, info};

use crate::repositories::PageRequest;

/// 페이지네이션 설정
///
/// 핸들러에 `web::Data<PaginationConfig>`로 주입됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// `per_page`가 없을 때 사용하는 값 (기본값: 15)
    pub default_per_page: u64,
    /// `per_page` 상한 (기본값: 100)
    pub max_per_page: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: 15,
            max_per_page: 100,
        }
    }
}

impl PaginationConfig {
    /// `DEFAULT_PER_PAGE`, `MAX_PER_PAGE` 환경 변수에서 읽습니다.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: u64| {
            env::var(key)
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(fallback)
        };

        let max_per_page = read("MAX_PER_PAGE", defaults.max_per_page);
        Self {
            default_per_page: read("DEFAULT_PER_PAGE", defaults.default_per_page).min(max_per_page),
            max_per_page,
        }
    }

    /// 쿼리 파라미터를 페이지 요청으로 바꿉니다.
    ///
    /// `page`는 최소 1, `per_page`는 1 이상 `max_per_page` 이하로 맞춥니다.
    pub fn resolve(&self, page: Option<u64>, per_page: Option<u64>) -> PageRequest {
        let per_page = per_page.unwrap_or(self.default_per_page).clamp(1, self.max_per_page);
        PageRequest::new(page.unwrap_or(1).max(1), per_page)
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// 환경변수에서 Rate Limiting 설정을 로드합니다
    ///
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    ///
    /// ```bash
    /// # .env.dev (개발 환경)
    /// RATE_LIMIT_PER_SECOND=20
    /// RATE_LIMIT_BURST_SIZE=40
    /// ```
    pub fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
                200
            });

        let config = Self { per_second, burst_size };
        info!("Rate Limiting 설정 로드됨: {:?}", config);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults_and_clamps() {
        let config = PaginationConfig::default();

        assert_eq!(config.resolve(None, None), PageRequest::new(1, 15));
        assert_eq!(config.resolve(Some(0), Some(0)), PageRequest::new(1, 1));
        assert_eq!(config.resolve(Some(3), Some(500)), PageRequest::new(3, 100));
    }
}
