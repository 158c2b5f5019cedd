//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 중앙집중식으로 관리합니다. 환경 변수는
//! 시작 시 `PROFILE`에 맞는 `.env` 파일에서 `dotenv`로 로드됩니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 비밀번호 해싱, 데모 데이터 설정
//! - [`api_config`] - 페이지네이션, Rate Limiting 설정
//!
//! ## 환경 변수
//!
//! ```bash
//! # 환경 설정
//! export ENVIRONMENT="development"  # development, test, staging, production
//!
//! # 서버 설정
//! export HOST="127.0.0.1"
//! export PORT="8080"
//! export WORKERS="4"
//!
//! # 보안 설정
//! export BCRYPT_COST="12"          # 4-15 범위
//!
//! # 페이지네이션
//! export DEFAULT_PER_PAGE="15"
//! export MAX_PER_PAGE="100"
//!
//! # Rate Limiting
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//!
//! # 데모 데이터
//! export SEED_DEMO_DATA="true"
//! export DEMO_PASSWORD="password123"
//! ```

pub mod api_config;
pub mod data_config;

pub use api_config::*;
pub use data_config::*;
