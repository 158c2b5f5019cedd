//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 필드 이름 변환, 슬러그 생성, 문자열 정리
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::slugify;
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! let slug = slugify("Olá Mundo");
//! print_boxed_title("System Initialized");
//! ```

pub mod string_utils;
pub mod display_terminal;
