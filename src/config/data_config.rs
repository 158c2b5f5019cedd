//! 실행 환경, 서버 바인딩, 비밀번호 해싱 설정

use std::convert::Infallible;
use std::env;
use std::str::FromStr;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT`, 없으면 `NODE_ENV`를 읽습니다. 둘 다 없으면 `Production`.
    pub fn current() -> Self {
        env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .map(|name| name.parse().unwrap_or(Environment::Production))
            .unwrap_or(Environment::Production)
    }
}

/// 대소문자를 구분하지 않으며, 알 수 없는 이름은 `Production`이 됩니다.
impl FromStr for Environment {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        })
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// `BCRYPT_COST` (4-15), 없거나 범위 밖이면 환경별 기본값.
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|cost| cost.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(&Environment::current()))
    }

    /// 개발/테스트 4, 스테이징 10, 프로덕션 12
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// `PORT`, 기본값 8080
    pub fn port() -> u16 {
        env::var("PORT").ok().and_then(|port| port.parse().ok()).unwrap_or(8080)
    }

    /// `HOST`, 기본값 127.0.0.1
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    /// `host:port`
    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }

    /// HTTP 워커 수. 기본값: 4
    pub fn workers() -> usize {
        env::var("WORKERS")
            .ok()
            .and_then(|w| w.parse().ok())
            .filter(|w| *w > 0)
            .unwrap_or(4)
    }
}

/// 데모 데이터 적재 설정
pub struct SeedConfig;

impl SeedConfig {
    /// `SEED_DEMO_DATA`가 참이면 시작 시 데모 데이터를 적재합니다.
    ///
    /// 설정되지 않았으면 Development 환경에서만 적재합니다.
    pub fn enabled() -> bool {
        match env::var("SEED_DEMO_DATA") {
            Ok(value) => matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"),
            Err(_) => Environment::current() == Environment::Development,
        }
    }

    /// 데모 사용자 비밀번호
    pub fn demo_password() -> String {
        env::var("DEMO_PASSWORD").unwrap_or_else(|_| "password123".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parses_aliases_case_insensitively() {
        assert_eq!("Development".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("dev".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("TESTING".parse::<Environment>(), Ok(Environment::Test));
        assert_eq!("stage".parse::<Environment>(), Ok(Environment::Staging));
        assert_eq!("unknown".parse::<Environment>(), Ok(Environment::Production));
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Development),
            4
        );
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Staging),
            10
        );
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Production),
            12
        );
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "127.0.0.1");
        }

        if env::var("WORKERS").is_err() {
            assert_eq!(ServerConfig::workers(), 4);
        }
    }
}
