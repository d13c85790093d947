use serde::Deserialize;
use std::env;

// Hlavní struktura konfigurace - kontejner pro všechna nastavení
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendConfig,
    pub auth: AuthConfig,
    pub circuit_breaker: CircuitBreakerConfig,
}

// Nastavení aplikace
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// REST backend s dokumenty událostí a rezervacemi
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
}

// Přístup obsluhy - ověřování samotné žije mimo tuhle službu,
// tady se jen kontrolují přihlašovací údaje z konfigurace
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub operator_email: String,
    pub operator_password: String,
}

// Nastavení Circuit Breakeru
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "seating_system=debug,tower_http=debug".to_string()),
            },
            backend: BackendConfig {
                base_url: env::var("EVENTS_BACKEND_URL").expect("EVENTS_BACKEND_URL must be set"),
            },
            auth: AuthConfig {
                operator_email: env::var("OPERATOR_EMAIL").expect("OPERATOR_EMAIL must be set"),
                operator_password: env::var("OPERATOR_PASSWORD")
                    .expect("OPERATOR_PASSWORD must be set"),
            },
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: env::var("CIRCUIT_BREAKER_FAILURE_THRESHOLD")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .expect("CIRCUIT_BREAKER_FAILURE_THRESHOLD must be a valid number"),
                timeout_seconds: env::var("CIRCUIT_BREAKER_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .expect("CIRCUIT_BREAKER_TIMEOUT_SECONDS must be a valid number"),
            },
        }
    }
}
