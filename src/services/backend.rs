//! backend.rs
//!
//! Servisní vrstva pro komunikaci s REST backendem událostí.
//!
//! Klíčové součásti:
//! 1.  **CircuitBreaker**: ochrana proti opakovanému dobývání nedostupného
//!     backendu. Po sérii selhání se volání na čas zablokují a pak se
//!     jedním zkušebním požadavkem ověří, jestli se server vzpamatoval.
//! 2.  **EventBackendClient**: jediné místo, odkud tahle služba mluví po
//!     síti. Umí stáhnout dokument události (hydratace), odeslat celý
//!     snímek zasedacího pořádku jedním PUT (uložení) a načíst rezervace
//!     pro import hostů. Žádné dílčí endpointy pro stoly ani hosty
//!     neexistují - uložení vždy nahrazuje celý stav.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::{BackendConfig, CircuitBreakerConfig};
use crate::models::{EventDocument, Reservation};

/// Stavy Circuit Breakeru.
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitState {
    /// Normální provoz, požadavky procházejí.
    Closed,
    /// Backend opakovaně selhal, požadavky se dočasně blokují.
    Open,
    /// Po vypršení timeoutu se pouští jeden zkušební požadavek.
    HalfOpen,
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[derive(Debug)]
pub struct CircuitBreaker {
    state: RwLock<CircuitState>,
    failure_count: AtomicU32,
    last_failure_time: AtomicU64,
    failure_threshold: u32,
    timeout_duration: Duration,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, timeout_seconds: u64) -> Self {
        Self {
            state: RwLock::new(CircuitState::Closed),
            failure_count: AtomicU32::new(0),
            last_failure_time: AtomicU64::new(0),
            failure_threshold,
            timeout_duration: Duration::from_secs(timeout_seconds),
        }
    }

    /// Smí se teď poslat požadavek?
    pub fn can_execute(&self) -> bool {
        let state = self.state.read().unwrap();

        match *state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let last_failure = self.last_failure_time.load(Ordering::Relaxed);
                if unix_seconds().saturating_sub(last_failure) >= self.timeout_duration.as_secs() {
                    drop(state);
                    *self.state.write().unwrap() = CircuitState::HalfOpen;
                    info!("Circuit breaker transitioning to HalfOpen state");
                    true
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => true,
        }
    }

    pub fn record_success(&self) {
        let mut state = self.state.write().unwrap();

        match *state {
            CircuitState::HalfOpen => {
                *state = CircuitState::Closed;
                self.failure_count.store(0, Ordering::Relaxed);
                info!("Circuit breaker recovered - transitioning to Closed state");
            }
            CircuitState::Closed => {
                self.failure_count.store(0, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    pub fn record_failure(&self) {
        let failure_count = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.last_failure_time.store(unix_seconds(), Ordering::Relaxed);

        let mut state = self.state.write().unwrap();

        match *state {
            CircuitState::Closed => {
                if failure_count >= self.failure_threshold {
                    *state = CircuitState::Open;
                    error!(
                        "Circuit breaker OPENED - {} failures reached threshold {}",
                        failure_count, self.failure_threshold
                    );
                }
            }
            CircuitState::HalfOpen => {
                *state = CircuitState::Open;
                warn!("Circuit breaker test failed - returning to Open state");
            }
            _ => {}
        }
    }

    pub fn get_state(&self) -> CircuitState {
        self.state.read().unwrap().clone()
    }
}

/// Chyby při komunikaci s backendem událostí. Všechny jsou lokálně
/// zotavitelné: stav v paměti zůstává nedotčený a operaci lze zopakovat.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("circuit breaker is open - events backend temporarily unavailable")]
    Unavailable,
    #[error("event {0} not found on backend")]
    EventNotFound(i64),
    #[error("events backend error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Klient REST backendu událostí.
#[derive(Clone)]
pub struct EventBackendClient {
    base_url: String,
    http_client: reqwest::Client,
    circuit_breaker: Arc<CircuitBreaker>,
}

impl EventBackendClient {
    pub fn from_config(backend: &BackendConfig, breaker: &CircuitBreakerConfig) -> Self {
        Self {
            base_url: backend.base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            circuit_breaker: Arc::new(CircuitBreaker::new(
                breaker.failure_threshold,
                breaker.timeout_seconds,
            )),
        }
    }

    /// Provede síťovou operaci pod dohledem Circuit Breakeru.
    async fn execute_with_circuit_breaker<F, T>(&self, operation: F) -> Result<T, BackendError>
    where
        F: std::future::Future<Output = Result<T, reqwest::Error>>,
    {
        if !self.circuit_breaker.can_execute() {
            warn!("Circuit breaker is OPEN - blocking events backend request");
            return Err(BackendError::Unavailable);
        }

        match operation.await {
            Ok(result) => {
                self.circuit_breaker.record_success();
                Ok(result)
            }
            Err(e) => {
                error!("Events backend request failed: {:?}", e);
                self.circuit_breaker.record_failure();
                Err(BackendError::Http(e))
            }
        }
    }

    /// Stáhne dokument události pro hydrataci pracovní kopie.
    pub async fn fetch_event(&self, event_id: i64) -> Result<EventDocument, BackendError> {
        let url = format!("{}/events/{}", self.base_url, event_id);

        let operation = async {
            self.http_client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<EventDocument>()
                .await
        };

        match self.execute_with_circuit_breaker(operation).await {
            Err(BackendError::Http(e)) if e.status() == Some(StatusCode::NOT_FOUND) => {
                Err(BackendError::EventNotFound(event_id))
            }
            other => other,
        }
    }

    /// Jediná zapisovací operace: odešle celý snímek zasedacího pořádku.
    /// Úspěšné uložení nahrazuje předchozí stav na serveru vcelku.
    pub async fn save_event(&self, document: &EventDocument) -> Result<(), BackendError> {
        let url = format!("{}/events/{}", self.base_url, document.id);

        info!(
            "Saving floor plan for event {}: {} tables, {} unassigned guests",
            document.id,
            document.tables.len(),
            document.guests.len()
        );

        let operation = async {
            self.http_client
                .put(&url)
                .json(document)
                .send()
                .await?
                .error_for_status()?;
            Ok(())
        };

        self.execute_with_circuit_breaker(operation).await
    }

    /// Načte rezervace pro import hostů. Filtr na den události dělá až
    /// importér - backend vrací rezervace tak, jak je vede.
    pub async fn fetch_reservations(&self) -> Result<Vec<Reservation>, BackendError> {
        let url = format!("{}/reservations", self.base_url);

        let operation = async {
            self.http_client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<Vec<Reservation>>()
                .await
        };

        self.execute_with_circuit_breaker(operation).await
    }

    /// Stav Circuit Breakeru pro monitoring.
    pub fn circuit_breaker_status(&self) -> (CircuitState, u32) {
        (
            self.circuit_breaker.get_state(),
            self.circuit_breaker.failure_count.load(Ordering::Relaxed),
        )
    }
}
