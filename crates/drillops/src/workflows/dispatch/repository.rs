use serde::{Deserialize, Serialize};

use super::domain::{RequestId, ServiceRequest};

/// Storage abstraction over the authoritative request collection. The
/// core never persists directly; the caller supplies an implementation
/// and owns durability.
pub trait RequestStore: Send + Sync {
    fn insert(&self, record: ServiceRequest) -> Result<ServiceRequest, StoreError>;
    fn update(&self, record: ServiceRequest) -> Result<(), StoreError>;
    fn fetch(&self, id: &RequestId) -> Result<Option<ServiceRequest>, StoreError>;
    fn delete(&self, id: &RequestId) -> Result<(), StoreError>;
    fn all(&self) -> Result<Vec<ServiceRequest>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Severity of a toast surfaced to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// Outcome notification payload. The sink renders it; the core only
/// decides what happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }
}

/// The sole channel through which operation outcomes reach a user.
pub trait ToastSink: Send + Sync {
    fn notify(&self, toast: Toast) -> Result<(), ToastError>;
}

/// Toast dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum ToastError {
    #[error("toast channel unavailable: {0}")]
    Unavailable(String),
}
