//! Built-in interceptors

use std::sync::{Arc, Mutex};

use log::{info, warn};
use serde_json::Value;

use crate::core::ports::{CallContext, Interceptor, InvocationError, Proceed};

/// Logs entry to and exit from every call it wraps
#[derive(Debug, Clone)]
pub struct LoggingInterceptor {
    label: String,
}

impl LoggingInterceptor {
    /// Create an interceptor whose log lines carry `label`
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// The log label
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Interceptor for LoggingInterceptor {
    fn invoke(&self, ctx: &mut CallContext<'_>, next: Proceed<'_>) -> Result<Value, InvocationError> {
        let method = ctx.method().to_string();
        info!("[{}] -> {method} ({} arg(s))", self.label, ctx.arguments.len());
        let result = next.proceed(ctx);
        match &result {
            Ok(value) => info!("[{}] <- {method} = {value}", self.label),
            Err(err) => warn!("[{}] <- {method} failed: {err}", self.label),
        }
        result
    }
}

/// Refuses every call it wraps
#[derive(Debug, Clone)]
pub struct DenyInterceptor {
    reason: String,
}

impl DenyInterceptor {
    /// Create an interceptor that refuses calls with `reason`
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Interceptor for DenyInterceptor {
    fn invoke(&self, ctx: &mut CallContext<'_>, _next: Proceed<'_>) -> Result<Value, InvocationError> {
        Err(InvocationError::Denied {
            method: ctx.method().to_string(),
            reason: self.reason.clone(),
        })
    }
}

/// Records the methods it sees, then proceeds
///
/// Clones share one record, so a test can keep a handle while the registry
/// hands another to the chain.
#[derive(Debug, Clone, Default)]
pub struct RecordingInterceptor {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingInterceptor {
    /// Create an interceptor with an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Methods seen so far, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl Interceptor for RecordingInterceptor {
    fn invoke(&self, ctx: &mut CallContext<'_>, next: Proceed<'_>) -> Result<Value, InvocationError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(ctx.method().to_string());
        }
        next.proceed(ctx)
    }
}
