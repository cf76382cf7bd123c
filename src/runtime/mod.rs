//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over the few system
//! operations the client needs, enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `env` - Environment variables
//! - `fs` - File reads (credentials file)
//! - `clock` - Monotonic time and sleeping

mod clock;
mod env;
mod fs;

use anyhow::Result;
use async_trait::async_trait;
use std::env as std_env;
use std::path::Path;
use std::time::{Duration, Instant};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // File System
    fn read_to_string(&self, path: &Path) -> Result<String>;

    // Clock
    /// Current monotonic instant. Session age and request spacing are measured against it.
    fn now(&self) -> Instant;

    /// Suspend the caller for `duration`. Used by request throttling and retry backoff.
    async fn sleep(&self, duration: Duration);
}

pub struct RealRuntime;

#[async_trait]
impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn now(&self) -> Instant {
        self.now_impl()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleep_impl(duration).await
    }
}
