//! Command dispatcher for routing commands to handlers

use crate::cli::{Commands, handler::CommandResult, registry::HandlerRegistry};
use crate::io::{HookInput, StdinProcessor};
use maos_core::config::MaosConfig;
use maos_core::{MaosError, PerformanceMetrics, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use async_trait::async_trait;

/// Type alias for async-safe input provider to reduce type complexity
/// Uses tokio::sync::Mutex for proper async compatibility
type ThreadSafeInputProvider = Arc<Mutex<Box<dyn InputProvider>>>;

/// 🔥 CRITICAL FIX: Always available trait for input providers (clean architecture)
///
/// This trait abstracts input reading to allow proper dependency injection
/// instead of conditional compilation anti-patterns.
#[async_trait]
pub trait InputProvider: Send + Sync {
    async fn read_hook_input(&mut self) -> Result<HookInput>;
}

/// Production implementation using actual stdin
#[async_trait]
impl InputProvider for StdinProcessor {
    async fn read_hook_input(&mut self) -> Result<HookInput> {
        self.read_hook_input().await
    }
}

/// Command dispatcher that routes commands to appropriate handlers
///
/// 🔥 CRITICAL FIX: Immutable dispatcher with thread-safe input provider
/// Clean architecture with dependency injection and no mutable state
pub struct CommandDispatcher {
    pub config: Arc<MaosConfig>,
    metrics: Arc<PerformanceMetrics>,
    pub registry: HandlerRegistry,
    input_provider: ThreadSafeInputProvider,
}

impl CommandDispatcher {
    /// Create a new command dispatcher with production stdin processor
    ///
    /// 🔥 CRITICAL FIX: Clean constructor using dependency injection
    pub async fn new(config: Arc<MaosConfig>, metrics: Arc<PerformanceMetrics>) -> Result<Self> {
        let registry = HandlerRegistry::build(&config).await?;
        let stdin_processor = StdinProcessor::new(config.hooks.clone());

        Ok(Self {
            config,
            metrics,
            registry,
            input_provider: Arc::new(Mutex::new(Box::new(stdin_processor))),
        })
    }

    /// Create dispatcher with custom input provider
    ///
    /// 🔥 CRITICAL FIX: Always available for clean dependency injection
    /// This enables both testing with mocks and custom input sources
    pub async fn new_with_input_provider(
        config: Arc<MaosConfig>,
        metrics: Arc<PerformanceMetrics>,
        input_provider: Box<dyn InputProvider>,
    ) -> Result<Self> {
        let registry = HandlerRegistry::build(&config).await?;

        Ok(Self {
            config,
            metrics,
            registry,
            input_provider: Arc::new(Mutex::new(input_provider)),
        })
    }

    /// Dispatch command to appropriate handler
    ///
    /// 🔥 CRITICAL FIX: Now immutable - no &mut self needed for thread safety
    /// ✅ STDOUT CONTROL REMOVED: Returns full CommandResult with optional output
    pub async fn dispatch(&self, command: Commands) -> Result<CommandResult> {
        let start_time = Instant::now();

        // Read input if command expects it
        let input = if command.expects_stdin() {
            self.read_input().await?
        } else {
            HookInput::default()
        };

        // Get the appropriate handler
        let handler = self.registry.get_handler(&command)?;

        // Validate input
        let validation_start = Instant::now();
        handler.validate_input(&input)?;
        let validation_time = validation_start.elapsed();

        // Execute handler with timeout protection
        let handler_start = Instant::now();
        let execution_timeout = Duration::from_millis(self.config.system.max_execution_time_ms);

        // 🛡️ RESOURCE LIMIT: Enforce maximum execution time to prevent runaway handlers
        let mut result = match tokio::time::timeout(execution_timeout, handler.execute(input)).await
        {
            Ok(result) => result?,
            Err(_timeout) => {
                return Err(MaosError::ResourceLimit {
                    resource: "execution_time".to_string(),
                    limit: self.config.system.max_execution_time_ms,
                    actual: execution_timeout.as_millis() as u64,
                    message: format!(
                        "Handler execution exceeded maximum time limit of {}ms",
                        self.config.system.max_execution_time_ms
                    ),
                });
            }
        };
        let handler_time = handler_start.elapsed();

        // 🛡️ RESOURCE LIMIT: Check memory usage after handler execution
        let memory_usage = StdinProcessor::get_memory_usage();
        let memory_limit_mb = self.config.hooks.max_input_size_mb; // Reuse input limit for memory
        let memory_limit_bytes = (memory_limit_mb * 1024 * 1024) as usize;

        if memory_usage > memory_limit_bytes {
            tracing::warn!(
                "High memory usage detected after handler execution: {} bytes ({}% of {}MB limit)",
                memory_usage,
                (memory_usage * 100) / memory_limit_bytes,
                memory_limit_mb
            );
            // Note: We log but don't fail here since memory cleanup is async
            // Future enhancement could add stricter memory enforcement
        }

        // Update metrics
        result.metrics.validation_time = validation_time;
        result.metrics.handler_time = handler_time;
        result.metrics.total_time = start_time.elapsed();

        // Record performance metrics
        self.record_metrics(handler.name(), result.metrics.total_time);

        // ✅ STDOUT CONTROL REMOVED: Return full result to caller
        // Caller can extract output and decide how to handle it (stdout, logging, etc.)
        if let Some(ref output) = result.output {
            tracing::debug!("Handler produced output: {} chars", output.len());
        }

        Ok(result)
    }

    /// Read input using dependency-injected provider
    ///
    /// 🔥 CRITICAL FIX: Async-safe access with tokio::sync::Mutex
    async fn read_input(&self) -> Result<HookInput> {
        let mut guard = self.input_provider.lock().await;
        guard.read_hook_input().await
    }

    /// Record metrics for the operation
    fn record_metrics(&self, handler_name: &str, duration: Duration) {
        self.metrics.record_execution_time(handler_name, duration);
    }
}
