//! CLI context for dependency injection and shared resources

use crate::cli::{Commands, dispatcher::CommandDispatcher};
use maos_core::config::MaosConfig;
use maos_core::error::ConfigError;
use maos_core::{ExitCode, MaosError, PerformanceMetrics, Result};
use std::sync::{Arc, OnceLock};

/// Dependency container for CLI operations with lazy initialization
pub struct CliContext {
    /// Lazily loaded configuration
    config: OnceLock<Arc<MaosConfig>>,
    /// Lazily loaded metrics
    metrics: OnceLock<Arc<PerformanceMetrics>>,
    /// Lazily loaded dispatcher
    dispatcher: OnceLock<CommandDispatcher>,
}

impl CliContext {
    /// Build CLI context with lazy initialization
    pub async fn build() -> Result<Self> {
        Ok(Self {
            config: OnceLock::new(),
            metrics: OnceLock::new(),
            dispatcher: OnceLock::new(),
        })
    }

    /// Build CLI context with custom configuration (useful for testing)
    pub async fn build_with_config(config: MaosConfig) -> Result<Self> {
        let context = Self {
            config: OnceLock::new(),
            metrics: OnceLock::new(),
            dispatcher: OnceLock::new(),
        };
        // Pre-initialize with the provided config for testing
        let _ = context.config.set(Arc::new(config));
        Ok(context)
    }

    /// Build CLI context with test dispatcher (for unit testing)
    #[cfg(test)]
    pub(crate) async fn build_with_test_dispatcher(
        config: MaosConfig,
        dispatcher: CommandDispatcher,
    ) -> Result<Self> {
        let context = Self {
            config: OnceLock::new(),
            metrics: OnceLock::new(),
            dispatcher: OnceLock::new(),
        };
        let _ = context.config.set(Arc::new(config));
        let _ = context.dispatcher.set(dispatcher);
        Ok(context)
    }

    /// Execute a command and return the exit code with lazy initialization
    pub async fn execute(self, command: Commands) -> ExitCode {
        // Initialize dispatcher only when needed
        match self.get_dispatcher().await {
            Ok(dispatcher) => match dispatcher.dispatch(command).await {
                Ok(result) => {
                    if let Some(output) = result.output {
                        print!("{output}");
                    }
                    result.exit_code
                }
                Err(err) => {
                    tracing::error!("Command execution failed: {err:?}");
                    tracing::warn!("Check application logs for detailed error information");
                    ExitCode::from(&err)
                }
            },
            Err(err) => {
                tracing::error!("MAOS initialization failed: {err:?}");
                ExitCode::from(&err)
            }
        }
    }

    /// Get or initialize configuration
    /// Uses atomic initialization to prevent race conditions
    fn get_config(&self) -> Result<Arc<MaosConfig>> {
        // Fast path: already initialized
        if let Some(config) = self.config.get() {
            return Ok(config.clone());
        }

        // Slow path: initialize with proper synchronization
        let new_config = Arc::new(MaosConfig::load()?);

        // set() is atomic - only one thread will succeed
        match self.config.set(new_config.clone()) {
            Ok(()) => Ok(new_config),
            Err(_) => {
                // Another thread won the race, use their config
                Ok(self
                    .config
                    .get()
                    .expect("Config must be set after race")
                    .clone())
            }
        }
    }

    /// Get or initialize metrics
    fn get_metrics(&self) -> Arc<PerformanceMetrics> {
        self.metrics
            .get_or_init(|| Arc::new(PerformanceMetrics::new()))
            .clone()
    }

    /// Get or initialize dispatcher
    /// Uses atomic initialization to prevent race conditions
    async fn get_dispatcher(&self) -> Result<&CommandDispatcher> {
        // Check if already initialized first (fast path)
        if let Some(dispatcher) = self.dispatcher.get() {
            return Ok(dispatcher);
        }

        // Slow path: initialize with proper synchronization
        // Note: We can't use get_or_try_init directly because it doesn't support async closures
        // Instead, we use a double-checked locking pattern with OnceLock's atomic guarantees
        let config = self.get_config()?;
        let metrics = self.get_metrics();
        let new_dispatcher = CommandDispatcher::new(config, metrics).await?;

        // set() returns Ok if this thread won the race, Err if another thread already set it
        match self.dispatcher.set(new_dispatcher) {
            Ok(()) => {
                // We successfully initialized it
                self.dispatcher.get().ok_or_else(|| {
                    MaosError::Config(ConfigError::InvalidFormat {
                        reason: "Failed to initialize dispatcher".to_string(),
                    })
                })
            }
            Err(_) => {
                // Another thread initialized it, use theirs
                self.dispatcher.get().ok_or_else(|| {
                    MaosError::Config(ConfigError::InvalidFormat {
                        reason: "Failed to initialize dispatcher".to_string(),
                    })
                })
            }
        }
    }

    /// Get a reference to the configuration (for testing)
    pub fn config(&self) -> Result<Arc<MaosConfig>> {
        self.get_config()
    }

    /// Get a reference to the metrics (for testing)
    pub fn metrics(&self) -> Arc<PerformanceMetrics> {
        self.get_metrics()
    }
}
