//! Configuration management for MAOS.
//!
//! This module provides a flexible configuration system supporting:
//! - Default values
//! - JSON file configuration
//! - Environment variable overrides
//! - Command-line argument overrides (future)
//!
//! # Example
//! ```
//! use maos_core::config::MaosConfig;
//!
//! let cfg = MaosConfig::default();
//! assert_eq!(cfg.logging.level, "info");
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::collections::HashMap;

use crate::error::{Result, ConfigError};

/// System-wide configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Maximum execution time for any operation (ms)
    #[serde(default = "default_max_execution_time")]
    pub max_execution_time_ms: u64,
    
    /// Default workspace root directory
    #[serde(default = "default_workspace_root")]
    pub workspace_root: PathBuf,
    
    /// Enable performance metrics collection
    #[serde(default = "default_true")]
    pub enable_metrics: bool,
}

/// Security validation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Enable security validation checks
    #[serde(default = "default_true")]
    pub enable_validation: bool,
    
    /// List of allowed tools ("*" for all)
    #[serde(default = "default_allowed_tools")]
    pub allowed_tools: Vec<String>,
    
    /// Paths that should be blocked
    #[serde(default)]
    pub blocked_paths: Vec<String>,
}

/// Resource limits applied to hook invocations read from stdin
///
/// Shared by [`crate::io::processor::StdinProcessor`] (and the `maos` crate's
/// counterpart) to bound the size, parse depth, and wall-clock cost of a
/// single hook payload before the governance pipeline ever sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    /// Maximum accepted stdin payload size, in megabytes
    #[serde(default = "default_max_input_size_mb")]
    pub max_input_size_mb: u64,

    /// Maximum time a single hook invocation may spend processing, in ms
    #[serde(default = "default_max_processing_time_ms")]
    pub max_processing_time_ms: u64,

    /// Timeout for the initial stdin read, in ms
    #[serde(default = "default_stdin_read_timeout_ms")]
    pub stdin_read_timeout_ms: u64,

    /// Maximum nesting depth accepted when parsing the hook JSON payload
    #[serde(default = "default_max_json_depth")]
    pub max_json_depth: u32,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            max_input_size_mb: default_max_input_size_mb(),
            max_processing_time_ms: default_max_processing_time_ms(),
            stdin_read_timeout_ms: default_stdin_read_timeout_ms(),
            max_json_depth: default_max_json_depth(),
        }
    }
}

/// Tool Governance Pipeline configuration
///
/// Everything the governance pipeline needs that isn't already covered by
/// [`SystemConfig`] (execution timeout) or [`SecurityConfig`] (validation
/// toggles).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Directory (relative to the workspace root) holding intent files,
    /// session state, and the trace ledger
    #[serde(default = "default_orchestration_dir")]
    pub orchestration_dir: String,

    /// Maximum size, in bytes, of a single appended trace ledger record
    #[serde(default = "default_max_ledger_record_bytes")]
    pub max_ledger_record_bytes: u64,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            orchestration_dir: default_orchestration_dir(),
            max_ledger_record_bytes: default_max_ledger_record_bytes(),
        }
    }
}

/// Session management configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum number of concurrent agents
    #[serde(default = "default_max_agents")]
    pub max_agents: u32,
    
    /// Session timeout in minutes
    #[serde(default = "default_timeout_minutes")]
    pub timeout_minutes: u32,
    
    /// Automatically cleanup sessions on completion
    #[serde(default = "default_true")]
    pub auto_cleanup: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    
    /// Log format ("json" or "text")
    #[serde(default = "default_log_format")]
    pub format: String,
    
    /// Log output ("stdout", "stderr", "session_file")
    #[serde(default = "default_log_output")]
    pub output: String,
}

/// Root MAOS configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaosConfig {
    /// System-wide settings
    pub system: SystemConfig,
    
    /// Security validation settings
    pub security: SecurityConfig,

    /// Resource limits for hook stdin processing
    pub hooks: HookConfig,

    /// Tool Governance Pipeline settings
    pub governance: GovernanceConfig,

    /// Session management settings
    pub session: SessionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

// Keep backward compatibility alias
pub type Config = MaosConfig;

impl Default for MaosConfig {
    fn default() -> Self {
        Self {
            system: SystemConfig {
                max_execution_time_ms: default_max_execution_time(),
                workspace_root: default_workspace_root(),
                enable_metrics: default_true(),
            },
            security: SecurityConfig {
                enable_validation: default_true(),
                allowed_tools: default_allowed_tools(),
                blocked_paths: Vec::new(),
            },
            hooks: HookConfig::default(),
            governance: GovernanceConfig::default(),
            session: SessionConfig {
                max_agents: default_max_agents(),
                timeout_minutes: default_timeout_minutes(),
                auto_cleanup: default_true(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
                output: default_log_output(),
            },
        }
    }
}

impl MaosConfig {
    /// Load configuration (currently just returns defaults)
    pub fn load() -> Result<Self> {
        Ok(Self::default())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Validate execution time
        if self.system.max_execution_time_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_execution_time_ms".into(),
                value: "0".into(),
                reason: "must be greater than 0".into(),
            }.into());
        }
        
        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".into(),
                value: self.logging.level.clone(),
                reason: "must be one of: trace, debug, info, warn, error".into(),
            }.into());
        }
        
        Ok(())
    }
}

/// Configuration loader with support for multiple sources
#[derive(Default)]
pub struct ConfigLoader {}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Load configuration from a JSON string
    pub fn load_from_str(&self, json: &str) -> Result<MaosConfig> {
        // Start with defaults
        let mut config = MaosConfig::default();
        
        // Parse and merge the JSON
        let partial: serde_json::Value = serde_json::from_str(json)?;
        self.merge_json(&mut config, partial)?;
        
        // Validate
        config.validate()?;
        
        Ok(config)
    }
    
    /// Load configuration with environment variable overrides
    pub fn load_with_env(&self, env_vars: HashMap<String, String>) -> Result<MaosConfig> {
        // Start with defaults
        let mut config = MaosConfig::default();
        
        // Apply environment overrides
        self.apply_env_overrides(&mut config, env_vars)?;
        
        // Validate
        config.validate()?;
        
        Ok(config)
    }
    
    /// Merge JSON values into config
    fn merge_json(&self, config: &mut MaosConfig, value: serde_json::Value) -> Result<()> {
        // This is a simple implementation - could be more sophisticated
        if let serde_json::Value::Object(map) = value {
            // System config
            if let Some(system) = map.get("system") {
                if let Some(val) = system.get("max_execution_time_ms") {
                    if let Some(ms) = val.as_u64() {
                        config.system.max_execution_time_ms = ms;
                    }
                }
                if let Some(val) = system.get("workspace_root") {
                    if let Some(path) = val.as_str() {
                        config.system.workspace_root = PathBuf::from(path);
                    }
                }
                if let Some(val) = system.get("enable_metrics") {
                    if let Some(enabled) = val.as_bool() {
                        config.system.enable_metrics = enabled;
                    }
                }
            }
            
            // Security config
            if let Some(security) = map.get("security") {
                if let Some(val) = security.get("enable_validation") {
                    if let Some(enabled) = val.as_bool() {
                        config.security.enable_validation = enabled;
                    }
                }
                if let Some(val) = security.get("allowed_tools") {
                    if let Some(arr) = val.as_array() {
                        config.security.allowed_tools = arr.iter()
                            .filter_map(|v| v.as_str().map(String::from))
                            .collect();
                    }
                }
                if let Some(val) = security.get("blocked_paths") {
                    if let Some(arr) = val.as_array() {
                        config.security.blocked_paths = arr.iter()
                            .filter_map(|v| v.as_str().map(String::from))
                            .collect();
                    }
                }
            }
            
            // Hook stdin-processing limits
            if let Some(hooks) = map.get("hooks") {
                if let Some(val) = hooks.get("max_input_size_mb") {
                    if let Some(mb) = val.as_u64() {
                        config.hooks.max_input_size_mb = mb;
                    }
                }
                if let Some(val) = hooks.get("max_processing_time_ms") {
                    if let Some(ms) = val.as_u64() {
                        config.hooks.max_processing_time_ms = ms;
                    }
                }
                if let Some(val) = hooks.get("stdin_read_timeout_ms") {
                    if let Some(ms) = val.as_u64() {
                        config.hooks.stdin_read_timeout_ms = ms;
                    }
                }
                if let Some(val) = hooks.get("max_json_depth") {
                    if let Some(depth) = val.as_u64() {
                        config.hooks.max_json_depth = depth as u32;
                    }
                }
            }

            // Governance pipeline config
            if let Some(governance) = map.get("governance") {
                if let Some(val) = governance.get("orchestration_dir") {
                    if let Some(dir) = val.as_str() {
                        config.governance.orchestration_dir = dir.to_string();
                    }
                }
                if let Some(val) = governance.get("max_ledger_record_bytes") {
                    if let Some(bytes) = val.as_u64() {
                        config.governance.max_ledger_record_bytes = bytes;
                    }
                }
            }

            // Session config
            if let Some(session) = map.get("session") {
                if let Some(val) = session.get("max_agents") {
                    if let Some(max) = val.as_u64() {
                        config.session.max_agents = max as u32;
                    }
                }
                if let Some(val) = session.get("timeout_minutes") {
                    if let Some(timeout) = val.as_u64() {
                        config.session.timeout_minutes = timeout as u32;
                    }
                }
                if let Some(val) = session.get("auto_cleanup") {
                    if let Some(cleanup) = val.as_bool() {
                        config.session.auto_cleanup = cleanup;
                    }
                }
            }
            
            // Logging config
            if let Some(logging) = map.get("logging") {
                if let Some(val) = logging.get("level") {
                    if let Some(level) = val.as_str() {
                        config.logging.level = level.to_string();
                    }
                }
                if let Some(val) = logging.get("format") {
                    if let Some(format) = val.as_str() {
                        config.logging.format = format.to_string();
                    }
                }
                if let Some(val) = logging.get("output") {
                    if let Some(output) = val.as_str() {
                        config.logging.output = output.to_string();
                    }
                }
            }
        }
        
        Ok(())
    }
    
    /// Apply environment variable overrides
    fn apply_env_overrides(&self, config: &mut MaosConfig, env_vars: HashMap<String, String>) -> Result<()> {
        // System overrides
        if let Some(val) = env_vars.get("MAOS_SYSTEM_MAX_EXECUTION_TIME_MS") {
            config.system.max_execution_time_ms = val.parse()
                .map_err(|_| ConfigError::InvalidValue {
                    field: "MAOS_SYSTEM_MAX_EXECUTION_TIME_MS".into(),
                    value: val.clone(),
                    reason: "must be a valid number".into(),
                })?;
        }
        
        if let Some(val) = env_vars.get("MAOS_SYSTEM_WORKSPACE_ROOT") {
            config.system.workspace_root = PathBuf::from(val);
        }
        
        // Security overrides
        if let Some(val) = env_vars.get("MAOS_SECURITY_ENABLE_VALIDATION") {
            config.security.enable_validation = val.parse()
                .map_err(|_| ConfigError::InvalidValue {
                    field: "MAOS_SECURITY_ENABLE_VALIDATION".into(),
                    value: val.clone(),
                    reason: "must be true or false".into(),
                })?;
        }
        
        // Hook resource-limit overrides
        if let Some(val) = env_vars.get("MAOS_HOOKS_MAX_INPUT_SIZE_MB") {
            config.hooks.max_input_size_mb = val.parse().map_err(|_| ConfigError::InvalidValue {
                field: "MAOS_HOOKS_MAX_INPUT_SIZE_MB".into(),
                value: val.clone(),
                reason: "must be a valid number".into(),
            })?;
        }

        // Logging overrides
        if let Some(val) = env_vars.get("MAOS_LOGGING_LEVEL") {
            config.logging.level = val.clone();
        }
        
        Ok(())
    }
}

// Default value functions
fn default_max_execution_time() -> u64 { 60_000 }
fn default_workspace_root() -> PathBuf { PathBuf::from("/tmp/maos") }
fn default_true() -> bool { true }
fn default_allowed_tools() -> Vec<String> { vec!["*".to_string()] }
fn default_max_agents() -> u32 { 20 }
fn default_timeout_minutes() -> u32 { 60 }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }
fn default_log_output() -> String { "session_file".to_string() }

fn default_max_input_size_mb() -> u64 {
    crate::constants::sizes::MAX_INPUT_SIZE_MB as u64
}
fn default_max_processing_time_ms() -> u64 {
    crate::constants::limits::DEFAULT_TIMEOUT_MS
}
fn default_stdin_read_timeout_ms() -> u64 {
    crate::constants::limits::STDIN_TIMEOUT_MS
}
fn default_max_json_depth() -> u32 {
    crate::constants::limits::JSON_DEPTH_DEFAULT
}
fn default_orchestration_dir() -> String {
    ".orchestration".to_string()
}
fn default_max_ledger_record_bytes() -> u64 {
    64 * 1024
}
