//! Core security validation module
//!
//! Provides essential security validation for MAOS operations including:
//! - Path traversal prevention
//! - Dangerous command detection  
//! - Environment file protection
//! - Resource usage limits
//! - JSON structure validation

pub mod command;
pub mod file;
pub mod json;
pub mod path;
pub mod path_validator;
pub mod resource;
pub mod resource_validator;
pub mod traits;
pub mod validator;

// Re-export key types for convenience
pub use command::validate_command;
pub use file::validate_file_access;
pub use json::validate_json_structure;
pub use path::validate_path_safety;
pub use resource::validate_resource_usage;
pub use validator::SecurityValidator;
