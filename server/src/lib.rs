pub mod config;
pub mod mcp;
pub mod mcp_types;
pub mod observability;
