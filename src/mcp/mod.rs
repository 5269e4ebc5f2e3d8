//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the pipeline stages to AI coding agents as tool calls over stdio.
//!
//! ## Module Structure
//!
//! - `server`: Tool router and server entry point
//! - `types`: Tool parameter and result DTOs

mod server;
pub mod types;

pub use server::{KeyfoldMcpServer, run_server};
