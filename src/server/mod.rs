//! MCP server implementation for the contact directory.
//!
//! This module provides the MCP protocol server that exposes directory
//! lookups, searches and writes as tools.

pub mod handlers;

pub use handlers::ContactDirectoryServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the contact directory server with stdio transport.
///
/// This function starts the MCP server and runs it until completion.
/// It communicates via stdin/stdout using the MCP protocol.
pub async fn run_server(server: ContactDirectoryServer) -> Result<()> {
    // Serve the server with stdio transport
    let service = server.serve(stdio()).await?;

    // Wait for completion
    service.waiting().await?;

    Ok(())
}
