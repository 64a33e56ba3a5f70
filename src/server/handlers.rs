//! MCP tool handlers for the contact directory.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::error::DirectoryError;
use crate::models::Contact;
use crate::services::ContactService;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::NaiveDate;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes the contact directory as tools.
#[derive(Clone)]
pub struct ContactDirectoryServer {
    contact_service: Arc<dyn ContactService>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for ContactDirectoryServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "contact-directory".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Contact directory - look up contacts by ID, search by partial email/phone or city/state with skip/take paging, and create, update or delete contacts with validated email addresses.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct ContactIdParams {
    id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchContactsParams {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    skip: Option<i64>,
    #[serde(default)]
    take: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchByLocationParams {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    skip: Option<i64>,
    #[serde(default)]
    take: Option<i64>,
}

/// Contact fields accepted by the create and update tools.
///
/// Uses the same camelCase shape the read tools return, so a fetched contact
/// can be edited and sent straight back.
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct ContactInput {
    id: Option<i64>,
    first_name: Option<String>,
    last_name: Option<String>,
    company: Option<String>,
    profile_image: Option<String>,
    /// Base64-encoded image bytes
    profile_image_bytes: Option<String>,
    email: Option<String>,
    /// ISO date, `YYYY-MM-DD`
    birth_date: Option<String>,
    work_phone: Option<String>,
    home_phone: Option<String>,
    address1: Option<String>,
    address2: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip: Option<String>,
    country: Option<String>,
    notes: Option<String>,
}

impl ContactInput {
    /// Convert into a contact, using `default_id` when no ID was supplied.
    fn into_contact(self, default_id: i64) -> Result<Contact, DirectoryError> {
        let birth_date = self
            .birth_date
            .filter(|d| !d.trim().is_empty())
            .map(|d| {
                NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").map_err(|e| {
                    DirectoryError::InvalidRequest(format!("Invalid birth date '{}': {}", d, e))
                })
            })
            .transpose()?;

        let profile_image_bytes = self
            .profile_image_bytes
            .filter(|s| !s.is_empty())
            .map(|s| {
                STANDARD.decode(s.as_bytes()).map_err(|e| {
                    DirectoryError::InvalidRequest(format!("Invalid image data: {}", e))
                })
            })
            .transpose()?;

        Ok(Contact {
            id: self.id.unwrap_or(default_id),
            first_name: self.first_name,
            last_name: self.last_name,
            company: self.company,
            profile_image: self.profile_image,
            profile_image_bytes,
            email: self.email,
            birth_date,
            work_phone: self.work_phone,
            home_phone: self.home_phone,
            address1: self.address1,
            address2: self.address2,
            city: self.city,
            state: self.state,
            zip: self.zip,
            country: self.country,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateContactToolParams {
    id: i64,
    contact: ContactInput,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ValidateEmailParams {
    email: String,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

/// Caller mistakes map to invalid params; store failures stay internal errors.
fn directory_error(e: DirectoryError) -> McpError {
    if e.is_client_error() {
        McpError {
            code: ErrorCode::INVALID_PARAMS,
            message: Cow::from(e.to_string()),
            data: None,
        }
    } else {
        tracing::error!("Contact directory operation failed: {:?}", e);
        to_mcp_error(e)
    }
}

fn contacts_response(contacts: &[Contact]) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(&serde_json::json!({
        "count": contacts.len(),
        "contacts": contacts,
    }))
    .map_err(to_mcp_error)?;

    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

// Tool router implementation
#[tool_router]
impl ContactDirectoryServer {
    /// Create a new contact directory server.
    pub fn new(contact_service: Arc<dyn ContactService>) -> Self {
        Self {
            contact_service,
            tool_router: Self::tool_router(),
        }
    }

    /// Retrieve a contact by ID.
    #[tool(description = "Retrieve complete information for a specific contact by ID")]
    async fn get_contact(
        &self,
        params: Parameters<ContactIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let contact = self
            .contact_service
            .get_contact(params.id)
            .await
            .map_err(directory_error)?;

        let json_response = serde_json::to_string_pretty(&contact).map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }

    /// Search contacts by partial email and/or phone.
    #[tool(
        description = "Search contacts by partial email and/or phone number (matches work or home phone). Matching is case-insensitive substring; blank criteria are ignored. Optional skip/take page the results."
    )]
    async fn search_contacts(
        &self,
        params: Parameters<SearchContactsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let contacts = self
            .contact_service
            .filter_by_email_phone(params.email, params.phone, params.skip, params.take)
            .await
            .map_err(directory_error)?;

        contacts_response(&contacts)
    }

    /// Search contacts by partial city and/or state.
    #[tool(
        description = "Search contacts by partial city and/or state. When both are given a contact must match both. Optional skip/take page the results."
    )]
    async fn search_contacts_by_location(
        &self,
        params: Parameters<SearchByLocationParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let contacts = self
            .contact_service
            .filter_by_city_state(params.city, params.state, params.skip, params.take)
            .await
            .map_err(directory_error)?;

        contacts_response(&contacts)
    }

    /// Create a new contact.
    #[tool(
        description = "Create a new contact. Omit id (or pass 0) to have one assigned. The email, when given, must be a valid address."
    )]
    async fn create_contact(
        &self,
        params: Parameters<ContactInput>,
    ) -> Result<CallToolResult, McpError> {
        let contact = params.0.into_contact(0).map_err(directory_error)?;

        tracing::info!("MCP Handler: create_contact called");

        let created = self
            .contact_service
            .create_contact(contact)
            .await
            .map_err(directory_error)?;

        tracing::info!("Contact created successfully: id={}", created.id);
        let json_response = serde_json::to_string_pretty(&created).map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }

    /// Replace an existing contact.
    #[tool(
        description = "Replace all fields of an existing contact. The contact's id, if given, must equal the id being updated. The email, when given, must be a valid address."
    )]
    async fn update_contact(
        &self,
        params: Parameters<UpdateContactToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let contact = params
            .contact
            .into_contact(params.id)
            .map_err(directory_error)?;

        tracing::info!("MCP Handler: update_contact called for id={}", params.id);

        self.contact_service
            .update_contact(params.id, contact)
            .await
            .map_err(directory_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Contact {} updated",
            params.id
        ))]))
    }

    /// Delete a contact.
    #[tool(description = "Delete a contact by ID")]
    async fn delete_contact(
        &self,
        params: Parameters<ContactIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        self.contact_service
            .delete_contact(params.id)
            .await
            .map_err(directory_error)?;

        tracing::info!("Contact deleted: id={}", params.id);
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Contact {} deleted",
            params.id
        ))]))
    }

    /// Check whether an email address is well-formed.
    #[tool(
        description = "Check whether an email address is well-formed. Internationalized domains are converted to ASCII before checking."
    )]
    async fn validate_email(
        &self,
        params: Parameters<ValidateEmailParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let valid = self.contact_service.is_valid_email(&params.email).await;

        let json_response = serde_json::to_string_pretty(&serde_json::json!({
            "email": params.email,
            "valid": valid,
        }))
        .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }

    /// Return a contact's profile image.
    #[tool(description = "Get a contact's profile image as a PNG")]
    async fn get_contact_image(
        &self,
        params: Parameters<ContactIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let bytes = self
            .contact_service
            .contact_image(params.id)
            .await
            .map_err(directory_error)?;

        Ok(CallToolResult::success(vec![Content::image(
            STANDARD.encode(bytes),
            "image/png",
        )]))
    }
}
