use crate::core::arguments::ToolArguments;
use crate::core::format::ResponseFormat;
use crate::domain::ports::{ArtApi, QueryParam};
use crate::utils::error::{AicError, ErrorCategory, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};

const DEFAULT_LIMIT: u32 = 10;
const DEFAULT_GALLERY_LIMIT: u32 = 20;

/// The fixed set of tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    SearchArtworks,
    GetArtwork,
    SearchAgents,
    GetAgent,
    SearchExhibitions,
    GetExhibition,
    ListGalleries,
    GetGallery,
    SearchAll,
}

impl ToolKind {
    pub const ALL: [ToolKind; 9] = [
        ToolKind::SearchArtworks,
        ToolKind::GetArtwork,
        ToolKind::SearchAgents,
        ToolKind::GetAgent,
        ToolKind::SearchExhibitions,
        ToolKind::GetExhibition,
        ToolKind::ListGalleries,
        ToolKind::GetGallery,
        ToolKind::SearchAll,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::SearchArtworks => "search_artworks",
            ToolKind::GetArtwork => "get_artwork",
            ToolKind::SearchAgents => "search_agents",
            ToolKind::GetAgent => "get_agent",
            ToolKind::SearchExhibitions => "search_exhibitions",
            ToolKind::GetExhibition => "get_exhibition",
            ToolKind::ListGalleries => "list_galleries",
            ToolKind::GetGallery => "get_gallery",
            ToolKind::SearchAll => "search_all",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    fn description(self) -> &'static str {
        match self {
            ToolKind::SearchArtworks => {
                "Search for artworks in the Art Institute of Chicago collection. \
                 Returns artwork details including title, artist, date, medium, description, and images. \
                 Supports full-text search across all artwork metadata."
            }
            ToolKind::GetArtwork => {
                "Get detailed information about a specific artwork by its ID. \
                 Returns complete artwork metadata including dimensions, provenance, exhibition history, and high-resolution images."
            }
            ToolKind::SearchAgents => {
                "Search for artists, creators, and cultural agents. \
                 Returns biographical information including birth/death dates and descriptions."
            }
            ToolKind::GetAgent => {
                "Get detailed information about a specific artist or cultural agent by ID."
            }
            ToolKind::SearchExhibitions => {
                "Search for current, past, and upcoming exhibitions. \
                 Returns exhibition details including dates, locations, and descriptions."
            }
            ToolKind::GetExhibition => "Get detailed information about a specific exhibition by ID.",
            ToolKind::ListGalleries => {
                "List museum galleries with their locations and current status. \
                 Useful for finding where artworks are displayed."
            }
            ToolKind::GetGallery => "Get detailed information about a specific gallery by ID.",
            ToolKind::SearchAll => {
                "Search across all content types in the museum collection \
                 (artworks, agents, exhibitions, galleries, and more). \
                 Best for broad exploratory searches."
            }
        }
    }

    fn input_schema(self, max_limit: u32) -> Value {
        let query = json!({
            "type": "string",
            "description": "Search query (e.g., 'Monet', 'impressionism', 'landscape')"
        });
        let limit = |default: u32| {
            json!({
                "type": "integer",
                "description": format!(
                    "Number of results to return (default: {}, max: {})",
                    default.min(max_limit),
                    max_limit
                ),
                "default": default.min(max_limit),
                "minimum": 1,
                "maximum": max_limit
            })
        };
        let page = json!({
            "type": "integer",
            "description": "Page number for pagination (default: 1)",
            "default": 1,
            "minimum": 1
        });
        let fields = json!({
            "type": "string",
            "description": "Comma-separated list of fields to return (e.g., 'title,artist_display,image_id')"
        });
        let id = |what: &str| {
            json!({
                "type": "integer",
                "description": format!("The unique ID of the {}", what),
                "minimum": 1
            })
        };

        match self {
            ToolKind::SearchArtworks => object_schema(
                json!({ "query": query, "limit": limit(DEFAULT_LIMIT), "page": page, "fields": fields }),
                &["query"],
            ),
            ToolKind::GetArtwork => object_schema(
                json!({ "artwork_id": id("artwork"), "fields": fields }),
                &["artwork_id"],
            ),
            ToolKind::SearchAgents | ToolKind::SearchExhibitions => object_schema(
                json!({ "query": query, "limit": limit(DEFAULT_LIMIT), "page": page }),
                &["query"],
            ),
            ToolKind::GetAgent => {
                object_schema(json!({ "agent_id": id("agent/artist") }), &["agent_id"])
            }
            ToolKind::GetExhibition => {
                object_schema(json!({ "exhibition_id": id("exhibition") }), &["exhibition_id"])
            }
            ToolKind::ListGalleries => object_schema(
                json!({ "limit": limit(DEFAULT_GALLERY_LIMIT), "page": page }),
                &[],
            ),
            ToolKind::GetGallery => {
                object_schema(json!({ "gallery_id": id("gallery") }), &["gallery_id"])
            }
            ToolKind::SearchAll => object_schema(
                json!({ "query": query, "limit": limit(DEFAULT_LIMIT) }),
                &["query"],
            ),
        }
    }

    pub fn definition(self, max_limit: u32) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(max_limit),
        }
    }

    /// Validate the arguments and map them onto an endpoint and query string.
    pub fn build_request(self, args: ToolArguments<'_>, max_limit: u32) -> Result<ToolRequest> {
        let request = match self {
            ToolKind::SearchArtworks => ToolRequest::new("artworks/search", ResponseFormat::Artworks)
                .param("q", args.query()?)
                .param("limit", args.limit(DEFAULT_LIMIT, max_limit)?)
                .param("page", args.page()?)
                .optional_param("fields", args.fields()?),
            ToolKind::GetArtwork => ToolRequest::new(
                format!("artworks/{}", args.id("artwork_id")?),
                ResponseFormat::Artworks,
            )
            .optional_param("fields", args.fields()?),
            ToolKind::SearchAgents => ToolRequest::new("agents/search", ResponseFormat::Agents)
                .param("q", args.query()?)
                .param("limit", args.limit(DEFAULT_LIMIT, max_limit)?)
                .param("page", args.page()?),
            ToolKind::GetAgent => ToolRequest::new(
                format!("agents/{}", args.id("agent_id")?),
                ResponseFormat::Agents,
            ),
            ToolKind::SearchExhibitions => {
                ToolRequest::new("exhibitions/search", ResponseFormat::Exhibitions)
                    .param("q", args.query()?)
                    .param("limit", args.limit(DEFAULT_LIMIT, max_limit)?)
                    .param("page", args.page()?)
            }
            ToolKind::GetExhibition => ToolRequest::new(
                format!("exhibitions/{}", args.id("exhibition_id")?),
                ResponseFormat::Exhibitions,
            ),
            ToolKind::ListGalleries => ToolRequest::new("galleries", ResponseFormat::Galleries)
                .param("limit", args.limit(DEFAULT_GALLERY_LIMIT, max_limit)?)
                .param("page", args.page()?),
            ToolKind::GetGallery => ToolRequest::new(
                format!("galleries/{}", args.id("gallery_id")?),
                ResponseFormat::Galleries,
            ),
            ToolKind::SearchAll => {
                let limit = args.limit(DEFAULT_LIMIT, max_limit)?;
                ToolRequest::new(
                    "search",
                    ResponseFormat::SearchHits {
                        limit: limit as usize,
                    },
                )
                .param("q", args.query()?)
                .param("limit", limit)
            }
        };
        Ok(request)
    }
}

fn object_schema(properties: Value, required: &[&str]) -> Value {
    let mut schema = json!({ "type": "object", "properties": properties });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

/// A tool as advertised through `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// A validated call: endpoint, query string and how to render the answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    pub endpoint: String,
    pub params: Vec<QueryParam>,
    pub format: ResponseFormat,
}

impl ToolRequest {
    fn new(endpoint: impl Into<String>, format: ResponseFormat) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: Vec::new(),
            format,
        }
    }

    fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, Some(value.to_string())));
        self
    }

    fn optional_param(mut self, key: &'static str, value: Option<String>) -> Self {
        self.params.push((key, value));
        self
    }
}

/// Text result of a tool call; `is_error` marks failures the caller should see as such.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn success(text: String) -> Self {
        Self {
            text,
            is_error: false,
        }
    }

    pub fn failure(error: &AicError) -> Self {
        let text = match error.category() {
            ErrorCategory::Validation => error.to_string(),
            ErrorCategory::Network | ErrorCategory::Api => format!("Error: {}", error),
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                format!("Unexpected error: {}", error)
            }
        };
        Self {
            text,
            is_error: true,
        }
    }
}

/// Dispatches tool calls onto an [`ArtApi`] and formats the results.
pub struct ToolService<A: ArtApi> {
    api: A,
    max_limit: u32,
}

impl<A: ArtApi> ToolService<A> {
    pub fn new(api: A, max_limit: u32) -> Self {
        Self { api, max_limit }
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        ToolKind::ALL
            .into_iter()
            .map(|kind| kind.definition(self.max_limit))
            .collect()
    }

    /// Never fails: every error becomes a text result flagged `is_error`.
    pub async fn call(&self, name: &str, arguments: &Map<String, Value>) -> ToolOutput {
        match self.execute(name, arguments).await {
            Ok(text) => ToolOutput::success(text),
            Err(e) => {
                if e.is_client_error() {
                    tracing::warn!("Rejected call to {}: {}", name, e);
                } else {
                    tracing::error!(
                        "Error in {}: {} (Category: {:?})",
                        name,
                        e,
                        e.category()
                    );
                }
                ToolOutput::failure(&e)
            }
        }
    }

    async fn execute(&self, name: &str, arguments: &Map<String, Value>) -> Result<String> {
        let kind = ToolKind::from_name(name).ok_or_else(|| AicError::UnknownToolError {
            name: name.to_string(),
        })?;
        let request = kind.build_request(ToolArguments::new(arguments), self.max_limit)?;

        tracing::debug!("Tool {} -> {}", name, request.endpoint);
        let body = self.api.fetch(&request.endpoint, &request.params).await?;
        request.format.render(body)
    }
}
