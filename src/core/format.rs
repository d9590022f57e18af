//! Text rendering of AIC API responses.
//!
//! Each record becomes a small markdown block; blocks are joined with a
//! horizontal rule and followed by a pagination footer when the API sent one.

use crate::domain::model::{
    Agent, ApiResponse, Artwork, Exhibition, Gallery, Pagination, SearchHit,
};
use crate::utils::error::Result;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::OnceLock;

pub const RECORD_SEPARATOR: &str = "\n---\n";
pub const DESCRIPTION_LIMIT: usize = 300;
pub const MAX_RECORDS: usize = 10;
pub const MAX_GALLERY_RECORDS: usize = 20;

const IIIF_BASE_URL: &str = "https://www.artic.edu/iiif/2";
const ARTWORK_WEB_URL: &str = "https://www.artic.edu/artworks";

/// The record shape a tool's response is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Artworks,
    Agents,
    Exhibitions,
    Galleries,
    /// Mixed-model hits of `/search`, at most `limit` lines.
    SearchHits { limit: usize },
}

impl ResponseFormat {
    pub fn render(self, body: Value) -> Result<String> {
        match self {
            ResponseFormat::Artworks => format_artworks(body),
            ResponseFormat::Agents => format_agents(body),
            ResponseFormat::Exhibitions => format_exhibitions(body),
            ResponseFormat::Galleries => format_galleries(body),
            ResponseFormat::SearchHits { limit } => format_search_hits(body, limit),
        }
    }
}

pub fn format_artworks(body: Value) -> Result<String> {
    render_records::<Artwork>(
        body,
        "artwork",
        MAX_RECORDS,
        artwork_block,
        |shown, pagination| {
            format!(
                "\nShowing {} of {} total results (Page {}/{})",
                shown,
                pagination.total.unwrap_or(0),
                pagination.current_page.unwrap_or(1),
                pagination.total_pages.unwrap_or(1)
            )
        },
    )
}

pub fn format_agents(body: Value) -> Result<String> {
    render_records::<Agent>(body, "agent", MAX_RECORDS, agent_block, total_footer)
}

pub fn format_exhibitions(body: Value) -> Result<String> {
    render_records::<Exhibition>(
        body,
        "exhibition",
        MAX_RECORDS,
        exhibition_block,
        total_footer,
    )
}

pub fn format_galleries(body: Value) -> Result<String> {
    render_records::<Gallery>(
        body,
        "gallery",
        MAX_GALLERY_RECORDS,
        gallery_block,
        total_footer,
    )
}

pub fn format_search_hits(body: Value, limit: usize) -> Result<String> {
    let response: ApiResponse<SearchHit> = serde_json::from_value(body)?;
    let hits = response.data.map(|d| d.into_vec()).unwrap_or_default();
    if hits.is_empty() {
        return Ok("No results found.".to_string());
    }

    let lines: Vec<String> = hits
        .iter()
        .take(limit)
        .map(|hit| {
            format!(
                "**{}** (Type: {}, ID: {})",
                value_or(&hit.title, "Untitled"),
                value_or(&hit.api_model, "unknown"),
                value_or(&hit.id, "Unknown")
            )
        })
        .collect();

    let mut text = lines.join("\n");
    if let Some(pagination) = response.pagination {
        text.push_str(&format!(
            "\n\nShowing {} of {} total results",
            lines.len(),
            pagination.total.unwrap_or(0)
        ));
    }
    Ok(text)
}

fn render_records<T: DeserializeOwned>(
    body: Value,
    kind: &str,
    cap: usize,
    block: impl Fn(&T) -> String,
    footer: impl Fn(usize, &Pagination) -> String,
) -> Result<String> {
    let response: ApiResponse<T> = serde_json::from_value(body)?;
    let Some(data) = response.data else {
        return Ok(format!("No {} data found.", kind));
    };

    let records = data.into_vec();
    if records.is_empty() {
        return Ok(format!("No {} found.", plural(kind)));
    }

    let mut blocks: Vec<String> = records.iter().take(cap).map(block).collect();
    if let Some(pagination) = &response.pagination {
        blocks.push(footer(blocks.len(), pagination));
    }
    Ok(blocks.join(RECORD_SEPARATOR))
}

fn total_footer(shown: usize, pagination: &Pagination) -> String {
    format!(
        "\nShowing {} of {} total results",
        shown,
        pagination.total.unwrap_or(0)
    )
}

fn plural(kind: &str) -> String {
    match kind.strip_suffix('y') {
        Some(stem) => format!("{}ies", stem),
        None => format!("{}s", kind),
    }
}

fn artwork_block(artwork: &Artwork) -> String {
    let description = text(&artwork.short_description)
        .filter(|d| !d.trim().is_empty())
        .or_else(|| text(&artwork.description));

    let mut block = format!(
        "\n**{}**\nID: {}\nArtist: {}\nDate: {}\nMedium: {}\nOrigin: {}\nDescription: {}\n",
        value_or(&artwork.title, "Untitled"),
        value_or(&artwork.id, "Unknown"),
        value_or(&artwork.artist_display, "Unknown artist"),
        value_or(&artwork.date_display, "Unknown date"),
        value_or(&artwork.medium_display, "Unknown medium"),
        value_or(&artwork.place_of_origin, "Unknown origin"),
        description_text(description.as_deref())
    );

    if let Some(image_id) = text(&artwork.image_id).filter(|id| !id.is_empty()) {
        block.push_str(&format!("Image: {}\n", iiif_image_url(&image_id)));
    }
    if artwork.id.is_some() {
        block.push_str(&format!(
            "View online: {}/{}\n",
            ARTWORK_WEB_URL,
            value_or(&artwork.id, "")
        ));
    }
    block
}

fn agent_block(agent: &Agent) -> String {
    format!(
        "\n**{}**\nID: {}\nBirth: {}\nDeath: {}\nDescription: {}\n",
        value_or(&agent.title, "Unknown"),
        value_or(&agent.id, "Unknown"),
        value_or(&agent.birth_date, "Unknown"),
        value_or(&agent.death_date, "Unknown"),
        description_text(text(&agent.description).as_deref())
    )
}

fn exhibition_block(exhibition: &Exhibition) -> String {
    let mut block = format!(
        "\n**{}**\nID: {}\nStatus: {}\nDates: {} to {}\nLocation: {}\nDescription: {}\n",
        value_or(&exhibition.title, "Untitled Exhibition"),
        value_or(&exhibition.id, "Unknown"),
        value_or(&exhibition.status, "Unknown"),
        value_or(&exhibition.aic_start_at, "Unknown"),
        value_or(&exhibition.aic_end_at, "Unknown"),
        value_or(&exhibition.gallery_title, "Unknown location"),
        description_text(text(&exhibition.short_description).as_deref())
    );

    if let Some(web_url) = text(&exhibition.web_url).filter(|u| !u.is_empty()) {
        block.push_str(&format!("More info: {}\n", web_url));
    }
    block
}

fn gallery_block(gallery: &Gallery) -> String {
    let closed = gallery
        .is_closed
        .as_ref()
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let status = if closed {
        "Closed"
    } else {
        "Open"
    };

    format!(
        "\n**{}**\nID: {}\nGallery Number: {}\nFloor: {}\nStatus: {}\n",
        value_or(&gallery.title, "Unknown Gallery"),
        value_or(&gallery.id, "Unknown"),
        value_or(&gallery.number, "Unknown"),
        value_or(&gallery.floor, "Unknown"),
        status
    )
}

/// IIIF URL for the 843px-wide rendition the AIC website uses.
pub fn iiif_image_url(image_id: &str) -> String {
    format!("{}/{}/full/843,/0/default.jpg", IIIF_BASE_URL, image_id)
}

/// Strings render bare, other JSON values via their JSON text.
fn text(value: &Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

fn value_or(value: &Option<Value>, default: &str) -> String {
    text(value).unwrap_or_else(|| default.to_string())
}

fn description_text(raw: Option<&str>) -> String {
    match raw.map(clean_html).filter(|d| !d.is_empty()) {
        Some(description) => truncate(&description, DESCRIPTION_LIMIT),
        None => "No description available".to_string(),
    }
}

fn html_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("static pattern is valid"))
}

/// Drop HTML markup, decode the common entities and collapse whitespace.
pub fn clean_html(raw: &str) -> String {
    let stripped = html_tag_pattern().replace_all(raw, " ");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut to `limit` characters, marking the cut with `...`.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let head: String = text.chars().take(limit).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
