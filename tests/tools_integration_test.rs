use aic_mcp_server::{AicClient, ApiSettings, McpServer, ToolService};
use anyhow::Result;
use httpmock::prelude::*;
use serde_json::{json, Value};

fn server_for(base_url: String) -> Result<McpServer<AicClient>> {
    let settings = ApiSettings {
        base_url,
        timeout_seconds: 5,
        ..ApiSettings::default()
    };
    let client = AicClient::new(&settings)?;
    Ok(McpServer::new(ToolService::new(client, settings.max_limit)))
}

/// Send one `tools/call` and return `(text, is_error)`.
async fn call_tool(server: &McpServer<AicClient>, name: &str, arguments: Value) -> (String, bool) {
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    });
    let response = server
        .handle_message(&request.to_string())
        .await
        .expect("tools/call must be answered");
    let result = response.result.expect("tool failures are results");
    (
        result["content"][0]["text"].as_str().unwrap_or_default().to_string(),
        result["isError"].as_bool().unwrap_or(false),
    )
}

#[tokio::test]
async fn test_search_artworks_end_to_end() -> Result<()> {
    let api = MockServer::start_async().await;
    let search_mock = api
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/artworks/search")
                .query_param("q", "Monet")
                .query_param("limit", "2")
                .query_param("page", "3")
                .query_param("fields", "id,title,artist_display,image_id");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "pagination": {"total": 301, "limit": 2, "offset": 4, "total_pages": 151, "current_page": 3},
                    "data": [
                        {"id": 16568, "title": "Water Lilies", "artist_display": "Claude Monet\nFrench, 1840-1926", "image_id": "3c27b499-af56-f0d5-93b5-a7f2f1ad5813"},
                        {"id": 16571, "title": "Arrival of the Normandy Train, Gare Saint-Lazare", "artist_display": "Claude Monet\nFrench, 1840-1926"}
                    ]
                }));
        })
        .await;

    let server = server_for(api.url("/api/v1"))?;
    let (text, is_error) = call_tool(
        &server,
        "search_artworks",
        json!({"query": "Monet", "limit": 2, "page": 3, "fields": "id,title,artist_display,image_id"}),
    )
    .await;

    search_mock.assert_async().await;
    assert!(!is_error);
    assert!(text.contains("Monet"));
    assert!(text.contains("**Water Lilies**"));
    assert!(text.contains("https://www.artic.edu/iiif/2/3c27b499-af56-f0d5-93b5-a7f2f1ad5813/full/843,/0/default.jpg"));
    assert!(text.contains("View online: https://www.artic.edu/artworks/16571"));
    assert!(text.ends_with("Showing 2 of 301 total results (Page 3/151)"));
    Ok(())
}

#[tokio::test]
async fn test_out_of_bounds_parameters_never_hit_the_api() -> Result<()> {
    let api = MockServer::start_async().await;
    let any_request = api
        .mock_async(|when, then| {
            when.path_contains("/api/v1");
            then.status(200).json_body(json!({"data": []}));
        })
        .await;

    let server = server_for(api.url("/api/v1"))?;

    let (text, is_error) = call_tool(&server, "search_artworks", json!({"query": "Monet", "limit": 0})).await;
    assert!(is_error);
    assert_eq!(text, "Invalid value for 'limit': 0 (must be between 1 and 100)");

    let (text, is_error) = call_tool(&server, "list_galleries", json!({"limit": 101})).await;
    assert!(is_error);
    assert!(text.contains("'limit'"));

    let (text, is_error) = call_tool(&server, "search_exhibitions", json!({"query": "x", "page": -1})).await;
    assert!(is_error);
    assert!(text.contains("'page'"));

    let (text, is_error) = call_tool(&server, "get_agent", json!({"agent_id": "Picasso"})).await;
    assert!(is_error);
    assert!(text.contains("must be a positive integer"));

    let (text, is_error) = call_tool(&server, "search_all", json!({})).await;
    assert!(is_error);
    assert_eq!(text, "Missing required parameter: query");

    any_request.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn test_unknown_artwork_id_surfaces_api_error() -> Result<()> {
    let api = MockServer::start_async().await;
    let not_found = api
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/artworks/999999999");
            then.status(404)
                .body(r#"{"status":404,"error":"Not found","detail":"The item you requested cannot be found."}"#);
        })
        .await;

    let server = server_for(api.url("/api/v1"))?;
    let (text, is_error) = call_tool(&server, "get_artwork", json!({"artwork_id": 999999999})).await;

    not_found.assert_async().await;
    assert!(is_error);
    assert!(text.starts_with("Error: API request failed: 404"));
    assert!(text.contains("cannot be found"));
    Ok(())
}

#[tokio::test]
async fn test_list_galleries_uses_gallery_defaults() -> Result<()> {
    let api = MockServer::start_async().await;
    let galleries = api
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/galleries")
                .query_param("limit", "20")
                .query_param("page", "1");
            then.status(200).json_body(json!({
                "pagination": {"total": 2, "limit": 20, "current_page": 1, "total_pages": 1},
                "data": [
                    {"id": 2147475902, "title": "Gallery 240", "number": "240", "floor": "2", "is_closed": false},
                    {"id": 2147483599, "title": "Gallery 101", "number": "101", "floor": "1", "is_closed": true}
                ]
            }));
        })
        .await;

    let server = server_for(api.url("/api/v1"))?;
    let (text, is_error) = call_tool(&server, "list_galleries", json!({})).await;

    galleries.assert_async().await;
    assert!(!is_error);
    assert!(text.contains("**Gallery 240**\nID: 2147475902\nGallery Number: 240\nFloor: 2\nStatus: Open"));
    assert!(text.contains("Status: Closed"));
    assert!(text.ends_with("Showing 2 of 2 total results"));
    Ok(())
}

#[tokio::test]
async fn test_detail_tools_hit_record_endpoints() -> Result<()> {
    let api = MockServer::start_async().await;
    let agent = api
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/agents/35809");
            then.status(200).json_body(json!({
                "data": {"id": 35809, "title": "Claude Monet", "birth_date": 1840, "death_date": 1926,
                         "description": "<p>Claude Monet was a founder of French Impressionist painting.</p>"}
            }));
        })
        .await;
    let exhibition = api
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/exhibitions/9511");
            then.status(200).json_body(json!({
                "data": {"id": 9511, "title": "Monet and Chicago", "status": "Closed",
                         "web_url": "https://www.artic.edu/exhibitions/9511/monet-and-chicago"}
            }));
        })
        .await;

    let server = server_for(api.url("/api/v1"))?;

    let (text, is_error) = call_tool(&server, "get_agent", json!({"agent_id": 35809})).await;
    assert!(!is_error);
    assert!(text.contains("Birth: 1840\nDeath: 1926"));
    assert!(text.contains("Description: Claude Monet was a founder of French Impressionist painting."));

    let (text, _) = call_tool(&server, "get_exhibition", json!({"exhibition_id": "9511"})).await;
    assert!(text.contains("More info: https://www.artic.edu/exhibitions/9511/monet-and-chicago"));
    assert!(text.contains("Location: Unknown location"));

    agent.assert_async().await;
    exhibition.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_search_all_lists_mixed_models() -> Result<()> {
    let api = MockServer::start_async().await;
    let search = api
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/search")
                .query_param("q", "cats")
                .query_param("limit", "2");
            then.status(200).json_body(json!({
                "pagination": {"total": 1234},
                "data": [
                    {"id": 1, "title": "Cat and Kittens", "api_model": "artworks"},
                    {"id": 2, "title": "Cats of the World", "api_model": "exhibitions"}
                ]
            }));
        })
        .await;

    let server = server_for(api.url("/api/v1"))?;
    let (text, is_error) = call_tool(&server, "search_all", json!({"query": "cats", "limit": 2})).await;

    search.assert_async().await;
    assert!(!is_error);
    assert_eq!(
        text,
        "**Cat and Kittens** (Type: artworks, ID: 1)\n**Cats of the World** (Type: exhibitions, ID: 2)\n\nShowing 2 of 1234 total results"
    );
    Ok(())
}

#[tokio::test]
async fn test_empty_results_message() -> Result<()> {
    let api = MockServer::start_async().await;
    api.mock_async(|when, then| {
        when.method(GET).path("/api/v1/agents/search");
        then.status(200)
            .json_body(json!({"pagination": {"total": 0}, "data": []}));
    })
    .await;

    let server = server_for(api.url("/api/v1"))?;
    let (text, is_error) = call_tool(&server, "search_agents", json!({"query": "zzzzzz"})).await;

    assert!(!is_error);
    assert_eq!(text, "No agents found.");
    Ok(())
}

#[tokio::test]
async fn test_unreachable_api_is_reported_as_text() -> Result<()> {
    // Nothing listens on port 9 (discard) in the test environment.
    let server = server_for("http://127.0.0.1:9/api/v1".to_string())?;
    let (text, is_error) = call_tool(&server, "get_gallery", json!({"gallery_id": 1})).await;

    assert!(is_error);
    assert!(text.starts_with("Error: Failed to connect to API"));
    Ok(())
}
