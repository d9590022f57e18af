//! Connectivity check against the live AIC API.
//!
//! Runs the same requests the tools make and reports what came back.
//! `AIC_BASE_URL` points it at another deployment.

use aic_mcp_server::domain::ports::ArtApi;
use aic_mcp_server::{AicClient, ApiSettings};
use anyhow::{Context, Result};
use serde_json::Value;

fn total(body: &Value) -> u64 {
    body["pagination"]["total"].as_u64().unwrap_or(0)
}

fn param(key: &'static str, value: &str) -> (&'static str, Option<String>) {
    (key, Some(value.to_string()))
}

async fn check(client: &AicClient) -> Result<()> {
    println!("\n1. Testing artwork search...");
    let artworks = client
        .fetch("artworks/search", &[param("q", "Monet"), param("limit", "3")])
        .await
        .context("artwork search")?;
    println!("✓ Artwork search successful");
    println!("  Found {} total results", total(&artworks));

    println!("\n2. Testing artwork retrieval...");
    if let Some(id) = artworks["data"][0]["id"].as_u64() {
        let artwork = client
            .fetch(&format!("artworks/{}", id), &[])
            .await
            .context("artwork retrieval")?;
        println!(
            "✓ Successfully retrieved artwork: {}",
            artwork["data"]["title"].as_str().unwrap_or("Unknown")
        );
    } else {
        println!("- Skipped: search returned no artworks");
    }

    println!("\n3. Testing agent search...");
    let agents = client
        .fetch("agents/search", &[param("q", "Picasso"), param("limit", "1")])
        .await
        .context("agent search")?;
    println!("✓ Agent search successful");
    println!("  Found {} total results", total(&agents));

    println!("\n4. Testing gallery listing...");
    let galleries = client
        .fetch("galleries", &[param("limit", "5")])
        .await
        .context("gallery listing")?;
    println!("✓ Gallery listing successful");
    println!("  Found {} total galleries", total(&galleries));

    println!("\n5. Testing exhibition search...");
    let exhibitions = client
        .fetch(
            "exhibitions/search",
            &[param("q", "impressionism"), param("limit", "1")],
        )
        .await
        .context("exhibition search")?;
    println!("✓ Exhibition search successful");
    println!("  Found {} total results", total(&exhibitions));

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut settings = ApiSettings::default();
    if let Ok(base_url) = std::env::var("AIC_BASE_URL") {
        settings.base_url = base_url;
    }
    let client = AicClient::new(&settings)?;

    println!("Art Institute of Chicago MCP Server - Connection Test");
    println!("{}", "=".repeat(60));
    println!("Testing {} ...", client.base_url());

    match check(&client).await {
        Ok(()) => {
            println!("\n{}", "=".repeat(60));
            println!("✓ All checks passed");
            Ok(())
        }
        Err(e) => {
            println!("\n✗ Check failed: {:#}", e);
            println!("\nPlease check:");
            println!("  1. Your internet connection");
            println!("  2. That {} is reachable", client.base_url());
            println!("  3. Your firewall settings");
            std::process::exit(1);
        }
    }
}
