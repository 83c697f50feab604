// src/bin/populate.rs
// DOCUMENTATION: Seed a running service and summarize its places
// PURPOSE: Command-line helper for local setup (POST /seed, then GET /places)

use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::process;
use std::time::{Duration, Instant};

// --- ANSI colours ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

// --- Response shapes ---

#[derive(Deserialize, Debug)]
struct SeedResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    inserted: Option<usize>,
}

// Documents written by other tools may lack any of these
#[derive(Deserialize, Debug)]
struct ListedPlace {
    #[serde(default)]
    name: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    category: String,
}

#[derive(Deserialize, Debug)]
struct ListResponse {
    items: Vec<ListedPlace>,
}

// --- Client ---

struct Populator {
    base_url: String,
    client: Client,
}

impl Populator {
    fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { base_url, client })
    }

    async fn check_service_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn seed(&self) -> Result<SeedResponse> {
        let response = self
            .client
            .post(format!("{}/seed", self.base_url))
            .send()
            .await
            .context("POST /seed failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("HTTP {} - {}", status, body);
        }

        response
            .json::<SeedResponse>()
            .await
            .context("Failed to parse seed response JSON")
    }

    async fn list(&self) -> Result<Vec<ListedPlace>> {
        let response = self
            .client
            .get(format!("{}/places", self.base_url))
            .send()
            .await
            .context("GET /places failed")?
            .error_for_status()?;

        Ok(response.json::<ListResponse>().await?.items)
    }

    async fn run(&self) -> Result<()> {
        println!("\n{}Checking service status...{}", CYAN, RESET);
        if !self.check_service_health().await {
            bail!(
                "service unavailable at {} (is karnataka-places running?)",
                self.base_url
            );
        }
        println!("{}Service available{}\n", GREEN, RESET);

        let started = Instant::now();
        let seeded = self.seed().await?;
        match (seeded.inserted, seeded.message) {
            (Some(count), _) => println!(
                "{}Seed {}: inserted {} places{}",
                GREEN, seeded.status, count, RESET
            ),
            (None, Some(message)) => {
                println!("{}Seed {}: {}{}", YELLOW, seeded.status, message, RESET)
            }
            (None, None) => println!("Seed {}", seeded.status),
        }

        let places = self.list().await?;
        let mut by_category: BTreeMap<&str, Vec<&ListedPlace>> = BTreeMap::new();
        for place in &places {
            by_category.entry(place.category.as_str()).or_default().push(place);
        }

        println!("\n{}Places by category{}", BOLD, RESET);
        println!("{:<20} {:>6}  Places", "Category", "Count");
        println!("──────────────────────────────────────────────────────────────");
        for (category, entries) in &by_category {
            let listed: Vec<String> = entries
                .iter()
                .map(|p| format!("{} ({})", p.name, p.city))
                .collect();
            println!("{:<20} {:>6}  {}", category, entries.len(), listed.join(", "));
        }
        println!("──────────────────────────────────────────────────────────────");
        println!(
            "  • Total places: {}{}{}",
            GREEN,
            places.len(),
            RESET
        );
        println!("  • Duration: {:.2}s", started.elapsed().as_secs_f64());
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let base_url =
        env::var("PLACES_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

    let result = match Populator::new(base_url) {
        Ok(populator) => populator.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("{}Populate failed: {:#}{}", RED, e, RESET);
        process::exit(1);
    }
}
