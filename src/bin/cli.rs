//! MedSpace CLI
//!
//! Command-line client for a running MedSpace API:
//! - Browse hospitals, facilities, equipment, and HCPs
//! - Book a facility or equipment item
//! - List, cancel, and export bookings
//! - Check server status

use clap::{Parser, Subcommand};
use medspace::booking::{Booking, BookingKind, BookingRequest, BookingStatus};
use medspace::catalog::{Equipment, Facility, Hcp, Hospital};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "medspace")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Book hospital facilities and medical equipment")]
#[command(long_about = "MedSpace connects practitioners with partner hospitals.\nBrowse facilities and equipment, make bookings, and manage them from the terminal.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8082", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List partner hospitals
    Hospitals {
        /// Search by name or location
        #[arg(short, long)]
        query: Option<String>,
    },

    /// List facilities
    Facilities {
        #[arg(short, long)]
        query: Option<String>,
        /// Facility type (operating_room, imaging, laboratory, procedure_room, clinic)
        #[arg(short = 't', long = "type")]
        facility_type: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
    },

    /// List equipment
    Equipment {
        #[arg(short, long)]
        query: Option<String>,
        /// Category (diagnostic, surgical, imaging, treatment)
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
    },

    /// List healthcare professionals
    Hcps {
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Book a facility (hours) or equipment item (days)
    Book {
        /// facility or equipment
        kind: BookingKind,
        /// Catalog id of the item
        id: u32,
        /// Booking date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Start time (HH:MM)
        #[arg(short, long)]
        time: String,
        /// Hours for facilities, days for equipment
        #[arg(short = 'n', long, default_value = "1")]
        duration: u32,
    },

    /// List bookings
    Bookings,

    /// Cancel a booking
    Cancel {
        /// Booking id
        id: i64,
    },

    /// Export bookings
    Export {
        /// csv or json
        #[arg(long, default_value = "csv")]
        as_format: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Deserialize)]
struct ListBody<T> {
    items: Vec<T>,
    total: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryBody {
    confirmed: usize,
    cancelled: usize,
    confirmed_revenue: u64,
}

#[derive(Deserialize)]
struct BookingListBody {
    bookings: Vec<Booking>,
    summary: SummaryBody,
}

struct Client {
    http: reqwest::Client,
    base: String,
}

impl Client {
    fn new(api_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str, params: &[(&str, Option<&str>)]) -> String {
        let query: Vec<String> = params
            .iter()
            .filter_map(|(k, v)| v.map(|v| format!("{}={}", k, urlencoding::encode(v))))
            .collect();

        if query.is_empty() {
            format!("{}{}", self.base, path)
        } else {
            format!("{}{}?{}", self.base, path, query.join("&"))
        }
    }

    async fn get_raw(&self, url: &str) -> anyhow::Result<reqwest::Response> {
        let response = self.http.get(url).send().await?;
        check(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> anyhow::Result<T> {
        Ok(self.get_raw(url).await?.json().await?)
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> anyhow::Result<T> {
        let response = self
            .http
            .post(format!("{}{}", self.base, path))
            .json(body)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }
}

/// Turn an error envelope into an error message
async fn check(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(text);

    anyhow::bail!("{} ({})", message, status)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = Client::new(&cli.api_url);
    let json = cli.format == "json";

    match cli.command {
        Commands::Hospitals { query } => {
            let url = client.url("/api/v1/hospitals", &[("q", query.as_deref())]);
            let body: ListBody<Hospital> = client.get_json(&url).await?;

            if json {
                return print_json(&body.items);
            }
            println!("{:<4} {:<28} {:<22} {:<10} {}", "ID", "Name", "Location", "Facilities", "Rating");
            println!("{}", "-".repeat(74));
            for h in &body.items {
                println!(
                    "{:<4} {:<28} {:<22} {:<10} {:.1}",
                    h.id, h.name, h.location, h.facilities_count, h.rating
                );
            }
            println!("\n{} hospital(s)", body.total);
        }

        Commands::Facilities {
            query,
            facility_type,
            location,
        } => {
            let url = client.url(
                "/api/v1/facilities",
                &[
                    ("q", query.as_deref()),
                    ("type", facility_type.as_deref()),
                    ("location", location.as_deref()),
                ],
            );
            let body: ListBody<Facility> = client.get_json(&url).await?;

            if json {
                return print_json(&body.items);
            }
            println!("{:<4} {:<32} {:<16} {:<24} {}", "ID", "Name", "Type", "Hospital", "Price/hr");
            println!("{}", "-".repeat(88));
            for f in &body.items {
                println!(
                    "{:<4} {:<32} {:<16} {:<24} ${}",
                    f.id,
                    f.name,
                    f.facility_type.label(),
                    f.hospital,
                    f.price
                );
            }
            println!("\n{} facilit{}", body.total, if body.total == 1 { "y" } else { "ies" });
        }

        Commands::Equipment {
            query,
            category,
            location,
        } => {
            let url = client.url(
                "/api/v1/equipment",
                &[
                    ("q", query.as_deref()),
                    ("category", category.as_deref()),
                    ("location", location.as_deref()),
                ],
            );
            let body: ListBody<Equipment> = client.get_json(&url).await?;

            if json {
                return print_json(&body.items);
            }
            println!("{:<4} {:<30} {:<12} {:<24} {:<10} {}", "ID", "Name", "Category", "Hospital", "Price/day", "Availability");
            println!("{}", "-".repeat(96));
            for e in &body.items {
                println!(
                    "{:<4} {:<30} {:<12} {:<24} {:<10} {}",
                    e.id,
                    e.name,
                    e.category.label(),
                    e.hospital,
                    format!("${}", e.price),
                    e.availability
                );
            }
            println!("\n{} item(s)", body.total);
        }

        Commands::Hcps { query } => {
            let url = client.url("/api/v1/hcps", &[("q", query.as_deref())]);
            let body: ListBody<Hcp> = client.get_json(&url).await?;

            if json {
                return print_json(&body.items);
            }
            println!("{:<4} {:<24} {:<18} {:<30} {:<6} {}", "ID", "Name", "Specialty", "Organization", "Rating", "Potential");
            println!("{}", "-".repeat(96));
            for h in &body.items {
                println!(
                    "{:<4} {:<24} {:<18} {:<30} {:<6} ${}",
                    h.id, h.name, h.specialty, h.organization, h.rating, h.potential_value
                );
            }
        }

        Commands::Book {
            kind,
            id,
            date,
            time,
            duration,
        } => {
            let request = BookingRequest::new(kind, id)
                .date(date)
                .time(time)
                .duration(duration);
            let booking: Booking = client.post_json("/api/v1/bookings", &request).await?;

            if json {
                return print_json(&booking);
            }
            println!("Booking confirmed");
            println!("  ID:       {}", booking.id);
            println!("  Item:     {} ({})", booking.item_name, booking.hospital_name);
            println!("  When:     {} at {}", booking.booking_date, booking.start_time);
            println!("  Duration: {} {}", booking.duration, booking.kind.unit());
            println!("  Total:    ${}", booking.total_price);
        }

        Commands::Bookings => {
            let url = client.url("/api/v1/bookings", &[]);
            let body: BookingListBody = client.get_json(&url).await?;

            if json {
                return print_json(&body.bookings);
            }
            if body.bookings.is_empty() {
                println!("No bookings yet.");
                println!();
                println!("Book a facility with:");
                println!("  medspace book facility 1 --date 2024-11-01 --time 09:00 --duration 2");
                return Ok(());
            }

            println!("{:<15} {:<10} {:<32} {:<11} {:<6} {:<9} {}", "ID", "Type", "Item", "Date", "Time", "Total", "Status");
            println!("{}", "-".repeat(100));
            for b in &body.bookings {
                println!(
                    "{:<15} {:<10} {:<32} {:<11} {:<6} {:<9} {}",
                    b.id,
                    b.kind,
                    b.item_name,
                    b.booking_date,
                    b.start_time,
                    format!("${}", b.total_price),
                    b.status.as_str()
                );
            }
            println!();
            println!(
                "{} confirmed, {} cancelled, ${} confirmed revenue",
                body.summary.confirmed, body.summary.cancelled, body.summary.confirmed_revenue
            );
        }

        Commands::Cancel { id } => {
            let booking: Booking = client
                .post_json(&format!("/api/v1/bookings/{}/cancel", id), &serde_json::json!({}))
                .await?;

            if json {
                return print_json(&booking);
            }
            if booking.status == BookingStatus::Cancelled {
                println!("Cancelled booking {} ({})", booking.id, booking.item_name);
            }
        }

        Commands::Export { as_format, output } => {
            let url = client.url("/api/v1/bookings/export", &[("format", Some(as_format.as_str()))]);
            let data = client.get_raw(&url).await?.text().await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &data)?;
                    println!("Exported to {:?}", path);
                }
                None => print!("{}", data),
            }
        }

        Commands::Status => {
            let url = client.url("/health", &[]);
            let health: serde_json::Value = match client.get_json(&url).await {
                Ok(health) => health,
                Err(e) => {
                    eprintln!("Cannot reach MedSpace API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the MedSpace API server is running:");
                    eprintln!("  cargo run --bin medspace-api");
                    std::process::exit(1);
                }
            };

            if json {
                return print_json(&health);
            }
            println!("MedSpace v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("API Status: {}", health["status"].as_str().unwrap_or("unknown"));
            println!(
                "Storage:    {} ({})",
                health["storage"].as_str().unwrap_or("unknown"),
                health["backend"].as_str().unwrap_or("unknown")
            );
            if let Some(count) = health["bookings"].as_u64() {
                println!("Bookings:   {}", count);
            }
            println!(
                "WebSocket:  {} connection(s)",
                health["websocket_connections"].as_u64().unwrap_or(0)
            );
            if let Some(uptime) = health["uptime_seconds"].as_u64() {
                println!("Uptime:     {}", format_duration(uptime));
            }
        }

        Commands::Config { output } => {
            let config = medspace::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", config),
            }
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}
