use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser, Debug)]
#[command(name = "customer-store-cli")]
#[command(about = "CLI for interacting with the customer store server", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "CUSTOMER_STORE_URL", default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a customer
    Create {
        /// Customer name
        #[arg(short, long)]
        name: String,
        /// Customer email address
        #[arg(short, long)]
        email: String,
        /// Postal address
        #[arg(short, long)]
        address: Option<String>,
        /// Nine-digit VAT number
        #[arg(long)]
        vat_number: Option<String>,
    },

    /// Show a customer
    Get {
        /// Customer id
        id: String,
    },

    /// Delete a customer
    Delete {
        /// Customer id
        id: String,
    },

    /// List customers
    List {
        /// Exact name to match, ignoring case
        #[arg(short, long)]
        name: Option<String>,
        /// Exact email to match, ignoring case
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Geolocate a customer's address
    Geolocate {
        /// Customer id
        id: String,
    },
}

struct CustomerClient {
    http: reqwest::Client,
    base_url: String,
}

impl CustomerClient {
    fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("{}/api/customers", base_url.trim_end_matches('/')),
        }
    }

    fn customer_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn run(&self, command: Commands) -> Result<()> {
        let response = match command {
            Commands::Create {
                name,
                email,
                address,
                vat_number,
            } => {
                let body = json!({
                    "name": name,
                    "emailAddress": email,
                    "address": address,
                    "vatNumber": vat_number,
                });
                self.http.post(&self.base_url).json(&body).send().await
            }
            Commands::Get { id } => self.http.get(self.customer_url(&id)).send().await,
            Commands::Delete { id } => self.http.delete(self.customer_url(&id)).send().await,
            Commands::List { name, email } => {
                let mut query = Vec::new();
                if let Some(name) = name {
                    query.push(("name", name));
                }
                if let Some(email) = email {
                    query.push(("email", email));
                }
                self.http.get(&self.base_url).query(&query).send().await
            }
            Commands::Geolocate { id } => {
                self.http
                    .get(format!("{}/geolocation", self.customer_url(&id)))
                    .send()
                    .await
            }
        }
        .with_context(|| format!("Failed to reach {}", self.base_url))?;

        let status = response.status();
        let text = response.text().await.context("Failed to read response")?;

        if !text.is_empty() {
            let rendered = match serde_json::from_str::<Value>(&text) {
                Ok(value) => serde_json::to_string_pretty(&value)?,
                Err(_) => text,
            };
            println!("{}", rendered);
        }

        if !status.is_success() {
            anyhow::bail!("Request failed with status {}", status);
        }

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    CustomerClient::new(&cli.url).run(cli.command).await
}
