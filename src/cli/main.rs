use anyhow::Result;
use clap::{Parser, Subcommand};
use reqwest::Client;
use serde_json::json;

#[derive(Parser)]
#[command(name = "ticket-cli")]
#[command(about = "Ticket Manager CLI", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080", env = "TICKETS_ENDPOINT")]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tickets with filters, sorting, and pagination
    List {
        #[arg(short, long)]
        status: Option<String>,

        #[arg(short, long)]
        priority: Option<String>,

        #[arg(short, long)]
        tag: Option<String>,

        #[arg(short = 'q', long)]
        search: Option<String>,

        #[arg(long, default_value = "id")]
        sort_by: String,

        #[arg(long, default_value = "desc")]
        order: String,

        #[arg(long)]
        then_by: Option<String>,

        #[arg(long, default_value = "desc")]
        then_order: String,

        #[arg(short, long, default_value = "200")]
        limit: usize,

        #[arg(short, long, default_value = "0")]
        offset: usize,
    },

    /// Get a ticket by id
    Get {
        #[arg(value_name = "TICKET_ID")]
        id: u64,
    },

    /// Create a ticket
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: String,

        #[arg(short, long, default_value = "Low")]
        priority: String,

        #[arg(short, long, default_value = "Open")]
        status: String,

        #[arg(short = 'g', long)]
        tag: Vec<String>,
    },

    /// Update fields of a ticket
    Update {
        #[arg(value_name = "TICKET_ID")]
        id: u64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        priority: Option<String>,

        #[arg(short, long)]
        status: Option<String>,

        #[arg(short = 'g', long)]
        tag: Option<Vec<String>>,
    },

    /// Delete a ticket
    Delete {
        #[arg(value_name = "TICKET_ID")]
        id: u64,
    },

    /// Check server health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Commands::List {
            status,
            priority,
            tag,
            search,
            sort_by,
            order,
            then_by,
            then_order,
            limit,
            offset,
        } => {
            let mut query: Vec<(&str, String)> = vec![
                ("sortBy", sort_by),
                ("order", order),
                ("thenOrder", then_order),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ];
            if let Some(status) = status {
                query.push(("status", status));
            }
            if let Some(priority) = priority {
                query.push(("priority", priority));
            }
            if let Some(tag) = tag {
                query.push(("tag", tag));
            }
            if let Some(search) = search {
                query.push(("search", search));
            }
            if let Some(then_by) = then_by {
                query.push(("thenBy", then_by));
            }

            let response = client
                .get(format!("{}/v1/tickets", cli.endpoint))
                .query(&query)
                .send()
                .await?;

            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Get { id } => {
            let response = client
                .get(format!("{}/v1/tickets/{}", cli.endpoint, id))
                .send()
                .await?;

            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Create {
            title,
            description,
            priority,
            status,
            tag,
        } => {
            let response = client
                .post(format!("{}/v1/tickets", cli.endpoint))
                .json(&json!({
                    "title": title,
                    "description": description,
                    "priority": priority,
                    "status": status,
                    "tags": tag,
                }))
                .send()
                .await?;

            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Update {
            id,
            title,
            description,
            priority,
            status,
            tag,
        } => {
            // Only the fields given on the command line go into the patch.
            let mut patch = serde_json::Map::new();
            if let Some(title) = title {
                patch.insert("title".to_string(), json!(title));
            }
            if let Some(description) = description {
                patch.insert("description".to_string(), json!(description));
            }
            if let Some(priority) = priority {
                patch.insert("priority".to_string(), json!(priority));
            }
            if let Some(status) = status {
                patch.insert("status".to_string(), json!(status));
            }
            if let Some(tag) = tag {
                patch.insert("tags".to_string(), json!(tag));
            }

            let response = client
                .patch(format!("{}/v1/tickets/{}", cli.endpoint, id))
                .json(&serde_json::Value::Object(patch))
                .send()
                .await?;

            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Delete { id } => {
            let response = client
                .delete(format!("{}/v1/tickets/{}", cli.endpoint, id))
                .send()
                .await?;

            if response.status().is_success() {
                println!("Ticket {} deleted", id);
            } else {
                let body: serde_json::Value = response.json().await?;
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
        }

        Commands::Health => {
            let response = client
                .get(format!("{}/health", cli.endpoint))
                .send()
                .await?;

            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}
