use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "dashboard-cli")]
#[command(about = "Query CLI for the Space Data Proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the near-Earth object feed
    Neo {
        /// Feed window start (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// Feed window end (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Fetch orbital data for one small body
    Orbital {
        /// SBDB designation or name
        #[arg(long)]
        query: Option<String>,
    },
    /// Fetch significant earthquakes
    Earthquakes {
        /// Catalog window start (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// Minimum magnitude filter
        #[arg(long)]
        min_magnitude: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Neo {
            start_date,
            end_date,
        } => {
            let mut params = Vec::new();
            if let Some(v) = &start_date {
                params.push(("start_date", v.as_str()));
            }
            if let Some(v) = &end_date {
                params.push(("end_date", v.as_str()));
            }
            let res = client
                .get(format!("{}/nasa-neo", cli.url))
                .query(&params)
                .send()
                .await?;
            print_envelope(res, "Near Earth Objects").await?;
        }
        Commands::Orbital { query } => {
            let mut params = Vec::new();
            if let Some(v) = &query {
                params.push(("query", v.as_str()));
            }
            let res = client
                .get(format!("{}/nasa-orbital", cli.url))
                .query(&params)
                .send()
                .await?;
            print_envelope(res, "orbital data").await?;
        }
        Commands::Earthquakes {
            start_date,
            min_magnitude,
        } => {
            let mut params = Vec::new();
            if let Some(v) = &start_date {
                params.push(("start_date", v.as_str()));
            }
            if let Some(v) = &min_magnitude {
                params.push(("min_magnitude", v.as_str()));
            }
            let res = client
                .get(format!("{}/earthquake-data", cli.url))
                .query(&params)
                .send()
                .await?;
            print_envelope(res, "earthquake records").await?;
        }
    }

    Ok(())
}

async fn print_envelope(
    res: reqwest::Response,
    noun: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let json: Value = res.json().await?;
    let success = json
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !success {
        let message = json
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        eprintln!("Error: {}", message);
        return Ok(());
    }

    match json.get("data") {
        Some(Value::Array(items)) => println!("Loaded {} {}", items.len(), noun),
        _ => println!("Loaded {}", noun),
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
