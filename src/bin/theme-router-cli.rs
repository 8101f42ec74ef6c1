use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "theme-router-cli")]
#[command(about = "Management CLI for the theme router", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8090")]
    url: String,

    #[arg(short, long, env = "THEME_ROUTER_API_KEY", default_value = "CHANGE_ME_IN_PRODUCTION")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check router status
    Status,
    /// List published template routes
    Routes,
    /// Show current permalink rules
    Permalinks,
    /// Rebuild one template's routes from the current rules
    Rebuild {
        /// Template identifier (index, post, archives, tags, tag, categories, category, page)
        template: String,
    },
    /// Change a template's permalink rule and rebuild affected routes
    SetPattern { template: String, pattern: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let request = match cli.command {
        Commands::Status => client.get(format!("{}/admin/status", cli.url)),
        Commands::Routes => client.get(format!("{}/admin/routes", cli.url)),
        Commands::Permalinks => client.get(format!("{}/admin/permalinks", cli.url)),
        Commands::Rebuild { template } => {
            client.post(format!("{}/admin/templates/{}/rebuild", cli.url, template))
        }
        Commands::SetPattern { template, pattern } => client
            .put(format!("{}/admin/permalinks/{}", cli.url, template))
            .json(&serde_json::json!({ "pattern": pattern })),
    };

    let res = request.headers(headers).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
