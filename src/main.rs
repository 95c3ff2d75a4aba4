use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use tracing_subscriber::EnvFilter;

use timetable_maker::display::{print_grid, write_svg_to_file};
use timetable_maker::{generate_schedule, load_schedule, web, AppConfig, GenerateOptions};

#[derive(Parser)]
#[command(name = "timetable-maker", version, about = "Rotating-day school timetable generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a schedule file (.json or .csv) to SVG
    Generate {
        input: PathBuf,
        #[arg(short, long, default_value = "schedule.svg")]
        output: PathBuf,
        #[arg(long)]
        title: Option<String>,
        /// Name shown on X-Day instead of Foundations; pass "" to keep Foundations
        #[arg(long)]
        free_period_name: Option<String>,
        /// Use 100% width and height instead of pixel dimensions
        #[arg(long)]
        responsive: bool,
    },
    /// Start the web server
    Web {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();

    match cli.command {
        Commands::Generate {
            input,
            output,
            title,
            free_period_name,
            responsive,
        } => {
            let raw = load_schedule(&input)?;
            let options = GenerateOptions {
                title: title.unwrap_or(config.default_title),
                free_period_name: free_period_name.unwrap_or(config.default_free_period_name),
                exact_dimensions: !responsive,
                ..Default::default()
            };

            let generated = generate_schedule(&raw, &options)?;

            print_grid(&options.title, &generated.grid)?;
            write_svg_to_file(&generated.svg, &output)?;
            info!("Schedule saved to {}", output.display());
        }
        Commands::Web { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            println!("Access the site at http://localhost:{}", config.port);
            web::start_server(config).await?;
        }
    }

    Ok(())
}
