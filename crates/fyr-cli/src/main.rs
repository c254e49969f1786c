mod lookup;

use clap::{Args, CommandFactory, Parser, Subcommand};
use fyr_core::PageScheme;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fyr-cli")]
#[command(about = "Find-your-representatives command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the widget form as configured
    Form {
        #[command(flatten)]
        widget: WidgetArgs,
    },
    /// Look up the legislators for an address or a coordinate pair
    Lookup {
        /// Free-text street address to geocode
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        address: Option<String>,
        /// Latitude, skips geocoding (requires --lon)
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude, skips geocoding (requires --lat)
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Scheme of the page hosting the widget (http or https)
        #[arg(long)]
        page_scheme: Option<PageScheme>,
        /// Print normalized records as JSON instead of widget markup
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        widget: WidgetArgs,
    },
}

/// Overrides for the widget options otherwise read from the environment.
#[derive(Debug, Args)]
struct WidgetArgs {
    /// Sunlight API key (defaults to SUNLIGHT_API_KEY)
    #[arg(long)]
    apikey: Option<String>,
    /// Comma-separated provider list, e.g. "congress, openstates"
    #[arg(long)]
    apis: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = fyr_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Form { widget } => {
            let widget_config = lookup::widget_config(&config, widget.apikey, widget.apis)?;
            println!("{}", lookup::run_form(&widget_config));
        }
        Commands::Lookup {
            address,
            lat,
            lon,
            page_scheme,
            json,
            widget,
        } => {
            let widget_config = lookup::widget_config(&config, widget.apikey, widget.apis)?;
            let address = lookup::address_from_args(address, lat, lon)?;
            let page_scheme = page_scheme.unwrap_or(config.page_scheme);
            let output =
                lookup::run_lookup(&config, widget_config, address, page_scheme, json).await?;
            println!("{output}");
        }
    }

    Ok(())
}
