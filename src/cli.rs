use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use skatefinder::{
    JsonPresenter, LocationInput, Presenter, ProviderSet, SearchTrigger, SkateFinderConfig,
    SkateparkSearch, TerminalPresenter, logging,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "skatefinder",
    version,
    about = "Find nearby skateparks ranked by distance, with weather and reviews"
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "SKATEFINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON instead of cards
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search around a place name or address.
    Search {
        /// Location text, e.g. "Croydon" or "SW9 0DA".
        location: String,
    },

    /// Search around the current device position.
    Nearby,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = SkateFinderConfig::load_from_path(self.config.clone())?;
        logging::init(&config.logging, self.verbose)?;

        let config_source = self
            .config
            .clone()
            .or_else(SkateFinderConfig::get_config_path)
            .filter(|path| path.exists());
        tracing::debug!(
            "Using config from: {}",
            config_source.map_or_else(|| "defaults".to_string(), |p| p.display().to_string())
        );

        let providers = ProviderSet::from_config(&config)?;
        let presenter: Arc<dyn Presenter> = if self.json {
            Arc::new(JsonPresenter::default())
        } else {
            Arc::new(TerminalPresenter)
        };
        let search = SkateparkSearch::new(providers, presenter);

        let (input, trigger) = match self.command {
            Some(Command::Search { location }) => {
                (LocationInput::Text(location), SearchTrigger::UserSearch)
            }
            Some(Command::Nearby) => (LocationInput::Device, SearchTrigger::DeviceLocation),
            None => (
                LocationInput::Text(config.search.initial_location.clone()),
                SearchTrigger::InitialLoad,
            ),
        };

        search
            .search(input, trigger)
            .await
            .with_context(|| "Skatepark search failed")?;

        Ok(())
    }
}
