use clap::{Args, Parser, Subcommand};

/// CLI arguments for iso3166-updates
#[derive(Debug, Parser)]
#[command(
    name = "iso3166-updates",
    version,
    about = "CLI for querying the ISO 3166 country-code change log"
)]
pub struct CliArgs {
    /// Path to the dataset JSON (or JSON.gz) file (default: bundled iso3166-updates.json)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<String>,

    /// Fetch the dataset over HTTP instead of reading a file (bare `--url` uses the upstream repository)
    #[cfg(feature = "fetch")]
    #[arg(
        short = 'u',
        long = "url",
        global = true,
        conflicts_with = "input",
        num_args = 0..=1,
        default_missing_value = iso3166_updates_core::loader::DATA_REPO_URL
    )]
    pub url: Option<String>,

    /// Engine config JSON (excluded codes, likeness defaults, suggestion threshold)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Log loader and query details to stderr (repeat for more)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded dataset
    Stats,

    /// Query the change log with any combination of filters
    Query(QueryArgs),

    /// Resolve country names to codes
    MatchName {
        /// One or more comma-separated country names
        name: String,

        /// Minimum similarity score (0-100)
        #[arg(short = 'l', long)]
        likeness: Option<u8>,
    },

    /// Search the change descriptions for a keyword or date
    Search {
        /// Search term
        term: String,

        /// Minimum similarity score (0-100)
        #[arg(short = 'l', long)]
        likeness: Option<u8>,

        /// Leave the "Match Score" attribute out of the output
        #[arg(long)]
        exclude_score: bool,
    },

    /// Normalize a code (alpha-2, alpha-3 or numeric) and describe the country
    Code {
        /// e.g. DE, DEU or 276
        code: String,
    },
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Comma-separated country codes (alpha-2, alpha-3 or numeric)
    #[arg(long = "alpha")]
    pub codes: Option<String>,

    /// Year expression: 2010 | 2010,2012 | 2010-2015 | >2010 | <2010 | <>2010,2012
    #[arg(short = 'y', long = "year", allow_hyphen_values = true)]
    pub years: Option<String>,

    /// Comma-separated country names
    #[arg(short = 'n', long = "country-name")]
    pub names: Option<String>,

    /// Month window relative to today: 12 | 12-24
    #[arg(short = 'm', long)]
    pub months: Option<String>,

    /// One date (until today) or two comma-separated dates
    #[arg(short = 'd', long)]
    pub date_range: Option<String>,

    /// Free-text search within the selected records
    #[arg(short = 's', long)]
    pub search: Option<String>,

    /// Minimum similarity score for names and search (0-100)
    #[arg(short = 'l', long)]
    pub likeness: Option<u8>,

    /// Leave the "Match Score" attribute out of search output
    #[arg(long)]
    pub exclude_score: bool,

    /// dateAsc or dateDesc
    #[arg(long)]
    pub sort_by: Option<String>,
}
