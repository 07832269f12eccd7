use clap::{Parser, Subcommand};
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Analytical queries over a movie dataset
#[derive(Parser, Debug, Clone)]
#[command(
    name = "movie-analyzer",
    about = "Analytical queries over a movie dataset",
    version
)]
pub struct Settings {
    /// Path to the movie CSV dataset
    #[arg(long, env = "MOVIE_DATASET")]
    pub dataset: PathBuf,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Logging level
    #[arg(long, global = true, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// One query per subcommand.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Movie count per release year, newest first
    Years,

    /// Movie count per genre, most common first
    Genres,

    /// How often each pair of stars appears together
    CoStars {
        /// Only print the first N pairs
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Top movie titles by runtime or overview length
    TopMovies {
        /// Ranking criterion
        #[arg(long, default_value = "runtime", value_parser = ["runtime", "overview"])]
        by: String,

        /// Number of titles to return
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Top stars by average rating or average gross
    TopStars {
        /// Ranking criterion
        #[arg(long, default_value = "rating", value_parser = ["rating", "gross"])]
        by: String,

        /// Number of stars to return
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Titles matching a genre, minimum rating and maximum runtime
    Search {
        /// Genre the movie must list (exact match)
        #[arg(long)]
        genre: String,

        /// Minimum IMDB rating (inclusive)
        #[arg(long, default_value = "0")]
        min_rating: f32,

        /// Maximum runtime in minutes (inclusive)
        #[arg(long, default_value_t = u32::MAX)]
        max_runtime: u32,
    },

    /// Run every query and print a combined report
    Report {
        /// Length of each ranked list in the report
        #[arg(long, default_value = "10")]
        top: usize,

        /// Genre used for the report's search section
        #[arg(long, default_value = "Drama")]
        genre: String,

        /// Minimum rating used for the report's search section
        #[arg(long, default_value = "8.0")]
        min_rating: f32,

        /// Maximum runtime used for the report's search section
        #[arg(long, default_value = "150")]
        max_runtime: u32,
    },
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::parse().resolved()
    }

    /// Same as [`Settings::load`] but from an explicit argument list.
    pub fn try_load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map(Self::resolved)
    }

    /// `true` when results should be emitted as JSON.
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }

    fn resolved(mut self) -> Self {
        // --debug overrides log level.
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
