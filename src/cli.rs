use clap::{Parser, Subcommand};
use nu_plugin_songrec::algo::mood;
use nu_plugin_songrec::config::{ColumnNames, RecommenderConfig, DEFAULT_LIMIT};
use nu_plugin_songrec::{ops, Recommender};
use serde_json::Value;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "songrec",
    version,
    about = "Song recommendations from lyric similarity, artist and mood"
)]
struct Cli {
    /// Start as an MCP (Model Context Protocol) server on stdio.
    /// Requires --dataset; the catalog is built once before serving.
    #[cfg(feature = "mcp")]
    #[arg(long)]
    mcp: bool,

    /// CSV (or .json array) dataset with lyrics, song name and artist columns
    #[arg(short, long, global = true)]
    dataset: Option<PathBuf>,

    /// Column holding lyrics
    #[arg(long, global = true, default_value = "text")]
    text_column: String,

    /// Column holding the song name
    #[arg(long, global = true, default_value = "song")]
    name_column: String,

    /// Column holding the artist
    #[arg(long, global = true, default_value = "artist")]
    artist_column: String,

    /// Maximum number of results per query
    #[arg(short = 'n', long, global = true, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Names of the songs with the most similar lyrics
    Song {
        /// Song name (case-insensitive)
        name: String,
    },
    /// Like `song`, with artist, mood and similarity score per hit
    Similar {
        /// Song name (case-insensitive)
        name: String,
    },
    /// Songs by an artist, in catalog order
    Artist {
        /// Artist name (case-insensitive)
        artist: String,
    },
    /// Songs tagged with a mood, in catalog order
    Mood {
        /// Mood label, e.g. sad, romantic, dark_moody
        mood: String,
    },
    /// Tag JSON records read from stdin with a `_mood` column
    Classify {
        /// JSON field containing lyrics
        #[arg(short, long, default_value = "text")]
        field: String,
    },
    /// Print the mood lexicon in precedence order
    Moods,
    /// Summarize the catalog
    Stats,
}

impl Cli {
    fn config(&self) -> RecommenderConfig {
        RecommenderConfig {
            limit: self.limit,
            columns: ColumnNames {
                text: self.text_column.clone(),
                name: self.name_column.clone(),
                artist: self.artist_column.clone(),
            },
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    // ── MCP server mode ─────────────────────────────────────────────────
    #[cfg(feature = "mcp")]
    if cli.mcp {
        let rec = load(cli.dataset.as_deref(), &config);
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| fail(&e.to_string()));
        rt.block_on(async {
            if let Err(e) = nu_plugin_songrec::mcp::serve_stdio(rec).await {
                fail(&format!("MCP server error: {e}"));
            }
        });
        return;
    }

    // ── Normal subcommand dispatch ──────────────────────────────────────
    let command = cli
        .command
        .unwrap_or_else(|| fail("No subcommand provided. Run `songrec --help` for usage."));

    let output = match command {
        Commands::Song { name } => {
            ops::op_recommend_song(&load(cli.dataset.as_deref(), &config), &name)
        }
        Commands::Similar { name } => ops::op_similar(&load(cli.dataset.as_deref(), &config), &name),
        Commands::Artist { artist } => {
            ops::op_recommend_artist(&load(cli.dataset.as_deref(), &config), &artist)
        }
        Commands::Mood { mood } => {
            ops::op_recommend_mood(&load(cli.dataset.as_deref(), &config), &mood)
        }
        Commands::Classify { field } => {
            ops::op_classify(&read_stdin_json(), &field, &mood::default_classifier())
        }
        Commands::Moods => ops::op_moods(&mood::default_classifier()),
        Commands::Stats => ops::op_stats(&load(cli.dataset.as_deref(), &config)),
    };

    print_json(&output);
    if ops::is_not_found(&output) {
        std::process::exit(1);
    }
}

fn fail(msg: &str) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

/// Load the catalog from a `.json` array of records or, otherwise, a CSV file.
fn load(dataset: Option<&Path>, config: &RecommenderConfig) -> Recommender {
    let path = dataset.unwrap_or_else(|| fail("This command requires --dataset <CSV|JSON>"));
    let result = if path.extension().is_some_and(|ext| ext == "json") {
        let json = std::fs::read_to_string(path)
            .unwrap_or_else(|e| fail(&format!("Failed to read '{}': {e}", path.display())));
        ops::load_rows(&json_records(&json), config, mood::default_classifier())
    } else {
        ops::load_csv(path, config)
    };
    result.unwrap_or_else(|e| fail(&e))
}

fn read_stdin_json() -> Vec<Value> {
    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        fail(&format!("failed to read stdin: {e}"));
    }
    json_records(&buf)
}

fn json_records(text: &str) -> Vec<Value> {
    let parsed: Value =
        serde_json::from_str(text).unwrap_or_else(|e| fail(&format!("invalid JSON: {e}")));
    match parsed {
        Value::Array(arr) => arr,
        single => vec![single],
    }
}

fn print_json(value: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    );
}
