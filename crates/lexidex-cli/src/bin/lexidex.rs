use std::path::Path;

use clap::{Parser, Subcommand};

use lexidex_cli::commands::{config_ops, query_ops};
use lexidex_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "lexidex", about = "Frequency-ranked prefix dictionary")]
struct Cli {
    /// Custom settings TOML (see `settings-export`)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Write JSON trace logs to this directory
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Most frequent words starting with a prefix
    TopK {
        /// Lexicon file (one word per line)
        lexicon: String,
        /// Prefix to complete (empty for all words)
        #[arg(default_value = "")]
        prefix: String,
        /// Corpus whose words are counted as uses
        #[arg(long)]
        corpus: Option<String>,
        /// Number of results; -1 lists every match
        #[arg(short, long, allow_negative_numbers = true)]
        k: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Average usage count of the words starting with a prefix
    Average {
        /// Lexicon file (one word per line)
        lexicon: String,
        /// Prefix (empty for all words)
        #[arg(default_value = "")]
        prefix: String,
        /// Corpus whose words are counted as uses
        #[arg(long)]
        corpus: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Predict the letter most likely to follow a prefix
    Predict {
        /// Lexicon file (one word per line)
        lexicon: String,
        /// Prefix typed so far
        #[arg(default_value = "")]
        prefix: String,
        /// Corpus whose words are counted as uses
        #[arg(long)]
        corpus: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every word with its usage count
    Dump {
        /// Lexicon file (one word per line)
        lexicon: String,
        /// Corpus whose words are counted as uses
        #[arg(long)]
        corpus: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show trie shape and memory statistics
    Stats {
        /// Lexicon file (one word per line)
        lexicon: String,
        /// Corpus whose words are counted as uses
        #[arg(long)]
        corpus: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_dir.as_deref().map(Path::new));
    if let Some(file) = &cli.settings {
        config_ops::settings_install(file);
    }

    match cli.command {
        Command::TopK {
            lexicon,
            prefix,
            corpus,
            k,
            json,
        } => {
            let trie = query_ops::load(&lexicon, corpus.as_deref());
            query_ops::top_k_cmd(&trie, &prefix, k, json);
        }
        Command::Average {
            lexicon,
            prefix,
            corpus,
            json,
        } => {
            let trie = query_ops::load(&lexicon, corpus.as_deref());
            query_ops::average_cmd(&trie, &prefix, json);
        }
        Command::Predict {
            lexicon,
            prefix,
            corpus,
            json,
        } => {
            let trie = query_ops::load(&lexicon, corpus.as_deref());
            query_ops::predict_cmd(&trie, &prefix, json);
        }
        Command::Dump {
            lexicon,
            corpus,
            json,
        } => {
            let trie = query_ops::load(&lexicon, corpus.as_deref());
            query_ops::dump_cmd(&trie, json);
        }
        Command::Stats {
            lexicon,
            corpus,
            json,
        } => {
            let trie = query_ops::load(&lexicon, corpus.as_deref());
            query_ops::stats_cmd(&trie, json);
        }
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
