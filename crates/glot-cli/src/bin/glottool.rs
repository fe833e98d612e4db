use std::fs;
use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};

use glot_cli::commands::{config_ops, form_ops, sound_ops};
use glot_engine::Language;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(name = "glottool", about = "Conlang grammar diagnostics")]
struct Cli {
    /// Write a JSON trace log into this directory (requires --features trace)
    #[arg(long, global = true)]
    trace_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Produce one form of a word
    Decline {
        /// Language definition TOML
        def: String,
        /// Word id
        word: u32,
        /// Combination id, e.g. ",1,2," or "7"
        combination: String,
    },
    /// List every non-suppressed form of a word
    Forms {
        /// Language definition TOML
        def: String,
        /// Word id
        word: u32,
    },
    /// Show how each rule contributed to one form
    Explain {
        /// Language definition TOML
        def: String,
        /// Word id
        word: u32,
        /// Combination id
        combination: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Pronounce a word or phrase
    Pronounce {
        /// Language definition TOML
        def: String,
        /// Text to pronounce
        text: String,
    },
    /// Romanize a word or phrase
    Romanize {
        /// Language definition TOML
        def: String,
        /// Text to romanize
        text: String,
    },
    /// Split each word into syllables
    Syllables {
        /// Language definition TOML
        def: String,
        /// Text to split
        text: String,
    },
    /// Load a definition and report skipped patterns and stale rules
    Validate {
        /// Language definition TOML
        def: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn load(def: &str) -> Language {
    die!(Language::load(Path::new(def)), "Error loading {def}: {}")
}

fn main() {
    let cli = Cli::parse();
    if let Some(dir) = &cli.trace_dir {
        glot_engine::trace_init::init_tracing(Path::new(dir));
    }

    let out = match cli.command {
        Command::Decline {
            def,
            word,
            combination,
        } => die!(form_ops::decline_cmd(&load(&def), word, &combination), "Error: {}"),
        Command::Forms { def, word } => die!(form_ops::forms_cmd(&load(&def), word), "Error: {}"),
        Command::Explain {
            def,
            word,
            combination,
            json,
        } => die!(
            form_ops::explain_cmd(&load(&def), word, &combination, json),
            "Error: {}"
        ),
        Command::Pronounce { def, text } => sound_ops::pronounce_cmd(&load(&def), &text),
        Command::Romanize { def, text } => sound_ops::romanize_cmd(&load(&def), &text),
        Command::Syllables { def, text } => sound_ops::syllables_cmd(&load(&def), &text),
        Command::Validate { def } => config_ops::validate_cmd(&load(&def)),
        Command::SettingsExport => config_ops::settings_export().to_string(),
        Command::SettingsValidate { file } => {
            let content = die!(fs::read_to_string(&file), "Error reading {file}: {}");
            die!(config_ops::settings_validate(&content), "Error: {}")
        }
    };
    print!("{out}");
}
