use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};

use skk_cli::commands::{config_ops, dict_ops, simulate_ops, user_dict_ops};

#[derive(Parser)]
#[command(name = "skktool", about = "SKK dictionary and conversion tool")]
struct Cli {
    /// Custom settings TOML (see settings-export)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Custom romaji TOML (see romaji-export)
    #[arg(long, global = true)]
    romaji: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up a reading (`あき>` for prefixes, `>てき` for suffixes)
    Lookup {
        /// Reading to look up
        reading: String,
        /// Source dictionary files, in lookup order
        #[arg(short, long = "dict", required = true)]
        dicts: Vec<String>,
        /// User dictionary file, consulted first (optional)
        #[arg(long)]
        user: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Parse a dictionary file and report malformed lines
    Check {
        /// SKK dictionary file (UTF-8)
        file: String,
    },
    /// Transliterate romaji to hiragana
    Romaji {
        /// Romaji input
        input: String,
    },
    /// Run a key script through a conversion session
    Simulate {
        /// Keys to type; named keys in angle brackets, e.g. `Kanji<space><enter>`
        keys: String,
        /// Source dictionary files, in lookup order
        #[arg(short, long = "dict")]
        dicts: Vec<String>,
        /// User dictionary file (optional, never written)
        #[arg(long)]
        user: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export default romaji mappings as TOML
    RomajiExport,
    /// Validate a custom romaji TOML file
    RomajiValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Manage the user dictionary
    UserDict {
        /// User dictionary file (default: ~/.config/skk/skk-jisyo.utf8)
        #[arg(long)]
        file: Option<String>,
        #[command(subcommand)]
        action: UserDictAction,
    },
}

#[derive(Subcommand)]
enum UserDictAction {
    /// Add a word, or move it to the front if present
    Add {
        /// Reading (hiragana; okuri-ari readings end in the okuri consonant)
        reading: String,
        /// Word
        surface: String,
    },
    /// Remove a word
    Remove {
        /// Reading
        reading: String,
        /// Word
        surface: String,
    },
    /// List all registered words
    List,
}

fn load_config(cli: &Cli) {
    if let Some(path) = &cli.settings {
        if let Err(e) = skk_engine::settings_load_config(Path::new(path)) {
            eprintln!("Error loading settings: {e}");
            process::exit(1);
        }
    }
    if let Some(path) = &cli.romaji {
        if let Err(e) = skk_engine::romaji_load_config(Path::new(path)) {
            eprintln!("Error loading romaji table: {e}");
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    load_config(&cli);

    match cli.command {
        Command::Lookup {
            reading,
            dicts,
            user,
            json,
        } => dict_ops::lookup(&dicts, user.as_deref(), &reading, json),
        Command::Check { file } => dict_ops::check(&file),
        Command::Romaji { input } => simulate_ops::romaji(&input),
        Command::Simulate {
            keys,
            dicts,
            user,
            json,
        } => simulate_ops::simulate(&dicts, user.as_deref(), &keys, json),
        Command::RomajiExport => config_ops::romaji_export(),
        Command::RomajiValidate { file } => config_ops::romaji_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::UserDict { file, action } => {
            let path = file.unwrap_or_else(user_dict_ops::default_user_dict_path);
            let path = Path::new(&path);
            match action {
                UserDictAction::Add { reading, surface } => {
                    user_dict_ops::user_dict_add(path, &reading, &surface)
                }
                UserDictAction::Remove { reading, surface } => {
                    user_dict_ops::user_dict_remove(path, &reading, &surface)
                }
                UserDictAction::List => user_dict_ops::user_dict_list(path),
            }
        }
    }
}
