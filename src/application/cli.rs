#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;
use std::str::FromStr;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::SubmitOutcome;
use crate::domain::models::Variant;
use crate::domain::services::actions::help_text;
use crate::domain::services::AppState;
use crate::domain::services::CompletionClient;
use crate::infrastructure::backends::BackendManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("PROMPTPAD_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(|| return env::temp_dir())
        .join("promptpad");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Sends a single prompt through the same submission cycle as the chat UI and
/// prints the assistant turn.
async fn ask(config: &Config, prompt: &str, as_json: bool) -> Result<()> {
    let variant = Variant::from_str(&config.get(ConfigKey::Variant))?;
    let client = CompletionClient::new(BackendManager::get(config)?);
    client.health_check().await?;

    let mut app_state = AppState::new(variant);
    if app_state.submit(&client, prompt).await == SubmitOutcome::EmptyInput {
        bail!("Refusing to send an empty prompt");
    }

    if let Some(message) = app_state.state().error() {
        bail!(message.to_string());
    }

    let turn = app_state
        .conversation
        .last()
        .ok_or_else(|| return anyhow!("No response was recorded"))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(turn.content())?);
    } else {
        println!("{}", turn.content().as_text());
    }

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Promptpad")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Promptpad with environment variable RUST_LOG=promptpad")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        )
        .subcommand(
            Command::new("variants").about("List all prompt variants.")
        );
}

fn subcommand_ask() -> Command {
    return Command::new("ask")
        .about("Send a single prompt and print the response.")
        .arg(
            Arg::new("prompt")
                .help("Text to send. Wrapped in the preamble of the selected variant.")
                .num_args(1)
                .required(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the response content as JSON.")
                .action(ArgAction::SetTrue),
        );
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Start a new chat session.");
}

fn arg_variant() -> Arg {
    return Arg::new(ConfigKey::Variant.to_string())
        .short('v')
        .long(ConfigKey::Variant.to_string())
        .env("PROMPTPAD_VARIANT")
        .num_args(1)
        .help(format!(
            "Which preamble to send with each prompt. [default: {}]",
            Config::default(ConfigKey::Variant)
        ))
        .value_parser(PossibleValuesParser::new(Variant::VARIANTS))
        .global(true);
}

fn arg_model() -> Arg {
    return Arg::new(ConfigKey::Model.to_string())
        .short('m')
        .long(ConfigKey::Model.to_string())
        .env("PROMPTPAD_MODEL")
        .num_args(1)
        .help(format!(
            "Model requested from the completion endpoint. [default: {}]",
            Config::default(ConfigKey::Model)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return format!("CHAT {line}").bold().underline().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("promptpad")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_ask())
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(arg_variant())
        .arg(arg_model())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("PROMPTPAD_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::MaxTokens.to_string())
                .long(ConfigKey::MaxTokens.to_string())
                .env("PROMPTPAD_MAX_TOKENS")
                .num_args(1)
                .help(format!("Maximum number of tokens the model may generate per reply. [default: {}]", Config::default(ConfigKey::MaxTokens)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Temperature.to_string())
                .long(ConfigKey::Temperature.to_string())
                .env("PROMPTPAD_TEMPERATURE")
                .num_args(1)
                .help(format!("Sampling temperature sent with each request. [default: {}]", Config::default(ConfigKey::Temperature)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenAiURL.to_string())
                .long(ConfigKey::OpenAiURL.to_string())
                .env("PROMPTPAD_OPENAI_URL")
                .num_args(1)
                .help(format!("OpenAI API URL. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::OpenAiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenAiToken.to_string())
                .long(ConfigKey::OpenAiToken.to_string())
                .env("PROMPTPAD_OPENAI_TOKEN")
                .num_args(1)
                .help("OpenAI API token.")
                .global(true),
        );
}

/// Parses the command line. Returns the loaded config when the chat UI should
/// start, `None` when a subcommand already did its work.
pub async fn parse() -> Result<Option<Config>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("ask", ask_matches)) => {
            let config = Config::load(build(), vec![&matches, ask_matches]).await?;
            let prompt = ask_matches
                .get_one::<String>("prompt")
                .ok_or_else(|| return anyhow!("A prompt is required"))?;

            ask(&config, prompt, ask_matches.get_flag("json")).await?;
            return Ok(None);
        }
        Some(("chat", subcmd_matches)) => {
            let config = Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return Ok(Some(config));
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(None);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(None);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(None);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(None);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(None);
            }
        },
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_dir().join("debug.log").to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    println!("{}", ConfigKey::VARIANTS.join("\n"));
                }
                Some(("variants", _)) => {
                    println!("{}", Variant::VARIANTS.join("\n"));
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(None);
        }
        _ => {
            let config = Config::load(build(), vec![&matches]).await?;
            return Ok(Some(config));
        }
    }
}
