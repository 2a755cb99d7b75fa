use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use imgveil::config::Config;
use imgveil::error::ImgveilError;
use imgveil::rewriter::{filter, filter_or_passthrough};
use imgveil::token::{build_proxy_url, open_token, ImageVariant, SecretKey};

/// Imgveil - hide original image URLs behind an encrypting edge proxy
#[derive(Parser, Debug)]
#[command(name = "imgveil")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite <img> tags in an HTML document
    Rewrite {
        /// Input file (stdin when omitted)
        input: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// On token failure, emit the input unchanged instead of failing
        #[arg(long)]
        fail_open: bool,
    },

    /// Print the proxy URL for a single image
    Url {
        /// Original image URL
        url: String,

        /// original, standard or retina
        #[arg(long, default_value = "standard")]
        variant: ImageVariant,
    },

    /// Decrypt a token (or proxy URL) and print its contents
    Inspect {
        /// Token or full proxy URL
        token: String,
    },

    /// Load and validate configuration, then exit
    Check,
}

fn main() {
    let args = Args::parse();

    let config = Config::from_file(&args.config).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(78);
    });

    if let Err(e) = imgveil::logging::init_subscriber(&config.logging) {
        eprintln!("Failed to initialize logging subsystem: {}", e);
        std::process::exit(78);
    }

    tracing::info!(
        config_file = %args.config.display(),
        enabled = config.proxy.is_enabled(),
        worker_url = %config.proxy.worker_url,
        max_width = config.proxy.max_width,
        max_height = config.proxy.max_height,
        "Configuration loaded successfully"
    );

    if let Err(e) = run(args.command, &config) {
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(command: Command, config: &Config) -> Result<(), ImgveilError> {
    let validated = config.validate().map_err(ImgveilError::Config);

    if let Command::Rewrite {
        input,
        output,
        fail_open: true,
    } = command
    {
        let content = read_input(input.as_deref())?;
        let rewritten = match validated {
            Ok(()) => filter_or_passthrough(&content, &config.proxy),
            Err(e) => {
                tracing::error!(error = %e, "Invalid configuration, serving original content");
                content
            }
        };
        return write_output(output.as_deref(), &rewritten);
    }

    validated?;

    match command {
        Command::Rewrite { input, output, .. } => {
            let content = read_input(input.as_deref())?;
            let rewritten = filter(&content, &config.proxy)?;
            write_output(output.as_deref(), &rewritten)
        }
        Command::Url { url, variant } => {
            require_enabled(config)?;
            let proxy_url = build_proxy_url(&config.proxy, variant, &url)?;
            println!("{}", proxy_url);
            Ok(())
        }
        Command::Inspect { token } => {
            require_enabled(config)?;
            let key = SecretKey::from_hex(&config.proxy.secret_key)?;
            let decoded = open_token(&key, &token)?;
            println!("metadata: {}", decoded.metadata_text);
            println!("max_width: {}", decoded.metadata.max_width);
            println!("max_height: {}", decoded.metadata.max_height);
            println!("quality: {}", decoded.metadata.quality);
            println!("url: {}", decoded.original_url);
            Ok(())
        }
        Command::Check => {
            if config.proxy.is_enabled() {
                println!("configuration OK");
            } else {
                println!("configuration OK (proxy disabled: worker_url or secret_key is empty)");
            }
            Ok(())
        }
    }
}

fn require_enabled(config: &Config) -> Result<(), ImgveilError> {
    if config.proxy.is_enabled() {
        Ok(())
    } else {
        Err(ImgveilError::Usage(
            "proxy.worker_url and proxy.secret_key must be set".to_string(),
        ))
    }
}

fn read_input(path: Option<&Path>) -> Result<String, ImgveilError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<(), ImgveilError> {
    match path {
        Some(path) => std::fs::write(path, content)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
