//! 命令行入口

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use richpaste::batch::{convert_batch, ConversionResult};
use richpaste::core::{convert_page, ConvertError, ConvertOptions};
use richpaste::env::EnvConfig;
use richpaste::network::{FetchedPage, HttpFetcher};
use richpaste::parsers::sanitizer::SanitizeProfile;
use richpaste::styles::Template;
use richpaste::utils::init_tracing;

/// Fetch web articles and rewrite them into inline-styled HTML
#[derive(Parser, Debug)]
#[command(name = "richpaste", author, version, about)]
struct Cli {
    /// URLs to convert, in order
    urls: Vec<String>,

    /// Template: simple, clean or code
    #[arg(short, long)]
    template: Option<Template>,

    /// Use the strict allow-list
    #[arg(long)]
    strict: bool,

    /// Fetch timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=300))]
    timeout: Option<u64>,

    /// Convert a local HTML file instead of fetching
    #[arg(short, long, conflicts_with = "urls")]
    input: Option<PathBuf>,

    /// Base URL used to resolve relative images of --input
    #[arg(long, requires = "input")]
    base_url: Option<String>,

    /// Print the results as a JSON array
    #[arg(long)]
    json: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List available templates and exit
    #[arg(long)]
    list_templates: bool,
}

fn convert_local_file(path: &Path, base_url: &str, options: ConvertOptions) -> ConversionResult {
    let label = path.display().to_string();
    let result = fs::read(path)
        .map_err(|e| ConvertError::Fetch(format!("unable to read {label}: {e}")))
        .and_then(|body| {
            let page = FetchedPage {
                final_url: base_url.to_string(),
                body,
                content_type: None,
            };
            convert_page(&page, options, 0)
        });

    ConversionResult::from_result(&label, result)
}

fn write_results(
    out: &mut dyn Write,
    results: &[ConversionResult],
    as_json: bool,
) -> io::Result<()> {
    if as_json {
        let json = serde_json::to_string_pretty(results).map_err(io::Error::other)?;
        writeln!(out, "{}", json)?;
        return Ok(());
    }

    for result in results {
        match result {
            ConversionResult::Success { html, .. } => writeln!(out, "{}", html)?,
            ConversionResult::Failure { url, error } => eprintln!("{}: {}", url, error),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let env_config = EnvConfig::from_env();
    let log_level = env_config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(&log_level);

    let env_config = env_config.unwrap_or_else(|e| {
        tracing::warn!("{}. Using defaults.", e);
        EnvConfig::default()
    });

    if cli.list_templates {
        for template in Template::ALL {
            let marker = if template == env_config.default_template { " (default)" } else { "" };
            println!("{}{}", template, marker);
        }
        return ExitCode::SUCCESS;
    }

    if cli.urls.is_empty() && cli.input.is_none() {
        eprintln!("Error: no URLs given. Pass one or more URLs or --input <FILE>.");
        return ExitCode::from(2);
    }

    let profile = if cli.strict {
        SanitizeProfile::Strict
    } else {
        env_config.sanitize_profile
    };
    let options = ConvertOptions::new(
        cli.template.unwrap_or(env_config.default_template),
        profile,
    );

    let results = match &cli.input {
        Some(path) => vec![convert_local_file(
            path,
            cli.base_url.as_deref().unwrap_or_default(),
            options,
        )],
        None => {
            let timeout = cli
                .timeout
                .map(Duration::from_secs)
                .unwrap_or(env_config.fetch_timeout);
            let fetcher = match HttpFetcher::new(timeout, env_config.user_agent.clone()) {
                Ok(fetcher) => fetcher,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            convert_batch(&fetcher, &cli.urls, options)
        }
    };

    let written = match &cli.output {
        Some(path) => fs::File::create(path)
            .and_then(|mut file| write_results(&mut file, &results, cli.json)),
        None => write_results(&mut io::stdout().lock(), &results, cli.json),
    };

    if let Err(e) = written {
        eprintln!("Error: unable to write output: {}", e);
        return ExitCode::FAILURE;
    }

    if results.iter().all(ConversionResult::is_success) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
