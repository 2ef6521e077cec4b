// ABOUTME: CLI binary for HotFetch: loads a URL or HTML file and extracts keys from a descriptor file.
// ABOUTME: Prints the extracted mapping as JSON, or the loaded document with --dump-html.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use hotfetch::{HotFetch, Request};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "hotfetch")]
#[command(about = "Extract keyed data from HTML using declarative selector descriptors")]
struct Args {
    /// JSON file mapping output keys to descriptors
    #[arg(short = 'd', long = "descriptors")]
    descriptors: Option<PathBuf>,

    /// HTML file to load instead of fetching a URL
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long = "pretty")]
    pretty: bool,

    /// Print the loaded document instead of extracting
    #[arg(long = "dump-html")]
    dump_html: bool,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = 30)]
    timeout: u64,

    /// User-Agent header for URL loads
    #[arg(long = "user-agent")]
    user_agent: Option<String>,

    /// Extra request header, "Name: value" (repeatable)
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Log level (overrides RUST_LOG): off, error, warn, info, debug, trace
    #[arg(long = "log-level", value_parser = parse_level)]
    log_level: Option<LevelFilter>,

    /// URL to fetch (fetch mode)
    #[arg()]
    url: Option<String>,
}

fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.filter_module("html5ever", LevelFilter::Warn);
    builder.filter_module("selectors", LevelFilter::Warn);
    let _ = builder.try_init();
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.parse::<LevelFilter>()
        .map_err(|_| format!("unknown log level {:?}", raw))
}

fn parse_header(raw: &str) -> anyhow::Result<(String, String)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("invalid header {:?}, expected \"Name: value\"", raw),
    }
}

fn load_descriptors(path: &Path) -> anyhow::Result<BTreeMap<String, Request>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading descriptors {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing descriptors {}", path.display()))
}

async fn run(args: Args) -> anyhow::Result<String> {
    if args.html.is_some() && args.url.is_some() {
        bail!("cannot use both --html and a URL");
    }
    if args.descriptors.is_none() && !args.dump_html {
        bail!("--descriptors is required unless --dump-html is given");
    }

    let mut builder = HotFetch::builder().timeout(Duration::from_secs(args.timeout));
    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua);
    }
    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        builder = builder.header(name, value);
    }
    let mut hf = builder.build();

    if let Some(html_path) = &args.html {
        let markup = fs::read_to_string(html_path)
            .with_context(|| format!("reading {}", html_path.display()))?;
        hf.load_html(&markup);
    } else if let Some(url) = &args.url {
        hf.load_from_url(url).await?;
    } else {
        bail!("a URL is required, or use --html");
    }

    if args.dump_html {
        return Ok(hf.html().to_string());
    }

    let descriptors = match &args.descriptors {
        Some(path) => load_descriptors(path)?,
        None => BTreeMap::new(),
    };
    let result = serde_json::Value::Object(hf.extract(&descriptors));
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    Ok(rendered)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.log_level);

    let output = args.output.clone();
    match run(args).await {
        Ok(rendered) => {
            if let Some(path) = output {
                if let Err(e) = fs::write(&path, &rendered) {
                    eprintln!("error writing to {:?}: {}", path, e);
                    return ExitCode::from(1);
                }
            } else {
                println!("{}", rendered);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
