//! Domain Suggest - HTTP service and one-shot CLI
//!
//! With no arguments (or `serve`) the binary runs the HTTP server. Any other
//! arguments are treated as a prompt and the pipeline runs once.

use domain_suggest::{
    config::{Config, LogFormat},
    domain::DomainValidator,
    server, PerformanceMetrics, Recommendation,
};
use std::env;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// What the binary was asked to do
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Serve,
    Help,
    Suggest { prompt: String, tlds: Vec<String> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    domain_suggest::init()?;

    let command = match parse_args(env::args().skip(1).collect()) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    if command == Command::Help {
        print_help();
        return Ok(());
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.user_message());
            process::exit(1);
        }
    };
    init_tracing(&config);

    match command {
        Command::Serve => server::run(config).await?,
        Command::Suggest { prompt, tlds } => {
            if let Err(e) = run_once(&config, &prompt, &tlds).await {
                eprintln!("{}", e.user_message());
                process::exit(1);
            }
        }
        Command::Help => {}
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn parse_args(args: Vec<String>) -> Result<Command, String> {
    if args.is_empty() || (args.len() == 1 && args[0] == "serve") {
        return Ok(Command::Serve);
    }

    let mut words = Vec::new();
    let mut tlds = Vec::new();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--tld" | "-t" => {
                let tld = iter.next().ok_or_else(|| format!("{} needs a value", arg))?;
                tlds.push(tld);
            }
            _ => match arg.strip_prefix("--tld=") {
                Some(tld) => tlds.push(tld.to_string()),
                None => words.push(arg),
            },
        }
    }

    if words.is_empty() {
        return Err("a description is required".to_string());
    }

    if tlds.is_empty() {
        tlds = vec![".com".to_string(), ".io".to_string()];
    }

    Ok(Command::Suggest {
        prompt: words.join(" "),
        tlds,
    })
}

async fn run_once(config: &Config, prompt: &str, tlds: &[String]) -> domain_suggest::Result<()> {
    let validator = DomainValidator::new();
    validator.validate_prompt(prompt)?;
    validator.validate_tlds(tlds)?;

    let metrics = Arc::new(PerformanceMetrics::new());
    let pipeline = server::build_pipeline(config, Arc::clone(&metrics))?;

    println!("Looking for domains for: \"{}\" ({})", prompt, tlds.join(", "));
    let recommendations = pipeline.run(prompt, tlds).await?;
    display_recommendations(&recommendations);

    let stats = metrics.get_stats();
    println!();
    println!(
        "{} lookup(s), {} inconclusive, {:.1}ms average",
        stats.lookups,
        stats.lookups_inconclusive,
        stats.avg_lookup_time_ms()
    );

    Ok(())
}

fn display_recommendations(recommendations: &[Recommendation]) {
    println!();
    if recommendations.is_empty() {
        println!("No available domains found. Try a different description.");
        return;
    }

    println!("Available domains ({}):", recommendations.len());
    for (i, rec) in recommendations.iter().enumerate() {
        println!("{:2}. {:<20} {}", i + 1, rec.site_name, rec.tlds.join(" "));
        println!("    {}", rec.link);
    }
}

const HELP: &str = "\
domain-suggest - available domain names for a short description

USAGE:
    domain-suggest [serve]                       # Run the HTTP server
    domain-suggest [--tld .com ...] DESCRIPTION  # Suggest once and exit

HTTP API:
    POST /domains   {\"prompt\": \"...\", \"tlds\": [\".com\"]}
    GET  /health

ENVIRONMENT VARIABLES:
    OPENAI_API_KEY         OpenAI API key (required)
    OPENAI_BASE_URL        OpenAI-compatible endpoint
    OPENAI_MODEL           Model (default: gpt-4.1-mini)
    AVAILABILITY_BACKEND   whoapi | rdap (default: whoapi)
    WHOIS_API_KEY          WhoAPI key (required for whoapi)
    WHOAPI_BASE_URL        WhoAPI endpoint (default: https://api.whoapi.com)
    LISTEN                 Bind address (default: 0.0.0.0:3000)
    LOOKUP_CONCURRENCY     Lookups in flight (default: 1)
    LOOKUP_TIMEOUT_SECS    Per-lookup timeout (default: 10)
    LOOKUP_DELAY_MS        Pause before the first lookup (default: 500)
    REQUEST_DEADLINE_SECS  Per-request deadline (default: 60)
    RUST_LOG               Log filter (default: info)
    LOG_FORMAT             text | json (default: text)";

fn print_help() {
    println!("{}", HELP);
}
