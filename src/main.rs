//! xs - Live X post collection CLI
//!
//! Main entry point for the xs command-line tool.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use xs::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_target(false)
        .without_time()
        .init();

    // Run the appropriate command
    let result = match &cli.command {
        Commands::Stream(args) => cmd_stream(&cli, args),
        Commands::Stats => cmd_stats(&cli),
        Commands::Export(args) => cmd_export(&cli, args),
        Commands::Config(args) => cmd_config(&cli, args),
        Commands::Completions(args) => cmd_completions(args.clone()),
    };

    if let Err(e) = result {
        if let Some(hint) = e.downcast_ref::<XsError>().and_then(XsError::suggestion) {
            eprintln!("{} {}", "Hint:".cyan(), hint);
        }
        return Err(e);
    }

    Ok(())
}

fn get_db_path(cli: &Cli, config: &config::Config) -> PathBuf {
    cli.db.clone().unwrap_or_else(|| config.db_path())
}

fn prompt_keyword() -> Result<String> {
    print!("Type your chosen keyword: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let keyword = input.trim().to_string();
    if keyword.is_empty() {
        anyhow::bail!("No keyword provided");
    }
    Ok(keyword)
}

fn cmd_stream(cli: &Cli, args: &cli::StreamArgs) -> Result<()> {
    let config = config::Config::load();

    let keyword = match &args.keyword {
        Some(k) => k.clone(),
        None => prompt_keyword()?,
    };
    let limit = args.limit.unwrap_or(config.stream.limit);
    if limit == 0 {
        return Err(XsError::invalid_argument("limit must be at least 1").into());
    }
    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or_else(|| config.stream.endpoint.clone());

    // Credentials are checked before any network activity
    let bearer_token = config.bearer_token()?;
    let client = FeedClient::new(endpoint, bearer_token)?;

    let db_path = get_db_path(cli, &config);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !cli.quiet {
        println!("{}", "Collecting live posts...".bold().cyan());
        println!("  Keyword: {}", keyword.bold());
        println!("  Database: {}", db_path.display());
        println!();
    }

    let pb = if cli.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(limit as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} posts")
            .unwrap()
            .progress_chars("##-"),
    );

    let stream = client.open(&keyword)?;
    let (posts, interruption) = collect_posts(
        stream.inspect(|item| {
            if item.is_ok() {
                pb.inc(1);
            }
        }),
        limit,
    )?;
    pb.finish_and_clear();

    let scorer = SentimentScorer::new();
    let scored = score_posts(&scorer, posts);

    let storage = Storage::open(&db_path)?;
    let stored = store_posts(&storage, &scored)?;
    info!(collected = scored.len(), stored, "session complete");

    if let Some(reason) = &interruption {
        warn!(reason = %reason, "feed interrupted");
        if !cli.quiet {
            println!(
                "{}",
                format!("Feed interrupted, partial session kept: {reason}").yellow()
            );
        }
    }

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&scored)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(&scored)?),
        OutputFormat::Csv => print_csv(&scored, &mut io::stdout())?,
        OutputFormat::Text => {
            for (i, post) in scored.iter().enumerate() {
                print_post(i + 1, post);
            }
            println!(
                "{}",
                format!(
                    "{} post(s) collected and stored in database: {}",
                    stored,
                    db_path.display()
                )
                .bold()
                .green()
            );
        }
    }

    Ok(())
}

fn print_post(num: usize, scored: &ScoredPost) {
    let score_badge = if scored.sentiment > 0.0 {
        format!("{:+.2}", scored.sentiment).green()
    } else if scored.sentiment < 0.0 {
        format!("{:+.2}", scored.sentiment).red()
    } else {
        format!("{:.2}", scored.sentiment).dimmed()
    };

    println!(
        "{}. {} {}",
        num.to_string().dimmed(),
        scored.post.tweet_id.to_string().dimmed(),
        score_badge
    );

    // Word wrap the text
    let wrapped = textwrap::wrap(&scored.post.tweet_text, 78);
    for line in wrapped {
        println!("   {line}");
    }

    println!("   {}", scored.post.created_at.dimmed());
    println!();
}

fn cmd_stats(cli: &Cli) -> Result<()> {
    let config = config::Config::load();
    let db_path = get_db_path(cli, &config);

    if !db_path.exists() {
        return Err(XsError::database_not_found(db_path).into());
    }

    let storage = Storage::open(&db_path)?;
    let stats = storage.stats()?;

    match cli.format {
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let json = if matches!(cli.format, OutputFormat::JsonPretty) {
                serde_json::to_string_pretty(&stats)?
            } else {
                serde_json::to_string(&stats)?
            };
            println!("{json}");
        }
        _ => {
            println!("{}", "Collected Post Statistics".bold().cyan());
            println!("{}", "─".repeat(40));
            println!("  {:<20} {:>10}", "Posts:", format_number(stats.rows));
            println!("  {:<20} {:>10}", "Positive:", format_number(stats.positive));
            println!("  {:<20} {:>10}", "Negative:", format_number(stats.negative));
            println!("  {:<20} {:>10}", "Neutral:", format_number(stats.neutral));
            println!("{}", "─".repeat(40));

            if let Some(avg) = stats.avg_sentiment {
                println!("  Average sentiment: {}", format!("{avg:+.2}").bold());
            }
            if let (Some(min), Some(max)) = (stats.min_sentiment, stats.max_sentiment) {
                println!("  Range: {min:+.2} to {max:+.2}");
            }
        }
    }

    Ok(())
}

fn cmd_export(cli: &Cli, args: &cli::ExportArgs) -> Result<()> {
    let config = config::Config::load();
    let db_path = get_db_path(cli, &config);

    if !db_path.exists() {
        return Err(XsError::database_not_found(db_path).into());
    }

    let storage = Storage::open(&db_path)?;
    let posts = storage.fetch_all(args.limit)?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    match args.format {
        ExportFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&posts)?)?;
        }
        ExportFormat::Jsonl => {
            for post in &posts {
                writeln!(out, "{}", serde_json::to_string(post)?)?;
            }
        }
        ExportFormat::Csv => print_csv(&posts, &mut out)?,
    }

    if let Some(path) = &args.output {
        println!(
            "{}",
            format!("Exported {} row(s) to {}", posts.len(), path.display()).green()
        );
    }

    Ok(())
}

fn print_csv(posts: &[ScoredPost], out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "tweet_id,tweet_text,created_at,location,geo_coordinates,no_of_followers,no_of_friends,sentiment"
    )?;
    for scored in posts {
        let p = &scored.post;
        writeln!(
            out,
            "{},\"{}\",{},\"{}\",\"{}\",{},{},{:.2}",
            p.tweet_id,
            csv_escape_text(&p.tweet_text),
            p.created_at,
            csv_escape_text(&p.location),
            csv_escape_text(&p.geo_coordinates),
            p.no_of_followers,
            p.no_of_friends,
            scored.sentiment
        )?;
    }
    Ok(())
}

fn cmd_config(cli: &Cli, args: &cli::ConfigArgs) -> Result<()> {
    let config = config::Config::load();

    if args.init {
        let path = config::Config::user_config_path()
            .context("Could not determine config directory")?;
        if path.exists() {
            println!("Config file already exists: {}", path.display());
        } else {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, config::Config::default_config_content())?;
            println!("{} Wrote default config to {}", "✓".green(), path.display());
        }
        if !args.show {
            return Ok(());
        }
    }

    println!("{}", "Current Configuration".bold().cyan());
    println!("  Database: {}", get_db_path(cli, &config).display());
    println!("  Endpoint: {}", config.stream.endpoint);
    println!("  Session limit: {}", config.stream.limit);
    println!(
        "  Bearer token: {}",
        if config.credentials.bearer_token.is_some() {
            "configured".green()
        } else {
            "not configured".yellow()
        }
    );
    if let Some(path) = config::Config::user_config_path() {
        println!("  Config file: {}", path.display());
    }

    Ok(())
}

fn cmd_completions(args: cli::CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "xs", &mut io::stdout());
    Ok(())
}
