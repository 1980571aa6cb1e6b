#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! CLI for aggregating sender domains across an IMAP mailbox

use clap::Parser;
use domain_census::{CensusClient, FetchOptions, MailboxScope, Report, SessionConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "census-cli")]
#[command(about = "Aggregate sender domains across an IMAP mailbox")]
struct Args {
    /// Analyze the full archive mailbox instead of only the inbox
    #[arg(long)]
    all_mail: bool,

    /// Most recent messages to examine
    #[arg(long, default_value_t = 5000)]
    limit: usize,

    /// UIDs per FETCH request
    #[arg(long, default_value_t = 500)]
    batch_size: usize,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = SessionConfig::from_env()?;
    let options = FetchOptions {
        recent_cap: args.limit,
        batch_size: args.batch_size,
    };

    let client = CensusClient::with_options(config, options);
    let scope = MailboxScope::from_inbox_only(!args.all_mail);

    let report = client.analyze(scope).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_report(report: &Report) {
    if let Some(error) = &report.error {
        eprintln!("Error: {error}");
        return;
    }

    let Some(domains) = &report.domain_counts else {
        return;
    };
    let scope_label = if report.inbox_only { "inbox" } else { "all mail" };

    if domains.is_empty() {
        println!("No messages found ({scope_label}).");
        return;
    }

    println!("{:<44} {:>8}", "DOMAIN / SENDER", "COUNT");
    println!("{}", "-".repeat(53));

    for domain in domains {
        println!("{:<44} {:>8}", truncate(&domain.domain, 42), domain.count);
        for sender in &domain.senders {
            println!(
                "    {:<40} {:>8}",
                truncate(&sender.address, 38),
                sender.count
            );
        }
    }

    let total: u64 = domains.iter().map(|d| d.count).sum();
    println!(
        "\n{} domain(s), {} message(s) ({scope_label})",
        domains.len(),
        total
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
