use clap::Parser;
use tracing_subscriber::EnvFilter;

use account_ledger::{Command, Ledger};

/// A cli interface to the account ledger
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// The path to the command CSV file
    filename: std::path::PathBuf,
    /// Print the transaction log of every account after the run
    #[clap(long)]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(&args.filename)?;
    let mut ledger = Ledger::new();

    for command in reader.deserialize::<Command>() {
        let command = command?;
        // rejected commands are reported and skipped
        let (op, holder) = (command.op(), command.holder());
        match ledger.execute(&command) {
            Ok(message) => tracing::info!(?op, holder, "{message}"),
            Err(err) => tracing::warn!(?op, holder, "{err}"),
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(std::io::stdout());

    for account in ledger.accounts() {
        writer.serialize(account)?;
    }
    writer.flush()?;

    if args.summary {
        for account in ledger.accounts() {
            println!("\n{}:\n{}", account.holder(), account.transaction_summary());
        }
    }

    tracing::info!(
        accounts = ledger.len(),
        total = ledger.total_balance(),
        "ledger processed"
    );

    Ok(())
}
