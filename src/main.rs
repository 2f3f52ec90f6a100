use anyhow::{Context, Result};
use clap::Parser;
use hostsnap::config::AppConfig;
use hostsnap::{Providers, build_snapshot, report, version};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[derive(Parser, Debug)]
#[command(name = "hostsnap", version, about = "Snapshot of host identity, CPU, memory, disks and active IPs")]
struct Cli {
    /// Print the snapshot as JSON on stdout
    #[arg(long, conflicts_with = "txt")]
    json: bool,
    /// Write the text report to a file
    #[arg(long)]
    txt: bool,
    /// File for --txt (default from config, systeminfo.txt)
    #[arg(long, requires = "txt")]
    output: Option<PathBuf>,
    #[arg(long)]
    no_banner: bool,
    /// Do not wait for ENTER after the report
    #[arg(long)]
    no_pause: bool,
    /// Config file (default: $HOSTSNAP_CONFIG, then ./hostsnap.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // stderr keeps stdout clean for --json
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging.level);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "run failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let show_banner = config.output.banner && !cli.no_banner && !cli.json;
    if show_banner {
        println!("{}", version::banner());
    }

    let snapshot = build_snapshot(&Providers::system())
        .await
        .context("collecting system information")?;

    if cli.json {
        let doc = report::to_json(&snapshot).context("serializing to JSON")?;
        println!("{doc}");
    } else if cli.txt {
        let path = cli
            .output
            .unwrap_or_else(|| PathBuf::from(&config.output.txt_path));
        let mut file = std::io::BufWriter::new(
            std::fs::File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?,
        );
        report::write_report(&mut file, &snapshot)
            .and_then(|()| file.flush())
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Information saved to {}", path.display());
    } else {
        let mut stdout = std::io::stdout().lock();
        report::write_report(&mut stdout, &snapshot).context("writing report")?;
        stdout.flush()?;
        drop(stdout);
        if config.output.pause && !cli.no_pause && std::io::stdin().is_terminal() {
            print!("\nPress ENTER to continue...");
            std::io::stdout().flush()?;
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
        }
    }
    Ok(())
}
