use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use steeple::{config, content, output, render, serve};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "steeple")]
#[command(about = "Static site generator and preview server for church websites")]
#[command(long_about = "\
Static site generator and preview server for church websites

Your filesystem is the data source. Markdown files become pages ordered by
numeric prefix, sermons.toml becomes the sermon archive, and every image URL
is rewritten into a CDN variant request at render time.

Content structure:

  content/
  ├── config.toml              # Site config (optional, stock defaults otherwise)
  ├── sermons.toml             # Sermon archive (optional)
  ├── assets/                  # Static files → copied to output root
  ├── 020-about.md             # Page (numbered = shown in nav)
  ├── 030-connect.md
  ├── 040-give.md              # URL-only body → external nav link
  └── draft-vbs.md             # No number prefix = hidden from nav

Run 'steeple gen-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the static site: scan content, render HTML
    Build,
    /// Validate content directory without building
    Check,
    /// Build (unless --no-build) and serve the site with /api/health
    Serve {
        /// Port to listen on (falls back to $PORT, then 3000)
        #[arg(long)]
        port: Option<u16>,
        /// Serve the existing output directory without rebuilding
        #[arg(long)]
        no_build: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site = content::scan(&cli.source)?;
            render::render(&site, &cli.source, &cli.output)?;
            output::print_build_output(&site);
            println!("Site generated at {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = content::scan(&cli.source)?;
            output::print_scan_output(&site);
            println!("==> Content is valid");
        }
        Command::Serve { port, no_build } => {
            init_tracing();
            if !no_build {
                let site = content::scan(&cli.source)?;
                render::render(&site, &cli.source, &cli.output)?;
                output::print_build_output(&site);
            }
            let addr = SocketAddr::from(([0, 0, 0, 0], effective_port(port)));
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(serve::serve(cli.output.clone(), addr))?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Listening port: explicit flag, then the platform's $PORT, then 3000.
fn effective_port(flag: Option<u16>) -> u16 {
    flag.or_else(|| std::env::var("PORT").ok()?.parse().ok())
        .unwrap_or(3000)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("steeple=info,axum=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
