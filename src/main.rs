//! Summarise VPP `show trace` dumps.
//!
//! # Usage
//!
//! ```bash
//! # Per-node dwell times and slowest packets
//! vppctl show trace | vpp-trace --strip-banners
//!
//! # Compact listing of packets that reached a node
//! vpp-trace --strip-banners --list --node ip4-lookup trace.txt
//! ```

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use color_print::cformat;
use vpp_trace::trace;

/// Summarise VPP packet traces
#[derive(Parser)]
#[command(name = "vpp-trace", version)]
#[command(about = "Parse VPP `show trace` output and report per-node latency")]
#[command(after_long_help = r#"EXAMPLES:
  # Arm tracing on the input node, send traffic, then summarise
  vppctl trace add virtio-input 50
  vppctl show trace | vpp-trace --strip-banners

  # List every packet that went through ip4-lookup
  vpp-trace --strip-banners --list --node ip4-lookup trace.txt

  # Show parser progress
  RUST_LOG=trace vpp-trace trace.txt
"#)]
struct Args {
    /// Path to trace dump (reads from stdin if omitted)
    file: Option<PathBuf>,

    /// Remove per-thread banners before parsing (needed for multi-worker dumps)
    #[arg(long)]
    strip_banners: bool,

    /// List packets and their node path instead of the summary
    #[arg(long)]
    list: bool,

    /// Only list packets that traversed this node
    #[arg(long, value_name = "NAME", requires = "list")]
    node: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Configure logging based on --verbose flag or RUST_LOG env var
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "off" }),
    )
    .format(|buf, record| {
        use anstyle::Style;
        use std::io::Write;

        let dim = Style::new().dimmed();
        writeln!(
            buf,
            "{dim}[{}]{dim:#} {}",
            record.level().as_str().to_lowercase(),
            record.args()
        )
    })
    .init();

    if let Err(e) = run(args) {
        anstream::eprintln!("{}", cformat!("<red><bold>error:</></> {e:#}"));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let (source, mut input) = read_input(args.file)?;

    if args.strip_banners {
        input = trace::strip_thread_banners(&input);
    }

    let traces = trace::parse_trace(&input).with_context(|| format!("parsing {source}"))?;

    if args.list {
        let packets: Vec<&trace::Packet> = traces
            .iter()
            .filter(|p| args.node.as_deref().is_none_or(|node| p.traversed(node)))
            .collect();
        if packets.is_empty() {
            anstream::eprintln!("{}", cformat!("<dim>No matching packets in {source}</>"));
            return Ok(());
        }
        print!("{}", trace::render_listing(&packets));
    } else {
        print!("{}", trace::render_summary(&trace::analyze(&traces)));
    }

    Ok(())
}

/// Read the whole dump, returning a label for messages alongside the text.
fn read_input(file: Option<PathBuf>) -> anyhow::Result<(String, String)> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok((path.display().to_string(), content))
        }
        _ => {
            if std::io::stdin().is_terminal() {
                eprintln!("Reading from stdin... (pipe trace data or use Ctrl+D to end)");
                eprintln!();
                eprintln!("Hint: vppctl show trace | vpp-trace --strip-banners");
            }

            let mut content = String::new();
            std::io::stdin()
                .lock()
                .read_to_string(&mut content)
                .context("reading stdin")?;
            Ok(("stdin".to_string(), content))
        }
    }
}
