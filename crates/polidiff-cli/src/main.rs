use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod output;

use output::ColorMode;
use polidiff_core::{ChangeFilter, ComparisonRecord, Metrics, Session, Slot, config_file};
use polidiff_pdf_mupdf::MupdfBackend;
use polidiff_reporting::ExportFormat;

/// Policy Comparator - compare two investment-policy PDFs topic by topic
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare a current and a proposed policy PDF
    Compare {
        /// Path to the current policy PDF
        current: PathBuf,

        /// Path to the proposed policy PDF
        proposed: PathBuf,

        /// Topic keyword to search for (repeatable; overrides the
        /// configured list)
        #[arg(long = "topic")]
        topics: Vec<String>,

        /// Show only records whose title contains this substring
        #[arg(long)]
        filter: Option<String>,

        /// Show only topics with a possible change
        #[arg(long)]
        changed_only: bool,

        /// Print the text excerpts around each topic hit
        #[arg(long)]
        excerpts: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format: json, csv, markdown, or text
        /// (default: inferred from the output extension)
        #[arg(long)]
        format: Option<ExportFormat>,
    },

    /// Extract and print the flattened text of a PDF
    Extract {
        /// Path to the PDF file
        file: PathBuf,
    },

    /// Print the topic list in effect
    Topics,

    /// Show where the configuration file lives, or write one
    Config {
        /// Write the effective configuration to the platform config file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Compare {
            current,
            proposed,
            topics,
            filter,
            changed_only,
            excerpts,
            no_color,
            output,
            format,
        } => compare(
            current,
            proposed,
            topics,
            filter,
            changed_only,
            excerpts,
            no_color,
            output,
            format,
        ),
        Command::Extract { file } => extract(file),
        Command::Topics => {
            for topic in config_file::load_config().effective_topics() {
                println!("{}", topic);
            }
            Ok(())
        }
        Command::Config { init } => config_cmd(init),
    }
}

/// With `--init`, snapshot the effective settings into the platform
/// config file so they can be edited; otherwise report where that file
/// lives and what is in effect.
fn config_cmd(init: bool) -> anyhow::Result<()> {
    let config = config_file::load_config();
    if init {
        let options = config.effective_options();
        let snapshot = config_file::ConfigFile {
            topics: Some(config_file::TopicsConfig {
                list: Some(config.effective_topics()),
            }),
            comparison: Some(config_file::ComparisonConfig {
                excerpt_window_chars: Some(options.excerpt_window_chars),
                unchanged_threshold: Some(options.unchanged_threshold),
                moderate_threshold: Some(options.moderate_threshold),
            }),
            server: config.server.clone(),
        };
        let path = config_file::save_config(&snapshot).map_err(|e| anyhow::anyhow!(e))?;
        println!("Configuração gravada em {}", path.display());
    } else {
        match config_file::config_path() {
            Some(path) => println!("Arquivo de configuração: {}", path.display()),
            None => println!("Diretório de configuração indisponível"),
        }
        println!("Tópicos em efeito:");
        for topic in config.effective_topics() {
            println!("  {}", topic);
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn compare(
    current: PathBuf,
    proposed: PathBuf,
    topics: Vec<String>,
    filter: Option<String>,
    changed_only: bool,
    excerpts: bool,
    no_color: bool,
    output: Option<PathBuf>,
    format: Option<ExportFormat>,
) -> anyhow::Result<()> {
    for path in [&current, &proposed] {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
    }

    // Resolve configuration: CLI flags > config file > defaults
    let config = config_file::load_config();
    let topics = if topics.is_empty() {
        config.effective_topics()
    } else {
        topics
    };
    let options = config.effective_options();

    let use_color = !no_color && output.is_none();
    let color = ColorMode(use_color);

    let backend = MupdfBackend::new();
    let mut session = Session::new(topics, options);
    session.set_current(polidiff_pdf::load_slot(&current, &backend));
    session.set_proposed(polidiff_pdf::load_slot(&proposed, &backend));

    // Surface per-slot extraction failures instead of comparing partially
    for (label, slot) in [
        ("atual", session.current()),
        ("proposta", session.proposed()),
    ] {
        if let Some(reason) = slot.failure() {
            anyhow::bail!("política {}: {}", label, reason);
        }
    }

    session.run_compare();

    let change = if changed_only {
        ChangeFilter::Changed
    } else {
        ChangeFilter::All
    };
    let query = filter.as_deref().unwrap_or("");
    let (visible, metrics) = report_view(&session, query, change);

    if let Some(ref output_path) = output {
        let format = format.unwrap_or_else(|| ExportFormat::from_path(output_path));
        polidiff_reporting::export_results(&visible, &metrics, format, output_path)
            .map_err(|e| anyhow::anyhow!(e))?;
        println!("Relatório gravado em {}", output_path.display());
        return Ok(());
    }

    let mut writer: Box<dyn Write> = Box::new(std::io::stdout());
    if let Some(format) = format {
        write!(
            writer,
            "{}",
            polidiff_reporting::render(&visible, &metrics, format)
        )?;
        return Ok(());
    }

    output::print_header(
        &mut writer,
        session.current().document(),
        session.proposed().document(),
        color,
    )?;
    output::print_records(&mut writer, &visible, excerpts, color)?;
    output::print_summary(&mut writer, &metrics, color)?;
    Ok(())
}

/// Rows pass through the search/change filters; the summary always
/// covers the full comparison, so filtering never skews the totals.
fn report_view(
    session: &Session,
    query: &str,
    change: ChangeFilter,
) -> (Vec<ComparisonRecord>, Metrics) {
    let visible: Vec<_> = session.filtered(query, change).into_iter().cloned().collect();
    let metrics = Metrics::from_records(session.records());
    (visible, metrics)
}

fn extract(file: PathBuf) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    let backend = MupdfBackend::new();
    match polidiff_pdf::load_slot(&file, &backend) {
        Slot::Ready(doc) => {
            eprintln!("{}: {} páginas, {} caracteres", doc.source, doc.pages, doc.chars);
            println!("{}", doc.text);
            Ok(())
        }
        Slot::Failed(reason) => anyhow::bail!(reason),
        Slot::Empty => unreachable!("load_slot never returns Empty"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polidiff_core::DocumentText;

    fn compared_session() -> Session {
        let mut session = Session::with_default_topics();
        session.set_current(Slot::Ready(DocumentText::new(
            "atual.pdf",
            "meta atuarial de 5% ao ano".to_string(),
            1,
        )));
        session.set_proposed(Slot::Ready(DocumentText::new(
            "proposta.pdf",
            "limites de liquidez por segmento".to_string(),
            1,
        )));
        session.run_compare();
        session
    }

    #[test]
    fn summary_covers_full_comparison_when_rows_are_filtered() {
        let session = compared_session();
        let total = session.records().len();

        let (rows, metrics) = report_view(&session, "meta", ChangeFilter::All);
        assert_eq!(rows.len(), 1);
        assert_eq!(metrics.total_topics, total);

        let (rows, metrics) = report_view(&session, "", ChangeFilter::Changed);
        assert!(rows.len() < total);
        assert_eq!(metrics.total_topics, total);
        assert_eq!(metrics.changed, rows.len());
    }

    #[test]
    fn unfiltered_view_matches_session_records() {
        let session = compared_session();
        let (rows, metrics) = report_view(&session, "", ChangeFilter::All);
        assert_eq!(rows.len(), session.records().len());
        assert_eq!(metrics.total_topics, rows.len());
    }
}
