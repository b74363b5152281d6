// Headless entry point: summarizes a newsletter from a file or stdin.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use newsletter_summarizer::core::config::{AppConfig, TaggerBackend};
use newsletter_summarizer::core::models::{NoticeKind, SummaryLength};
use newsletter_summarizer::features::summarize::summarize_text;
use newsletter_summarizer::session::{SaveTarget, Session};
use newsletter_summarizer::{SummarizerError, build_backends};
use tracing::error;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LengthArg {
    Short,
    Medium,
    Long,
}

impl From<LengthArg> for SummaryLength {
    fn from(arg: LengthArg) -> Self {
        match arg {
            LengthArg::Short => SummaryLength::Short,
            LengthArg::Medium => SummaryLength::Medium,
            LengthArg::Long => SummaryLength::Long,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TaggerArg {
    Model,
    Heuristic,
}

#[derive(Debug, Parser)]
#[command(name = "newsletter-cli", about = "Summarize a newsletter from the terminal")]
struct Args {
    /// Summary style: concise, detailed or domain-specific
    #[arg(short, long, default_value = "concise")]
    style: String,

    /// Target length (kept for parity with the window; generation ignores it)
    #[arg(short, long, value_enum, default_value_t = LengthArg::Medium)]
    length: LengthArg,

    /// Newsletter file to read, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Also write the summary to this text file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also export the summary to this .docx file
    #[arg(long)]
    docx: Option<PathBuf>,

    /// Wrap highlighted entities in ** markers on stdout
    #[arg(long)]
    mark: bool,

    /// Override the configured entity tagger
    #[arg(long, value_enum)]
    tagger: Option<TaggerArg>,
}

fn read_input(source: &str) -> Result<String, SummarizerError> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    newsletter_summarizer::setup_logging();
    let args = Args::parse();

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(tagger) = args.tagger {
        config.entity_tagger = match tagger {
            TaggerArg::Model => TaggerBackend::Model,
            TaggerArg::Heuristic => TaggerBackend::Heuristic,
        };
    }

    let (client, tagger) = match build_backends(&config) {
        Ok(backends) => backends,
        Err(e) => {
            error!("Failed to initialize model client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let text = match read_input(&args.input) {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read {}: {}", args.input, e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new();
    session.input = text;
    session.length = args.length.into();

    let input = match session.begin_generation() {
        Ok(input) => input,
        Err(notice) => {
            eprintln!("{}: {}", notice.title, notice.message);
            return ExitCode::FAILURE;
        }
    };
    let result = summarize_text(&*client, &*tagger, &input, &args.style).await;
    let highlighted = result.as_ref().ok().cloned();
    if let Some(notice) = session.finish_generation(result) {
        eprintln!("{}: {}", notice.title, notice.message);
        return ExitCode::FAILURE;
    }

    match (&highlighted, args.mark) {
        (Some(h), true) => println!("{}", h.marked("**", "**")),
        _ => println!("{}", session.output),
    }

    let mut ok = true;
    for (target, path) in [
        (SaveTarget::SummaryText, args.output.as_ref()),
        (SaveTarget::SummaryDocx, args.docx.as_ref()),
    ] {
        if let Some(path) = path {
            let notice = session.save(target, path);
            eprintln!("{}", notice.message);
            ok &= notice.kind == NoticeKind::Info;
        }
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

