use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use bolt_highlight::{BOLT_LANGUAGE, HtmlRenderer, Registry, TerminalRenderer};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Terminal,
}

/// Highlight Bolt source code
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// File to highlight, `-` reads from stdin
    #[arg(required_unless_present = "list_themes")]
    file: Option<PathBuf>,

    /// Name of the theme to use
    #[arg(short, long, default_value = "bolt")]
    theme: String,

    /// Theme document to register under the `--theme` name before highlighting
    #[arg(long)]
    theme_file: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Terminal)]
    format: Format,

    /// Language id of the input
    #[arg(short, long, default_value = BOLT_LANGUAGE)]
    lang: String,

    /// Print the registered themes and exit
    #[arg(long)]
    list_themes: bool,
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::builtin()?;

    if cli.list_themes {
        for name in registry.theme_names() {
            println!("{name}");
        }
        return Ok(());
    }

    if let Some(path) = &cli.theme_file {
        registry.add_theme_from_path(&cli.theme, path)?;
    }
    registry.set_active_theme(&cli.theme)?;

    let content = match cli.file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let highlighted = registry.highlight(&content, &cli.lang)?;
    let output = match cli.format {
        Format::Html => HtmlRenderer::default().render(&highlighted),
        Format::Terminal => TerminalRenderer.render(&highlighted),
    };
    println!("{output}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
