//! l2h CLI - LaTeX → HTML previewer

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use texpreview::{
    apply_preview_styles, latex_to_html_with_diagnostics, try_latex_to_html, ConversionWarning,
    HtmlOptions,
};
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "l2h")]
#[command(version)]
#[command(about = "texpreview - LaTeX to HTML previewer", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Wrap the output in the preview container
    #[arg(short, long)]
    wrap: bool,

    /// Strict mode: malformed structure fails the conversion
    #[arg(long)]
    strict: bool,

    /// Link target of the "compile it externally" hint
    #[arg(long, value_name = "URL")]
    compile_url: Option<String>,

    /// Check mode - report warnings without writing output
    #[arg(long)]
    check: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Read input
    let input = match cli.input_file {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut options = if cli.strict {
        HtmlOptions::strict()
    } else {
        HtmlOptions::default()
    };
    if let Some(url) = cli.compile_url {
        options = options.with_compile_url(url);
    }

    // Check mode: report and exit, non-zero when anything was found
    if cli.check {
        match try_latex_to_html(&input, &options) {
            Ok(output) if !output.has_warnings() => {
                eprintln!("✓ No issues found");
                return Ok(());
            }
            Ok(output) => print_warnings(&output.warnings),
            Err(err) => eprintln!("✗ {}", err),
        }
        std::process::exit(1);
    }

    let output = latex_to_html_with_diagnostics(&input, &options);

    if !cli.quiet && output.has_warnings() {
        print_warnings(&output.warnings);
    }

    let result = if cli.wrap {
        apply_preview_styles(&output.content)
    } else {
        output.content
    };

    // Output
    match cli.output {
        Some(path) => {
            let mut file = fs::File::create(&path)?;
            writeln!(file, "{}", result)?;
            if output.warnings.is_empty() {
                eprintln!("✓ Output written to: {}", path);
            } else {
                eprintln!(
                    "⚠ Output written to: {} ({} warning(s))",
                    path,
                    output.warnings.len()
                );
            }
        }
        None => {
            println!("{}", result);
        }
    }

    Ok(())
}

/// Print warnings to stderr
#[cfg(feature = "cli")]
fn print_warnings(warnings: &[ConversionWarning]) {
    eprintln!();
    eprintln!("Conversion Warnings ({}):", warnings.len());
    eprintln!();
    for warning in warnings {
        eprintln!("  {}", warning);
    }
    eprintln!();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install texpreview --features cli");
    eprintln!("  l2h [OPTIONS] [INPUT_FILE]");
}
