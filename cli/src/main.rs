//! skimpdf CLI - PDF outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use skimpdf::{
    extract_file_with_options, to_json, ExtractOptions, FailureRecord, JsonFormat, PdfSpanSource,
    SpanSource,
};

#[derive(Parser)]
#[command(name = "skimpdf")]
#[command(version)]
#[command(about = "Extract document outlines (title + headings) from PDF files", long_about = None)]
struct Cli {
    /// Input PDF file or directory
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file or directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Pre-trained classifier artifact (rule-based fallback if omitted)
    #[arg(long, value_name = "FILE", env = "SKIMPDF_MODEL")]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Pre-trained classifier artifact
        #[arg(long, value_name = "FILE", env = "SKIMPDF_MODEL")]
        model: Option<PathBuf>,

        /// Header/footer repetition threshold (fraction of pages)
        #[arg(long, default_value = "0.5")]
        repeat_ratio: f32,

        /// Keep outlines that look like form/table label grids
        #[arg(long)]
        keep_form_outlines: bool,
    },

    /// Process every PDF in a directory, one JSON per document
    Batch {
        /// Input directory containing PDF files
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory (defaults to the input directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Pre-trained classifier artifact
        #[arg(long, value_name = "FILE", env = "SKIMPDF_MODEL")]
        model: Option<PathBuf>,
    },

    /// Show document information (pages, font profile, metadata title)
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            compact,
            model,
            repeat_ratio,
            keep_form_outlines,
        }) => {
            let mut options = ExtractOptions::new()
                .with_repeat_ratio(repeat_ratio)
                .with_form_suppression(!keep_form_outlines);
            if let Some(model) = model {
                options = options.with_model(model);
            }
            cmd_extract(&input, output.as_deref(), compact, options)
        }
        Some(Commands::Batch {
            input,
            output,
            model,
        }) => {
            let mut options = ExtractOptions::new();
            if let Some(model) = model {
                options = options.with_model(model);
            }
            cmd_batch(&input, output.as_deref(), options)
        }
        Some(Commands::Info { input }) => cmd_info(&input),
        None => match cli.input {
            Some(input) => {
                let mut options = ExtractOptions::new();
                if let Some(model) = cli.model {
                    options = options.with_model(model);
                }
                if input.is_dir() {
                    cmd_batch(&input, cli.output.as_deref(), options)
                } else {
                    cmd_extract(&input, cli.output.as_deref(), false, options)
                }
            }
            None => {
                println!("{}", "Usage: skimpdf <FILE|DIR> [OUTPUT]".yellow());
                println!("       skimpdf --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = extract_file_with_options(input, options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&result, format)?;

    match output {
        Some(path) => {
            fs::write(path, &json)?;
            println!(
                "{} {} ({} headings)",
                "Wrote".green(),
                path.display(),
                result.outline.len()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| input.to_path_buf());
    fs::create_dir_all(&output_dir)?;

    let mut pdf_files: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    pdf_files.sort();

    if pdf_files.is_empty() {
        println!("{}", "No PDF files found".yellow());
        return Ok(());
    }

    let mut succeeded = 0usize;
    let mut failed = 0usize;

    for pdf in &pdf_files {
        let stem = pdf.file_stem().unwrap_or_default().to_string_lossy();
        let out_path = output_dir.join(format!("{}.json", stem));

        // One bad document must not abort the batch: a failure record is
        // written in place of the outline and processing continues.
        match extract_file_with_options(pdf, options.clone()) {
            Ok(result) => {
                fs::write(&out_path, to_json(&result, JsonFormat::Pretty)?)?;
                println!(
                    "{} {} ({} headings)",
                    "ok".green(),
                    out_path.display(),
                    result.outline.len()
                );
                succeeded += 1;
            }
            Err(e) => {
                if e.is_schema_error() {
                    // Version skew between crate and artifact, not bad input
                    log::error!("schema error on {}: {}", pdf.display(), e);
                } else {
                    log::warn!("failed to process {}: {}", pdf.display(), e);
                }
                let record = FailureRecord::new(&e);
                fs::write(&out_path, serde_json::to_string_pretty(&record)?)?;
                println!("{} {} ({})", "failed".red(), pdf.display(), e);
                failed += 1;
            }
        }
    }

    println!(
        "\n{} {} succeeded, {} failed",
        "Done:".bold(),
        succeeded,
        failed
    );
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    use skimpdf::pipeline::{collect_spans, DocumentFontProfile};

    let source = PdfSpanSource::open(input)?;
    let options = ExtractOptions::default();
    let (spans, _) = collect_spans(&source, &options)?;
    let profile = DocumentFontProfile::from_spans(&spans);

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), source.page_count());
    println!("{}: {}", "Text spans".bold(), spans.len());
    if let Some(title) = source.document_title() {
        println!("{}: {}", "Metadata title".bold(), title);
    }
    println!("{}: {}pt", "Body size".bold(), profile.body_size);
    if profile.heading_sizes.is_empty() {
        println!("{}: none (uniform font)", "Heading sizes".bold());
    } else {
        let sizes = profile
            .heading_sizes
            .iter()
            .map(|s| format!("{}pt", s))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{}: {}", "Heading sizes".bold(), sizes);
    }

    Ok(())
}
