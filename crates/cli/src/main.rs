//! CLI tool for reformatting Heading 2-5 Word documents into "Key Points"
//! output.

use anyhow::{Context, Result};
use clap::Parser;
use keypoints_core::text::output_filename;
use keypoints_core::{KeyPointsFormatter, LevelCounts};
use keypoints_docx::{DocxReader, DocxWriter};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Reformat a Heading 2-5 structured .docx into a Key Points document.
#[derive(Parser, Debug)]
#[command(name = "keypoints")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input Word document(s) (.docx)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Leave Heading 4 bullets as-is instead of ensuring a terminal period
    #[arg(long)]
    keep_h4_punctuation: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let formatter = KeyPointsFormatter::new().with_h4_period(!args.keep_h4_punctuation);

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &formatter) {
            Ok((output_path, counts)) => {
                if counts.total() == 0 {
                    eprintln!(
                        "Warning: no Heading 2-5 content found in {}",
                        input_path.display()
                    );
                }
                println!(
                    "{} -> {} (H2: {}, H3: {}, H4: {}, H5: {})",
                    input_path.display(),
                    output_path.display(),
                    counts.h2,
                    counts.h3,
                    counts.h4,
                    counts.h5,
                );
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

/// Process a single Word document.
fn process_file(
    input_path: &Path,
    args: &Args,
    formatter: &KeyPointsFormatter,
) -> Result<(PathBuf, LevelCounts)> {
    let file = File::open(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;
    let reader = BufReader::new(file);

    let filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let document = DocxReader::new()
        .parse(reader, filename)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if args.verbose {
        eprintln!("  Found {} paragraphs", document.blocks.len());
    }

    let (paragraphs, counts) = formatter.transform(&document.blocks);
    log::debug!(
        "transformed {} of {} paragraphs",
        counts.total(),
        document.blocks.len()
    );

    let output_path = get_output_path(input_path, args.output.as_ref())?;
    let output_file = File::create(&output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;

    DocxWriter::new()
        .write(&paragraphs, output_file)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok((output_path, counts))
}

/// Determine the output path for a processed file.
fn get_output_path(input_path: &Path, output_dir: Option<&PathBuf>) -> Result<PathBuf> {
    let filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("output.docx");

    let out_name = output_filename(filename);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(out_name)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(out_name)
            } else {
                PathBuf::from(out_name)
            }
        }
    };

    Ok(output_path)
}
