//! quire-content - Parse a content stream and print its instructions.
//!
//! The input is a raw (already decoded) content stream. Instructions are
//! printed one per line as text, re-serialized as content stream syntax,
//! or written as a JSON array.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use quire_core::model::write_json;
use quire_core::{Instruction, Object, ParseOptions, parse_content_bytes, unparse_content_stream};
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One instruction per line: operands, then the operator
    Text,
    /// Array of {"operands": [...], "operator": "..."} objects
    Json,
    /// Content stream syntax, ready to be written back into a stream
    Unparse,
}

/// Parse a PDF content stream into grouped instructions.
#[derive(Parser, Debug)]
#[command(name = "quire-content")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the content stream, or "-" for stdin
    #[arg(default_value = "-")]
    file: String,

    /// Space-separated operators to keep, e.g. "q Q cm Do"; empty keeps all
    #[arg(long, default_value = "")]
    operators: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Maximum array/dictionary nesting
    #[arg(long = "max-depth")]
    max_depth: Option<usize>,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,
}

fn read_input(file: &str) -> Result<Vec<u8>> {
    if file == "-" {
        let mut data = Vec::new();
        io::stdin()
            .read_to_end(&mut data)
            .context("reading stdin")?;
        return Ok(data);
    }
    let path = PathBuf::from(file);
    fs::read(&path).with_context(|| format!("reading {}", path.display()))
}

fn instruction_json(instruction: &Instruction) -> Result<serde_json::Value> {
    let operands = match instruction {
        Instruction::Operation { operands, .. } => operands
            .iter()
            .map(|operand| operand.to_json_value(false))
            .collect::<quire_core::Result<Vec<_>>>()?,
        // Inline images have no JSON form of their own; show the metadata.
        Instruction::InlineImage(image) => vec![serde_json::json!({
            "dict": Object::dictionary(image.dictionary()?).to_json_value(false)?,
            "length": image.raw_bytes().len(),
        })],
    };
    let operator = instruction.operator().as_text()?;
    Ok(serde_json::json!({
        "operands": operands,
        "operator": operator,
    }))
}

fn write_text<W: Write>(out: &mut W, instructions: &[Instruction]) -> Result<()> {
    for (i, instruction) in instructions.iter().enumerate() {
        match instruction {
            Instruction::Operation { .. } => writeln!(out, "{i:>6}  {instruction}")?,
            Instruction::InlineImage(image) => writeln!(
                out,
                "{i:>6}  BI {} metadata objects, {} bytes EI",
                image.metadata().len(),
                image.raw_bytes().len()
            )?,
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut options = ParseOptions::default().with_operator_list(&args.operators);
    if let Some(max_depth) = args.max_depth {
        options = options.with_max_depth(max_depth);
    }

    let data = read_input(&args.file)?;
    let parsed = parse_content_bytes(&data, &options)
        .with_context(|| format!("parsing {}", args.file))?;
    if let Some(warning) = &parsed.warning {
        eprintln!("Warning: {warning}");
    }

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = fs::File::create(&args.outfile)
            .with_context(|| format!("creating {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    match args.format {
        Format::Text => write_text(&mut output, &parsed.instructions)?,
        Format::Unparse => {
            output.write_all(&unparse_content_stream(&parsed.instructions)?)?;
            writeln!(output)?;
        }
        Format::Json => {
            let value = parsed
                .instructions
                .iter()
                .map(instruction_json)
                .collect::<Result<Vec<_>>>()?;
            writeln!(output, "{}", write_json(&serde_json::Value::Array(value))?)?;
        }
    }

    output.flush()?;
    Ok(())
}
