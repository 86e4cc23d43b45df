use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context as _;
use clap::Parser;

use fex::{Extractor, extract_line};

const EXTRACT_HELP: &str = "\
Extraction syntax is one or more selectors, each written as:

    <delimiter><field number(s)>

Fields start at 1, same as awk. Field 0 selects the whole string,
unchanged. The first delimiter is implied as a space (' ') but can be
overridden: to select the last dash-separated field, use --1.

Curly braces select several fields at once, split by commas; colon
ranges work like python slices ({1:3}, {-2:}). A leading ? ({?4})
keeps empty fields instead of collapsing delimiter runs.

A /regexp/ after the delimiter keeps only matching fields. Forward
slashes in the pattern can be escaped; a backslash delimiter is
written as two backslashes.

Some examples:

    1.1        First split by ' ', then first by '.'.
               'foo.bar baz' becomes 'foo'.

    0:{1,-1}   First and last colon-separated fields.
               'foo:bar:baz:fizz' becomes 'foo:fizz'.

    :/home/    Colon-separated fields matching /home/.

Quote your extractions, or your shell may expand them.";

#[derive(Parser)]
#[command(name = "fex")]
#[command(version)]
#[command(about = "Extract fields from line-oriented text by delimiter, range, or regexp.")]
#[command(after_help = EXTRACT_HELP)]
struct Cli {
    /// Field extraction expressions, applied to every input line
    #[arg(required = true, value_name = "EXTRACT")]
    extracts: Vec<String>,

    /// Read input from files instead of stdin
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Output each line's extracted fields as a JSON array
    #[arg(short = 'j', long = "json")]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    let extractors = match compile_extracts(&cli.extracts) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&cli, &extractors) {
        eprintln!("{:#}", e);
        process::exit(1);
    }
}

/// Compile every extraction argument before any input is read. The first
/// failure aborts the run, tagged with its 1-based argument position.
fn compile_extracts(args: &[String]) -> fex::Result<Vec<Extractor>> {
    args.iter()
        .enumerate()
        .map(|(i, arg)| fex::compile(arg).map_err(|e| e.in_extract(i + 1, arg)))
        .collect()
}

fn run(cli: &Cli, extractors: &[Extractor]) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.files.is_empty() {
        process_lines(io::stdin().lock(), extractors, &mut out, cli.json)?;
    } else {
        for path in &cli.files {
            let file = File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            process_lines(BufReader::new(file), extractors, &mut out, cli.json)?;
        }
    }

    out.flush().context("cannot flush output")?;
    Ok(())
}

fn process_lines<R, W>(reader: R, extractors: &[Extractor], out: &mut W, json: bool) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in reader.lines() {
        let line = line.context("cannot read input")?;
        let extraction = extract_line(extractors, &line)?;
        if json {
            serde_json::to_writer(&mut *out, &extraction)?;
            writeln!(out)?;
        } else if !extraction.is_blank() {
            writeln!(out, "{}", extraction)?;
        }
    }
    Ok(())
}
