//! mdrtf - Markdown to RTF converter

use std::fs;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "mdrtf")]
#[command(version, about = "Markdown to RTF converter", long_about = None)]
#[command(after_help = "EXAMPLES:
    mdrtf notes.md notes.rtf    Convert a Markdown file to RTF
    mdrtf notes.md              Write the RTF document to stdout")]
struct Cli {
    /// Input Markdown file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output RTF file (stdout if omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<String>,

    /// Suppress conversion messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> mdrtf::Result<()> {
    match &cli.output {
        Some(output) => {
            mdrtf::convert_file(&cli.input, output)?;
            if !cli.quiet {
                println!("{} -> {}", cli.input, output);
            }
        }
        None => {
            let markdown = String::from_utf8(fs::read(&cli.input)?)?;
            print!("{}", mdrtf::markdown_to_rtf(&markdown));
        }
    }
    Ok(())
}
