use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use docxform::{Config, DocData, Error, Reader, Writer};

/// Convert .docx paragraphs, runs and tables to and from JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory that reads and writes must stay inside. Repeatable.
    /// Overrides the ALLOWED_DIR environment variable.
    #[arg(long = "allow-dir", global = true)]
    allow_dirs: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the contents of a .docx file as JSON
    Read {
        input: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
    /// Build a .docx file from JSON ("-" reads stdin)
    Write {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        overwrite: bool,
    },
}

fn run(args: Args) -> Result<(), Error> {
    let config = if args.allow_dirs.is_empty() {
        Config::from_env()?
    } else {
        Config::new(args.allow_dirs)
    };
    log::debug!("Allowed directories: {:?}", config.guard().allowed_dirs());

    match args.command {
        Command::Read { input, pretty } => {
            let doc = Reader::new(&config).read(&input)?;
            let json = if pretty {
                doc.to_json_pretty()?
            } else {
                doc.to_json()?
            };
            println!("{json}");
        }
        Command::Write {
            input,
            output,
            overwrite,
        } => {
            let json = if input.as_os_str() == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                std::fs::read_to_string(&input).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => Error::NotFound(input.clone()),
                    _ => Error::Io(e),
                })?
            };
            let doc = DocData::from_json(&json)?;
            Writer::new(&config).write(&doc, &output, overwrite)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("docxform: {e}");
            ExitCode::FAILURE
        }
    }
}
