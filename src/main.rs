//! Command-line interface for xmlserializer

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use xmlserializer::{Node, SerializerConfig, XmlSerializer};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xmlserializer")]
#[command(author, version, about = "Serialize JSON node trees to XML", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serialize a node tree to XML
    Serialize {
        /// Path to the JSON node tree ("-" for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Fail on constructs that cannot be written as well-formed XML
        #[arg(short = 'w', long)]
        require_well_formed: bool,

        /// Trim whitespace around text, processing instructions and doctype ids
        #[arg(short, long)]
        trim_whitespace: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that a node tree serializes to well-formed XML
    Check {
        /// Path to the JSON node tree ("-" for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();

    let result = match cli.command {
        Commands::Serialize {
            file,
            require_well_formed,
            trim_whitespace,
            output,
        } => cmd_serialize(file, require_well_formed, trim_whitespace, output),
        Commands::Check { file } => cmd_check(file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn load_tree(file: &Path) -> xmlserializer::Result<Node> {
    if file.as_os_str() == "-" {
        Node::from_reader(io::stdin().lock())
    } else {
        Node::from_reader(io::BufReader::new(fs::File::open(file)?))
    }
}

#[cfg(feature = "cli")]
fn cmd_serialize(
    file: PathBuf,
    require_well_formed: bool,
    trim_whitespace: bool,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = load_tree(&file)?;

    let config = SerializerConfig::new().with_preserve_whitespace(!trim_whitespace);
    let xml = XmlSerializer::new(config).serialize_to_string(&tree, require_well_formed)?;

    if let Some(output_path) = output {
        fs::write(output_path, &xml)?;
    } else {
        println!("{}", xml);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_check(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let tree = load_tree(&file)?;

    match XmlSerializer::default().serialize_to_string(&tree, true) {
        Ok(_) => {
            println!("well-formed");
            Ok(())
        }
        Err(e) if e.is_well_formedness() => {
            println!("not well-formed: {}", e);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
