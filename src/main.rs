//! @ai:module:intent CLI entry point for building and inspecting API errors
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on api_error, output, options

use apierr::{
    output, ApiError, ErrorKind, ErrorOptions, JsonOptions, OutputFormat, Result, StatusCode,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "apierr")]
#[command(author, version, about = "Build, inspect and rehydrate typed API errors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in error kinds with their default status and message
    Kinds {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Build an error of the given kind and print its wire form
    Make {
        /// Kind id, e.g. not-found, conflict, api-error
        kind: ErrorKind,

        /// Message (required for api-error)
        #[arg(long, short)]
        message: Option<String>,

        /// Resource the error concerns
        #[arg(long)]
        entity: Option<String>,

        /// Dot-delimited path of the offending field
        #[arg(long)]
        key_path: Option<String>,

        /// Override the kind's default status code
        #[arg(long)]
        status: Option<u16>,

        /// Override the kind's default name
        #[arg(long)]
        name: Option<String>,

        /// Marker of who raised the error
        #[arg(long)]
        origin: Option<String>,

        #[command(flatten)]
        print: PrintArgs,
    },

    /// Rehydrate a wire payload received from another service
    Parse {
        /// JSON file to read, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Status code the payload arrived with
        #[arg(long)]
        status: u16,

        /// Marker of the service the payload came from
        #[arg(long)]
        origin: String,

        #[command(flatten)]
        print: PrintArgs,
    },
}

#[derive(clap::Args)]
struct PrintArgs {
    /// Include the structured stack in the output
    #[arg(long, env = "APIERR_INCLUDE_STACK")]
    include_stack: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value = "json")]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

impl PrintArgs {
    fn json_options(&self) -> JsonOptions {
        JsonOptions {
            include_stack: self.include_stack,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Kinds { format } => {
            println!("{}", output::format_taxonomy(format.into()));
            Ok(())
        }

        Commands::Make {
            kind,
            message,
            entity,
            key_path,
            status,
            name,
            origin,
            print,
        } => make(kind, message, entity, key_path, status, name, origin).map(|err| {
            println!(
                "{}",
                output::format_error(&err, print.format.into(), &print.json_options())
            );
        }),

        Commands::Parse {
            input,
            status,
            origin,
            print,
        } => parse(&input, status, origin).map(|err| {
            println!(
                "{}",
                output::format_error(&err, print.format.into(), &print.json_options())
            );
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// @ai:intent Build an error from command-line flags
/// @ai:effects pure
fn make(
    kind: ErrorKind,
    message: Option<String>,
    entity: Option<String>,
    key_path: Option<String>,
    status: Option<u16>,
    name: Option<String>,
    origin: Option<String>,
) -> Result<ApiError> {
    let options = ErrorOptions {
        name,
        message,
        entity,
        status_code: status.map(StatusCode::new).transpose()?,
        key_path: key_path.as_deref().and_then(apierr::KeyPath::parse),
        origin,
        ..Default::default()
    };

    ApiError::build(kind, options)
}

/// @ai:intent Read a wire payload and rehydrate it
/// @ai:effects fs:read, io:stdin
fn parse(input: &Path, status: u16, origin: String) -> Result<ApiError> {
    let status = StatusCode::new(status)?;

    let content = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input).map_err(|e| apierr::Error::FileRead {
            path: input.to_path_buf(),
            source: e,
        })?
    };

    let data: serde_json::Value = serde_json::from_str(&content)?;
    ApiError::parse_json(data, status, origin)
}
