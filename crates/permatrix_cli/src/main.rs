//! PERMATRIX CLI
//!
//! Compiles a role-by-resource permission matrix into a policy table.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use permatrix_cli::{FormatOverrides, compile_file, inspect_code, load_format, logging};
use permatrix_core::TableFormat;
use permatrix_table::PolicyWriter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "permatrix")]
#[command(about = "PERMATRIX - permission matrix to policy table compiler", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FormatArgs {
    /// JSON file with table format settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Field delimiter for input and output
    #[arg(short, long)]
    delimiter: Option<char>,
    /// Omit the attributes column from the policy table
    #[arg(long)]
    no_attributes: bool,
    /// Header label of the resource column
    #[arg(long)]
    resource_column: Option<String>,
    /// Index of the first role column
    #[arg(long)]
    role_offset: Option<usize>,
}

impl FormatArgs {
    fn resolve(self) -> Result<TableFormat> {
        let overrides = FormatOverrides {
            delimiter: self.delimiter,
            no_attributes: self.no_attributes,
            resource_column: self.resource_column,
            role_offset: self.role_offset,
        };
        load_format(self.config.as_deref(), &overrides).wrap_err("invalid table format")
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a permission matrix into a policy table
    Compile {
        /// Path to the permission matrix
        #[arg(short, long)]
        input: PathBuf,
        /// Path of the policy table to write
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Show the rules one permission code expands to
    Inspect {
        /// Permission code, e.g. `CRUO*GR`
        #[arg(short, long)]
        code: String,
        /// Resource to attribute the rules to
        #[arg(long, default_value = "resource")]
        resource: String,
        /// Role to attribute the rules to
        #[arg(long, default_value = "role")]
        role: String,
        /// Print rules as JSON instead of a table
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        format: FormatArgs,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Compile {
            input,
            output,
            format,
        } => {
            let format = format.resolve()?;
            let report = compile_file(&input, &output, &format)
                .wrap_err_with(|| format!("failed to compile {}", input.display()))?;

            println!("Policy table generated at: {}", report.output.display());
            println!(
                "{} rules from {} resources x {} roles, {} diagnostic(s)",
                report.rules,
                report.resources,
                report.roles,
                report.diagnostics.len()
            );
            Ok(())
        }
        Commands::Inspect {
            code,
            resource,
            role,
            json,
            format,
        } => {
            let format = format.resolve()?;
            let output = inspect_code(&resource, &role, &code)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&output.rules)?);
            } else {
                print!("{}", PolicyWriter::new(format).write_to_string(&output.rules)?);
            }
            Ok(())
        }
    }
}
