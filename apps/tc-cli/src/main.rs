mod drive;
mod error;

use clap::{Parser, Subcommand, ValueEnum};
use drive::{Profiles, TransientOptions};
use error::CliResult;
use std::path::{Path, PathBuf};
use tc_problem::Problem;

#[derive(Parser)]
#[command(name = "tc-cli")]
#[command(about = "Two-channel coupled heat transfer solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a case file
    Validate {
        /// Path to the case file (YAML, or JSON by extension)
        case_path: PathBuf,
    },
    /// Write a starter case file
    Template {
        /// Output path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Solve a case
    #[command(subcommand)]
    Run(RunCommands),
}

#[derive(Subcommand)]
enum RunCommands {
    /// Solve for the stationary state
    Steady {
        case_path: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// March in time from the initial state
    Transient {
        case_path: PathBuf,
        /// Time step in seconds
        #[arg(long)]
        dt: f64,
        /// End time in seconds
        #[arg(long)]
        t_end: f64,
        /// Shrink the solid heat capacity to reach steady state faster
        #[arg(long)]
        stationary_mode: bool,
        /// Stop as soon as a step leaves the profiles unchanged
        #[arg(long)]
        until_stationary: bool,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Template { output } => cmd_template(output.as_deref()),
        Commands::Run(run_cmd) => match run_cmd {
            RunCommands::Steady { case_path, format } => cmd_run_steady(&case_path, format),
            RunCommands::Transient {
                case_path,
                dt,
                t_end,
                stationary_mode,
                until_stationary,
                format,
            } => cmd_run_transient(
                &case_path,
                &TransientOptions {
                    dt,
                    t_end,
                    stationary_mode,
                    stop_when_stationary: until_stationary,
                },
                format,
            ),
        },
    }
}

fn cmd_validate(case_path: &Path) -> CliResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = tc_project::load_case(case_path)?;
    tc_project::compile_case(&case)?;
    println!("✓ Case '{}' is valid ({} cells)", case.name, case.mesh.num_cells);
    Ok(())
}

fn cmd_template(output: Option<&Path>) -> CliResult<()> {
    let case = tc_project::CaseDef::template();
    match output {
        Some(path) => {
            tc_project::save_yaml(path, &case)?;
            println!("✓ Template written to {}", path.display());
        }
        None => print!("{}", serde_yaml::to_string(&case)?),
    }
    Ok(())
}

fn open_problem(case_path: &Path) -> CliResult<Problem> {
    let case = tc_project::load_case(case_path)?;
    let setup = tc_project::compile_case(&case)?;
    let mut problem = Problem::new(setup)?;
    problem.initialize()?;
    Ok(problem)
}

fn cmd_run_steady(case_path: &Path, format: Format) -> CliResult<()> {
    let mut problem = open_problem(case_path)?;
    let profiles = drive::steady(&mut problem)?;
    problem.terminate()?;
    print_profiles(&profiles, format)
}

fn cmd_run_transient(case_path: &Path, options: &TransientOptions, format: Format) -> CliResult<()> {
    let mut problem = open_problem(case_path)?;
    let profiles = drive::transient(&mut problem, options)?;
    problem.terminate()?;
    print_profiles(&profiles, format)
}

fn print_profiles(profiles: &Profiles, format: Format) -> CliResult<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(profiles)?),
        Format::Table => {
            println!(
                "t = {:.4} s  residual = {:.3e}  steps = {}  cutbacks = {}",
                profiles.time_s, profiles.residual, profiles.steps, profiles.cutbacks
            );
            println!(
                "{:>8}  {:>12}  {:>12}  {:>12}",
                "z [m]", "fluid_1 [K]", "fluid_2 [K]", "solid [K]"
            );
            for row in &profiles.cells {
                println!(
                    "{:>8.3}  {:>12.3}  {:>12.3}  {:>12.3}",
                    row.z_m, row.fluid_1_k, row.fluid_2_k, row.solid_k
                );
            }
        }
    }
    Ok(())
}
