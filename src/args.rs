pub mod types;
pub mod validation;

pub use types::*;

/// Parses and validates the command line.
///
/// # Errors
///
/// Will return `Err` if the arguments are inconsistent
pub fn args_checks() -> Result<Args, String> {
    use clap::Parser;

    let args = Args::parse();
    args.validate()?;
    Ok(args)
}
