//! identity-gen: write unique mock email addresses to a CSV file.
//!
//! # Usage
//!
//! ```bash
//! identity-gen 100
//! identity-gen 25 --output tenants.csv
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tenantry_identity::{IdentityError, generate_emails, save_emails};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "identity-gen")]
#[command(version)]
#[command(about = "Generate mock email addresses", long_about = None)]
struct Cli {
    /// Number of emails to generate
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    count: u64,

    /// Output CSV filename
    #[arg(long, short, default_value = "emails.csv")]
    output: PathBuf,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tenantry=info,identity_gen=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), IdentityError> {
    let count = address_count(cli.count)?;

    println!("Generating {count} unique email addresses...");
    let emails = generate_emails(count)?;
    save_emails(&emails, &cli.output)?;
    tracing::info!(count, path = %cli.output.display(), "Wrote identities");
    println!("Saved {} emails to {}", emails.len(), cli.output.display());
    Ok(())
}

/// `count` is at least 1, so only an overflow can fail here.
fn address_count(count: u64) -> Result<usize, IdentityError> {
    usize::try_from(count).map_err(|_| IdentityError::CountTooLarge(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_defaults_to_emails_csv() {
        let cli = Cli::try_parse_from(["identity-gen", "10"]).unwrap();
        assert_eq!(cli.count, 10);
        assert_eq!(cli.output, PathBuf::from("emails.csv"));

        let cli = Cli::try_parse_from(["identity-gen", "3", "-o", "out.csv"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("out.csv"));
    }

    #[test]
    fn rejects_non_positive_or_non_integer_counts() {
        for bad in ["0", "-5", "ten", "1.5"] {
            let err = Cli::try_parse_from(["identity-gen", bad])
                .err()
                .expect("should fail");
            assert!(
                matches!(
                    err.kind(),
                    ErrorKind::ValueValidation | ErrorKind::UnknownArgument
                ),
                "{bad}: {:?}",
                err.kind()
            );
        }
    }

    #[test]
    fn count_is_required() {
        let err = Cli::try_parse_from(["identity-gen"]).err().expect("should fail");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn oversized_count_reports_the_value_given() {
        assert_eq!(address_count(25).unwrap(), 25);

        let err = IdentityError::CountTooLarge(u64::MAX);
        assert!(err.to_string().contains(&u64::MAX.to_string()));
        if usize::BITS < u64::BITS {
            assert!(matches!(
                address_count(u64::MAX),
                Err(IdentityError::CountTooLarge(u64::MAX))
            ));
        }
    }
}
