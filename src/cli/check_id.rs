//! Check-id command: national ID number format check.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::forms::validate_national_id;
use clap::Args;
use serde::Serialize;

/// Check that a value is a well-formed 12-digit national ID number
#[derive(Debug, Clone, Args)]
pub struct CheckIdArgs {
    /// Value to check
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CheckIdResponse {
    valid: bool,
    errors: Vec<String>,
}

impl CheckIdArgs {
    /// Execute the check-id command
    pub fn execute(&self) -> CliResult<()> {
        let result = validate_national_id(&self.value);
        let response = CheckIdResponse {
            valid: result.is_ok(),
            errors: result.err().into_iter().collect(),
        };

        if self.json {
            print_json(&response)?;
        } else if response.valid {
            println!("✓ Valid ID number");
        } else {
            for error in &response.errors {
                println!("✗ {error}");
            }
        }

        if response.valid {
            Ok(())
        } else {
            Err(CliError::validation("Invalid ID number"))
        }
    }
}
