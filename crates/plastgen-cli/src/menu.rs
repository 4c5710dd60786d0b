//! Interactive operator menu: generate N records, reset all tables, exit.
//!
//! Invalid input never aborts the loop; the prompt repeats until the value
//! passes validation or the operator exits.

use std::io::{self, BufRead, Write};

use sqlx::PgPool;

use plastgen_core::{validate_records, RunConfig};
use plastgen_generate::BatchDriver;
use plastgen_store::{admin, PostgresStore};

use crate::CliError;

pub async fn run(pool: &PgPool, schema: &str, run_config: RunConfig) -> Result<(), CliError> {
    // Repeated generations in one session continue the event sequence so
    // sequential identities never restart; a reset starts it over.
    let mut next_event = 0;
    loop {
        println!();
        println!("1) generate records");
        println!("2) reset all tables");
        println!("3) exit");

        let Some(choice) = prompt("> ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => {
                let Some(records) = prompt_record_count(run_config)? else {
                    return Ok(());
                };
                let store = PostgresStore::begin(pool).await?;
                let report = BatchDriver::new(store, run_config)
                    .starting_at(next_event)
                    .generate(records)
                    .await?;
                next_event += records;
                println!(
                    "generated {} records in {} ms (run {})",
                    report.records, report.elapsed_ms, report.run_id
                );
            }
            "2" => {
                let cleared = admin::reset_all(pool, schema).await?;
                next_event = 0;
                println!("cleared {cleared} tables");
            }
            "3" | "q" | "exit" => return Ok(()),
            other => println!("unknown option '{other}'"),
        }
    }
}

/// Re-prompt until the operator supplies a count within the supported
/// range, or EOF/exit. `None` means exit.
fn prompt_record_count(run_config: RunConfig) -> Result<Option<u64>, CliError> {
    loop {
        let Some(raw) = prompt("records to generate: ")? else {
            return Ok(None);
        };
        if raw == "q" || raw == "exit" {
            return Ok(None);
        }
        let parsed = match raw.parse::<u64>() {
            Ok(value) => value,
            Err(_) => {
                println!("'{raw}' is not a number");
                continue;
            }
        };
        match validate_records(parsed, run_config.id_policy) {
            Ok(()) => return Ok(Some(parsed)),
            Err(err) => println!("{err}"),
        }
    }
}

/// Read one trimmed line from stdin; `None` on EOF.
fn prompt(label: &str) -> Result<Option<String>, CliError> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
