//! `config init`: write the annotated example configuration

use crate::cli::ConfigInitArgs;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

const EXAMPLE_CONFIG: &str = include_str!("../../courier.example.toml");

/// Handle `courier config init` command
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    write_example(&args.output, args.force)?;

    println!("✓ Wrote {}", args.output.display());
    println!("  Set [store] backend = \"redis\" to keep history across restarts.");
    Ok(())
}

/// Write the example config to `path`. Without `force`, an existing file is
/// left alone and reported as an error.
fn write_example(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = options.open(path).map_err(|e| -> Box<dyn std::error::Error> {
        if e.kind() == ErrorKind::AlreadyExists {
            format!("{} already exists (pass --force to replace it)", path.display()).into()
        } else {
            e.into()
        }
    })?;
    file.write_all(EXAMPLE_CONFIG.as_bytes())?;
    Ok(())
}
