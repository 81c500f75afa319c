//! Streaming a document with explicit open and close calls.
//!
//! Run with: cargo run --example stateful

use std::error::Error;
use std::io;
use yaml_write_stream::{from_stream, Encoding};

fn main() -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut writer = from_stream(stdout.lock(), Encoding::Utf8)?;

    writer.write_map()?;
    writer.write_key_value("service", "inventory")?;
    writer.write_key_value("replicas", 3)?;
    writer.write_keyed_sequence("regions")?;
    for region in ["eu-west-1", "us-east-2"] {
        writer.write_element(region)?;
    }
    writer.close_sequence()?;

    writer.write_keyed_sequence("checks")?;
    for (i, path) in ["/health", "/ready"].iter().enumerate() {
        writer.write_map()?;
        writer.write_key_value("path", *path)?;
        writer.write_key_value("interval", 10 * (i + 1))?;
        writer.write_key_value("timeout", None::<u32>)?;
        writer.close_map()?;
    }

    // Still inside "checks" and the root mapping; close() unwinds both.
    writer.close()?;
    Ok(())
}
