//! Streaming a document through nested handlers.
//!
//! Each container is open exactly as long as its handler runs.
//!
//! Run with: cargo run --example callback

use std::error::Error;
use yaml_write_stream::from_stream_with;

fn main() -> Result<(), Box<dyn Error>> {
    let rows = [("alpha", 1.5), ("beta", 2.0), ("gamma", f64::INFINITY)];

    let out = from_stream_with(Vec::new(), "UTF-8", |writer| {
        writer.write_map(|doc| {
            doc.write_key_value("title", "measurements")?;
            doc.write_key_value("empty", "")?;
            doc.write_sequence("rows", |seq| {
                for (name, value) in rows {
                    seq.write_map(|row| {
                        row.write_key_value("name", name)?;
                        row.write_key_value("value", value)
                    })?;
                }
                Ok(())
            })?;
            doc.write_map("by_id", |ids| {
                ids.write_key_value("100", "alpha")?;
                ids.write_key_value(200, "beta")
            })
        })
    })?;

    println!("{}", String::from_utf8(out)?);
    Ok(())
}
