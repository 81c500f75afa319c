//! Streaming serde types, plus a UTF-16 file written with the callback API.
//!
//! Run with: cargo run --example serde_stream

use serde::Serialize;
use std::error::Error;
use yaml_write_stream::{open_with, to_string, yaml, Encoding};

#[derive(Serialize)]
enum Status {
    Active,
    Suspended { reason: String },
}

#[derive(Serialize)]
struct Account {
    id: u64,
    owner: String,
    balance: f64,
    status: Status,
    labels: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let accounts = vec![
        Account {
            id: 1,
            owner: "Alice".to_string(),
            balance: 120.5,
            status: Status::Active,
            labels: vec!["vip".to_string()],
        },
        Account {
            id: 2,
            owner: "Bob".to_string(),
            balance: 0.0,
            status: Status::Suspended {
                reason: "chargeback".to_string(),
            },
            labels: Vec::new(),
        },
    ];
    println!("{}", to_string(&accounts)?);

    let doc = yaml!({ "generated": true, "accounts": [1, 2] });
    println!("{}", to_string(&doc)?);

    let path = std::env::temp_dir().join("accounts-utf16.yml");
    open_with(&path, Encoding::Utf16Le, |writer| {
        writer.write_sequence(|seq| {
            for account in &accounts {
                seq.write_element(account.owner.as_str())?;
            }
            Ok(())
        })
    })?;
    println!("wrote {} bytes to {}", std::fs::metadata(&path)?.len(), path.display());

    Ok(())
}
