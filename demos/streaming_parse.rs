//! Streaming Parse Examples
//!
//! Demonstrates the core parsing capabilities:
//! - Parsing with first-row headers
//! - Custom dialects (delimiters, escape, strictness)
//! - Lenient header reconciliation
//! - Reading records from a file

use csvstream::{CsvParser, CsvReader, Dialect, HeaderMode};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Streaming Parse Examples ===\n");

    // Example 1: first row as headers
    println!("1. First-row headers...");
    {
        let mut parser = CsvParser::new(Dialect::default())?;
        let mut records = parser.push("city,country\r\nParis,France\r\nOsaka,Japan\r\n")?;
        records.extend(parser.finish()?);

        println!("   Headers: {:?}", parser.headers());
        for record in &records {
            println!("   {:?}", record);
        }
    }

    // Example 2: semicolon dialect with single-quote escape
    println!("\n2. Custom dialect...");
    {
        let dialect = Dialect::default()
            .escape("'")
            .row_break("\n")
            .column_break(";");
        let mut parser = CsvParser::new(dialect)?;
        let mut records = parser.push("name;motto\nakira;'semi;colons \nand newlines'\n")?;
        records.extend(parser.finish()?);

        for record in &records {
            println!("   motto = {:?}", record.get("motto"));
        }
    }

    // Example 3: lenient reconciliation invents headers for wide rows
    println!("\n3. Lenient mode...");
    {
        let dialect = Dialect::default()
            .header_mode(HeaderMode::Fixed(vec!["a".to_string()]))
            .row_break("\n")
            .strict(false);
        let mut parser = CsvParser::new(dialect)?;
        let mut records = parser.push("1,2,3\n")?;
        records.extend(parser.finish()?);

        println!("   Headers after reconciliation: {:?}", parser.headers());
        println!("   Record: {:?}", records[0]);
    }

    // Example 4: read a file through the iterator interface
    println!("\n4. Reading a file...");
    {
        let path = std::env::temp_dir().join("csvstream_demo.csv");
        std::fs::write(&path, "id,value\r\n1,alpha\r\n2,beta\r\n")?;

        let mut reader = CsvReader::open(&path)?;
        for record in reader.records() {
            let record = record?;
            println!("   {:?}", record);
        }

        std::fs::remove_file(&path).ok();
    }

    println!("\nDone.");
    Ok(())
}
