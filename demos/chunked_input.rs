//! Chunked Input Example
//!
//! Feeds the parser one byte at a time to show that chunk boundaries carry
//! no meaning - splits inside quotes, escapes, and CRLF delimiters all
//! resolve to the same records as a one-shot parse.

use csvstream::{CsvParser, Dialect};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let input = "title,quote\r\nGreeting,\"he said \"\"hi\"\", twice\"\r\n";

    println!("=== One-shot parse ===");
    let mut parser = CsvParser::new(Dialect::default())?;
    let mut one_shot = parser.push(input)?;
    one_shot.extend(parser.finish()?);
    for record in &one_shot {
        println!("{:?}", record);
    }

    println!("\n=== One byte per push ===");
    let mut parser = CsvParser::new(Dialect::default())?;
    let mut trickled = Vec::new();
    for ch in input.chars() {
        trickled.extend(parser.push(&ch.to_string())?);
    }
    trickled.extend(parser.finish()?);
    for record in &trickled {
        println!("{:?}", record);
    }

    assert_eq!(one_shot, trickled);
    println!("\nIdentical output across {} single-char pushes.", input.len());
    Ok(())
}
