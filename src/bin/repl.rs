use dice_notation::stringifiers::{MarkdownStringifier, Stringify};
use dice_notation::{Document, RollContext};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut ctx = RollContext::default();
    let mut stringifier = MarkdownStringifier::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut buf = String::new();
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        if line.is_empty() {
            let mut doc = Document::parse(buf.trim());
            tracing::debug!(notation = %doc, "rolling");
            let results = doc.roll(&mut ctx);
            println!("{}", stringifier.stringify_all(&results));
            print!("> ");
            io::stdout().flush()?;
            buf.clear();
        } else {
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(&line);
            print!("... ");
            io::stdout().flush()?;
        }
    }
    Ok(())
}
