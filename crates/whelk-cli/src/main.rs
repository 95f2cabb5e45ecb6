//! Whelk CLI - interactive terminal for the whelk shell
//!
//! Usage:
//!   whelk                  Interactive session
//!   whelk -c "command"     Execute one command and exit
//!
//! Set `WHELK_API_KEY` to enable natural-language suggestions for
//! unrecognized input; without it the local keyword matcher still runs.

use std::io::{self, BufRead, Write};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use whelk::{HttpSuggester, Shell};

fn print_banner() {
    println!("Welcome to the whelk terminal!");
    println!("Available commands:");
    println!("  ls                : List files in current directory");
    println!("  cd <dir>          : Change directory");
    println!("  pwd               : Show current directory");
    println!("  mkdir <dir>       : Create a new directory");
    println!("  rm <file/dir>     : Remove a file or directory");
    println!("  cpu               : Show CPU usage");
    println!("  mem               : Show memory usage");
    println!("  exit              : Exit the terminal");
    println!();
    println!(
        "You can also type natural language commands like 'create folder test' \
         or 'move file.txt into test'."
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to stderr so diagnostics never mix with command output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let mut builder = Shell::builder();
    match HttpSuggester::from_env() {
        Some(suggester) => builder = builder.suggester(suggester),
        None => tracing::debug!("WHELK_API_KEY not set; suggestions disabled"),
    }
    let mut shell = builder.build()?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 3 && args[1] == "-c" {
        // One-shot: whelk -c "mkdir demo"
        let turn = shell.execute(&args[2]).await;
        print!("{}", turn.output);
        return Ok(());
    }

    print_banner();
    let stdin = io::stdin();
    loop {
        print!("{} >> ", shell.cwd().display());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // End of input behaves like exit.
            println!();
            println!("Exiting terminal...");
            break;
        }

        let turn = shell.execute(&line).await;
        print!("{}", turn.output);
        if turn.exit {
            break;
        }
    }

    Ok(())
}
