use anyhow::{Context, Result};
use game_core::TICK_INTERVAL;
use game_runner::{Config, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::info;

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// Single-threaded: the game is owned by this loop and never shared.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so the chat feed on stdout stays readable
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    info!("Starting Draw and Guess...");

    let config = Config::new().context("Invalid configuration")?;
    let mut session = Session::new(&config)?;
    print_lines(session.intro());

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut clock = tokio::time::interval(TICK_INTERVAL);
    // The first tick of an interval completes immediately
    clock.tick().await;

    loop {
        tokio::select! {
            _ = clock.tick() => print_lines(session.tick()),
            line = input.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    info!("Input closed");
                    break;
                };
                let reply = session.handle_line(&line);
                print_lines(reply.lines);
                if reply.quit {
                    break;
                }
            }
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    info!("Session ended.");
    Ok(())
}
