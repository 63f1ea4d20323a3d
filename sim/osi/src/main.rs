use osi_core::{logging::init_tracing, Stack};
use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};
use tracing::error;

/// Reads one message from stdin and sends it down and back up the OSI stack.
fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {e}");
    }

    print!("Enter a message to send: ");
    // The prompt has no newline, so it would otherwise sit in the buffer
    if let Err(e) = io::stdout().flush() {
        eprintln!("{e}");
    }
    let message = match read_message(io::stdin().lock()) {
        Ok(message) => message,
        Err(e) => {
            eprintln!("Failed to read a message: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stack = Stack::osi();
    println!("Layers: {}", stack.layer_names().join(" -> "));

    let received = stack.send(&message).and_then(|frame| {
        println!("\nTransmitting data...\n");
        stack.receive(frame)
    });
    match received {
        Ok(received) => {
            println!("\nFinal received message: {received}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Simulation aborted: {e}");
            eprintln!("Simulation aborted: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Reads a single line, dropping only the line terminator. End of input
/// without a line counts as the empty message.
fn read_message(mut input: impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
