//! Operator input.
//!
//! Stdin lines and Ctrl-C both arrive as messages on one channel, so a prompt
//! waiting for input wakes up when the operator interrupts.

use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::Context;

enum Input {
    Line(String),
    Interrupt,
    Closed,
}

/// Why the menu loop has to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    Interrupted,
    EndOfInput,
}

pub struct Prompter {
    rx: Receiver<Input>,
}

impl Prompter {
    /// Start the stdin reader thread and install the Ctrl-C handler.
    pub fn start() -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel();

        let interrupt_tx: Sender<Input> = tx.clone();
        ctrlc::set_handler(move || {
            let _ = interrupt_tx.send(Input::Interrupt);
        })
        .context("failed to install Ctrl-C handler")?;

        thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(Input::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(_) => break,
                }
            }
            let _ = tx.send(Input::Closed);
        });

        Ok(Self { rx })
    }

    pub fn ask(&self, prompt: &str) -> Result<String, Stop> {
        print!("{prompt}");
        let _ = std::io::stdout().flush();

        match self.rx.recv() {
            Ok(Input::Line(line)) => Ok(line.trim().to_string()),
            Ok(Input::Interrupt) => Err(Stop::Interrupted),
            Ok(Input::Closed) | Err(_) => Err(Stop::EndOfInput),
        }
    }

    /// Ask until the answer parses as `T`.
    pub fn ask_parsed<T: FromStr>(&self, prompt: &str) -> Result<T, Stop> {
        loop {
            let answer = self.ask(prompt)?;
            match answer.parse() {
                Ok(value) => return Ok(value),
                Err(_) => println!("'{answer}' is not a valid number, try again."),
            }
        }
    }

    /// Like [`Prompter::ask_parsed`], but an empty answer yields `None`.
    pub fn ask_optional<T: FromStr>(&self, prompt: &str) -> Result<Option<T>, Stop> {
        loop {
            let answer = self.ask(prompt)?;
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => println!("'{answer}' is not a valid number, try again."),
            }
        }
    }
}
