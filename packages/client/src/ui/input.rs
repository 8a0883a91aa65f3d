//! Line input from the terminal.
//!
//! rustyline blocks, so the editor lives on its own thread. Screens request a
//! line with a prompt and await it alongside their other event sources.

use std::{sync::mpsc as std_mpsc, thread};

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::error::ClientError;

type LineResult = Result<Option<String>, ReadlineError>;

pub struct LineReader {
    prompts: std_mpsc::Sender<String>,
    lines: mpsc::Receiver<LineResult>,
    pending: bool,
}

impl LineReader {
    pub fn spawn() -> Result<Self, ClientError> {
        let (ready_tx, ready_rx) = std_mpsc::channel::<Result<(), ReadlineError>>();
        let (prompt_tx, prompt_rx) = std_mpsc::channel::<String>();
        let (line_tx, line_rx) = mpsc::channel(1);

        thread::spawn(move || {
            let mut editor = match DefaultEditor::new() {
                Ok(editor) => {
                    let _ = ready_tx.send(Ok(()));
                    editor
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            while let Ok(prompt) = prompt_rx.recv() {
                let line = match editor.readline(&prompt) {
                    Ok(line) => {
                        if !line.trim().is_empty() {
                            let _ = editor.add_history_entry(line.as_str());
                        }
                        Ok(Some(line))
                    }
                    // Ctrl-D / Ctrl-C
                    Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
                    Err(e) => Err(e),
                };
                let last = !matches!(line, Ok(Some(_)));
                if line_tx.blocking_send(line).is_err() || last {
                    break;
                }
            }
        });

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Err(ClientError::Input(ReadlineError::Eof)),
        }

        Ok(Self {
            prompts: prompt_tx,
            lines: line_rx,
            pending: false,
        })
    }

    /// Show `prompt` unless a line is already being read.
    pub fn request(&mut self, prompt: &str) {
        if self.pending {
            return;
        }
        if self.prompts.send(prompt.to_string()).is_ok() {
            self.pending = true;
        }
    }

    /// Next requested line. `None` once the terminal is closed.
    ///
    /// Cancel safe: a line that arrives later is kept for the next call.
    pub async fn next(&mut self) -> Result<Option<String>, ClientError> {
        match self.lines.recv().await {
            Some(line) => {
                self.pending = false;
                Ok(line?)
            }
            None => Ok(None),
        }
    }

    /// Prompt and wait for one line.
    pub async fn read(&mut self, prompt: &str) -> Result<Option<String>, ClientError> {
        self.request(prompt);
        self.next().await
    }
}
