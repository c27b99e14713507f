//! Terminal input and output.

use std::collections::VecDeque;
use std::sync::mpsc as std_mpsc;
use std::thread;

use async_trait::async_trait;
use rustyline::{DefaultEditor, ExternalPrinter, error::ReadlineError};
use tokio::sync::mpsc;

use super::error::TerminalError;

/// Line-oriented terminal the views render to.
#[async_trait]
pub trait Terminal: Send {
    /// Read one line. `None` means the user closed the input (Ctrl-D/Ctrl-C).
    ///
    /// Cancel-safe: a read abandoned mid-way is resumed by the next call.
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>, TerminalError>;

    fn print(&mut self, line: &str);
}

type LineResult = Result<Option<String>, TerminalError>;

type BoxedPrinter = Box<dyn ExternalPrinter + Send>;

/// Prints above a pending prompt through rustyline, or to stdout when the
/// terminal does not support it.
struct PromptPrinter {
    external: Option<BoxedPrinter>,
}

impl PromptPrinter {
    fn print(&mut self, line: &str) {
        if let Some(external) = self.external.as_mut() {
            match external.print(format!("{line}\n")) {
                Ok(()) => return,
                Err(e) => {
                    tracing::debug!("External printer failed; using stdout: {}", e);
                    self.external = None;
                }
            }
        }
        println!("{line}");
    }
}

/// Interactive terminal backed by rustyline.
///
/// The editor lives on its own thread because `readline` blocks.
pub struct RustylineTerminal {
    prompts: std_mpsc::Sender<String>,
    lines: mpsc::UnboundedReceiver<LineResult>,
    outstanding: bool,
    printer: PromptPrinter,
}

impl RustylineTerminal {
    pub fn new() -> Result<Self, TerminalError> {
        let (prompt_tx, prompt_rx) = std_mpsc::channel::<String>();
        let (line_tx, line_rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) =
            std_mpsc::channel::<Result<Option<BoxedPrinter>, TerminalError>>();

        thread::Builder::new()
            .name("terminal-input".to_string())
            .spawn(move || {
                let mut editor = match DefaultEditor::new() {
                    Ok(mut editor) => {
                        // Fails when stdin or stdout is not a TTY.
                        let printer = editor
                            .create_external_printer()
                            .ok()
                            .map(|printer| Box::new(printer) as BoxedPrinter);
                        let _ = ready_tx.send(Ok(printer));
                        editor
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(TerminalError::Init(e.to_string())));
                        return;
                    }
                };

                while let Ok(prompt) = prompt_rx.recv() {
                    let result = match editor.readline(&prompt) {
                        Ok(line) => {
                            let _ = editor.add_history_entry(line.as_str());
                            Ok(Some(line))
                        }
                        Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
                        Err(e) => Err(TerminalError::Io(e.to_string())),
                    };
                    if line_tx.send(result).is_err() {
                        break;
                    }
                }
            })
            .map_err(|e| TerminalError::Init(e.to_string()))?;

        let external = ready_rx
            .recv()
            .map_err(|e| TerminalError::Init(e.to_string()))??;

        Ok(Self {
            prompts: prompt_tx,
            lines: line_rx,
            outstanding: false,
            printer: PromptPrinter { external },
        })
    }
}

#[async_trait]
impl Terminal for RustylineTerminal {
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>, TerminalError> {
        if !self.outstanding {
            self.prompts
                .send(prompt.to_string())
                .map_err(|_| TerminalError::Io("input thread has stopped".to_string()))?;
            self.outstanding = true;
        }
        let result = self
            .lines
            .recv()
            .await
            .ok_or_else(|| TerminalError::Io("input thread has stopped".to_string()))?;
        self.outstanding = false;
        result
    }

    fn print(&mut self, line: &str) {
        self.printer.print(line);
    }
}

/// Non-interactive terminal replaying prepared input and capturing output.
///
/// Runs the client headless, e.g. from scripts or tests. Input is exhausted
/// like a closed stdin.
#[derive(Debug, Default, Clone)]
pub struct ScriptedTerminal {
    input: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Lines printed so far
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// True when some printed line contains `needle`.
    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }

    /// Input lines not yet consumed
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

#[async_trait]
impl Terminal for ScriptedTerminal {
    async fn read_line(&mut self, _prompt: &str) -> Result<Option<String>, TerminalError> {
        Ok(self.input.pop_front())
    }

    fn print(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Printer recording what it is given
    struct RecordingPrinter(Arc<Mutex<Vec<String>>>);

    impl ExternalPrinter for RecordingPrinter {
        fn print(&mut self, msg: String) -> rustyline::Result<()> {
            self.0.lock().unwrap().push(msg);
            Ok(())
        }
    }

    /// Printer that always fails
    struct BrokenPrinter;

    impl ExternalPrinter for BrokenPrinter {
        fn print(&mut self, _msg: String) -> rustyline::Result<()> {
            Err(ReadlineError::Interrupted)
        }
    }

    #[test]
    fn test_prompt_printer_uses_external_printer() {
        // テスト項目: 入力待ちのプロンプトを壊さないよう、行は rustyline の外部プリンタ経由で出力される
        // given (前提条件):
        let printed = Arc::new(Mutex::new(Vec::new()));
        let mut printer = PromptPrinter {
            external: Some(Box::new(RecordingPrinter(printed.clone()))),
        };

        // when (操作):
        printer.print("[12:00:00] Bob: hi");
        printer.print("Live updates disconnected.");

        // then (期待する結果):
        assert_eq!(
            *printed.lock().unwrap(),
            [
                "[12:00:00] Bob: hi\n".to_string(),
                "Live updates disconnected.\n".to_string()
            ]
        );
    }

    #[test]
    fn test_prompt_printer_falls_back_when_external_fails() {
        // テスト項目: 外部プリンタが失敗したら以降は標準出力に切り替わる
        // given (前提条件):
        let mut printer = PromptPrinter {
            external: Some(Box::new(BrokenPrinter)),
        };

        // when (操作):
        printer.print("hello");

        // then (期待する結果):
        assert!(printer.external.is_none());
    }

    #[tokio::test]
    async fn test_scripted_terminal_replays_then_closes() {
        // テスト項目: 用意した入力を順に返し、尽きたら None を返す
        // given (前提条件):
        let mut terminal = ScriptedTerminal::new(["first", "second"]);

        // when (操作):
        let first = terminal.read_line("> ").await.unwrap();
        let second = terminal.read_line("> ").await.unwrap();
        let closed = terminal.read_line("> ").await.unwrap();

        // then (期待する結果):
        assert_eq!(first.as_deref(), Some("first"));
        assert_eq!(second.as_deref(), Some("second"));
        assert_eq!(closed, None);
        assert_eq!(terminal.remaining(), 0);
    }

    #[test]
    fn test_scripted_terminal_captures_output() {
        // テスト項目: 出力された行を記録する
        // given (前提条件):
        let mut terminal = ScriptedTerminal::default();

        // when (操作):
        terminal.print("hello there");

        // then (期待する結果):
        assert_eq!(terminal.output(), ["hello there".to_string()]);
        assert!(terminal.printed("hello"));
        assert!(!terminal.printed("bye"));
    }
}
