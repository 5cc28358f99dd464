//! Interactive terminal frontend for the modal controller

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::task::JoinHandle;

use super::modal::{ModalController, ModalRequest};

/// Draw a dialog as a small text box
pub fn render_dialog(request: &ModalRequest) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n┌ {} {}\n", request.kind.icon(), request.title));
    for line in request.message.lines() {
        out.push_str(&format!("│ {}\n", line));
    }
    let buttons = request
        .buttons
        .iter()
        .enumerate()
        .map(|(i, b)| format!("[{}] {}", i + 1, b.text))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&format!("└ {}\n", buttons));
    out
}

/// What a line typed by the user means for the open dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalInput {
    Button(usize),
    Escape,
    Invalid,
}

/// Parse one input line; an empty line picks the focused (first) button
pub fn parse_input(line: &str, request: &ModalRequest) -> TerminalInput {
    let line = line.trim();
    if line.is_empty() {
        return request
            .default_button()
            .map(TerminalInput::Button)
            .unwrap_or(TerminalInput::Escape);
    }
    if line.eq_ignore_ascii_case("esc") || line.eq_ignore_ascii_case("q") {
        return TerminalInput::Escape;
    }
    match line.parse::<usize>() {
        Ok(n) if n >= 1 && n <= request.buttons.len() => TerminalInput::Button(n - 1),
        _ => TerminalInput::Invalid,
    }
}

/// Apply an answer typed for `request`. Returns `false` when that dialog is no
/// longer the open one, so the answer is dropped instead of reaching its
/// replacement.
pub fn answer(modal: &ModalController, request: &ModalRequest, input: TerminalInput) -> bool {
    if modal.current().as_ref() != Some(request) {
        return false;
    }
    match input {
        TerminalInput::Button(index) => modal.activate(index),
        TerminalInput::Escape => {
            modal.press_key("Escape");
            true
        }
        TerminalInput::Invalid => false,
    }
}

/// Spawn the task drawing dialogs on stdout and reading answers from stdin.
/// End of input dismisses the open dialog.
pub fn spawn(modal: Arc<ModalController>) -> JoinHandle<()> {
    let mut shown = modal.subscribe();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        loop {
            let request = shown.borrow_and_update().clone();
            if let Some(request) = request {
                let _ = stdout.write_all(render_dialog(&request).as_bytes()).await;
                loop {
                    let _ = stdout.write_all(b"> ").await;
                    let _ = stdout.flush().await;
                    let line = match lines.next_line().await {
                        Ok(Some(line)) => line,
                        Ok(None) | Err(_) => {
                            answer(&modal, &request, TerminalInput::Escape);
                            break;
                        }
                    };
                    match parse_input(&line, &request) {
                        input @ (TerminalInput::Button(_) | TerminalInput::Escape) => {
                            // replaced while we waited on stdin: redraw the new one
                            answer(&modal, &request, input);
                            break;
                        }
                        TerminalInput::Invalid => {
                            let _ = stdout
                                .write_all(b"Type a button number, Enter for the first one, or q to dismiss\n")
                                .await;
                        }
                    }
                }
            }
            if shown.changed().await.is_err() {
                break;
            }
        }
    })
}
