pub mod buffer;

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::naming::{convert, detect_document_style, detect_style, NamingStyle};

pub use buffer::{BufferHost, Selection};

/// Severity of a message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Info,
    Error,
}

/// The editor surface the formatter works against.
pub trait EditorHost {
    /// Current selection, `None` when nothing is selected.
    fn selected_text(&self) -> Option<String>;
    fn document_text(&self) -> String;
    fn replace_selection(&mut self, new_text: &str) -> Result<()>;
    /// Ask the user for a file name. `None` means the prompt was cancelled.
    fn prompt_for_filename(&mut self) -> Option<String>;
    /// Persist `content` under `name` and return where it was written.
    fn write_text_file(&mut self, name: &str, content: &str) -> Result<PathBuf>;
    fn show_message(&mut self, kind: MessageKind, text: &str);
}

/// Result of the optional save step after a conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaveOutcome {
    Cancelled,
    Saved { path: PathBuf },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FormatOutcome {
    NoSelection,
    EmptySelection,
    /// Styles match or no converter applies; the document is untouched.
    Unchanged {
        selection_style: NamingStyle,
        document_style: NamingStyle,
    },
    Converted {
        original: String,
        converted: String,
        from: NamingStyle,
        to: NamingStyle,
        saved: SaveOutcome,
    },
}

/// Convert the selected identifier to the naming style of its document.
///
/// Missing preconditions are reported through the host and returned as an
/// outcome; only a failing replacement is an `Err`.
pub fn format_selection<H: EditorHost>(host: &mut H, extension: &str) -> Result<FormatOutcome> {
    let selected = match host.selected_text() {
        Some(text) => text,
        None => {
            host.show_message(MessageKind::Error, "Please select a function name to format.");
            return Ok(FormatOutcome::NoSelection);
        }
    };

    let identifier = selected.trim();
    if identifier.is_empty() {
        host.show_message(
            MessageKind::Error,
            "Selected text does not appear to be a function name.",
        );
        return Ok(FormatOutcome::EmptySelection);
    }

    let selection_style = detect_style(identifier);
    let document_style = detect_document_style(&host.document_text());
    tracing::debug!(
        "Selection '{}' is {}, document is {}",
        identifier,
        selection_style,
        document_style
    );

    if selection_style == document_style || !selection_style.is_known() || !document_style.is_known()
    {
        tracing::info!("Nothing to convert for '{}'", identifier);
        return Ok(FormatOutcome::Unchanged {
            selection_style,
            document_style,
        });
    }

    let converted = convert(identifier, selection_style, document_style);
    host.replace_selection(&converted)?;
    tracing::info!(
        "Converted '{}' ({}) -> '{}' ({})",
        identifier,
        selection_style,
        converted,
        document_style
    );

    let saved = save_formatted(host, &converted, extension);

    Ok(FormatOutcome::Converted {
        original: identifier.to_string(),
        converted,
        from: selection_style,
        to: document_style,
        saved,
    })
}

/// Prompt for a file name and write `content` to `<name>.<extension>`.
/// Write failures are reported to the user, never propagated.
pub fn save_formatted<H: EditorHost>(host: &mut H, content: &str, extension: &str) -> SaveOutcome {
    let name = match host.prompt_for_filename() {
        Some(name) if !name.trim().is_empty() => name,
        _ => {
            tracing::debug!("Save prompt cancelled");
            return SaveOutcome::Cancelled;
        }
    };

    let file_name = format!("{}.{}", name.trim(), extension);
    match host.write_text_file(&file_name, content) {
        Ok(path) => {
            host.show_message(
                MessageKind::Info,
                &format!("Formatted code saved as {file_name}"),
            );
            SaveOutcome::Saved { path }
        }
        Err(e) => {
            let reason = format!("{e:#}");
            host.show_message(
                MessageKind::Error,
                &format!("Error saving the file: {reason}"),
            );
            SaveOutcome::Failed { reason }
        }
    }
}
