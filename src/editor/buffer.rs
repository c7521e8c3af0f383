use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use super::{EditorHost, MessageKind};

/// Byte range into a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Select the first occurrence of `needle` in `document`.
    pub fn find(document: &str, needle: &str) -> Option<Self> {
        if needle.is_empty() {
            return None;
        }
        document
            .find(needle)
            .map(|start| Self::new(start, start + needle.len()))
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn check(&self, document: &str) -> Result<()> {
        if self.start > self.end {
            anyhow::bail!("Selection start {} is after end {}", self.start, self.end);
        }
        if self.end > document.len() {
            anyhow::bail!(
                "Selection {}:{} is outside the document ({} bytes)",
                self.start,
                self.end,
                document.len()
            );
        }
        if !document.is_char_boundary(self.start) || !document.is_char_boundary(self.end) {
            anyhow::bail!(
                "Selection {}:{} does not fall on character boundaries",
                self.start,
                self.end
            );
        }
        Ok(())
    }
}

impl FromStr for Selection {
    type Err = anyhow::Error;

    /// Parse `start:end` byte offsets.
    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once(':')
            .with_context(|| format!("Expected a range as START:END, got '{s}'"))?;
        let start = start
            .trim()
            .parse()
            .with_context(|| format!("Invalid range start in '{s}'"))?;
        let end = end
            .trim()
            .parse()
            .with_context(|| format!("Invalid range end in '{s}'"))?;
        Ok(Self::new(start, end))
    }
}

/// A message the host displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostMessage {
    pub kind: MessageKind,
    pub text: String,
}

/// In-memory editor: a text buffer with an optional selection, a workspace
/// directory for saved files, and a scripted answer for the filename prompt.
#[derive(Debug)]
pub struct BufferHost {
    document: String,
    selection: Option<Selection>,
    workspace: PathBuf,
    save_as: Option<String>,
    messages: Vec<HostMessage>,
}

impl BufferHost {
    pub fn new(document: impl Into<String>, workspace: impl Into<PathBuf>) -> Self {
        Self {
            document: document.into(),
            selection: None,
            workspace: workspace.into(),
            save_as: None,
            messages: Vec::new(),
        }
    }

    /// Open a file from disk as the buffer.
    pub fn open(path: &Path, workspace: impl Into<PathBuf>) -> Result<Self> {
        let document = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::new(document, workspace))
    }

    pub fn select(&mut self, selection: Selection) -> Result<()> {
        selection.check(&self.document)?;
        self.selection = Some(selection);
        Ok(())
    }

    /// Answer the next filename prompt with `name`; `None` cancels it.
    pub fn answer_save_prompt(&mut self, name: Option<String>) {
        self.save_as = name;
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn messages(&self) -> &[HostMessage] {
        &self.messages
    }

    pub fn into_document(self) -> String {
        self.document
    }
}

impl EditorHost for BufferHost {
    fn selected_text(&self) -> Option<String> {
        self.selection
            .filter(|sel| !sel.is_empty())
            .map(|sel| self.document[sel.start..sel.end].to_string())
    }

    fn document_text(&self) -> String {
        self.document.clone()
    }

    fn replace_selection(&mut self, new_text: &str) -> Result<()> {
        let sel = self.selection.context("No selection to replace")?;
        sel.check(&self.document)?;
        self.document.replace_range(sel.start..sel.end, new_text);
        self.selection = Some(Selection::new(sel.start, sel.start + new_text.len()));
        Ok(())
    }

    fn prompt_for_filename(&mut self) -> Option<String> {
        self.save_as.take()
    }

    fn write_text_file(&mut self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.workspace.join(plain_file_name(name)?);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(path)
    }

    fn show_message(&mut self, kind: MessageKind, text: &str) {
        match kind {
            MessageKind::Info => tracing::info!("{}", text),
            MessageKind::Error => tracing::error!("{}", text),
        }
        self.messages.push(HostMessage {
            kind,
            text: text.to_string(),
        });
    }
}

/// Accept only a bare file name so saves stay inside the workspace.
fn plain_file_name(name: &str) -> Result<&Path> {
    let path = Path::new(name);
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(path),
        _ => anyhow::bail!("'{}' is not a plain file name inside the workspace", name),
    }
}
