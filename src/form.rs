//! Form state for the tagging client.
//!
//! Owns the three mutually exclusive input sources (inline text, file, URL),
//! the domain selection, and the score-display toggle. The submit gate is
//! derived from this state; nothing else holds input state.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Advisory maximum for inline text input, in characters.
///
/// Input beyond this length is not blocked; the remaining-character counter
/// simply goes negative.
pub const MAX_TEXT_LEN: i64 = 3000;

/// The three mutually exclusive input sources.
///
/// Exactly one mode is active at any time. The active mode determines which
/// input group is shown, which selector label is emphasized, and which
/// validity predicate gates submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Inline text entered directly.
    Text,
    /// A file chosen from disk.
    File,
    /// A document URL fetched by the backend.
    Url,
}

impl InputMode {
    /// All modes in selector order.
    pub const ALL: [InputMode; 3] = [InputMode::Text, InputMode::File, InputMode::Url];

    /// Returns the selector label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            InputMode::Text => "Text",
            InputMode::File => "File",
            InputMode::Url => "URL",
        }
    }
}

/// The client-side form state.
///
/// Mutated only by user input events; read by the submit gate and the
/// request dispatcher. Lives for the whole session.
///
/// # Examples
///
/// ```
/// use percolate::form::{FormState, InputMode};
///
/// let mut form = FormState::new();
/// assert_eq!(form.mode(), InputMode::Text);
/// assert!(!form.is_valid());
///
/// form.push_char('a');
/// assert!(form.is_valid());
///
/// // Switching mode clears the new mode's field and re-disables submission.
/// form.select_mode(InputMode::Url);
/// assert!(!form.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct FormState {
    mode: InputMode,
    text: String,
    file: Option<PathBuf>,
    url: String,
    selected_domains: BTreeSet<String>,
    score_display: bool,
}

impl FormState {
    /// Creates a fresh form: text mode active, all fields empty, no domains
    /// selected, score display off.
    pub fn new() -> Self {
        Self {
            mode: InputMode::Text,
            text: String::new(),
            file: None,
            url: String::new(),
            selected_domains: BTreeSet::new(),
            score_display: false,
        }
    }

    /// Returns the active input mode.
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Returns the inline text buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the chosen file, if any.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Returns the URL field.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the selected domain identifiers.
    pub fn selected_domains(&self) -> &BTreeSet<String> {
        &self.selected_domains
    }

    /// Returns whether relevance scores should be displayed.
    pub fn score_display(&self) -> bool {
        self.score_display
    }

    /// Selects an input mode.
    ///
    /// Switching clears any previously entered value for the newly selected
    /// mode's companion field, so the user starts fresh when arriving from
    /// another mode. Re-selecting the active mode is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use percolate::form::{FormState, InputMode};
    ///
    /// let mut form = FormState::new();
    /// form.push_char('x');
    ///
    /// // Re-selecting the active mode leaves the buffer alone.
    /// form.select_mode(InputMode::Text);
    /// assert_eq!(form.text(), "x");
    ///
    /// // Arriving back from another mode starts fresh.
    /// form.select_mode(InputMode::Url);
    /// form.select_mode(InputMode::Text);
    /// assert_eq!(form.text(), "");
    /// ```
    pub fn select_mode(&mut self, mode: InputMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        match mode {
            InputMode::Text => self.text.clear(),
            InputMode::File => self.file = None,
            InputMode::Url => self.url.clear(),
        }
    }

    /// Appends a character to the active mode's input buffer.
    ///
    /// File mode has no character buffer; a file is committed with
    /// [`FormState::choose_file`], so character input is ignored there.
    pub fn push_char(&mut self, c: char) {
        match self.mode {
            InputMode::Text => self.text.push(c),
            InputMode::Url => self.url.push(c),
            InputMode::File => {}
        }
    }

    /// Removes the last character from the active mode's input buffer.
    pub fn pop_char(&mut self) {
        match self.mode {
            InputMode::Text => {
                self.text.pop();
            }
            InputMode::Url => {
                self.url.pop();
            }
            InputMode::File => {}
        }
    }

    /// Commits a chosen file for file mode.
    pub fn choose_file(&mut self, path: impl Into<PathBuf>) {
        self.file = Some(path.into());
    }

    /// Clears the chosen file.
    pub fn clear_file(&mut self) {
        self.file = None;
    }

    /// Returns the file-picker label: the chosen file's name, or a prompt
    /// when nothing has been chosen yet.
    pub fn file_label(&self) -> String {
        self.file
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Choose file".to_string())
    }

    /// Returns the remaining-character count for the text buffer.
    ///
    /// Negative when the advisory 3000-character maximum is exceeded.
    ///
    /// # Examples
    ///
    /// ```
    /// use percolate::form::{FormState, MAX_TEXT_LEN};
    ///
    /// let mut form = FormState::new();
    /// assert_eq!(form.remaining_chars(), MAX_TEXT_LEN);
    /// form.push_char('a');
    /// assert_eq!(form.remaining_chars(), MAX_TEXT_LEN - 1);
    /// ```
    pub fn remaining_chars(&self) -> i64 {
        MAX_TEXT_LEN - self.text.chars().count() as i64
    }

    /// Returns whether the active mode's input satisfies its validity
    /// predicate.
    ///
    /// Text: non-empty (the maximum is advisory and never blocks).
    /// File: a file with a non-empty name has been chosen.
    /// Url: non-empty URL field.
    ///
    /// The submit control's enabled state is always exactly this value,
    /// possibly further restricted by an in-flight request.
    pub fn is_valid(&self) -> bool {
        match self.mode {
            InputMode::Text => !self.text.is_empty(),
            InputMode::File => self
                .file
                .as_deref()
                .and_then(Path::file_name)
                .is_some_and(|n| !n.is_empty()),
            InputMode::Url => !self.url.is_empty(),
        }
    }

    /// Toggles membership of a domain in the selection.
    pub fn toggle_domain(&mut self, domain: &str) {
        if !self.selected_domains.remove(domain) {
            self.selected_domains.insert(domain.to_string());
        }
    }

    /// Toggles score display.
    pub fn toggle_score_display(&mut self) {
        self.score_display = !self.score_display;
    }

    /// Serializes the selected domains as a comma-joined string.
    ///
    /// An empty selection yields an empty string, which the backend
    /// interprets as "no filter".
    pub fn joined_domains(&self) -> String {
        self.selected_domains
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
