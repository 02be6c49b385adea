use crate::domains::{self, DOMAINS};
use crate::form::{FormState, InputMode};
use crate::response::TaggingResponse;

/// Panel focus state for keyboard navigation.
///
/// Determines which panel receives keyboard input and how keys are
/// interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The mode selector tabs (Text / File / URL)
    ModeSelect,
    /// The active mode's input group
    Input,
    /// The domain multi-select and score toggle
    Domains,
    /// The result panels
    Results,
}

/// One rendered entry in a domain's result panel.
#[derive(Debug, Clone)]
pub struct ResultEntry {
    label: String,
    score: f64,
    /// The detail-lookup field when this entry is an interactive tag.
    lookup_field: Option<&'static str>,
    /// Tooltip content, once a detail lookup for this entry has resolved.
    detail: Option<String>,
    /// A detail lookup for this entry is in flight.
    detail_pending: bool,
}

impl ResultEntry {
    /// Returns the tag label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the relevance score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Returns whether this entry supports the detail lookup.
    pub fn is_interactive(&self) -> bool {
        self.lookup_field.is_some()
    }

    /// Returns the tooltip content, if a lookup has resolved.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns whether a detail lookup is in flight for this entry.
    pub fn detail_pending(&self) -> bool {
        self.detail_pending
    }
}

/// One per-domain result panel: count badge plus entry list, revealed as a
/// unit when its domain appears in a response.
#[derive(Debug, Clone)]
pub struct DomainPanel {
    domain: String,
    title: String,
    visible: bool,
    entries: Vec<ResultEntry>,
}

impl DomainPanel {
    fn new(domain: &str, title: &str) -> Self {
        Self {
            domain: domain.to_string(),
            title: title.to_string(),
            visible: false,
            entries: Vec::new(),
        }
    }

    /// Returns the domain identifier this panel renders.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the panel's display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns whether the panel is revealed.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Returns the count badge value.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the rendered entries.
    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }
}

/// A detail lookup the event loop should dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub domain: String,
    pub field: &'static str,
    pub label: String,
}

/// Application state for the TUI.
///
/// Owns the form, the focus, the busy/alert affordances, and the result
/// panels. All transitions are synchronous; network completions are fed
/// back in through [`App::apply_response`], [`App::fail_submit`] and
/// [`App::resolve_detail`].
#[derive(Debug, Clone)]
pub struct App {
    form: FormState,
    focus: Focus,
    /// Path being typed into the file picker (file mode only).
    file_input: String,
    /// Cursor into the known-domain selector.
    domain_cursor: usize,
    /// A tagging request is in flight; submission is disabled meanwhile.
    loading: bool,
    /// Blocking error alert, dismissed by any key.
    alert: Option<String>,
    panels: Vec<DomainPanel>,
    /// Selected result as (panel index, entry index).
    selected: Option<(usize, usize)>,
}

impl App {
    /// Creates a new App: text mode active, all panels hidden, focus on the
    /// input group.
    ///
    /// # Examples
    ///
    /// ```
    /// use percolate::tui::App;
    ///
    /// let app = App::new();
    /// assert!(!app.loading());
    /// assert!(app.panels().iter().all(|p| !p.visible()));
    /// ```
    pub fn new() -> Self {
        Self {
            form: FormState::new(),
            focus: Focus::Input,
            file_input: String::new(),
            domain_cursor: 0,
            loading: false,
            alert: None,
            panels: DOMAINS
                .iter()
                .map(|d| DomainPanel::new(d.name, d.title))
                .collect(),
            selected: None,
        }
    }

    /// Returns the form state.
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Returns the current focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns the file-picker input buffer.
    pub fn file_input(&self) -> &str {
        &self.file_input
    }

    /// Returns the domain selector cursor.
    pub fn domain_cursor(&self) -> usize {
        self.domain_cursor
    }

    /// Returns whether a tagging request is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Returns the pending alert message, if any.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Returns the result panels, in panel order.
    pub fn panels(&self) -> &[DomainPanel] {
        &self.panels
    }

    /// Returns the selected result entry, if any.
    pub fn selected_entry(&self) -> Option<&ResultEntry> {
        let (panel, entry) = self.selected?;
        self.panels.get(panel)?.entries.get(entry)
    }

    /// Returns the selected result as `(panel index, entry index)`.
    ///
    /// The renderer highlights by position, not by label, since the same
    /// label can appear in more than one domain.
    pub fn selected_position(&self) -> Option<(usize, usize)> {
        self.selected
    }

    // --- Input mode control ---

    /// Selects an input mode.
    ///
    /// Exactly one selector label is emphasized and one input group shown at
    /// any time; both follow [`FormState::mode`], so this transition keeps
    /// the invariant by construction. Switching clears the new mode's field
    /// and thereby re-disables submission until the new input is valid.
    /// Re-selecting the active mode is a no-op.
    pub fn select_mode(&mut self, mode: InputMode) {
        if mode == self.form.mode() {
            return;
        }
        self.form.select_mode(mode);
        self.file_input.clear();
    }

    /// Selects the next mode in selector order.
    pub fn select_next_mode(&mut self) {
        let index = InputMode::ALL
            .iter()
            .position(|&m| m == self.form.mode())
            .unwrap_or(0);
        self.select_mode(InputMode::ALL[(index + 1) % InputMode::ALL.len()]);
    }

    /// Selects the previous mode in selector order.
    pub fn select_prev_mode(&mut self) {
        let index = InputMode::ALL
            .iter()
            .position(|&m| m == self.form.mode())
            .unwrap_or(0);
        let len = InputMode::ALL.len();
        self.select_mode(InputMode::ALL[(index + len - 1) % len]);
    }

    /// Appends a character to the active input.
    ///
    /// In file mode this edits the picker's path buffer; the file itself is
    /// committed with [`App::commit_file_input`].
    pub fn push_input_char(&mut self, c: char) {
        if self.form.mode() == InputMode::File {
            self.file_input.push(c);
        } else {
            self.form.push_char(c);
        }
    }

    /// Removes the last character from the active input.
    ///
    /// In file mode with a file already chosen, backspace clears the choice
    /// so a new path can be typed.
    pub fn pop_input_char(&mut self) {
        if self.form.mode() == InputMode::File {
            if self.form.file().is_some() {
                self.form.clear_file();
            } else {
                self.file_input.pop();
            }
        } else {
            self.form.pop_char();
        }
    }

    /// Commits the typed path as the chosen file.
    ///
    /// Returns `false` when the path buffer is empty or no commit applies
    /// (not in file mode, or a file is already chosen).
    pub fn commit_file_input(&mut self) -> bool {
        if self.form.mode() != InputMode::File
            || self.form.file().is_some()
            || self.file_input.is_empty()
        {
            return false;
        }
        let path = std::mem::take(&mut self.file_input);
        self.form.choose_file(path);
        true
    }

    // --- Focus ---

    /// Cycles focus to the next panel in Tab order.
    ///
    /// Order: `ModeSelect` -> `Input` -> `Domains` -> `Results` ->
    /// `ModeSelect`.
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::ModeSelect => Focus::Input,
            Focus::Input => Focus::Domains,
            Focus::Domains => Focus::Results,
            Focus::Results => Focus::ModeSelect,
        };
        self.auto_select_on_results_focus();
    }

    /// Cycles focus to the previous panel in reverse Tab order.
    pub fn prev_focus(&mut self) {
        self.focus = match self.focus {
            Focus::ModeSelect => Focus::Results,
            Focus::Input => Focus::ModeSelect,
            Focus::Domains => Focus::Input,
            Focus::Results => Focus::Domains,
        };
        self.auto_select_on_results_focus();
    }

    /// Returns focus to the input group (Esc behavior).
    pub fn reset_focus(&mut self) {
        self.focus = Focus::Input;
        self.selected = None;
    }

    fn auto_select_on_results_focus(&mut self) {
        if self.focus == Focus::Results && self.selected.is_none() {
            self.selected = self.first_entry_position();
        }
    }

    // --- Domain selection ---

    /// Moves the domain selector cursor down, wrapping.
    pub fn domain_cursor_next(&mut self) {
        self.domain_cursor = (self.domain_cursor + 1) % DOMAINS.len();
    }

    /// Moves the domain selector cursor up, wrapping.
    pub fn domain_cursor_prev(&mut self) {
        self.domain_cursor = (self.domain_cursor + DOMAINS.len() - 1) % DOMAINS.len();
    }

    /// Toggles the domain under the cursor in the selection.
    pub fn toggle_domain_at_cursor(&mut self) {
        let domain = DOMAINS[self.domain_cursor].name;
        self.form.toggle_domain(domain);
    }

    /// Toggles score display.
    pub fn toggle_score_display(&mut self) {
        self.form.toggle_score_display();
    }

    // --- Submit flow ---

    /// Returns whether submission is currently allowed: the active mode's
    /// input is valid and no tagging request is in flight.
    pub fn submit_enabled(&self) -> bool {
        self.form.is_valid() && !self.loading
    }

    /// Begins a tagging request.
    ///
    /// Hides the result panels and raises the busy indicator. Returns
    /// `false` without touching anything when submission is disabled, so a
    /// submit attempt while a request is already in flight never clears a
    /// previously rendered panel.
    pub fn begin_submit(&mut self) -> bool {
        if !self.submit_enabled() {
            return false;
        }
        self.loading = true;
        for panel in &mut self.panels {
            panel.visible = false;
            panel.entries.clear();
        }
        self.selected = None;
        true
    }

    /// Applies a tagging response, fully replacing any prior rendering.
    ///
    /// For each domain present in the response the panel's content is
    /// replaced, its badge set to the result set's size, and the panel
    /// revealed; an empty set still reveals the panel, with a zero badge.
    /// Domains absent from the response are left untouched. Unknown domains
    /// get a panel appended on the fly, with plain (non-interactive)
    /// entries.
    pub fn apply_response(&mut self, response: &TaggingResponse) {
        self.loading = false;
        for (domain, set) in response.iter() {
            let entries: Vec<ResultEntry> = set
                .entries()
                .into_iter()
                .map(|(label, score)| ResultEntry {
                    label: label.to_string(),
                    score,
                    lookup_field: domains::lookup_field(domain),
                    detail: None,
                    detail_pending: false,
                })
                .collect();

            match self.panels.iter_mut().find(|p| p.domain == domain) {
                Some(panel) => {
                    panel.entries = entries;
                    panel.visible = true;
                }
                None => {
                    let mut panel = DomainPanel::new(domain, domains::title(domain));
                    panel.entries = entries;
                    panel.visible = true;
                    self.panels.push(panel);
                }
            }
        }
        self.selected = None;
    }

    /// Records a failed tagging request: the busy indicator is dismissed
    /// and a blocking alert raised. Panels stay as `begin_submit` left them.
    pub fn fail_submit(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.alert = Some(message.into());
    }

    /// Dismisses the alert.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // --- Result navigation & detail lookup ---

    fn first_entry_position(&self) -> Option<(usize, usize)> {
        self.panels
            .iter()
            .position(|p| p.visible && !p.entries.is_empty())
            .map(|panel| (panel, 0))
    }

    /// Moves the result selection to the next entry, crossing panel
    /// boundaries and wrapping at the end.
    pub fn select_next_result(&mut self) {
        let positions = self.entry_positions();
        if positions.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            None => positions[0],
            Some(current) => {
                let index = positions.iter().position(|&p| p == current).unwrap_or(0);
                positions[(index + 1) % positions.len()]
            }
        });
    }

    /// Moves the result selection to the previous entry, wrapping.
    pub fn select_prev_result(&mut self) {
        let positions = self.entry_positions();
        if positions.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            None => positions[positions.len() - 1],
            Some(current) => {
                let index = positions.iter().position(|&p| p == current).unwrap_or(0);
                positions[(index + positions.len() - 1) % positions.len()]
            }
        });
    }

    fn entry_positions(&self) -> Vec<(usize, usize)> {
        self.panels
            .iter()
            .enumerate()
            .filter(|(_, p)| p.visible)
            .flat_map(|(pi, p)| (0..p.entries.len()).map(move |ei| (pi, ei)))
            .collect()
    }

    /// Requests the detail lookup for the selected entry.
    ///
    /// Marks the entry pending and returns the request for the event loop
    /// to dispatch. Returns `None` for plain entries and when nothing is
    /// selected. Repeated activations always re-fetch; no caching.
    pub fn request_detail(&mut self) -> Option<DetailRequest> {
        let (panel, entry) = self.selected?;
        let domain = self.panels.get(panel)?.domain.clone();
        let entry = self.panels.get_mut(panel)?.entries.get_mut(entry)?;
        let field = entry.lookup_field?;
        entry.detail_pending = true;
        Some(DetailRequest {
            domain,
            field,
            label: entry.label.clone(),
        })
    }

    /// Attaches a resolved tooltip to its own entry.
    ///
    /// The entry is addressed by domain and label rather than position, so
    /// concurrent lookups and re-renders cannot misattach a tooltip. A
    /// completion for an entry that no longer exists is dropped.
    pub fn resolve_detail(&mut self, domain: &str, label: &str, tooltip: impl Into<String>) {
        if let Some(entry) = self
            .panels
            .iter_mut()
            .find(|p| p.domain == domain)
            .and_then(|p| p.entries.iter_mut().find(|e| e.label == label))
        {
            entry.detail = Some(tooltip.into());
            entry.detail_pending = false;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{NO_DETAIL, ResultSet, compose_tooltip};
    use serde_json::json;

    fn response(sets: Vec<(&str, ResultSet)>) -> TaggingResponse {
        TaggingResponse::from_sets(sets)
    }

    #[test]
    fn app_initializes_with_hidden_panels_and_disabled_submit() {
        let app = App::new();
        assert_eq!(app.focus(), Focus::Input);
        assert!(!app.loading());
        assert!(!app.submit_enabled());
        assert_eq!(app.panels().len(), 2);
        assert!(app.panels().iter().all(|p| !p.visible()));
    }

    #[test]
    fn focus_cycles_in_tab_order() {
        let mut app = App::new();
        assert_eq!(app.focus(), Focus::Input);

        app.next_focus();
        assert_eq!(app.focus(), Focus::Domains);
        app.next_focus();
        assert_eq!(app.focus(), Focus::Results);
        app.next_focus();
        assert_eq!(app.focus(), Focus::ModeSelect);
        app.next_focus();
        assert_eq!(app.focus(), Focus::Input);

        app.prev_focus();
        assert_eq!(app.focus(), Focus::ModeSelect);
    }

    #[test]
    fn mode_cycling_wraps_in_selector_order() {
        let mut app = App::new();
        assert_eq!(app.form().mode(), InputMode::Text);

        app.select_next_mode();
        assert_eq!(app.form().mode(), InputMode::File);
        app.select_next_mode();
        assert_eq!(app.form().mode(), InputMode::Url);
        app.select_next_mode();
        assert_eq!(app.form().mode(), InputMode::Text);

        app.select_prev_mode();
        assert_eq!(app.form().mode(), InputMode::Url);
    }

    #[test]
    fn submit_gate_follows_active_mode_validity() {
        let mut app = App::new();
        assert!(!app.submit_enabled());

        app.push_input_char('a');
        assert!(app.submit_enabled());

        // Switching mode immediately re-disables submission.
        app.select_mode(InputMode::Url);
        assert!(!app.submit_enabled());

        app.push_input_char('u');
        assert!(app.submit_enabled());
    }

    #[test]
    fn file_input_commit_updates_picker_label_and_gate() {
        let mut app = App::new();
        app.select_mode(InputMode::File);
        assert!(!app.submit_enabled());
        assert_eq!(app.form().file_label(), "Choose file");

        for c in "/tmp/report.txt".chars() {
            app.push_input_char(c);
        }
        assert_eq!(app.file_input(), "/tmp/report.txt");
        assert!(!app.submit_enabled(), "typed but not committed");

        assert!(app.commit_file_input());
        assert_eq!(app.form().file_label(), "report.txt");
        assert!(app.submit_enabled());

        // Backspace with a chosen file clears the choice.
        app.pop_input_char();
        assert!(!app.submit_enabled());
    }

    #[test]
    fn commit_file_input_with_empty_buffer_is_rejected() {
        let mut app = App::new();
        app.select_mode(InputMode::File);
        assert!(!app.commit_file_input());
        assert!(!app.submit_enabled());
    }

    #[test]
    fn begin_submit_raises_busy_and_hides_panels() {
        let mut app = App::new();
        app.push_input_char('a');
        app.apply_response(&response(vec![(
            "countries",
            ResultSet::from_pairs(&[("kenya", 1.0)]),
        )]));
        assert!(app.panels()[1].visible());

        assert!(app.begin_submit());
        assert!(app.loading());
        assert!(app.panels().iter().all(|p| !p.visible()));
        assert!(app.panels().iter().all(|p| p.entries().is_empty()));
    }

    #[test]
    fn submit_while_loading_is_rejected_and_preserves_rendering() {
        let mut app = App::new();
        app.push_input_char('a');
        assert!(app.begin_submit());

        // First response renders.
        app.apply_response(&response(vec![(
            "countries",
            ResultSet::from_pairs(&[("kenya", 1.0)]),
        )]));

        // Second request goes out...
        assert!(app.begin_submit());
        assert!(app.loading());

        // ...and with the busy indicator up a further submit must not
        // disturb anything.
        let visibility: Vec<bool> = app.panels().iter().map(|p| p.visible()).collect();
        assert!(!app.begin_submit());
        assert_eq!(
            app.panels().iter().map(|p| p.visible()).collect::<Vec<_>>(),
            visibility
        );
    }

    #[test]
    fn apply_response_renders_per_domain_panels() {
        let mut app = App::new();
        app.apply_response(&response(vec![
            ("speciesplus", ResultSet::from_pairs(&[])),
            ("countries", ResultSet::from_pairs(&[("a", 1.0)])),
        ]));

        let species = &app.panels()[0];
        assert!(species.visible());
        assert_eq!(species.count(), 0);
        assert!(species.entries().is_empty());

        let countries = &app.panels()[1];
        assert!(countries.visible());
        assert_eq!(countries.count(), 1);
        assert_eq!(countries.entries()[0].label(), "a");
        assert_eq!(countries.entries()[0].score(), 1.0);
        assert!(!countries.entries()[0].is_interactive());
    }

    #[test]
    fn empty_response_leaves_panel_visibility_untouched() {
        let mut app = App::new();
        app.apply_response(&response(vec![]));
        assert!(app.panels().iter().all(|p| !p.visible()));

        // And a visible panel stays visible when its domain is absent.
        app.apply_response(&response(vec![(
            "countries",
            ResultSet::from_pairs(&[("kenya", 1.0)]),
        )]));
        app.apply_response(&response(vec![]));
        assert!(app.panels()[1].visible());
        assert!(!app.panels()[0].visible());
    }

    #[test]
    fn apply_response_is_idempotent_per_call() {
        let mut app = App::new();
        app.apply_response(&response(vec![(
            "countries",
            ResultSet::from_pairs(&[("kenya", 1.0), ("brazil", 1.0)]),
        )]));
        assert_eq!(app.panels()[1].count(), 2);

        // A second render fully replaces, never appends.
        app.apply_response(&response(vec![(
            "countries",
            ResultSet::from_pairs(&[("chad", 1.0)]),
        )]));
        assert_eq!(app.panels()[1].count(), 1);
        assert_eq!(app.panels()[1].entries()[0].label(), "chad");
    }

    #[test]
    fn unknown_domain_gets_a_plain_panel_appended() {
        let mut app = App::new();
        app.apply_response(&response(vec![(
            "habitats",
            ResultSet::from_pairs(&[("savanna", 1.0)]),
        )]));

        let panel = app
            .panels()
            .iter()
            .find(|p| p.domain() == "habitats")
            .expect("panel appended");
        assert!(panel.visible());
        assert!(!panel.entries()[0].is_interactive());
    }

    #[test]
    fn species_entries_are_interactive_tags() {
        let mut app = App::new();
        app.apply_response(&response(vec![(
            "speciesplus",
            ResultSet::from_pairs(&[("Panthera leo", 2.0)]),
        )]));
        assert!(app.panels()[0].entries()[0].is_interactive());
    }

    #[test]
    fn fail_submit_dismisses_busy_and_raises_alert() {
        let mut app = App::new();
        app.push_input_char('a');
        assert!(app.begin_submit());

        app.fail_submit("Network error: connection refused");
        assert!(!app.loading());
        assert_eq!(app.alert(), Some("Network error: connection refused"));
        // No partial state rendered; panels stay hidden.
        assert!(app.panels().iter().all(|p| !p.visible()));

        app.dismiss_alert();
        assert!(app.alert().is_none());
    }

    #[test]
    fn result_navigation_crosses_panel_boundaries_and_wraps() {
        let mut app = App::new();
        app.apply_response(&response(vec![
            (
                "speciesplus",
                ResultSet::from_pairs(&[("Panthera leo", 2.0)]),
            ),
            ("countries", ResultSet::from_pairs(&[("kenya", 1.0)])),
        ]));

        app.select_next_result();
        assert_eq!(
            app.selected_entry().expect("selected").label(),
            "Panthera leo"
        );
        app.select_next_result();
        assert_eq!(app.selected_entry().expect("selected").label(), "kenya");
        app.select_next_result();
        assert_eq!(
            app.selected_entry().expect("selected").label(),
            "Panthera leo"
        );

        app.select_prev_result();
        assert_eq!(app.selected_entry().expect("selected").label(), "kenya");
    }

    #[test]
    fn results_focus_auto_selects_first_entry() {
        let mut app = App::new();
        app.apply_response(&response(vec![(
            "countries",
            ResultSet::from_pairs(&[("kenya", 1.0)]),
        )]));

        app.next_focus(); // Domains
        app.next_focus(); // Results
        assert_eq!(app.focus(), Focus::Results);
        assert_eq!(
            app.selected_entry().expect("auto-selected").label(),
            "kenya"
        );
    }

    #[test]
    fn request_detail_only_for_interactive_entries() {
        let mut app = App::new();
        app.apply_response(&response(vec![
            (
                "speciesplus",
                ResultSet::from_pairs(&[("Panthera leo", 2.0)]),
            ),
            ("countries", ResultSet::from_pairs(&[("kenya", 1.0)])),
        ]));

        app.select_next_result();
        let request = app.request_detail().expect("species tag is interactive");
        assert_eq!(
            request,
            DetailRequest {
                domain: "speciesplus".to_string(),
                field: "scientific_name",
                label: "Panthera leo".to_string(),
            }
        );
        assert!(app.selected_entry().expect("selected").detail_pending());

        app.select_next_result();
        assert!(
            app.request_detail().is_none(),
            "plain entries have no lookup"
        );
    }

    #[test]
    fn resolve_detail_attaches_tooltip_to_its_own_entry() {
        let mut app = App::new();
        app.apply_response(&response(vec![(
            "speciesplus",
            ResultSet::from_pairs(&[("Panthera leo", 2.0), ("Panthera tigris", 1.5)]),
        )]));

        let tooltip = compose_tooltip(
            "speciesplus",
            &json!({
                "kingdom": "Animalia",
                "phylum": "Chordata",
                "order": "Carnivora",
                "family": "Felidae",
                "genus": "Panthera"
            }),
        );
        app.resolve_detail("speciesplus", "Panthera leo", tooltip);

        let entries = app.panels()[0].entries();
        assert_eq!(
            entries[0].detail(),
            Some("Animalia > Chordata > Carnivora > Felidae > Panthera")
        );
        assert!(entries[1].detail().is_none(), "other entries untouched");
    }

    #[test]
    fn resolve_detail_for_a_vanished_entry_is_dropped() {
        let mut app = App::new();
        app.apply_response(&response(vec![(
            "speciesplus",
            ResultSet::from_pairs(&[("Panthera leo", 2.0)]),
        )]));

        // A new response replaced the entry before the lookup resolved.
        app.apply_response(&response(vec![(
            "speciesplus",
            ResultSet::from_pairs(&[("Acinonyx jubatus", 1.0)]),
        )]));
        app.resolve_detail("speciesplus", "Panthera leo", NO_DETAIL);
        assert!(app.panels()[0].entries()[0].detail().is_none());
    }

    #[test]
    fn repeated_activation_refetches_without_cache() {
        let mut app = App::new();
        app.apply_response(&response(vec![(
            "speciesplus",
            ResultSet::from_pairs(&[("Panthera leo", 2.0)]),
        )]));
        app.select_next_result();

        assert!(app.request_detail().is_some());
        app.resolve_detail("speciesplus", "Panthera leo", "first");

        // A second activation issues a fresh request even with a tooltip
        // already attached.
        assert!(app.request_detail().is_some());
        app.resolve_detail("speciesplus", "Panthera leo", "second");
        assert_eq!(
            app.selected_entry().expect("selected").detail(),
            Some("second")
        );
    }

    #[test]
    fn domain_cursor_wraps_and_toggles_selection() {
        let mut app = App::new();
        app.toggle_domain_at_cursor();
        assert_eq!(app.form().joined_domains(), "speciesplus");

        app.domain_cursor_next();
        app.toggle_domain_at_cursor();
        assert_eq!(app.form().joined_domains(), "countries,speciesplus");

        app.domain_cursor_next();
        assert_eq!(app.domain_cursor(), 0);
        app.domain_cursor_prev();
        assert_eq!(app.domain_cursor(), 1);

        app.toggle_domain_at_cursor();
        assert_eq!(app.form().joined_domains(), "speciesplus");
    }
}
