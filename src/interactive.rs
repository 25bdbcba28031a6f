use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    DefaultTerminal, Frame,
};

use crate::dashboard::Dashboard;
use crate::graph::cost_chart;
use crate::output::format_cost;
use crate::series::SeriesView;
use crate::types::FilterCriteria;

/// One drop-down style selector: an index into `choices`, `None` meaning "All".
#[derive(Debug, Clone, Default, PartialEq)]
struct Selector {
    choices: Vec<String>,
    selected: Option<usize>,
}

impl Selector {
    fn new(choices: &[String]) -> Self {
        Self {
            choices: choices.to_vec(),
            selected: None,
        }
    }

    /// All → first → ... → last → All.
    fn next(&mut self) {
        self.selected = match self.selected {
            None if self.choices.is_empty() => None,
            None => Some(0),
            Some(i) if i + 1 < self.choices.len() => Some(i + 1),
            Some(_) => None,
        };
    }

    fn prev(&mut self) {
        self.selected = match self.selected {
            None => self.choices.len().checked_sub(1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    fn value(&self) -> Option<String> {
        self.selected.and_then(|i| self.choices.get(i).cloned())
    }

    fn display(&self, all_label: &str) -> String {
        self.value().unwrap_or_else(|| all_label.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Focus {
    Model,
    Type,
}

/// Presentation-layer state. Pending selections only take effect on apply,
/// which recomputes the series from the full dataset.
pub struct DashboardState<'a> {
    dashboard: &'a Dashboard,
    model: Selector,
    kind: Selector,
    focus: Focus,
    applied: FilterCriteria,
    view: SeriesView,
    exit: bool,
}

impl<'a> DashboardState<'a> {
    pub fn new(dashboard: &'a Dashboard, initial: FilterCriteria) -> Self {
        let mut model = Selector::new(dashboard.available_models());
        let mut kind = Selector::new(dashboard.available_types());
        model.selected = initial
            .model()
            .and_then(|m| model.choices.iter().position(|c| c == m));
        kind.selected = initial
            .kind()
            .and_then(|k| kind.choices.iter().position(|c| c == k));

        // Unknown values can't be shown by a selector, so they aren't applied either.
        if let (Some(m), None) = (initial.model(), model.selected) {
            tracing::warn!("unknown model {m:?}, showing all models");
        }
        if let (Some(k), None) = (initial.kind(), kind.selected) {
            tracing::warn!("unknown type {k:?}, showing all types");
        }
        let initial = FilterCriteria::new(model.value(), kind.value());

        let view = SeriesView::new(
            &dashboard.compute_series(&initial),
            &initial,
            dashboard.options(),
        );

        Self {
            dashboard,
            model,
            kind,
            focus: Focus::Model,
            applied: initial,
            view,
            exit: false,
        }
    }

    pub fn pending_filter(&self) -> FilterCriteria {
        FilterCriteria::new(self.model.value(), self.kind.value())
    }

    pub fn applied_filter(&self) -> &FilterCriteria {
        &self.applied
    }

    pub fn view(&self) -> &SeriesView {
        &self.view
    }

    /// Apply the pending selection and recompute.
    pub fn on_filter_change(&mut self) {
        let criteria = self.pending_filter();
        let (series, report) = self.dashboard.compute_series_with_report(&criteria);
        tracing::debug!(
            points = series.len(),
            skipped = report.skipped(),
            "recomputed series"
        );
        self.view = SeriesView::new(&series, &criteria, self.dashboard.options());
        self.applied = criteria;
    }

    fn focused(&mut self) -> &mut Selector {
        match self.focus {
            Focus::Model => &mut self.model,
            Focus::Type => &mut self.kind,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.exit = true,
            KeyCode::Char('m') => {
                self.focus = Focus::Model;
                self.model.next();
            }
            KeyCode::Char('t') => {
                self.focus = Focus::Type;
                self.kind.next();
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Model => Focus::Type,
                    Focus::Type => Focus::Model,
                };
            }
            KeyCode::Down | KeyCode::Right => self.focused().next(),
            KeyCode::Up | KeyCode::Left => self.focused().prev(),
            KeyCode::Char('c') => {
                self.model.selected = None;
                self.kind.selected = None;
                self.on_filter_change();
            }
            KeyCode::Enter => self.on_filter_change(),
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(3), Constraint::Length(1)])
            .split(frame.area());

        if self.view.is_empty() {
            let empty = Paragraph::new("No costs for this selection.")
                .block(Block::bordered().title(self.view.title));
            frame.render_widget(empty, chunks[0]);
        } else {
            frame.render_widget(cost_chart(&self.view), chunks[0]);
        }

        self.draw_selectors(frame, chunks[1]);

        let help = Paragraph::new(
            "m/t: cycle model/type  tab/arrows: change  enter: apply  c: clear  q: quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }

    fn draw_selectors(&self, frame: &mut Frame, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(40),
                Constraint::Percentage(20),
            ])
            .split(area);

        let selector = |title: &'static str, value: String, focused: bool| {
            let style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Paragraph::new(Line::from(Span::styled(value, style))).block(Block::bordered().title(title))
        };

        frame.render_widget(
            selector("Model", self.model.display("All models"), self.focus == Focus::Model),
            cols[0],
        );
        frame.render_widget(
            selector("Type", self.kind.display("All types"), self.focus == Focus::Type),
            cols[1],
        );

        let dirty = self.pending_filter() != *self.applied_filter();
        let total = Paragraph::new(format_cost(self.view().total))
            .style(if dirty {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Green)
            })
            .block(Block::bordered().title(if dirty { "Total (enter)" } else { "Total" }));
        frame.render_widget(total, cols[2]);
    }
}

fn event_loop(terminal: &mut DefaultTerminal, state: &mut DashboardState) -> Result<()> {
    while !state.exit {
        terminal.draw(|frame| state.draw(frame))?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                state.handle_key(key.code);
            }
        }
    }
    Ok(())
}

pub fn run(dashboard: &Dashboard, initial: FilterCriteria) -> Result<()> {
    let mut state = DashboardState::new(dashboard, initial);
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut state);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        Dashboard::from_texts(
            "model,type,created_at,usage_input,usage_output\n\
             gpt-4,chat,01.03.2024,100,50\n\
             claude,embed,02.03.2024,10,0\n",
            "model,input,output\ngpt-4,0.01,0.02\nclaude,0.1,0.2\n",
        )
    }

    #[test]
    fn selector_cycles_through_all() {
        let mut s = Selector::new(&["a".to_string(), "b".to_string()]);
        assert_eq!(s.value(), None);
        s.next();
        assert_eq!(s.value().as_deref(), Some("a"));
        s.next();
        assert_eq!(s.value().as_deref(), Some("b"));
        s.next();
        assert_eq!(s.value(), None);
        s.prev();
        assert_eq!(s.value().as_deref(), Some("b"));
        assert_eq!(Selector::new(&[]).display("All"), "All");
    }

    #[test]
    fn selection_applies_only_on_enter() {
        let d = dashboard();
        let mut state = DashboardState::new(&d, FilterCriteria::default());
        assert_eq!(state.view().labels.len(), 2);

        // models sorted: claude, gpt-4
        state.handle_key(KeyCode::Char('m'));
        assert_eq!(state.pending_filter().model(), Some("claude"));
        assert_eq!(state.view().labels.len(), 2);

        state.handle_key(KeyCode::Enter);
        assert_eq!(state.applied_filter().model(), Some("claude"));
        assert_eq!(state.view().labels, vec!["2024-03-02"]);
    }

    #[test]
    fn clear_resets_and_recomputes() {
        let d = dashboard();
        let initial = FilterCriteria::new(Some("gpt-4".into()), Some("chat".into()));
        let mut state = DashboardState::new(&d, initial.clone());
        assert_eq!(state.pending_filter(), initial);
        assert_eq!(state.view().labels, vec!["2024-03-01"]);

        state.handle_key(KeyCode::Char('c'));
        assert!(state.applied_filter().is_unconstrained());
        assert_eq!(state.view().labels.len(), 2);

        state.handle_key(KeyCode::Char('q'));
        assert!(state.exit);
    }

    #[test]
    fn unknown_initial_values_fall_back_to_all() {
        let d = dashboard();
        let initial = FilterCriteria::new(Some("nope".into()), Some("embed".into()));
        let state = DashboardState::new(&d, initial);

        assert_eq!(state.applied_filter(), &FilterCriteria::new(None, Some("embed".into())));
        assert_eq!(state.pending_filter(), *state.applied_filter());
        assert_eq!(state.view().labels, vec!["2024-03-02"]);
    }
}
