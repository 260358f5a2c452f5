//! The table browser
//!
//! One entity table at a time, cycled with Tab/BackTab. Columns carry the
//! sort-indicator arrows; the component owns the sort selection string and
//! re-sorts whenever a keyboard sort action or a header arrow click comes in.

use color_eyre::eyre::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{prelude::*, widgets::*};
use strum::IntoEnumIterator;
use tokio::sync::mpsc::UnboundedSender;
use unicode_width::UnicodeWidthStr;

use super::Component;
use crate::{
    action::Action,
    catalog::{Catalog, EntityKind, SortDirection, TableData},
    config::Config,
    mode::Mode,
    tui::Frame,
};

/// Widest a column gets before its cells are cut off by the table layout.
const MAX_COLUMN_WIDTH: u16 = 32;

pub struct Home {
    command_tx: Option<UnboundedSender<Action>>,
    config: Config,
    catalog: Catalog,
    kinds: Vec<EntityKind>,
    kind_index: usize,
    table: TableData,
    /// Sort selection in the `"<column_key>_up"` / `"<column_key>_down"`
    /// convention; empty while the table is in catalog order.
    selected: String,
    focused_column: usize,
    table_state: TableState,
    show_help: bool,
    /// Screen cells of each column's arrow pair, rebuilt on every draw for
    /// mouse hit-testing.
    arrow_cells: Vec<(String, Rect)>,
}

impl Home {
    pub fn new(catalog: Catalog) -> Self {
        let kinds: Vec<EntityKind> = EntityKind::iter().collect();
        let table = catalog.table(kinds[0]);
        let mut table_state = TableState::default();
        if !table.rows.is_empty() {
            table_state.select(Some(0));
        }
        Self {
            command_tx: None,
            config: Config::default(),
            catalog,
            kinds,
            kind_index: 0,
            table,
            selected: String::new(),
            focused_column: 0,
            table_state,
            show_help: false,
            arrow_cells: Vec::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kinds[self.kind_index]
    }

    pub fn selection(&self) -> &str {
        &self.selected
    }

    pub fn table(&self) -> &TableData {
        &self.table
    }

    fn style(&self, key: &str) -> Style {
        self.config.style(&Mode::Home, key)
    }

    fn rebuild(&mut self) {
        self.table = self.catalog.table(self.kind());
        if let Some((key, direction)) = parse_selection(&self.selected) {
            self.table.sort_by(key, direction);
        }
        self.focused_column = self.focused_column.min(self.table.columns.len() - 1);
        let row = match self.table.rows.len() {
            0 => None,
            n => Some(self.table_state.selected().unwrap_or(0).min(n - 1)),
        };
        self.table_state.select(row);
    }

    fn switch_table(&mut self, step: isize) {
        self.kind_index =
            (self.kind_index as isize + step).rem_euclid(self.kinds.len() as isize) as usize;
        self.selected.clear();
        self.focused_column = 0;
        self.table_state = TableState::default();
        self.rebuild();
    }

    fn sort(&mut self, key: &str, direction: SortDirection) {
        if self.table.column_index(key).is_none() {
            log::warn!("sort requested on unknown column {key:?} of {}", self.kind());
            return;
        }
        self.selected = direction.selection(key);
        self.table.sort_by(key, direction);
        if let Some(index) = self.table.column_index(key) {
            self.focused_column = index;
        }
    }

    fn scroll_to(&mut self, row: Option<usize>) {
        if self.table.rows.is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(row.map(|r| r.min(self.table.rows.len() - 1)));
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        if self.table.rows.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, self.table.rows.len() as isize - 1);
        self.table_state.select(Some(next as usize));
    }

    fn status(&self) -> Action {
        let sorted = match parse_selection(&self.selected) {
            Some((key, SortDirection::Ascending)) => format!(", sorted by {key} ▲"),
            Some((key, SortDirection::Descending)) => format!(", sorted by {key} ▼"),
            None => String::new(),
        };
        Action::SystemMessage(format!(
            "{}: {} rows{sorted}",
            self.kind(),
            self.table.rows.len()
        ))
    }

    fn column_widths(&self) -> Vec<u16> {
        self.table
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let header = column.title.width() as u16 + 1 + crate::widgets::Sort::WIDTH;
                let cells = self
                    .table
                    .rows
                    .iter()
                    .map(|row| row[i].to_string().width() as u16)
                    .max()
                    .unwrap_or(0);
                header.max(cells).min(MAX_COLUMN_WIDTH)
            })
            .collect()
    }

    fn sort_widget(&self, key: &str) -> crate::widgets::Sort<'static> {
        let sort = crate::widgets::Sort::new(self.selected.clone(), key).styles(
            self.style("arrow_active"),
            self.style("arrow_inactive"),
        );
        match self.command_tx.clone() {
            Some(tx) => {
                let up_tx = tx.clone();
                sort.on_arrow_up(move |key| {
                    let _ = up_tx.send(Action::SortColumn {
                        key: key.to_owned(),
                        ascending: true,
                    });
                })
                .on_arrow_down(move |key| {
                    let _ = tx.send(Action::SortColumn {
                        key: key.to_owned(),
                        ascending: false,
                    });
                })
            }
            None => sort,
        }
    }

    fn draw_help(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from("Tab / BackTab   next / previous table"),
            Line::from("h / l           focus column"),
            Line::from("s / S           sort focused column ▲ / ▼"),
            Line::from("click ▲▼        sort that column"),
            Line::from("j / k           move row"),
            Line::from("gg / G          first / last row"),
            Line::from("r               refresh"),
            Line::from("q               quit"),
        ];
        let width = 44.min(area.width);
        let height = (lines.len() as u16 + 2).min(area.height);
        let popup = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(lines)
                .style(self.style("help"))
                .block(Block::bordered().title(" Keys ")),
            popup,
        );
    }
}

impl Component for Home {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.command_tx = Some(tx);
        Ok(())
    }

    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.config = config;
        Ok(())
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Ok(None);
        }
        let hit = self.arrow_cells.iter().find(|(_, cell)| {
            mouse.row == cell.y && mouse.column >= cell.x && mouse.column < cell.x + cell.width
        });
        if let Some((key, cell)) = hit {
            self.sort_widget(key).click_at(mouse.column - cell.x);
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let followup = match action {
            Action::NextTable => {
                self.switch_table(1);
                Some(self.status())
            }
            Action::PreviousTable => {
                self.switch_table(-1);
                Some(self.status())
            }
            Action::NextColumn => {
                self.focused_column = (self.focused_column + 1) % self.table.columns.len();
                None
            }
            Action::PreviousColumn => {
                self.focused_column =
                    (self.focused_column + self.table.columns.len() - 1) % self.table.columns.len();
                None
            }
            Action::SortAscending => {
                let key = self.table.columns[self.focused_column].key;
                self.sort(key, SortDirection::Ascending);
                Some(self.status())
            }
            Action::SortDescending => {
                let key = self.table.columns[self.focused_column].key;
                self.sort(key, SortDirection::Descending);
                Some(self.status())
            }
            Action::SortColumn { key, ascending } => {
                let direction = if ascending {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                };
                self.sort(&key, direction);
                Some(self.status())
            }
            Action::ScrollUp => {
                self.scroll_by(-1);
                None
            }
            Action::ScrollDown => {
                self.scroll_by(1);
                None
            }
            Action::ScrollToTop => {
                self.scroll_to(Some(0));
                None
            }
            Action::ScrollToBottom => {
                self.scroll_to(Some(usize::MAX));
                None
            }
            Action::Refresh => {
                self.rebuild();
                Some(self.status())
            }
            Action::Help => {
                self.show_help = !self.show_help;
                None
            }
            _ => None,
        };
        Ok(followup)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
        let area = chunks[0];

        let title = format!(
            " {} ({}/{}) ",
            self.kind(),
            self.kind_index + 1,
            self.kinds.len()
        );
        let block = Block::bordered()
            .border_style(self.style("border"))
            .title(Span::styled(title, self.style("title")));
        let inner = block.inner(area);

        let widths = self.column_widths();
        self.arrow_cells.clear();
        let mut header_cells = Vec::with_capacity(self.table.columns.len());
        let mut x = inner.x;
        for (i, column) in self.table.columns.iter().enumerate() {
            let title_style = if i == self.focused_column {
                self.style("header_focused")
            } else {
                self.style("header")
            };
            let arrows: Line<'_> = (&self.sort_widget(column.key)).into();
            let mut spans = vec![Span::styled(column.title, title_style), Span::raw(" ")];
            let title_width = column.title.width() as u16;
            spans.extend(arrows.spans);
            header_cells.push(Cell::from(Line::from(spans)));

            // Register a click target only while the whole column fits; the
            // table truncates trailing columns, so an arrow position assumed
            // past that point would land on whatever actually renders there.
            let arrow_x = x + title_width + 1;
            let column_fits = x + widths[i] <= inner.right();
            if column_fits && arrow_x + crate::widgets::Sort::WIDTH <= inner.right() {
                self.arrow_cells.push((
                    column.key.to_owned(),
                    Rect::new(arrow_x, inner.y, crate::widgets::Sort::WIDTH, 1),
                ));
            }
            // column spacing of 1 between columns
            x += widths[i] + 1;
        }

        let rows: Vec<Row<'_>> = self
            .table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let style = if i % 2 == 0 {
                    self.style("row")
                } else {
                    self.style("row_alt")
                };
                Row::new(row.iter().map(|cell| Cell::from(cell.to_string()))).style(style)
            })
            .collect();

        let constraints: Vec<Constraint> = widths.iter().map(|w| Constraint::Length(*w)).collect();
        let table = Table::new(rows, constraints)
            .header(Row::new(header_cells).style(self.style("header")))
            .column_spacing(1)
            .row_highlight_style(self.style("row_selected"))
            .block(block);
        f.render_stateful_widget(table, area, &mut self.table_state);

        if self.show_help {
            self.draw_help(f, area);
        }
        Ok(())
    }
}

/// Splits a selection string back into its column key and direction.
/// Returns `None` for selections that follow neither suffix convention.
pub fn parse_selection(selected: &str) -> Option<(&str, SortDirection)> {
    if let Some(key) = selected.strip_suffix("_up") {
        Some((key, SortDirection::Ascending))
    } else {
        selected
            .strip_suffix("_down")
            .map(|key| (key, SortDirection::Descending))
    }
}
