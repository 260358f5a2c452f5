//! Sort indicator for table column headers
//!
//! Two arrow affordances per column, rendered next to the column title.
//! The widget is purely presentational and stateless: the caller owns the
//! sort selection and passes it in as a string that follows the
//! `"<column_key>_up"` / `"<column_key>_down"` convention. A selection that
//! matches neither suffix for this column leaves both arrows inactive.

use ratatui::prelude::*;

pub const ARROW_UP: &str = "▲";
pub const ARROW_DOWN: &str = "▼";

/// Which of the two arrows an interaction landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
}

pub struct Sort<'a> {
    selected: String,
    column_key: String,
    active_style: Style,
    inactive_style: Style,
    on_arrow_up: Option<Box<dyn Fn(&str) + 'a>>,
    on_arrow_down: Option<Box<dyn Fn(&str) + 'a>>,
}

impl<'a> Sort<'a> {
    /// Width of the rendered arrow pair in terminal cells.
    pub const WIDTH: u16 = 2;

    pub fn new<S, K>(selected: S, column_key: K) -> Self
    where
        S: Into<String>,
        K: Into<String>,
    {
        Self {
            selected: selected.into(),
            column_key: column_key.into(),
            active_style: Style::default().add_modifier(Modifier::BOLD),
            inactive_style: Style::default().add_modifier(Modifier::DIM),
            on_arrow_up: None,
            on_arrow_down: None,
        }
    }

    pub fn styles(mut self, active: Style, inactive: Style) -> Self {
        self.active_style = active;
        self.inactive_style = inactive;
        self
    }

    pub fn on_arrow_up<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + 'a,
    {
        self.on_arrow_up = Some(Box::new(f));
        self
    }

    pub fn on_arrow_down<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + 'a,
    {
        self.on_arrow_down = Some(Box::new(f));
        self
    }

    pub fn column_key(&self) -> &str {
        &self.column_key
    }

    pub fn is_up_active(&self) -> bool {
        self.selected == format!("{}_up", self.column_key)
    }

    pub fn is_down_active(&self) -> bool {
        self.selected == format!("{}_down", self.column_key)
    }

    /// Invokes the up callback once with the column key.
    pub fn click_up(&self) {
        if let Some(f) = &self.on_arrow_up {
            f(&self.column_key);
        }
    }

    /// Invokes the down callback once with the column key.
    pub fn click_down(&self) {
        if let Some(f) = &self.on_arrow_down {
            f(&self.column_key);
        }
    }

    /// Dispatches a click at an x offset within the arrow pair.
    pub fn click_at(&self, x_offset: u16) {
        match Self::hit(x_offset) {
            Some(Arrow::Up) => self.click_up(),
            Some(Arrow::Down) => self.click_down(),
            None => {}
        }
    }

    /// Maps an x offset relative to the arrow pair to an arrow.
    pub fn hit(x_offset: u16) -> Option<Arrow> {
        match x_offset {
            0 => Some(Arrow::Up),
            1 => Some(Arrow::Down),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Sort<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sort")
            .field("selected", &self.selected)
            .field("column_key", &self.column_key)
            .finish_non_exhaustive()
    }
}

impl From<&Sort<'_>> for Line<'static> {
    fn from(value: &Sort<'_>) -> Self {
        let up_style = if value.is_up_active() {
            value.active_style
        } else {
            value.inactive_style
        };
        let down_style = if value.is_down_active() {
            value.active_style
        } else {
            value.inactive_style
        };
        Line::from(vec![
            Span::styled(ARROW_UP, up_style),
            Span::styled(ARROW_DOWN, down_style),
        ])
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case("depth_up", "depth", true, false)]
    #[case("depth_down", "depth", false, true)]
    #[case("name_up", "depth", false, false)]
    #[case("depth", "depth", false, false)]
    #[case("", "depth", false, false)]
    #[case("depth_up_up", "depth", false, false)]
    fn test_active_arrow(
        #[case] selected: &str,
        #[case] key: &str,
        #[case] up: bool,
        #[case] down: bool,
    ) {
        let sort = Sort::new(selected, key);
        assert_eq!(sort.is_up_active(), up);
        assert_eq!(sort.is_down_active(), down);
    }

    #[test]
    fn test_click_invokes_callback_once_with_key() {
        let ups = RefCell::new(Vec::new());
        let downs = RefCell::new(Vec::new());
        let sort = Sort::new("depth_up", "depth")
            .on_arrow_up(|key| ups.borrow_mut().push(key.to_owned()))
            .on_arrow_down(|key| downs.borrow_mut().push(key.to_owned()));

        sort.click_up();
        assert_eq!(*ups.borrow(), vec!["depth".to_owned()]);
        assert_eq!(downs.borrow().len(), 0);

        sort.click_down();
        assert_eq!(*downs.borrow(), vec!["depth".to_owned()]);
        assert_eq!(ups.borrow().len(), 1);
    }

    #[test]
    fn test_click_without_callback_is_a_noop() {
        let sort = Sort::new("", "depth");
        sort.click_up();
        sort.click_down();
    }

    #[rstest]
    #[case(0, Some(Arrow::Up))]
    #[case(1, Some(Arrow::Down))]
    #[case(2, None)]
    fn test_hit(#[case] x: u16, #[case] expected: Option<Arrow>) {
        assert_eq!(Sort::hit(x), expected);
    }

    #[test]
    fn test_click_at_dispatches_by_offset() {
        let hits = RefCell::new(Vec::new());
        let sort = Sort::new("", "depth")
            .on_arrow_up(|_| hits.borrow_mut().push(Arrow::Up))
            .on_arrow_down(|_| hits.borrow_mut().push(Arrow::Down));
        sort.click_at(0);
        sort.click_at(1);
        sort.click_at(5);
        assert_eq!(*hits.borrow(), vec![Arrow::Up, Arrow::Down]);
    }

    #[test]
    fn test_render_styles_match_selection() {
        let active = Style::default().fg(Color::Cyan);
        let inactive = Style::default().fg(Color::DarkGray);
        let line: Line<'_> = (&Sort::new("depth_up", "depth").styles(active, inactive)).into();
        assert_eq!(line.spans[0].content, ARROW_UP);
        assert_eq!(line.spans[0].style, active);
        assert_eq!(line.spans[1].content, ARROW_DOWN);
        assert_eq!(line.spans[1].style, inactive);

        let line: Line<'_> = (&Sort::new("other_down", "depth").styles(active, inactive)).into();
        assert_eq!(line.spans[0].style, inactive);
        assert_eq!(line.spans[1].style, inactive);
    }
}
