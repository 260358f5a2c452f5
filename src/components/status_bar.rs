use color_eyre::eyre::Result;
use ratatui::{prelude::*, widgets::*};

use super::Component;
use crate::{action::Action, config::Config, mode::Mode, tui::Frame};

/// Bottom line of the screen: the latest system message on the left, a key
/// hint and the version on the right. Error messages take the error style
/// until the next message replaces them.
#[derive(Default)]
pub struct StatusBar {
    config: Config,
    message: Option<String>,
    is_error: bool,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Component for StatusBar {
    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.config = config;
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::SystemMessage(message) => {
                self.message = Some(message);
                self.is_error = false;
            }
            Action::Error(message) => {
                self.message = Some(message);
                self.is_error = true;
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
        let area = chunks[1];

        let style = if self.is_error {
            self.config.style(&Mode::Home, "status_error")
        } else {
            self.config.style(&Mode::Home, "status_bar")
        };
        let left = self.message.clone().unwrap_or_default();
        let right = format!(
            "Tab table · s/S sort · ? help · v{}",
            env!("CARGO_PKG_VERSION")
        );

        f.render_widget(
            Paragraph::new(Line::from(left)).style(style),
            area,
        );
        f.render_widget(
            Paragraph::new(Line::from(right))
                .alignment(Alignment::Right)
                .style(style),
            area,
        );
        Ok(())
    }
}
