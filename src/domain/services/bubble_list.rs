#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::models::Turn;
use crate::domain::models::TurnShape;

const INDENT: &str = "  ";

/// Paragraph scrolling is addressed in `u16`, so only the newest lines fit.
pub const MAX_LINES: usize = u16::MAX as usize;

fn heading_style(shape: TurnShape) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match shape {
        TurnShape::Prompt => return style.fg(Color::Cyan),
        TurnShape::Refusal => return style.fg(Color::Red),
        TurnShape::Review => return style.fg(Color::Magenta),
        TurnShape::Plain => return style.fg(Color::Green),
    }
}

fn body_style(shape: TurnShape) -> Style {
    match shape {
        TurnShape::Prompt => return Style::default().fg(Color::Cyan),
        TurnShape::Refusal => {
            return Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD);
        }
        TurnShape::Review | TurnShape::Plain => return Style::default(),
    }
}

/// Renders the conversation as styled, pre-wrapped lines so the line count is
/// known for scrolling.
#[derive(Default)]
pub struct BubbleList<'a> {
    lines: Vec<Line<'a>>,
}

impl<'a> BubbleList<'a> {
    pub fn set_turns(&mut self, turns: &[Turn], line_width: usize) {
        let text_width = line_width.saturating_sub(INDENT.len()).max(1);

        self.lines = turns
            .iter()
            .flat_map(|turn| {
                let shape = turn.shape();
                let mut lines = vec![Line::from(Span::styled(
                    turn.role().to_string(),
                    heading_style(shape),
                ))];

                if let (TurnShape::Plain, Some(variant)) = (shape, turn.variant()) {
                    lines.push(Line::from(Span::styled(
                        format!("{INDENT}{}", variant.answer_heading()),
                        Style::default().add_modifier(Modifier::BOLD),
                    )));
                }

                let style = body_style(shape);
                lines.extend(turn.as_string_lines(text_width).into_iter().map(|line| {
                    if line.is_empty() {
                        return Line::from("");
                    }
                    return Line::from(Span::styled(format!("{INDENT}{line}"), style));
                }));
                lines.push(Line::from(""));

                return lines;
            })
            .collect();

        if self.lines.len() > MAX_LINES {
            let excess = self.lines.len() - MAX_LINES;
            self.lines.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn lines(&self) -> &[Line<'a>] {
        return &self.lines;
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, title: &str, scroll: u16) {
        frame.render_widget(
            Paragraph::new(self.lines.clone())
                .block(Block::default().borders(Borders::TOP).title(title.to_string()))
                .scroll((scroll, 0)),
            rect,
        );
    }
}
