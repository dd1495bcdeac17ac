use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Wrap},
};

use crate::audio::MediaElement;
use crate::player::{PlaybackSession, PlayerSurface};
use crate::theme::{get_border_style, get_title_style, ThemeColors};

/// The five buttons of the player pane, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Shuffle,
    Previous,
    PlayPause,
    Next,
    Loop,
}

impl Control {
    pub const ALL: [Control; 5] = [
        Control::Shuffle,
        Control::Previous,
        Control::PlayPause,
        Control::Next,
        Control::Loop,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Shuffle => "s",
            Self::Previous => "p",
            Self::PlayPause => "Space",
            Self::Next => "n",
            Self::Loop => "l",
        }
    }

    fn icon(self, session: &PlaybackSession) -> &'static str {
        match self {
            Self::Shuffle => "🔀",
            Self::Previous => "⏮",
            Self::PlayPause if session.is_playing() => "⏸",
            Self::PlayPause => "▶",
            Self::Next => "⏭",
            Self::Loop => "🔁",
        }
    }

    /// Whether pressing the button does anything right now.
    pub fn is_enabled(self, session: &PlaybackSession) -> bool {
        let has_episode = session.current_episode().is_some();
        match self {
            Self::Shuffle => has_episode && session.queue().len() > 1,
            Self::Previous => session.has_previous(),
            Self::PlayPause => has_episode,
            Self::Next => session.has_next(),
            Self::Loop => has_episode,
        }
    }

    /// Toggle buttons that are switched on.
    pub fn is_active(self, session: &PlaybackSession) -> bool {
        match self {
            Self::Shuffle => session.is_shuffling(),
            Self::Loop => session.is_looping(),
            _ => false,
        }
    }
}

/// Right-hand pane: what is playing, how far along and the controls.
pub struct PlayerPage;

impl PlayerPage {
    pub fn new() -> Self {
        Self
    }

    pub fn render<M: MediaElement>(
        &self,
        frame: &mut Frame,
        area: Rect,
        colors: &ThemeColors,
        session: &PlaybackSession,
        surface: &PlayerSurface<M>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title bar
                Constraint::Min(5),     // Episode info
                Constraint::Length(3),  // Progress
                Constraint::Length(4),  // Controls
            ])
            .split(area);

        self.render_title(frame, chunks[0], colors);
        self.render_episode_info(frame, chunks[1], colors, session);
        self.render_progress(frame, chunks[2], colors, session, surface);
        self.render_controls(frame, chunks[3], colors, session);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let title = Paragraph::new("🎧 Playing now")
            .style(get_title_style(colors))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(colors.primary))
                    .style(Style::default().bg(colors.container))
            );
        frame.render_widget(title, area);
    }

    fn render_episode_info(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors, session: &PlaybackSession) {
        let content = if let Some(episode) = session.current_episode() {
            let position = session.current_index().map(|i| i + 1).unwrap_or(0);
            vec![
                Line::from(Span::styled(
                    episode.title.as_str(),
                    Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(episode.members.as_str(), Style::default().fg(colors.text_secondary))),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Queue: ", Style::default().fg(colors.text_secondary)),
                    Span::styled(
                        format!("{} of {}", position, session.queue().len()),
                        Style::default().fg(colors.accent),
                    ),
                ]),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Select a podcast to listen to",
                    Style::default().fg(colors.text_secondary).add_modifier(Modifier::ITALIC),
                )),
            ]
        };

        let info = Paragraph::new(content)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(get_border_style(colors))
            );

        frame.render_widget(info, area);
    }

    fn render_progress<M: MediaElement>(
        &self,
        frame: &mut Frame,
        area: Rect,
        colors: &ThemeColors,
        session: &PlaybackSession,
        surface: &PlayerSurface<M>,
    ) {
        let (elapsed, total) = surface.time_display();
        let gauge_color = if session.current_episode().is_some() {
            colors.accent
        } else {
            colors.disabled
        };

        let progress = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(get_border_style(colors))
            )
            .gauge_style(Style::default().fg(gauge_color).bg(colors.secondary))
            .ratio(surface.progress_ratio())
            .label(format!("{} / {}", elapsed, total));

        frame.render_widget(progress, area);
    }

    fn render_controls(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors, session: &PlaybackSession) {
        let mut buttons = Vec::new();
        let mut keys = Vec::new();

        for (i, control) in Control::ALL.iter().enumerate() {
            if i > 0 {
                buttons.push(Span::raw("   "));
                keys.push(Span::raw("  "));
            }

            let style = if !control.is_enabled(session) {
                Style::default().fg(colors.disabled)
            } else if control.is_active(session) {
                Style::default().fg(colors.accent).add_modifier(Modifier::BOLD)
            } else if *control == Control::PlayPause {
                Style::default().fg(colors.primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text)
            };

            buttons.push(Span::styled(control.icon(session), style));
            keys.push(Span::styled(control.key(), Style::default().fg(colors.text_secondary)));
        }

        let controls = Paragraph::new(vec![Line::from(buttons), Line::from(keys)])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(get_border_style(colors))
            );

        frame.render_widget(controls, area);
    }
}

impl Default for PlayerPage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Episode;

    fn episode(id: &str) -> Episode {
        Episode {
            id: id.to_string(),
            title: id.to_string(),
            members: String::new(),
            thumbnail: String::new(),
            duration: 60,
            url: String::new(),
            published_at: String::new(),
        }
    }

    fn enabled(session: &PlaybackSession) -> Vec<Control> {
        Control::ALL
            .into_iter()
            .filter(|c| c.is_enabled(session))
            .collect()
    }

    #[test]
    fn everything_disabled_without_episode() {
        assert!(enabled(&PlaybackSession::new()).is_empty());
    }

    #[test]
    fn single_episode_cannot_shuffle_or_navigate() {
        let mut session = PlaybackSession::new();
        session.play(episode("a"));
        assert_eq!(enabled(&session), vec![Control::PlayPause, Control::Loop]);
    }

    #[test]
    fn middle_of_queue_enables_all() {
        let mut session = PlaybackSession::new();
        session.play_list(vec![episode("a"), episode("b"), episode("c")], 1);
        assert_eq!(enabled(&session), Control::ALL.to_vec());
    }

    #[test]
    fn toggles_report_active_state() {
        let mut session = PlaybackSession::new();
        session.play_list(vec![episode("a"), episode("b")], 0);
        session.toggle_loop();
        assert!(Control::Loop.is_active(&session));
        assert!(!Control::Shuffle.is_active(&session));
        assert!(!Control::Next.is_active(&session));
    }
}
