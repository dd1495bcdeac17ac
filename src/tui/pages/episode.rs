use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::api::{EpisodeDetails, PodcastrClient};
use crate::helpers::html_to_text;
use crate::player::PlaybackSession;
use crate::theme::{get_border_style, get_title_style, ThemeColors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeAction {
    None,
    Back,
}

/// Details of one episode with its show notes.
pub struct EpisodePage {
    client: PodcastrClient,
    details: Option<EpisodeDetails>,
    // Plain text of the description, built once per episode.
    description: String,
    scroll: u16,
    loading: bool,
    error_message: Option<String>,
}

impl EpisodePage {
    pub fn new(client: PodcastrClient) -> Self {
        Self {
            client,
            details: None,
            description: String::new(),
            scroll: 0,
            loading: false,
            error_message: None,
        }
    }

    pub async fn open(&mut self, id: &str) {
        self.loading = true;
        self.error_message = None;
        self.details = None;

        match self.client.get_episode_details(id).await {
            Ok(details) => {
                log::info!("Opened episode '{}'", details.episode.title);
                self.set_details(details);
            }
            Err(e) => {
                log::error!("Failed to load episode {}: {}", id, e);
                self.error_message = Some(format!("Failed to load episode: {}", e));
            }
        }

        self.loading = false;
    }

    pub fn set_details(&mut self, details: EpisodeDetails) {
        self.description = html_to_text(&details.description);
        self.details = Some(details);
        self.scroll = 0;
    }

    pub fn handle_input(&mut self, key: KeyEvent, session: &mut PlaybackSession) -> EpisodeAction {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => return EpisodeAction::Back,
            KeyCode::Enter => self.activate(session),
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = self.scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            _ => {}
        }

        EpisodeAction::None
    }

    /// Play this episode alone, or pause/resume it if it is already active.
    pub fn activate(&self, session: &mut PlaybackSession) {
        let Some(details) = &self.details else {
            return;
        };

        if session.is_episode_playing(&details.episode.id) {
            session.toggle_play();
        } else {
            session.play(details.episode.clone());
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors, session: &PlaybackSession) {
        if self.loading {
            let loading = Paragraph::new("🔄 Loading episode...")
                .style(Style::default().fg(colors.accent))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(colors.accent))
                );
            frame.render_widget(loading, area);
            return;
        }

        let Some(details) = &self.details else {
            let message = self
                .error_message
                .as_deref()
                .unwrap_or("Episode not found");
            let error = Paragraph::new(format!("❌ {}\n\nPress Esc to go back", message))
                .style(Style::default().fg(colors.error))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .title("Error")
                        .border_style(Style::default().fg(colors.error))
                );
            frame.render_widget(error, area);
            return;
        };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),  // Title and meta
                Constraint::Min(3),     // Description
                Constraint::Length(3),  // Footer
            ])
            .split(area);

        let episode = &details.episode;
        let action = if session.is_episode_playing(&episode.id) { "⏸ Pause" } else { "▶ Play" };

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                episode.title.as_str(),
                Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(episode.members.as_str(), Style::default().fg(colors.text_secondary))),
            Line::from(vec![
                Span::styled(episode.published_at.as_str(), Style::default().fg(colors.text_secondary)),
                Span::styled(" • ", Style::default().fg(colors.text_secondary)),
                Span::styled(details.duration_as_string.as_str(), Style::default().fg(colors.text_secondary)),
            ]),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(colors.primary).add_modifier(Modifier::BOLD)),
                Span::styled(format!(" {}", action), Style::default().fg(colors.accent)),
            ]),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(get_border_style(colors))
                .title("🎙️ Episode")
                .title_style(get_title_style(colors))
        );
        frame.render_widget(header, layout[0]);

        let description = Paragraph::new(self.description.as_str())
            .style(Style::default().fg(colors.text))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(get_border_style(colors))
            );
        frame.render_widget(description, layout[1]);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Esc", Style::default().fg(colors.primary).add_modifier(Modifier::BOLD)),
            Span::styled(" Back  ", Style::default().fg(colors.text_secondary)),
            Span::styled("↑↓/jk", Style::default().fg(colors.primary).add_modifier(Modifier::BOLD)),
            Span::styled(" Scroll", Style::default().fg(colors.text_secondary)),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(get_border_style(colors))
        );
        frame.render_widget(footer, layout[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Episode;
    use crossterm::event::KeyModifiers;

    fn details(id: &str) -> EpisodeDetails {
        EpisodeDetails {
            episode: Episode {
                id: id.to_string(),
                title: "Faladev #30".to_string(),
                members: "Diego and Richard".to_string(),
                thumbnail: String::new(),
                duration: 3981,
                url: format!("https://example.com/{}.mp3", id),
                published_at: "22 Jan 21".to_string(),
            },
            description: "<p>Open source &amp; you</p><p>Part two</p>".to_string(),
            duration_as_string: "01:06:21".to_string(),
        }
    }

    fn page() -> EpisodePage {
        EpisodePage::new(PodcastrClient::new("http://localhost:3333/"))
    }

    #[test]
    fn description_is_sanitized_once() {
        let mut page = page();
        page.set_details(details("a"));
        assert!(!page.description.contains('<'));
        assert!(page.description.contains("Open source & you"));
    }

    #[test]
    fn enter_plays_the_episode_alone() {
        let mut page = page();
        page.set_details(details("a"));
        let mut session = PlaybackSession::new();

        let action = page.handle_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut session);

        assert_eq!(action, EpisodeAction::None);
        assert_eq!(session.queue().len(), 1);
        assert_eq!(session.current_episode_id(), Some("a"));
        assert!(session.is_playing());
    }

    #[test]
    fn enter_on_active_episode_pauses() {
        let mut page = page();
        page.set_details(details("a"));
        let mut session = PlaybackSession::new();

        page.activate(&mut session);
        page.activate(&mut session);
        assert!(!session.is_playing());
    }

    #[test]
    fn escape_goes_back() {
        let mut page = page();
        let mut session = PlaybackSession::new();
        let action = page.handle_input(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), &mut session);
        assert_eq!(action, EpisodeAction::Back);
        assert!(session.is_empty());
    }
}
