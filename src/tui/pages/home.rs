use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};
use std::time::{Duration, Instant};

use crate::api::{Episode, HomeListing, PodcastrClient};
use crate::player::PlaybackSession;
use crate::theme::{get_border_style, get_list_item_style, get_title_style, ThemeColors};

/// What the app should do after the home page handled a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeAction {
    None,
    OpenEpisode(String),
}

pub struct HomePage {
    client: PodcastrClient,

    // Data
    listing: HomeListing,
    limit: usize,
    latest_count: usize,
    revalidate_after: Duration,
    last_fetch: Option<Instant>,

    // UI State
    selected: usize,
    table_state: TableState,
    loading: bool,
    error_message: Option<String>,
}

impl HomePage {
    pub fn new(client: PodcastrClient, limit: usize, latest_count: usize, revalidate_after: Duration) -> Self {
        Self {
            client,
            listing: HomeListing::default(),
            limit,
            latest_count,
            revalidate_after,
            last_fetch: None,
            selected: 0,
            table_state: TableState::default(),
            loading: false,
            error_message: None,
        }
    }

    pub async fn initialize(&mut self) {
        self.refresh().await
    }

    /// Fetch the listing again. On failure the previous listing stays up
    /// with an error banner; a first failure leaves the page empty.
    pub async fn refresh(&mut self) {
        self.loading = true;
        self.error_message = None;

        match self.client.get_home_listing(self.limit, self.latest_count).await {
            Ok(listing) => {
                log::info!(
                    "Home listing: {} latest, {} more",
                    listing.latest_episodes.len(),
                    listing.all_episodes.len()
                );
                self.set_listing(listing);
            }
            Err(e) => {
                log::error!("Failed to load home listing: {}", e);
                self.error_message = Some(format!("Failed to load episodes: {}", e));
            }
        }

        self.last_fetch = Some(Instant::now());
        self.loading = false;
    }

    /// Re-fetch once the listing is older than the revalidation period.
    pub async fn update(&mut self) {
        if self.needs_revalidation() {
            log::debug!("Home listing is stale, revalidating");
            self.refresh().await;
        }
    }

    fn needs_revalidation(&self) -> bool {
        self.last_fetch
            .map(|fetched| fetched.elapsed() >= self.revalidate_after)
            .unwrap_or(false)
    }

    pub fn set_listing(&mut self, listing: HomeListing) {
        self.listing = listing;
        if self.selected >= self.listing.len() {
            self.selected = 0;
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_episode(&self) -> Option<&Episode> {
        self.listing.get(self.selected)
    }

    pub async fn handle_input(&mut self, key: KeyEvent, session: &mut PlaybackSession) -> HomeAction {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.next_item();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.previous_item();
            }
            KeyCode::Enter => {
                self.activate_selected(session);
            }
            KeyCode::Char('o') => {
                if let Some(episode) = self.selected_episode() {
                    return HomeAction::OpenEpisode(episode.id.clone());
                }
            }
            KeyCode::Char('r') => {
                self.refresh().await;
            }
            _ => {}
        }

        HomeAction::None
    }

    fn next_item(&mut self) {
        if !self.listing.is_empty() {
            self.selected = (self.selected + 1) % self.listing.len();
        }
    }

    fn previous_item(&mut self) {
        if !self.listing.is_empty() {
            if self.selected == 0 {
                self.selected = self.listing.len() - 1;
            } else {
                self.selected -= 1;
            }
        }
    }

    /// Play the whole listing from the selected row, or pause/resume if that
    /// row is already the active episode.
    pub fn activate_selected(&self, session: &mut PlaybackSession) {
        let Some(episode) = self.selected_episode() else {
            return;
        };

        if session.is_episode_playing(&episode.id) {
            session.toggle_play();
        } else {
            log::info!("Playing home listing from '{}'", episode.title);
            session.play_list(self.listing.playable(), self.selected);
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, colors: &ThemeColors, session: &PlaybackSession) {
        if self.loading {
            self.render_loading(frame, area, colors);
            return;
        }

        if self.listing.is_empty() {
            match &self.error_message {
                Some(error) => self.render_error(frame, area, colors, error),
                None => self.render_empty(frame, area, colors),
            }
            return;
        }

        let banner_height = if self.error_message.is_some() { 3 } else { 0 };
        let cards_height = if self.listing.latest_episodes.is_empty() { 0 } else { 7 };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(banner_height),
                Constraint::Length(cards_height),  // Latest releases
                Constraint::Min(5),                 // All episodes
                Constraint::Length(3),              // Footer
            ])
            .split(area);

        if let Some(error) = &self.error_message {
            let banner = Paragraph::new(format!("❌ {}", error))
                .style(Style::default().fg(colors.error))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(colors.error))
                );
            frame.render_widget(banner, layout[0]);
        }

        self.render_latest(frame, layout[1], colors, session);
        self.render_table(frame, layout[2], colors, session);
        self.render_footer(frame, layout[3], colors);
    }

    fn render_latest(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors, session: &PlaybackSession) {
        let latest = &self.listing.latest_episodes;
        if latest.is_empty() {
            return;
        }

        let outer = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(get_border_style(colors))
            .title("🆕 Latest releases")
            .title_style(get_title_style(colors));
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let constraints: Vec<Constraint> = latest
            .iter()
            .map(|_| Constraint::Ratio(1, latest.len() as u32))
            .collect();
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(inner);

        for (i, episode) in latest.iter().enumerate() {
            let selected = i == self.selected;
            let marker = if session.is_episode_playing(&episode.id) {
                "⏸ "
            } else {
                "▶ "
            };

            let card = Paragraph::new(vec![
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(colors.accent)),
                    Span::styled(
                        episode.title.as_str(),
                        Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(episode.members.as_str(), Style::default().fg(colors.text_secondary))),
                Line::from(vec![
                    Span::styled(episode.published_at.as_str(), Style::default().fg(colors.text_secondary)),
                    Span::styled(" • ", Style::default().fg(colors.text_secondary)),
                    Span::styled(episode.duration_as_string(), Style::default().fg(colors.text_secondary)),
                ]),
            ])
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(if selected {
                        Style::default().fg(colors.highlight).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(colors.secondary)
                    })
            );

            frame.render_widget(card, cards[i]);
        }
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect, colors: &ThemeColors, session: &PlaybackSession) {
        let offset = self.listing.latest_episodes.len();

        let header = Row::new(vec!["", "Podcast", "Members", "Date", "Duration"])
            .style(Style::default().fg(colors.text_secondary).add_modifier(Modifier::BOLD))
            .bottom_margin(1);

        let rows: Vec<Row> = self.listing.all_episodes
            .iter()
            .map(|episode| {
                let icon = if session.is_episode_playing(&episode.id) { "🎵" } else { "" };
                Row::new(vec![
                    Cell::from(icon),
                    Cell::from(episode.title.clone()),
                    Cell::from(episode.members.clone()),
                    Cell::from(episode.published_at.clone()),
                    Cell::from(episode.duration_as_string()),
                ])
                .style(get_list_item_style(colors, false))
            })
            .collect();

        let widths = [
            Constraint::Length(2),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Length(10),
            Constraint::Length(10),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(get_border_style(colors))
                    .title("📻 All episodes")
                    .title_style(get_title_style(colors))
            )
            .row_highlight_style(get_list_item_style(colors, true))
            .highlight_symbol("► ");

        let table_row = self.selected.checked_sub(offset);
        self.table_state.select(table_row);

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let controls = vec![
            ("↑↓/jk", "Navigate"),
            ("Enter", "Play"),
            ("o", "Details"),
            ("r", "Refresh"),
        ];

        let footer_text: Vec<Span> = controls
            .iter()
            .enumerate()
            .flat_map(|(i, (key, desc))| {
                let mut spans = vec![
                    Span::styled(*key, Style::default().fg(colors.primary).add_modifier(Modifier::BOLD)),
                    Span::styled(format!(" {}", desc), Style::default().fg(colors.text_secondary)),
                ];

                if i < controls.len() - 1 {
                    spans.push(Span::raw("  "));
                }

                spans
            })
            .collect();

        let footer = Paragraph::new(Line::from(footer_text))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(get_border_style(colors))
            );

        frame.render_widget(footer, area);
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let loading_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Loading...")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(colors.accent));

        let loading_text = Paragraph::new("🔄 Loading the latest episodes...")
            .style(Style::default().fg(colors.accent))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(loading_block);

        frame.render_widget(loading_text, area);
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors, error: &str) {
        let error_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Error")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(colors.error));

        let error_text = Paragraph::new(format!("❌ {}\n\nPress 'r' to retry", error))
            .style(Style::default().fg(colors.error))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(error_block);

        frame.render_widget(error_text, area);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let empty = Paragraph::new(vec![
            Line::from(Span::styled(
                "No episodes yet",
                Style::default().fg(colors.primary).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(colors.text_secondary)),
                Span::styled("r", Style::default().fg(colors.primary).add_modifier(Modifier::BOLD)),
                Span::styled(" to check again", Style::default().fg(colors.text_secondary)),
            ]),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(get_border_style(colors))
        );

        frame.render_widget(empty, area);
    }
}
