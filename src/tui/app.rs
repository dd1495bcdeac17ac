use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::api::PodcastrClient;
use crate::audio::{MediaElement, MediaEvent};
use crate::helpers::header_date;
use crate::player::{PlaybackSession, PlayerSurface};
use crate::settings::SettingsManager;
use crate::theme::{Theme, ThemeStore};
use super::pages::*;

const MESSAGE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Episode,
}

/// The whole application: pages on the left, player on the right.
///
/// Owns the single [`PlaybackSession`]. Every key press and every drained
/// media event ends with a [`PlayerSurface::sync`], so the media element
/// always follows the session.
pub struct TuiApp<M: MediaElement> {
    // Core state
    route: Route,
    should_quit: bool,
    session: PlaybackSession,
    surface: PlayerSurface<M>,
    media_events: mpsc::UnboundedReceiver<MediaEvent>,

    // Pages
    home_page: HomePage,
    episode_page: EpisodePage,
    player_page: PlayerPage,

    // Theme management
    theme_store: ThemeStore,
    skip_interval: u64,

    // UI state
    error_message: Option<String>,
    success_message: Option<String>,
    message_timeout: Option<Instant>,
}

impl<M: MediaElement> TuiApp<M> {
    pub fn new(settings: SettingsManager, media: M, media_events: mpsc::UnboundedReceiver<MediaEvent>) -> Self {
        let client = PodcastrClient::new(settings.api_url());
        let config = settings.get();

        let home_page = HomePage::new(
            client.clone(),
            config.home_episode_limit,
            config.latest_count,
            Duration::from_secs(config.revalidate_secs),
        );
        let skip_interval = settings.skip_interval();

        Self {
            route: Route::Home,
            should_quit: false,
            session: PlaybackSession::new(),
            surface: PlayerSurface::new(media),
            media_events,

            home_page,
            episode_page: EpisodePage::new(client),
            player_page: PlayerPage::new(),

            theme_store: ThemeStore::new(settings),
            skip_interval,

            error_message: None,
            success_message: None,
            message_timeout: None,
        }
    }

    pub async fn initialize(&mut self) -> Result<()> {
        self.home_page.initialize().await;
        Ok(())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn surface(&self) -> &PlayerSurface<M> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut PlayerSurface<M> {
        &mut self.surface
    }

    pub fn home_page_mut(&mut self) -> &mut HomePage {
        &mut self.home_page
    }

    pub fn theme(&self) -> Theme {
        self.theme_store.theme()
    }

    pub async fn handle_input(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if !self.handle_global_key(key) {
            match self.route {
                Route::Home => {
                    if let HomeAction::OpenEpisode(id) = self.home_page.handle_input(key, &mut self.session).await {
                        self.route = Route::Episode;
                        self.episode_page.open(&id).await;
                    }
                }
                Route::Episode => {
                    if self.episode_page.handle_input(key, &mut self.session) == EpisodeAction::Back {
                        self.route = Route::Home;
                    }
                }
            }
        }

        self.surface.sync(&self.session);
        Ok(())
    }

    // Player and app shortcuts, available on every page.
    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) |
            (KeyModifiers::NONE, KeyCode::Char('q')) => {
                self.should_quit = true;
            }
            (_, KeyCode::Char(' ')) => {
                if Control::PlayPause.is_enabled(&self.session) {
                    self.session.toggle_play();
                }
            }
            (_, KeyCode::Char('n')) => {
                if Control::Next.is_enabled(&self.session) {
                    self.session.play_next();
                }
            }
            (_, KeyCode::Char('p')) => {
                if Control::Previous.is_enabled(&self.session) {
                    self.session.play_previous();
                }
            }
            (_, KeyCode::Char('s')) => {
                if Control::Shuffle.is_enabled(&self.session) {
                    self.session.toggle_shuffle();
                }
            }
            (_, KeyCode::Char('l')) => {
                if Control::Loop.is_enabled(&self.session) {
                    self.session.toggle_loop();
                }
            }
            (_, KeyCode::Left) => {
                self.surface.skip(-(self.skip_interval as i64));
            }
            (_, KeyCode::Right) => {
                self.surface.skip(self.skip_interval as i64);
            }
            (_, KeyCode::Char('t')) => {
                let theme = self.theme_store.toggle_theme();
                self.show_success_message(&format!("Switched to the {} theme", theme.name()));
            }
            _ => return false,
        }
        true
    }

    pub async fn update(&mut self) -> Result<()> {
        // Clear expired messages
        if let Some(timeout) = self.message_timeout {
            if timeout.elapsed() >= MESSAGE_TIMEOUT {
                self.clear_messages();
            }
        }

        self.drain_media_events();

        if self.route == Route::Home {
            self.home_page.update().await;
        }

        Ok(())
    }

    fn drain_media_events(&mut self) {
        while let Ok(event) = self.media_events.try_recv() {
            if let MediaEvent::Error { token, message } = &event {
                if *token == self.surface.load_token() {
                    self.show_error_message(message);
                }
            }
            self.surface.handle_event(&mut self.session, event);
        }
        self.surface.sync(&self.session);
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Header
                Constraint::Min(10),    // Content
            ])
            .split(frame.area());

        self.render_header(frame, main_layout[0]);

        let content_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(65),  // Page
                Constraint::Percentage(35),  // Player
            ])
            .split(main_layout[1]);

        let colors = self.theme_store.get_colors().clone();
        match self.route {
            Route::Home => self.home_page.render(frame, content_layout[0], &colors, &self.session),
            Route::Episode => self.episode_page.render(frame, content_layout[0], &colors, &self.session),
        }

        self.player_page.render(frame, content_layout[1], &colors, &self.session, &self.surface);

        // Render messages overlay if needed
        self.render_messages_overlay(frame, frame.area());
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let colors = self.theme_store.get_colors();
        let theme = self.theme_store.theme();
        let theme_icon = match theme {
            Theme::Light => "☀",
            Theme::Dark => "🌙",
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors.border))
            .style(Style::default().bg(colors.background));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(32)])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("🎙️ Podcastr", Style::default().fg(colors.primary).add_modifier(Modifier::BOLD)),
            Span::styled("  │  ", Style::default().fg(colors.text_secondary)),
            Span::styled("The best for you to listen to, always", Style::default().fg(colors.text_secondary)),
        ]));
        frame.render_widget(title, layout[0]);

        let status = Paragraph::new(Line::from(vec![
            Span::styled(header_date(Local::now()), Style::default().fg(colors.text)),
            Span::raw("  "),
            Span::styled("t", Style::default().fg(colors.primary).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {} {}", theme_icon, theme.name()), Style::default().fg(colors.text_secondary)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(status, layout[1]);
    }

    fn render_messages_overlay(&self, frame: &mut Frame, area: Rect) {
        let colors = self.theme_store.get_colors();
        let message = if let Some(error) = &self.error_message {
            Some((format!("❌ {}", error), colors.error, "Error"))
        } else if let Some(success) = &self.success_message {
            Some((format!("✅ {}", success), colors.success, "Success"))
        } else {
            None
        };

        if let Some((text, color, title)) = message {
            let popup_area = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Percentage(20),
                    Constraint::Length(5),
                    Constraint::Percentage(20),
                ])
                .split(area)[1];

            let popup_area = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(20),
                    Constraint::Percentage(60),
                    Constraint::Percentage(20),
                ])
                .split(popup_area)[1];

            frame.render_widget(Clear, popup_area);

            let message_widget = Paragraph::new(text)
                .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .title(title)
                        .border_style(Style::default().fg(color))
                        .style(Style::default().bg(colors.container))
                );

            frame.render_widget(message_widget, popup_area);
        }
    }

    pub fn show_error_message(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
        self.success_message = None;
        self.message_timeout = Some(Instant::now());
    }

    pub fn show_success_message(&mut self, message: &str) {
        self.success_message = Some(message.to_string());
        self.error_message = None;
        self.message_timeout = Some(Instant::now());
    }

    fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
        self.message_timeout = None;
    }
}
