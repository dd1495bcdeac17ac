use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::settings::SettingsManager;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    pub background: Color,
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub border: Color,
    pub highlight: Color,
    pub container: Color,
    /// Buttons that cannot be pressed right now
    pub disabled: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::light()
    }
}

impl ThemeColors {
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(247, 248, 250),      // #f7f8fa
            primary: Color::Rgb(130, 87, 229),          // #8257e5
            secondary: Color::Rgb(228, 230, 240),       // #e4e6f0
            text: Color::Rgb(73, 77, 75),               // #494d4b
            text_secondary: Color::Rgb(128, 132, 137),  // #808489
            accent: Color::Rgb(4, 211, 97),             // #04d361
            success: Color::Green,
            error: Color::Red,
            border: Color::Rgb(155, 115, 255),          // #9b73ff
            highlight: Color::Rgb(145, 100, 250),       // #9164fa
            container: Color::Rgb(255, 255, 255),       // #ffffff
            disabled: Color::Rgb(190, 192, 200),        // #bec0c8
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(31, 31, 36),         // #1f1f24
            primary: Color::Rgb(155, 115, 255),         // #9b73ff
            secondary: Color::Rgb(50, 51, 59),          // #32333b
            text: Color::Rgb(246, 245, 244),            // #f6f5f4
            text_secondary: Color::Rgb(175, 178, 185),  // #afb2b9
            accent: Color::Rgb(4, 211, 97),             // #04d361
            success: Color::Green,
            error: Color::Red,
            border: Color::Rgb(74, 83, 94),             // #4a535e
            highlight: Color::Rgb(75, 85, 99),          // #4b5563
            container: Color::Rgb(27, 29, 30),          // #1b1d1e
            disabled: Color::Rgb(80, 82, 90),           // #50525a
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }
}

/// The active theme, loaded from and saved to the settings file.
pub struct ThemeStore {
    theme: Theme,
    colors: ThemeColors,
    settings: SettingsManager,
}

impl ThemeStore {
    pub fn new(settings: SettingsManager) -> Self {
        let theme = settings.theme();
        log::info!("Theme set to: {}", theme.name());
        Self {
            theme,
            colors: ThemeColors::for_theme(theme),
            settings,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn get_colors(&self) -> &ThemeColors {
        &self.colors
    }

    /// Flip between light and dark and persist the choice. A failed write is
    /// logged; the new theme still applies for this run.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.colors = ThemeColors::for_theme(self.theme);

        let theme = self.theme;
        if let Err(e) = self.settings.update(|s| s.theme = theme) {
            log::warn!("Failed to persist theme '{}': {}", theme.name(), e);
        }

        log::info!("Theme set to: {}", theme.name());
        theme
    }
}

// Helper functions for common theme operations
pub fn get_list_item_style(theme: &ThemeColors, selected: bool) -> ratatui::style::Style {
    use ratatui::style::{Modifier, Style};

    if selected {
        Style::default()
            .bg(theme.highlight)
            .fg(theme.container)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.text)
    }
}

pub fn get_border_style(theme: &ThemeColors) -> ratatui::style::Style {
    ratatui::style::Style::default().fg(theme.border)
}

pub fn get_title_style(theme: &ThemeColors) -> ratatui::style::Style {
    use ratatui::style::{Modifier, Style};
    Style::default()
        .fg(theme.primary)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn starts_from_persisted_theme() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "theme": "dark" }"#).unwrap();

        let store = ThemeStore::new(SettingsManager::with_path(path));
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(store.get_colors(), &ThemeColors::dark());
    }

    #[test]
    fn defaults_to_light() {
        let dir = tempdir().unwrap();
        let store = ThemeStore::new(SettingsManager::with_path(dir.path().join("settings.json")));
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn toggle_persists_and_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = ThemeStore::new(SettingsManager::with_path(path.clone()));
        assert_eq!(store.toggle_theme(), Theme::Dark);
        assert_eq!(store.get_colors(), &ThemeColors::dark());
        assert_eq!(SettingsManager::with_path(path.clone()).theme(), Theme::Dark);

        assert_eq!(store.toggle_theme(), Theme::Light);
        assert_eq!(SettingsManager::with_path(path).theme(), Theme::Light);
    }

    #[test]
    fn serializes_as_lowercase_flag() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(serde_json::from_str::<Theme>("\"light\"").unwrap(), Theme::Light);
    }
}
