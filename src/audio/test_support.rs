use std::time::Duration;

use super::media::{LoadToken, MediaElement};

/// What a [`FakeMedia`] was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(String, LoadToken),
    Play,
    Pause,
    Seek(u64),
}

/// Media element that only records commands.
#[derive(Debug, Default)]
pub struct FakeMedia {
    pub commands: Vec<Command>,
}

impl FakeMedia {
    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

impl MediaElement for FakeMedia {
    fn load(&mut self, url: &str, token: LoadToken) {
        self.commands.push(Command::Load(url.to_string(), token));
    }

    fn play(&mut self) {
        self.commands.push(Command::Play);
    }

    fn pause(&mut self) {
        self.commands.push(Command::Pause);
    }

    fn set_current_time(&mut self, position: Duration) {
        self.commands.push(Command::Seek(position.as_secs()));
    }
}
