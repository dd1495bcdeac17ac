use anyhow::Result;
use bytes::Bytes;
use rodio::mixer::Mixer;
use rodio::stream::{OutputStream, OutputStreamBuilder};
use rodio::{Decoder, Sink};
use std::{
    io::Cursor,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

use super::media::{LoadToken, MediaElement, MediaEvent};
use crate::logging::RedirectStderrToLog;

const POSITION_UPDATE_INTERVAL: Duration = Duration::from_millis(500);
const COMMAND_POLL_TIMEOUT: Duration = Duration::from_millis(250);

pub enum PlayerCommand {
    Load { url: String, token: LoadToken },
    Play,
    Pause,
    Seek(Duration),
}

/// A [`MediaElement`] that streams episodes through rodio.
///
/// Decoding and output run in a background task; this handle only forwards
/// commands. Outcomes come back on the event receiver returned by
/// [`AudioPlayer::new`].
pub struct AudioPlayer {
    command_sender: mpsc::UnboundedSender<PlayerCommand>,
    _output_stream: OutputStream,
}

impl AudioPlayer {
    pub fn new(volume: f32) -> Result<(Self, mpsc::UnboundedReceiver<MediaEvent>)> {
        // ALSA likes to print to stderr while probing devices, which would
        // tear through the TUI.
        let output_stream = {
            let _redirect = RedirectStderrToLog::new(&crate::logging::log_file_path());
            OutputStreamBuilder::open_default_stream()?
        };

        let mixer = output_stream.mixer().clone();
        let (command_sender, command_receiver) = mpsc::unbounded_channel();
        let (event_sender, event_receiver) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            Self::audio_thread(mixer, command_receiver, event_sender, volume.clamp(0.0, 1.0)).await;
        });

        Ok((
            Self {
                command_sender,
                _output_stream: output_stream,
            },
            event_receiver,
        ))
    }

    fn send(&self, command: PlayerCommand) {
        if self.command_sender.send(command).is_err() {
            log::error!("Audio task is gone, dropping command");
        }
    }

    async fn audio_thread(
        mixer: Mixer,
        mut command_receiver: mpsc::UnboundedReceiver<PlayerCommand>,
        events: mpsc::UnboundedSender<MediaEvent>,
        volume: f32,
    ) {
        let mut track: Option<LoadedTrack> = None;
        // Token of the last load request, even if that load failed.
        let mut latest_token: Option<LoadToken> = None;
        let mut last_position_update = Instant::now();

        loop {
            // Use timeout to allow periodic updates even when no commands come in
            let command = tokio::time::timeout(COMMAND_POLL_TIMEOUT, command_receiver.recv()).await;

            match command {
                Ok(Some(PlayerCommand::Load { url, token })) => {
                    latest_token = Some(token);
                    if let Some(old) = track.take() {
                        log::debug!("Replacing source {} with {}", old.token, token);
                        old.sink.stop();
                    }

                    match Self::load_audio(&url).await {
                        Ok(data) => match fresh_sink(&mixer, &data, volume) {
                            Ok(sink) => {
                                log::info!("Loaded {} ({} bytes)", url, data.len());
                                track = Some(LoadedTrack {
                                    token,
                                    data,
                                    sink,
                                    playing: false,
                                    ended: false,
                                });
                                let _ = events.send(MediaEvent::LoadedMetadata { token });
                            }
                            Err(e) => {
                                log::error!("Failed to decode audio: {}", e);
                                let _ = events.send(MediaEvent::Error {
                                    token,
                                    message: format!("Failed to decode audio: {}", e),
                                });
                            }
                        },
                        Err(e) => {
                            log::error!("Failed to load audio: {}", e);
                            let _ = events.send(MediaEvent::Error {
                                token,
                                message: format!("Failed to load audio: {}", e),
                            });
                        }
                    }
                }

                Ok(Some(PlayerCommand::Play)) => match track {
                    Some(ref mut t) => {
                        if t.ended && !t.rewind(&mixer, volume) {
                            let _ = events.send(MediaEvent::Paused { token: t.token });
                            continue;
                        }
                        t.sink.play();
                        t.playing = true;
                        last_position_update = Instant::now();
                        let _ = events.send(MediaEvent::Playing { token: t.token });
                    }
                    None => {
                        if let Some(event) = refused_play(latest_token) {
                            log::warn!("Play requested but source {} is not loaded", event.token());
                            let _ = events.send(event);
                        }
                    }
                },

                Ok(Some(PlayerCommand::Pause)) => {
                    if let Some(ref mut t) = track {
                        t.sink.pause();
                        if t.playing {
                            t.playing = false;
                            let _ = events.send(MediaEvent::Paused { token: t.token });
                        }
                    }
                }

                Ok(Some(PlayerCommand::Seek(position))) => {
                    if let Some(ref mut t) = track {
                        if t.ended && !t.rewind(&mixer, volume) {
                            continue;
                        }
                        match t.sink.try_seek(position) {
                            Ok(_) => log::debug!("Seeked to {:?}", position),
                            Err(e) => log::warn!("Failed to seek in audio: {:?}", e),
                        }
                    }
                }

                // Channel closed, exit
                Ok(None) => break,

                // Timed out, fall through to the periodic checks
                Err(_) => {}
            }

            if let Some(ref mut t) = track {
                if t.playing && t.sink.empty() {
                    log::info!("Source {} reached its end", t.token);
                    t.playing = false;
                    t.ended = true;
                    let _ = events.send(MediaEvent::Ended { token: t.token });
                } else if t.playing && last_position_update.elapsed() >= POSITION_UPDATE_INTERVAL {
                    let _ = events.send(MediaEvent::TimeUpdate {
                        token: t.token,
                        position: t.sink.get_pos(),
                    });
                    last_position_update = Instant::now();
                }
            }
        }

        log::debug!("Audio task finished");
    }

    async fn load_audio(url: &str) -> Result<Bytes> {
        log::debug!("Loading audio from URL: {}", url);

        let response = reqwest::get(url).await?.error_for_status()?;
        let bytes = response.bytes().await?;
        log::info!("Downloaded {} bytes ({} MB) from {}", bytes.len(), bytes.len() / 1024 / 1024, url);

        Ok(bytes)
    }
}

struct LoadedTrack {
    token: LoadToken,
    data: Bytes,
    sink: Sink,
    playing: bool,
    ended: bool,
}

impl LoadedTrack {
    /// Rebuild the sink at position zero after the source ran out.
    fn rewind(&mut self, mixer: &Mixer, volume: f32) -> bool {
        match fresh_sink(mixer, &self.data, volume) {
            Ok(sink) => {
                self.sink.stop();
                self.sink = sink;
                self.ended = false;
                true
            }
            Err(e) => {
                log::error!("Failed to rewind source {}: {}", self.token, e);
                false
            }
        }
    }
}

// Nothing playable, so the player hears that the last load stayed paused.
fn refused_play(latest_token: Option<LoadToken>) -> Option<MediaEvent> {
    latest_token.map(|token| MediaEvent::Paused { token })
}

// New paused sink holding a decoder over `data`.
fn fresh_sink(mixer: &Mixer, data: &Bytes, volume: f32) -> Result<Sink> {
    let decoder = Decoder::new(Cursor::new(data.clone()))?;
    let sink = Sink::connect_new(mixer);
    sink.pause();
    sink.set_volume(volume);
    sink.append(decoder);
    Ok(sink)
}

impl MediaElement for AudioPlayer {
    fn load(&mut self, url: &str, token: LoadToken) {
        self.send(PlayerCommand::Load {
            url: url.to_string(),
            token,
        });
    }

    fn play(&mut self) {
        self.send(PlayerCommand::Play);
    }

    fn pause(&mut self) {
        self.send(PlayerCommand::Pause);
    }

    fn set_current_time(&mut self, position: Duration) {
        self.send(PlayerCommand::Seek(position));
    }
}
