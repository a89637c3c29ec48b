//! Audio cues played through an external player process

use std::{
    path::{Path, PathBuf},
    process::Stdio,
    sync::Mutex,
};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// The fixed sound assets shipped with the widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioAsset {
    WorkAlarm,
    BreakAlarm,
    WaterReminder,
}

impl AudioAsset {
    pub fn file_name(&self) -> &'static str {
        match self {
            AudioAsset::WorkAlarm => "MidnightCityAlarm.mp3",
            AudioAsset::BreakAlarm => "SunsetLoverAlarm.mp3",
            AudioAsset::WaterReminder => "WaterReminder.mp3",
        }
    }

    pub fn path_in(&self, audio_dir: &Path) -> PathBuf {
        audio_dir.join(self.file_name())
    }
}

/// A single playback channel. Playing a new asset replaces the current one.
///
/// Playback is best effort: implementations log failures and never
/// report them to the caller.
pub trait AudioCue: Send + Sync + std::fmt::Debug {
    /// Cancel current playback and arm `asset` for a later unattended `play`
    fn prime(&self, asset: AudioAsset);
    /// Play `asset` from the start
    fn play(&self, asset: AudioAsset);
    /// Halt playback; the next play starts from the beginning
    fn stop(&self);
    fn is_playing(&self) -> bool;
}

#[derive(Debug, Default)]
struct Channel {
    armed: Option<AudioAsset>,
    child: Option<Child>,
}

/// Plays assets by spawning `player [args..] <file>`
#[derive(Debug)]
pub struct CommandAudioCue {
    player: String,
    player_args: Vec<String>,
    audio_dir: PathBuf,
    channel: Mutex<Channel>,
}

impl CommandAudioCue {
    pub fn new(player: impl Into<String>, player_args: Vec<String>, audio_dir: impl Into<PathBuf>) -> Self {
        Self {
            player: player.into(),
            player_args,
            audio_dir: audio_dir.into(),
            channel: Mutex::new(Channel::default()),
        }
    }

    fn stop_channel(channel: &mut Channel) {
        if let Some(mut child) = channel.child.take() {
            if let Err(e) = child.start_kill() {
                debug!("Player process already gone: {}", e);
            }
        }
    }

    fn spawn(&self, path: &Path) -> Result<Child, String> {
        Command::new(&self.player)
            .args(&self.player_args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("Failed to execute {}: {}", self.player, e))
    }
}

impl AudioCue for CommandAudioCue {
    fn prime(&self, asset: AudioAsset) {
        let Ok(mut channel) = self.channel.lock() else {
            warn!("Audio channel lock poisoned, skipping prime");
            return;
        };
        Self::stop_channel(&mut channel);
        channel.armed = Some(asset);

        let path = asset.path_in(&self.audio_dir);
        if path.exists() {
            debug!("Primed {}", path.display());
        } else {
            warn!("Audio asset {} is missing, completion will be silent", path.display());
        }
    }

    fn play(&self, asset: AudioAsset) {
        let Ok(mut channel) = self.channel.lock() else {
            warn!("Audio channel lock poisoned, skipping playback");
            return;
        };
        Self::stop_channel(&mut channel);

        if channel.armed != Some(asset) {
            debug!("Playing {:?} without priming", asset);
        }
        channel.armed = None;

        let path = asset.path_in(&self.audio_dir);
        if !path.exists() {
            warn!("Cannot play {}: file not found", path.display());
            return;
        }

        match self.spawn(&path) {
            Ok(child) => {
                info!("Playing {}", path.display());
                channel.child = Some(child);
            }
            Err(e) => warn!("Audio playback failed: {}", e),
        }
    }

    fn stop(&self) {
        match self.channel.lock() {
            Ok(mut channel) => Self::stop_channel(&mut channel),
            Err(e) => warn!("Failed to lock audio channel: {}", e),
        }
    }

    fn is_playing(&self) -> bool {
        let Ok(mut channel) = self.channel.lock() else {
            return false;
        };
        let finished = match channel.child.as_mut().map(|child| child.try_wait()) {
            None => return false,
            Some(Ok(None)) => false,
            Some(Ok(Some(status))) => {
                debug!("Player exited with {}", status);
                true
            }
            Some(Err(e)) => {
                warn!("Failed to poll player process: {}", e);
                true
            }
        };
        if finished {
            channel.child = None;
        }
        !finished
    }
}

/// What a [`SilentAudioCue`] was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Prime(AudioAsset),
    Play(AudioAsset),
    Stop,
}

/// Cue that makes no sound but tracks playback state, for `--no-sound`
///
/// A played asset counts as playing until stopped.
#[derive(Debug, Default)]
pub struct SilentAudioCue {
    events: Mutex<Vec<AudioEvent>>,
    playing: Mutex<Option<AudioAsset>>,
}

impl SilentAudioCue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AudioEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    fn record(&self, event: AudioEvent) {
        debug!("Silent audio: {:?}", event);
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
        if let Ok(mut playing) = self.playing.lock() {
            *playing = match event {
                AudioEvent::Play(asset) => Some(asset),
                AudioEvent::Prime(_) | AudioEvent::Stop => None,
            };
        }
    }
}

impl AudioCue for SilentAudioCue {
    fn prime(&self, asset: AudioAsset) {
        self.record(AudioEvent::Prime(asset));
    }

    fn play(&self, asset: AudioAsset) {
        self.record(AudioEvent::Play(asset));
    }

    fn stop(&self) {
        self.record(AudioEvent::Stop);
    }

    fn is_playing(&self) -> bool {
        self.playing.lock().map(|playing| playing.is_some()).unwrap_or(false)
    }
}
