use log::info;

use crate::events::EventHandler;
use crate::model::SessionEvent;

/// Playback capability supplied by the host.
pub trait AudioSink {
    fn play_background(&mut self);
    fn stop_background(&mut self);
}

/// Starts background music when a round starts and stops it when the round ends.
pub struct AudioCues<S: AudioSink> {
    sink: S,
    enabled: bool,
    playing: bool,
}

impl<S: AudioSink> AudioCues<S> {
    pub fn new(sink: S, enabled: bool) -> Self {
        Self {
            sink,
            enabled,
            playing: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn stop(&mut self) {
        if self.playing {
            self.sink.stop_background();
            self.playing = false;
        }
    }
}

impl<S: AudioSink> EventHandler<SessionEvent> for AudioCues<S> {
    fn handle_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::RoundStarted { .. } => {
                self.stop();
                if self.enabled {
                    self.sink.play_background();
                    self.playing = true;
                }
            }
            SessionEvent::RoundStopped => self.stop(),
            _ => (),
        }
    }
}

/// Stand-in sink for hosts without an audio device.
#[derive(Debug, Default)]
pub struct LoggingAudio;

impl AudioSink for LoggingAudio {
    fn play_background(&mut self) {
        info!(target: "audio", "background music started");
    }

    fn stop_background(&mut self) {
        info!(target: "audio", "background music stopped");
    }
}
