use log::{info, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::SoundConfig;

type Sound = Buffered<Decoder<BufReader<File>>>;

/// Sound effects for the game. Any part that fails to load is simply silent.
pub struct AudioManager {
    // The stream must outlive every sink played on its handle
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
    shoot_sound: Option<Sound>,
    explosion_sound: Option<Sound>,
}

impl AudioManager {
    pub fn new(config: &SoundConfig) -> Self {
        if !config.enabled {
            info!("sound disabled");
            return Self::silent();
        }

        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok(output) => output,
            Err(err) => {
                warn!("failed to open audio output, continuing without sound: {err}");
                return Self::silent();
            }
        };

        Self {
            _stream: Some(stream),
            stream_handle: Some(stream_handle),
            shoot_sound: load_sound(&config.shoot),
            explosion_sound: load_sound(&config.explosion),
        }
    }

    pub fn silent() -> Self {
        Self {
            _stream: None,
            stream_handle: None,
            shoot_sound: None,
            explosion_sound: None,
        }
    }

    pub fn play_shoot(&self) {
        self.play(self.shoot_sound.as_ref(), 0.05);
    }

    pub fn play_explosion(&self) {
        self.play(self.explosion_sound.as_ref(), 0.1);
    }

    fn play(&self, sound: Option<&Sound>, volume: f32) {
        let (Some(handle), Some(sound)) = (&self.stream_handle, sound) else {
            return;
        };

        // Playback errors are not worth interrupting the game for
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(volume);
            // Cloning a buffered source only clones references
            sink.append(sound.clone());
            sink.detach();
        }
    }
}

fn load_sound(path: &Path) -> Option<Sound> {
    let decoded = File::open(path)
        .map_err(|err| err.to_string())
        .and_then(|file| Decoder::new(BufReader::new(file)).map_err(|err| err.to_string()));

    match decoded {
        Ok(source) => Some(source.buffered()),
        Err(err) => {
            warn!("could not load sound {}: {err}", path.display());
            None
        }
    }
}
