pub const PLAYING_CLASS: &str = "playing";
/// Served by trunk from the `audio/` directory next to `index.html`.
pub const AUDIO_SRC: &str = "/audio/demo.wav";
const PLAY_GLYPH: &str = "▶";
const PAUSE_GLYPH: &str = "⏸";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Playback {
    #[default]
    Paused,
    Playing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCommand {
    Play,
    Pause,
}

impl Playback {
    /// The state shown right after a click, together with the command to
    /// send to the media element. Play is optimistic: a later rejection does
    /// not move the state back.
    pub fn clicked(self) -> (Self, AudioCommand) {
        match self {
            Self::Paused => (Self::Playing, AudioCommand::Play),
            Self::Playing => (Self::Paused, AudioCommand::Pause),
        }
    }

    pub fn ended(self) -> Self {
        Self::Paused
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Paused => PLAY_GLYPH,
            Self::Playing => PAUSE_GLYPH,
        }
    }

    pub fn playing_class(self) -> Option<&'static str> {
        matches!(self, Self::Playing).then_some(PLAYING_CLASS)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Paused => "Play demo audio",
            Self::Playing => "Pause demo audio",
        }
    }
}
