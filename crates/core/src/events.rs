//! Notifications for the engine's one-way collaborators.
//!
//! The engine never calls audio, ranking or backdrop code itself. While a tick
//! runs it records [`Event`]s into a fixed-capacity buffer; the caller drains
//! them with `GameState::take_events` and forwards them with [`dispatch`].

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// A rotation buffered during the spawn delay was applied
    Rotate,
    /// A piece came to rest
    Land,
    /// Lines were cleared
    Clear,
    /// A piece was merged into the board
    Lock,
    /// Cleared rows collapsed
    Collapse,
    /// The preview slot was refilled with this shape
    Preview(PieceKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Sound(Cue),
    MusicVolume { left: u8, right: u8 },
    SelectTrack(u8),
    BackdropAdvance,
    /// Final ranking index; recorded once per session
    RankingSetup(u8),
}

/// Buffer capacity; comfortably above the most a single tick can record
pub const EVENT_CAPACITY: usize = 32;

pub type Events = ArrayVec<Event, EVENT_CAPACITY>;

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
    fn set_music_volume(&mut self, left: u8, right: u8);
    fn select_track(&mut self, track: u8);
}

pub trait RankingSink {
    fn setup(&mut self, ranking: u8);
}

pub trait BackdropSink {
    fn advance(&mut self);
}

impl AudioSink for () {
    fn play(&mut self, _cue: Cue) {}
    fn set_music_volume(&mut self, _left: u8, _right: u8) {}
    fn select_track(&mut self, _track: u8) {}
}

impl RankingSink for () {
    fn setup(&mut self, _ranking: u8) {}
}

impl BackdropSink for () {
    fn advance(&mut self) {}
}

/// Forward events, in order, to their collaborators
pub fn dispatch<'a, I, A, R, B>(events: I, audio: &mut A, ranking: &mut R, backdrop: &mut B)
where
    I: IntoIterator<Item = &'a Event>,
    A: AudioSink + ?Sized,
    R: RankingSink + ?Sized,
    B: BackdropSink + ?Sized,
{
    for event in events {
        match *event {
            Event::Sound(cue) => audio.play(cue),
            Event::MusicVolume { left, right } => audio.set_music_volume(left, right),
            Event::SelectTrack(track) => audio.select_track(track),
            Event::BackdropAdvance => backdrop.advance(),
            Event::RankingSetup(index) => ranking.setup(index),
        }
    }
}
