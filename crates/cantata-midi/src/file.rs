//! Standard MIDI File (SMF) conversion using the `midly` crate.
//!
//! Reading flattens every track into a list of [`NoteEvent`]s with times in
//! seconds; writing produces a single-track file at a fixed 120 BPM with the
//! default piano program, which is all the synthesis path needs.

use crate::error::{Error, Result};
use cantata_core::NoteEvent;
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use tracing::debug;

/// Ticks per quarter note used when writing.
pub const TICKS_PER_BEAT: u16 = 480;

/// Tempo used when writing, in microseconds per quarter note (120 BPM).
pub const TEMPO_US_PER_BEAT: u32 = 500_000;

/// Read a MIDI file from disk into note events.
pub fn read_note_events(path: impl AsRef<Path>) -> Result<Vec<NoteEvent>> {
    let data = std::fs::read(path.as_ref())?;
    parse_note_events(&data)
}

/// Parse note events from MIDI file bytes.
///
/// Only metrical (ticks-per-beat) timing is supported. The first tempo meta
/// event found sets the tempo for the whole file; files without one default
/// to 120 BPM. A NoteOn with velocity 0 counts as a NoteOff.
pub fn parse_note_events(data: &[u8]) -> Result<Vec<NoteEvent>> {
    let smf = Smf::parse(data)?;

    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(tpb) => tpb.as_int(),
        Timing::Timecode(_, _) => return Err(Error::MidiUnsupportedTiming),
    };

    let us_per_beat = extract_tempo(&smf).unwrap_or(TEMPO_US_PER_BEAT);
    // One multiply-then-divide per event keeps grid-aligned ticks exact.
    let tick_numerator = us_per_beat as f64;
    let tick_denominator = ticks_per_beat as f64 * 1_000_000.0;

    debug!(
        tracks = smf.tracks.len(),
        ticks_per_beat, us_per_beat, "parsing MIDI file"
    );

    let mut notes = Vec::new();
    for track in smf.tracks.iter() {
        collect_track_notes(track, tick_numerator, tick_denominator, &mut notes);
    }
    notes.sort_by(|a, b| a.start.total_cmp(&b.start));

    Ok(notes)
}

/// Pair NoteOn/NoteOff messages of one track into note events.
fn collect_track_notes(
    track: &Track,
    tick_numerator: f64,
    tick_denominator: f64,
    notes: &mut Vec<NoteEvent>,
) {
    // FIFO per (channel, key): the earliest unmatched onset ends first.
    let mut pending: HashMap<(u8, u8), VecDeque<(f64, u8)>> = HashMap::new();
    let mut current_tick = 0u64;

    for event in track.iter() {
        current_tick += event.delta.as_int() as u64;
        let time = current_tick as f64 * tick_numerator / tick_denominator;

        let TrackEventKind::Midi { channel, message } = &event.kind else {
            continue;
        };
        match message {
            MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                pending
                    .entry((channel.as_int(), key.as_int()))
                    .or_default()
                    .push_back((time, vel.as_int()));
            }
            MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => {
                let Some(starts) = pending.get_mut(&(channel.as_int(), key.as_int())) else {
                    continue;
                };
                let Some((start, velocity)) = starts.pop_front() else {
                    continue;
                };
                match NoteEvent::new(key.as_int(), start, time, velocity) {
                    Ok(note) => notes.push(note),
                    Err(e) => debug!("dropping degenerate note: {e}"),
                }
            }
            _ => {}
        }
    }

    let unterminated: usize = pending.values().map(|v| v.len()).sum();
    if unterminated > 0 {
        debug!(unterminated, "dropping notes without a matching NoteOff");
    }
}

/// First tempo meta event in the file, in microseconds per quarter note.
fn extract_tempo(smf: &Smf) -> Option<u32> {
    for track in smf.tracks.iter() {
        for event in track.iter() {
            if let TrackEventKind::Meta(MetaMessage::Tempo(tempo)) = &event.kind {
                return Some(tempo.as_int());
            }
        }
    }
    None
}

/// Write note events to a MIDI file on disk.
pub fn write_note_events(notes: &[NoteEvent], path: impl AsRef<Path>) -> Result<()> {
    let bytes = render_note_events(notes)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Render note events as single-track MIDI file bytes.
pub fn render_note_events(notes: &[NoteEvent]) -> Result<Vec<u8>> {
    let ticks_per_second =
        TICKS_PER_BEAT as f64 * 1_000_000.0 / TEMPO_US_PER_BEAT as f64;

    // (tick, is_note_on, pitch, velocity); note-offs sort before note-ons at
    // the same tick so back-to-back runs never leave a stuck note.
    let mut moments: Vec<(u32, bool, u8, u8)> = Vec::with_capacity(notes.len() * 2);
    for note in notes {
        let on_tick = (note.start * ticks_per_second).round() as u32;
        let off_tick = (note.end * ticks_per_second).round() as u32;
        moments.push((on_tick, true, note.pitch, note.velocity));
        moments.push((off_tick, false, note.pitch, 0));
    }
    moments.sort_by_key(|&(tick, is_on, pitch, _)| (tick, is_on, pitch));

    let mut track = Track::new();
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(TEMPO_US_PER_BEAT.into())),
    });
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Midi {
            channel: 0.into(),
            message: MidiMessage::ProgramChange { program: 0.into() },
        },
    });

    let mut last_tick = 0u32;
    for (tick, is_on, pitch, velocity) in moments {
        let delta = tick - last_tick;
        last_tick = tick;
        let message = if is_on {
            MidiMessage::NoteOn {
                key: pitch.into(),
                vel: velocity.into(),
            }
        } else {
            MidiMessage::NoteOff {
                key: pitch.into(),
                vel: 0.into(),
            }
        };
        track.push(TrackEvent {
            delta: delta.into(),
            kind: TrackEventKind::Midi {
                channel: 0.into(),
                message,
            },
        });
    }
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let smf = Smf {
        header: Header::new(Format::SingleTrack, Timing::Metrical(TICKS_PER_BEAT.into())),
        tracks: vec![track],
    };
    let mut buf = Vec::new();
    smf.write_std(&mut buf)?;
    Ok(buf)
}
