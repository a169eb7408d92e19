//! TextVox batch conversion core
//!
//! Turns a list of text files into synthesized-speech audio files, one
//! output per input, through a remote TTS backend. The pipeline reads
//! each file with encoding fallback, synthesizes it, writes the audio
//! to a collision-free output name and verifies the result, tolerating
//! per-file failure and cooperative cancellation.

pub mod batch;
