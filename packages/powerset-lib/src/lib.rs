pub mod automaton;
pub mod config;
pub mod error;
pub mod logger;
pub mod parse;
pub mod playback;
pub mod presets;
pub mod random;
pub mod report;
pub mod validation;
pub mod view;
