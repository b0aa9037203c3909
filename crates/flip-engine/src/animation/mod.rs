pub mod action;
pub mod easing;
pub mod sequencer;
