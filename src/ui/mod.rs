/// Terminal shell: input adapters, gamepad polling, drawing and audio.

pub mod gamepad;
pub mod input;
pub mod renderer;
pub mod router;
pub mod sound;
