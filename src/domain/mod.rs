/// Pure game data: grid, headings, snake body, input rules.

pub mod direction;
pub mod grid;
pub mod rules;
pub mod snake;
