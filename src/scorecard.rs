pub mod appearance;
pub mod baserunning;
pub mod defense;
pub mod error;
pub mod game;
pub mod names;
pub mod plate_appearance;
pub mod play_code;
pub mod roster;
pub mod segment;
pub mod sub_event;
pub mod traits;
