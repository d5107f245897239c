mod event;
mod line;
mod parser;

pub use event::{AbilityFields, DotFields, EffectFields, LogEvent, is_hostile_id};
pub use line::{LineType, RawLine};
pub use parser::classify;
