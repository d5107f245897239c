use super::event::{AbilityFields, DotFields, EffectFields, LogEvent};
use super::line::{LineType, RawLine};


/// Per-category field maps: column name → index. Index 0 is the
/// category code, index 1 the timestamp, which the engine ignores.
mod fields {
    pub mod change_zone {
        pub const ID: usize = 2;
    }
    pub mod player_stats {
        pub const SKILL_SPEED: usize = 15;
        pub const SPELL_SPEED: usize = 16;
    }
    pub mod gains_effect {
        pub const EFFECT_ID: usize = 2;
        pub const EFFECT: usize = 3;
        pub const DURATION: usize = 4;
        pub const SOURCE_ID: usize = 5;
        pub const SOURCE: usize = 6;
        pub const TARGET_ID: usize = 7;
        pub const TARGET: usize = 8;
        pub const COUNT: usize = 9;
    }
    pub mod ability {
        pub const SOURCE_ID: usize = 2;
        pub const SOURCE: usize = 3;
        pub const ID: usize = 4;
        pub const ABILITY: usize = 5;
        pub const TARGET_ID: usize = 6;
        pub const TARGET: usize = 7;
    }
    pub mod dot_tick {
        pub const TARGET_ID: usize = 2;
        pub const WHICH: usize = 4;
        pub const EFFECT_ID: usize = 5;
    }
    pub mod game_log {
        pub const LINE: usize = 4;
    }
}

/// Classify a tokenized line into a typed event.
///
/// Unknown categories return `None`; within a known category every
/// field is projected as an `Option`, so a short or malformed line
/// never aborts the pipeline.
pub fn classify<'a>(line: &RawLine<'a>) -> Option<LogEvent<'a>> {
    let event = match line.line_type()? {
        LineType::GameLog => LogEvent::GameLog {
            line: line.field(fields::game_log::LINE).unwrap_or(line.raw()),
        },
        LineType::ChangeZone => LogEvent::ChangeZone {
            zone_id: hex_field(line, fields::change_zone::ID),
        },
        LineType::PlayerStats => LogEvent::PlayerStats {
            skill_speed: num_field(line, fields::player_stats::SKILL_SPEED),
            spell_speed: num_field(line, fields::player_stats::SPELL_SPEED),
        },
        LineType::GainsEffect => LogEvent::GainsEffect(effect_fields(line)),
        LineType::LosesEffect => LogEvent::LosesEffect(effect_fields(line)),
        LineType::Ability | LineType::AoeAbility => LogEvent::Ability(AbilityFields {
            source_id: line.field(fields::ability::SOURCE_ID),
            source: line.field(fields::ability::SOURCE),
            id: line.field(fields::ability::ID),
            ability: line.field(fields::ability::ABILITY),
            target_id: line.field(fields::ability::TARGET_ID),
            target: line.field(fields::ability::TARGET),
        }),
        LineType::DotTick => LogEvent::DotTick(DotFields {
            target_id: line.field(fields::dot_tick::TARGET_ID),
            which: line.field(fields::dot_tick::WHICH),
            effect_id: line.field(fields::dot_tick::EFFECT_ID),
        }),
    };
    Some(event)
}

fn effect_fields<'a>(line: &RawLine<'a>) -> EffectFields<'a> {
    use fields::gains_effect as f;
    EffectFields {
        effect_id: line.field(f::EFFECT_ID).map(str::to_uppercase),
        effect: line.field(f::EFFECT),
        duration: line.field(f::DURATION).and_then(|d| d.parse().ok()),
        source_id: line.field(f::SOURCE_ID),
        source: line.field(f::SOURCE),
        target_id: line.field(f::TARGET_ID),
        target: line.field(f::TARGET),
        count: line
            .field(f::COUNT)
            .and_then(|c| u8::from_str_radix(c, 16).ok()),
    }
}

fn num_field(line: &RawLine<'_>, idx: usize) -> Option<u32> {
    line.field(idx).and_then(|v| v.parse().ok())
}

fn hex_field(line: &RawLine<'_>, idx: usize) -> Option<u32> {
    line.field(idx).and_then(|v| u32::from_str_radix(v, 16).ok())
}
