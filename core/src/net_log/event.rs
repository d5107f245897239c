/// Typed projections of log records.
///
/// Each variant carries exactly the named fields the trackers consume;
/// anything that can be absent in the wire format is an `Option`.
#[derive(Debug, Clone)]
pub enum LogEvent<'a> {
    /// Chat/system message; matched against locale patterns only.
    GameLog { line: &'a str },
    ChangeZone { zone_id: Option<u32> },
    PlayerStats {
        skill_speed: Option<u32>,
        spell_speed: Option<u32>,
    },
    GainsEffect(EffectFields<'a>),
    LosesEffect(EffectFields<'a>),
    Ability(AbilityFields<'a>),
    DotTick(DotFields<'a>),
}

/// Fields shared by effect gain and loss records.
#[derive(Debug, Clone, Default)]
pub struct EffectFields<'a> {
    /// Normalized to uppercase; always safe to use as a lookup key.
    pub effect_id: Option<String>,
    pub effect: Option<&'a str>,
    pub duration: Option<f32>,
    pub source_id: Option<&'a str>,
    pub source: Option<&'a str>,
    pub target_id: Option<&'a str>,
    pub target: Option<&'a str>,
    pub count: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct AbilityFields<'a> {
    pub source_id: Option<&'a str>,
    pub source: Option<&'a str>,
    pub id: Option<&'a str>,
    pub ability: Option<&'a str>,
    pub target_id: Option<&'a str>,
    pub target: Option<&'a str>,
}

/// Periodic damage tick. Reports only the bearer, never the caster;
/// attribution happens in the DoT tracker.
#[derive(Debug, Clone, Default)]
pub struct DotFields<'a> {
    pub target_id: Option<&'a str>,
    pub which: Option<&'a str>,
    pub effect_id: Option<&'a str>,
}

/// Hostile entity ids carry a fixed leading character.
pub fn is_hostile_id(id: &str) -> bool {
    id.starts_with('4')
}
