/// Record categories the engine subscribes to, keyed by the leading
/// field of each network log line. Everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    GameLog,
    ChangeZone,
    PlayerStats,
    Ability,
    AoeAbility,
    DotTick,
    GainsEffect,
    LosesEffect,
}

impl LineType {
    pub fn from_code(code: &str) -> Option<LineType> {
        match code {
            "00" => Some(LineType::GameLog),
            "01" => Some(LineType::ChangeZone),
            "12" => Some(LineType::PlayerStats),
            "21" => Some(LineType::Ability),
            "22" => Some(LineType::AoeAbility),
            "24" => Some(LineType::DotTick),
            "26" => Some(LineType::GainsEffect),
            "30" => Some(LineType::LosesEffect),
            _ => None,
        }
    }
}

/// A pre-tokenized log line: category code plus ordered raw fields,
/// with the raw text retained for pattern-matching paths.
///
/// Field access past the end of the line yields `None`; log schemas
/// differ per category and older lines may be short, so a missing
/// column is "nothing to do", never a failure.
#[derive(Debug, Clone)]
pub struct RawLine<'a> {
    fields: Vec<&'a str>,
    raw: &'a str,
}

impl<'a> RawLine<'a> {
    /// Tokenize a raw pipe-delimited line.
    pub fn tokenize(raw: &'a str) -> RawLine<'a> {
        RawLine {
            fields: raw.split('|').collect(),
            raw,
        }
    }

    /// Build from an already-tokenized record (the ingest interface
    /// accepts hosts that deliver lines pre-split).
    pub fn from_parts(fields: Vec<&'a str>, raw: &'a str) -> RawLine<'a> {
        RawLine { fields, raw }
    }

    pub fn line_type(&self) -> Option<LineType> {
        self.fields.first().copied().and_then(LineType::from_code)
    }

    pub fn field(&self, idx: usize) -> Option<&'a str> {
        self.fields.get(idx).copied()
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }
}
