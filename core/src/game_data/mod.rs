//! Static game data tables
//!
//! Ability/effect identifiers, combo chains, level modifiers, and the
//! handful of numeric constants the derived timers depend on. These are
//! fixed lookup data, not configuration.

mod job;

pub use job::Job;

/// Ability ids as they appear in network log lines (uppercase hex).
pub mod ability {
    // Ninja
    pub const SPINNING_EDGE: &str = "8C0";
    pub const GUST_SLASH: &str = "8C2";
    pub const AEOLIAN_EDGE: &str = "8CF";
    pub const ARMOR_CRUSH: &str = "DEB";
    pub const TRICK_ATTACK: &str = "8D2";
    pub const BUNSHIN: &str = "406D";
    pub const HIDE: &str = "8C5";

    // Dark Knight
    pub const HARD_SLASH: &str = "E21";
    pub const SYPHON_STRIKE: &str = "E27";
    pub const SOULEATER: &str = "E30";
    pub const BLOOD_WEAPON: &str = "E29";
    pub const DELIRIUM: &str = "1CDE";
    pub const LIVING_SHADOW: &str = "4058";

    // White Mage
    pub const AERO: &str = "79";
    pub const AERO2: &str = "84";
    pub const DIA: &str = "4094";
    pub const ASSIZE: &str = "DF3";

    // Scholar
    pub const BIO: &str = "45C8";
    pub const BIO2: &str = "45C9";
    pub const BIOLYSIS: &str = "409C";
    pub const AETHERFLOW: &str = "A6";

    // Blue Mage
    pub const OFF_GUARD: &str = "2C93";
    pub const PECULIAR_LIGHT: &str = "2C9D";
    pub const SONG_OF_TORMENT: &str = "2C7A";
    pub const AETHERIAL_SPARK: &str = "4779";
    pub const NIGHTBLOOM: &str = "5AFA";

    // Role actions
    pub const LUCID_DREAMING: &str = "1D8A";
}

/// Status effect ids (uppercase hex), normalized before lookup.
pub mod effect {
    pub const WELL_FED: &str = "30";
    pub const PRESENCE_OF_MIND: &str = "9D";
    pub const MUDRA: &str = "1F0";
    pub const KASSATSU: &str = "1F1";

    // Damage-over-time effects tracked for tick attribution
    pub const DIA: &str = "74F";
    pub const AERO: &str = "8F";
    pub const AERO2: &str = "90";
    pub const BIO: &str = "B3";
    pub const BIO2: &str = "BD";
    pub const BIOLYSIS: &str = "767";
    pub const BLEEDING: &str = "6B2";
}

/// GP-restoring consumable (cordial) ability ids.
pub static CORDIAL_ABILITIES: phf::Set<&'static str> = phf::phf_set! {
    "20017FD", "20F5A3D", "20F844F", "200420F", "200317D",
};

/// Content types in which the food-buff warning applies.
pub static WELL_FED_CONTENT_TYPES: phf::Set<u32> = phf::phf_set! {
    2u32,  // dungeons
    4u32,  // trials
    5u32,  // raids
    28u32, // ultimate raids
};

pub const CONTENT_TYPE_PVP: u32 = 6;
pub const ZONE_ID_WOLVES_DEN_PIER: u32 = 250;

/// Ability chains: later entries are only valid following their
/// predecessor within the combo window. The last entry completes the
/// chain.
pub const COMBO_CHAINS: &[&[&str]] = &[
    &[ability::HARD_SLASH, ability::SYPHON_STRIKE, ability::SOULEATER],
    &[ability::SPINNING_EDGE, ability::GUST_SLASH, ability::AEOLIAN_EDGE],
    &[ability::SPINNING_EDGE, ability::GUST_SLASH, ability::ARMOR_CRUSH],
];

/// Seconds a combo stays valid without a qualifying follow-up.
pub const COMBO_WINDOW_SECS: f32 = 15.0;

// MP regeneration rates (fraction of max MP per tick).
pub const MP_COMBAT_RATE: f64 = 0.02;
pub const MP_NORMAL_RATE: f64 = 0.06;
pub const MP_UI1_RATE: f64 = 0.30;
pub const MP_UI2_RATE: f64 = 0.45;
pub const MP_UI3_RATE: f64 = 0.60;
pub const MP_TICK_INTERVAL: f32 = 3.0;

/// Speed-stat level modifiers, indexed by level: `[sub, div]`.
/// A zero entry means the level is outside the supported range.
#[rustfmt::skip]
pub const LEVEL_MOD: [[u32; 2]; 81] = [
    [0, 0],
    [56, 56], [57, 57], [60, 60], [62, 62], [65, 65],
    [68, 68], [70, 70], [73, 73], [76, 76], [78, 78],
    [82, 82], [85, 85], [89, 89], [93, 93], [96, 96],
    [100, 100], [104, 104], [109, 109], [113, 113], [116, 116],
    [122, 122], [127, 127], [133, 133], [138, 138], [144, 144],
    [150, 150], [155, 155], [161, 161], [166, 166], [171, 171],
    [177, 177], [183, 183], [189, 189], [196, 196], [202, 202],
    [209, 209], [215, 215], [222, 222], [228, 228], [236, 236],
    [244, 244], [252, 252], [260, 260], [268, 268], [276, 276],
    [284, 284], [292, 292], [300, 300], [310, 310], [341, 341],
    [342, 366], [344, 392], [345, 418], [346, 444], [347, 470],
    [349, 496], [350, 522], [351, 548], [352, 574], [354, 858],
    [355, 940], [356, 1032], [357, 1124], [358, 1216], [359, 1308],
    [360, 1400], [361, 1492], [362, 1584], [363, 1676], [364, 2170],
    [366, 2263], [368, 2360], [370, 2461], [372, 2566], [374, 2676],
    [376, 2790], [378, 2910], [379, 3034], [380, 3164], [380, 3300],
];

/// Look up the speed modifier pair for a level.
pub fn level_mod(level: u8) -> Option<[u32; 2]> {
    LEVEL_MOD
        .get(level as usize)
        .copied()
        .filter(|m| m[1] != 0)
}

/// Greased-lightning stack count granted passively by level.
pub fn lightning_stacks_by_level(level: u8) -> u32 {
    match level {
        0..20 => 1,
        20..40 => 2,
        40..76 => 3,
        _ => 4,
    }
}
