//! The six ship sections and the static per-section configuration table.
//!
//! Section identity is fixed, so per-section data lives in a [`SectionMap`]
//! (a six-slot array indexed by [`Section`]) rather than an open map. Name
//! lookups only happen at the edges, when external data is parsed.

use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Section {
    Bridge = 0,
    Engineering = 1,
    Drives = 2,
    MedLab = 3,
    SciLab = 4,
    Defense = 5,
}

impl Section {
    pub const COUNT: usize = 6;

    pub const ALL: [Section; Section::COUNT] = [
        Section::Bridge,
        Section::Engineering,
        Section::Drives,
        Section::MedLab,
        Section::SciLab,
        Section::Defense,
    ];

    pub fn all() -> &'static [Section] {
        &Self::ALL
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bridge => "Bridge",
            Self::Engineering => "Engineering",
            Self::Drives => "Drives",
            Self::MedLab => "MedLab",
            Self::SciLab => "SciLab",
            Self::Defense => "Defense",
        }
    }

    /// Whether the section can feed life support at all. Drives never does.
    pub fn provides_life_support(self) -> bool {
        !matches!(self, Self::Drives)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown section name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSectionError(pub String);

impl std::fmt::Display for ParseSectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown ship section: {:?}", self.0)
    }
}

impl std::error::Error for ParseSectionError {}

impl FromStr for Section {
    type Err = ParseSectionError;

    /// Case-insensitive; ignores `_`, `-` and spaces ("med_lab" == "MedLab").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        Section::ALL
            .iter()
            .copied()
            .find(|sec| sec.name().to_lowercase() == key)
            .ok_or_else(|| ParseSectionError(s.to_string()))
    }
}

// ============================================================================
// SECTION MAP
// ============================================================================

/// One value per section. Serialized as a map keyed by section name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionMap<T>([T; Section::COUNT]);

impl<T> SectionMap<T> {
    pub fn from_fn(mut f: impl FnMut(Section) -> T) -> Self {
        Self(Section::ALL.map(&mut f))
    }

    pub fn get(&self, section: Section) -> &T {
        &self.0[section.index()]
    }

    pub fn get_mut(&mut self, section: Section) -> &mut T {
        &mut self.0[section.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, &T)> {
        Section::ALL.iter().copied().zip(self.0.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T: Clone> SectionMap<T> {
    pub fn filled(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<T> Index<Section> for SectionMap<T> {
    type Output = T;

    fn index(&self, section: Section) -> &T {
        self.get(section)
    }
}

impl<T> IndexMut<Section> for SectionMap<T> {
    fn index_mut(&mut self, section: Section) -> &mut T {
        self.get_mut(section)
    }
}

impl<T: Serialize> Serialize for SectionMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Section::COUNT))?;
        for (section, value) in self.iter() {
            map.serialize_entry(&section, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for SectionMap<T> {
    /// Every section must be present; use [`crate::ship::ShipRecord`] for
    /// lenient, name-keyed input.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries = std::collections::HashMap::<Section, T>::deserialize(deserializer)?;
        let mut take = |section: Section| {
            entries
                .remove(&section)
                .ok_or_else(|| D::Error::custom(format!("missing section {}", section)))
        };
        Ok(Self([
            take(Section::Bridge)?,
            take(Section::Engineering)?,
            take(Section::Drives)?,
            take(Section::MedLab)?,
            take(Section::SciLab)?,
            take(Section::Defense)?,
        ]))
    }
}

// ============================================================================
// CONFIGURATION TABLE
// ============================================================================

/// Static rules for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Total power dice needed for the section to count as fully powered.
    pub power_required: u32,
    /// Life support points granted while fully powered.
    pub life_support: u32,
}

/// Configuration file entry: `{ "section": "Bridge", "power_required": 3, "life_support": 3 }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct SectionConfigEntry {
    section: Section,
    power_required: u32,
    life_support: u32,
}

/// Error loading a section configuration table.
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    DuplicateSection(Section),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "Section config parse error: {}", e),
            ConfigError::DuplicateSection(s) => {
                write!(f, "Section {} configured more than once", s)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            ConfigError::DuplicateSection(_) => None,
        }
    }
}

/// Read-only power and life support rules for all six sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfigTable {
    entries: SectionMap<SectionConfig>,
}

impl Default for SectionConfigTable {
    fn default() -> Self {
        Self::from_fn(|section| match section {
            Section::Bridge => SectionConfig {
                power_required: 3,
                life_support: 3,
            },
            Section::Engineering => SectionConfig {
                power_required: 4,
                life_support: 4,
            },
            Section::Drives => SectionConfig {
                power_required: 3,
                life_support: 0,
            },
            Section::MedLab => SectionConfig {
                power_required: 4,
                life_support: 4,
            },
            Section::SciLab => SectionConfig {
                power_required: 2,
                life_support: 2,
            },
            Section::Defense => SectionConfig {
                power_required: 1,
                life_support: 1,
            },
        })
    }
}

impl SectionConfigTable {
    pub fn from_fn(f: impl FnMut(Section) -> SectionConfig) -> Self {
        Self {
            entries: SectionMap::from_fn(f),
        }
    }

    /// Parse the JSON entry list. Sections absent from the file get a zero
    /// entry, which can never be fully powered.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let list: Vec<SectionConfigEntry> = serde_json::from_str(json)?;
        let mut seen = SectionMap::filled(false);
        let mut entries = SectionMap::<SectionConfig>::default();

        for entry in list {
            if std::mem::replace(&mut seen[entry.section], true) {
                return Err(ConfigError::DuplicateSection(entry.section));
            }
            entries[entry.section] = SectionConfig {
                power_required: entry.power_required,
                life_support: entry.life_support,
            };
        }

        for (section, present) in seen.iter() {
            if !present {
                log::warn!("section config has no entry for {}, defaulting to zero", section);
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, section: Section) -> &SectionConfig {
        &self.entries[section]
    }

    pub fn power_required(&self, section: Section) -> u32 {
        self.get(section).power_required
    }

    pub fn life_support(&self, section: Section) -> u32 {
        self.get(section).life_support
    }

    /// Life support when every section is fully powered.
    pub fn max_life_support(&self) -> u32 {
        Section::ALL
            .iter()
            .filter(|s| s.provides_life_support())
            .map(|&s| self.life_support(s))
            .sum()
    }
}
