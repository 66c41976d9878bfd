//! Character roster loader.
//!
//! Roster files are a JSON array of character records. Ids are assigned from
//! array position and roster HP is computed from the balance table, so the
//! file itself never carries combat numbers.

use std::path::Path;

use arena_core::{ArmorClass, Character, CharacterId, CombatConfig, Roster, Skills};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Embedded default roster.
const BUILTIN_ROSTER_JSON: &str = include_str!("../../data/saints.json");

/// One entry of a roster file.
#[derive(Clone, Debug, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    #[serde(default)]
    pub constellation: String,
    pub armor_type: String,
    #[serde(default)]
    pub rank: String,
    pub skills: SkillsRecord,
}

/// Skill names of a roster entry.
#[derive(Clone, Debug, Deserialize)]
pub struct SkillsRecord {
    pub main: String,
    pub special: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl CharacterRecord {
    /// Builds the roster character at position `index`.
    pub fn into_character(self, index: u32, config: &CombatConfig) -> Character {
        let armor: ArmorClass = self.armor_type.into();
        let hp = config.roster_hp(&armor);

        let mut skills = Skills::new(self.skills.main, self.skills.special);
        skills.image = self.skills.image.filter(|image| !image.trim().is_empty());

        Character::new(CharacterId(index), self.name, armor, skills, hp)
            .with_constellation(self.constellation)
            .with_rank(self.rank)
    }
}

/// Loader for character rosters from JSON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file
    /// * `config` - Balance table used to compute roster HP
    pub fn load(path: &Path, config: &CombatConfig) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::from_json(&content, config)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse a roster from JSON text.
    pub fn from_json(content: &str, config: &CombatConfig) -> LoadResult<Roster> {
        let records: Vec<CharacterRecord> = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster JSON: {}", e))?;

        if records.len() < 2 {
            anyhow::bail!(
                "Roster needs at least two characters, found {}",
                records.len()
            );
        }

        let characters = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let index = u32::try_from(index)
                    .map_err(|_| anyhow::anyhow!("Roster is too large"))?;
                Ok(record.into_character(index, config))
            })
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(Roster::new(characters))
    }

    /// The roster shipped with the crate.
    pub fn builtin(config: &CombatConfig) -> LoadResult<Roster> {
        Self::from_json(BUILTIN_ROSTER_JSON, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SAINTS: &str = r#"[
        {
            "name": "Aiolia",
            "constellation": "Leo",
            "armor_type": "Gold",
            "rank": "Gold Saint",
            "skills": { "main": "Lightning Bolt", "special": "Lightning Plasma", "image": "leo.png" }
        },
        {
            "name": "Shun",
            "constellation": "Andromeda",
            "armor_type": "Bronze",
            "rank": "Bronze Saint",
            "skills": { "main": "Nebula Chain", "special": "Nebula Storm" }
        }
    ]"#;

    #[test]
    fn computes_roster_hp_from_armor() {
        let roster = RosterLoader::from_json(TWO_SAINTS, &CombatConfig::default()).unwrap();

        let aiolia = roster.get(CharacterId(0)).unwrap();
        assert_eq!(aiolia.armor, ArmorClass::Gold);
        assert_eq!(aiolia.hp, 220);
        assert_eq!(aiolia.constellation, "Leo");

        let shun = roster.get(CharacterId(1)).unwrap();
        assert_eq!(shun.hp, 200);
        assert_eq!(shun.rank, "Bronze Saint");
    }

    #[test]
    fn tolerates_missing_image() {
        let roster = RosterLoader::from_json(TWO_SAINTS, &CombatConfig::default()).unwrap();

        assert_eq!(
            roster.get(CharacterId(0)).unwrap().skills.image.as_deref(),
            Some("leo.png")
        );
        assert!(roster.get(CharacterId(1)).unwrap().skills.image.is_none());
    }

    #[test]
    fn hp_follows_balance_table() {
        let config = CombatConfig {
            hp_base: 150,
            hp_gold_bonus: 50,
            ..CombatConfig::default()
        };
        let roster = RosterLoader::from_json(TWO_SAINTS, &config).unwrap();

        let hp: Vec<i32> = roster.iter().map(|c| c.hp).collect();
        assert_eq!(hp, vec![200, 150]);
    }

    #[test]
    fn rejects_single_character_roster() {
        let json = r#"[{ "name": "Seiya", "armor_type": "Bronze",
                         "skills": { "main": "a", "special": "b" } }]"#;
        assert!(RosterLoader::from_json(json, &CombatConfig::default()).is_err());
    }

    #[test]
    fn builtin_roster_parses() {
        let roster = RosterLoader::builtin(&CombatConfig::default()).unwrap();

        assert!(roster.len() >= 2);
        assert!(roster.iter().any(|c| c.armor.is_gold() && c.hp == 220));
        assert!(roster.find_by_name("seiya").is_some());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saints.json");
        std::fs::write(&path, TWO_SAINTS).unwrap();

        let roster = RosterLoader::load(&path, &CombatConfig::default()).unwrap();

        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = RosterLoader::load(&path, &CombatConfig::default()).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
