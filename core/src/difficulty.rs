use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::*;

/// Named board configuration.
///
/// Always satisfies `0 < mine_count < width * height`, which is checked once at construction (or deserialization) so
/// the rest of the engine never has to re-validate it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DifficultyConfig")]
pub struct Difficulty {
    name: Cow<'static, str>,
    width: Coord,
    height: Coord,
    mine_count: CellCount,
}

/// Unvalidated shape of a difficulty as it appears in configuration files.
#[derive(Clone, Debug, Deserialize)]
struct DifficultyConfig {
    name: String,
    width: Coord,
    height: Coord,
    mine_count: CellCount,
}

impl TryFrom<DifficultyConfig> for Difficulty {
    type Error = GameError;

    fn try_from(config: DifficultyConfig) -> Result<Self> {
        Self::new(config.name, config.width, config.height, config.mine_count)
    }
}

impl Difficulty {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        width: Coord,
        height: Coord,
        mine_count: CellCount,
    ) -> Result<Self> {
        let name = name.into();
        if width == 0 || height == 0 || mine_count == 0 || mine_count >= mult(width, height) {
            return Err(GameError::InvalidDifficulty {
                name: name.into_owned(),
                width,
                height,
                mines: mine_count,
            });
        }
        Ok(Self {
            name,
            width,
            height,
            mine_count,
        })
    }

    pub const fn beginner() -> Self {
        Self {
            name: Cow::Borrowed("Beginner"),
            width: 9,
            height: 9,
            mine_count: 10,
        }
    }

    pub const fn intermediate() -> Self {
        Self {
            name: Cow::Borrowed("Intermediate"),
            width: 16,
            height: 16,
            mine_count: 40,
        }
    }

    pub const fn expert() -> Self {
        Self {
            name: Cow::Borrowed("Expert"),
            width: 30,
            height: 16,
            mine_count: 99,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    /// `(width, height)`
    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }
}

/// Ordered list of difficulties offered by the menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DifficultySet(Vec<Difficulty>);

impl DifficultySet {
    pub fn new(difficulties: Vec<Difficulty>) -> Self {
        Self(difficulties)
    }

    pub fn presets() -> Self {
        Self(vec![
            Difficulty::beginner(),
            Difficulty::intermediate(),
            Difficulty::expert(),
        ])
    }

    /// Loads a JSON array of `{"name", "width", "height", "mine_count"}` objects, validating every entry.
    pub fn from_json(source: &str) -> Result<Self> {
        let set: Self =
            serde_json::from_str(source).map_err(|err| GameError::MalformedConfig(err.to_string()))?;
        log::debug!("Loaded {} difficulties", set.len());
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Difficulty> {
        self.0.get(index)
    }

    pub fn push(&mut self, difficulty: Difficulty) {
        self.0.push(difficulty);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Difficulty> {
        self.0.iter()
    }
}

impl Default for DifficultySet {
    fn default() -> Self {
        Self::presets()
    }
}

impl From<Vec<Difficulty>> for DifficultySet {
    fn from(difficulties: Vec<Difficulty>) -> Self {
        Self(difficulties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for preset in DifficultySet::presets().iter() {
            let rebuilt = Difficulty::new(
                preset.name().to_owned(),
                preset.width(),
                preset.height(),
                preset.mine_count(),
            );
            assert_eq!(rebuilt.as_ref(), Ok(preset));
        }
    }

    #[test]
    fn rejects_zero_sized_boards() {
        assert!(Difficulty::new("Flat", 0, 5, 1).is_err());
        assert!(Difficulty::new("Flat", 5, 0, 1).is_err());
    }

    #[test]
    fn rejects_mine_counts_outside_open_range() {
        assert!(Difficulty::new("Empty", 3, 3, 0).is_err());
        assert!(Difficulty::new("Full", 3, 3, 9).is_err());
        assert!(Difficulty::new("Almost", 3, 3, 8).is_ok());
    }

    #[test]
    fn error_keeps_offending_values() {
        let err = Difficulty::new("Full", 2, 2, 4).unwrap_err();

        assert_eq!(
            err,
            GameError::InvalidDifficulty {
                name: "Full".to_owned(),
                width: 2,
                height: 2,
                mines: 4,
            }
        );
    }

    #[test]
    fn safe_cells_excludes_mines() {
        let expert = Difficulty::expert();

        assert_eq!(expert.total_cells(), 480);
        assert_eq!(expert.safe_cells(), 381);
    }

    #[test]
    fn loads_json_list() {
        let set = DifficultySet::from_json(
            r#"[
                {"name": "Tiny", "width": 4, "height": 3, "mine_count": 2},
                {"name": "Wide", "width": 40, "height": 10, "mine_count": 60}
            ]"#,
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).unwrap().size(), (4, 3));
        assert_eq!(set.get(1).unwrap().name(), "Wide");
    }

    #[test]
    fn json_loader_rejects_invalid_entry() {
        let result = DifficultySet::from_json(
            r#"[{"name": "Broken", "width": 2, "height": 2, "mine_count": 4}]"#,
        );

        assert!(matches!(result, Err(GameError::MalformedConfig(_))));
    }

    #[test]
    fn serializes_back_to_config_shape() {
        let json = serde_json::to_value(Difficulty::beginner()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"name": "Beginner", "width": 9, "height": 9, "mine_count": 10})
        );
    }
}
