//! Spreadsheet source
//!
//! Reads the card sheet's CSV export. After the header rows, each record is a
//! card with columns in this fixed order:
//!
//! | # | column     | required |
//! |---|------------|----------|
//! | 0 | name       | yes      |
//! | 1 | effects    | no       |
//! | 2 | mana cost  | yes      |
//! | 3 | rarity     | yes      |
//! | 4 | nation     | yes      |
//! | 5 | type       | yes      |
//! | 6 | damage     | no       |
//! | 7 | health     | no       |
//! | 8 | image URL  | no       |
//! | 9 | deck limit | no       |

use crate::core::{CardInput, CardSeed};
use crate::loader::csv::{is_blank_record, parse_csv};
use crate::loader::effect_text::parse_effect_cell;
use crate::loader::kinds::EffectKindTable;
use crate::loader::normalize::{parse_label, parse_optional_int, parse_required_int};
use crate::loader::SeedBatch;
use crate::logger::SeedLogger;
use crate::{Result, SeedError};
use std::path::{Path, PathBuf};

/// Title and column-name rows at the top of an exported sheet
pub const DEFAULT_HEADER_ROWS: usize = 2;

const NAME: usize = 0;
const EFFECTS: usize = 1;
const MANA_COST: usize = 2;
const RARITY: usize = 3;
const NATION: usize = 4;
const CARD_TYPE: usize = 5;
const DAMAGE: usize = 6;
const HEALTH: usize = 7;
const IMG_URL: usize = 8;
const DECK_LIMIT: usize = 9;

/// One data record of the sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    /// 1-based record number in the file, header rows included
    pub number: usize,
    pub cells: Vec<String>,
}

impl SheetRow {
    pub fn new(number: usize, cells: Vec<String>) -> Self {
        SheetRow { number, cells }
    }

    /// Cell text; missing trailing cells read as empty
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// Convert into a card seed
    ///
    /// Any malformed card column rejects the whole row. Bad effect lines are
    /// logged and dropped without rejecting the row.
    pub fn to_seed(&self, table: &EffectKindTable, logger: &SeedLogger) -> Result<CardSeed> {
        let name = self.cell(NAME).trim();
        if name.is_empty() {
            return Err(SeedError::malformed("name", "", "card name is empty"));
        }

        let mut card = CardInput::new(
            name,
            parse_label("nation", self.cell(NATION))?,
            parse_label("rarity", self.cell(RARITY))?,
            parse_label("card_type", self.cell(CARD_TYPE))?,
            parse_required_int("mana_cost", self.cell(MANA_COST))?,
        );
        card.damage = parse_optional_int("damage", self.cell(DAMAGE))?;
        card.health = parse_optional_int("health", self.cell(HEALTH))?;
        card.deck_limit = parse_optional_int("deck_limit", self.cell(DECK_LIMIT))?;

        let img_url = self.cell(IMG_URL).trim();
        if !img_url.is_empty() {
            card = card.with_img_url(img_url);
        }

        let effects = parse_effect_cell(self.cell(EFFECTS), table, logger, name);
        Ok(CardSeed::new(card, effects))
    }
}

/// Loads card seeds from CSV sheet exports
#[derive(Debug, Clone)]
pub struct SheetLoader {
    table: EffectKindTable,
    header_rows: usize,
}

impl SheetLoader {
    pub fn new(table: EffectKindTable) -> Self {
        SheetLoader {
            table,
            header_rows: DEFAULT_HEADER_ROWS,
        }
    }

    pub fn with_header_rows(mut self, header_rows: usize) -> Self {
        self.header_rows = header_rows;
        self
    }

    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    /// Data rows of a sheet, skipping headers and blank records
    pub fn rows(&self, content: &str) -> Result<Vec<SheetRow>> {
        let rows = parse_csv(content)?
            .into_iter()
            .enumerate()
            .skip(self.header_rows)
            .filter(|(_, cells)| !is_blank_record(cells))
            .map(|(index, cells)| SheetRow::new(index + 1, cells))
            .collect();
        Ok(rows)
    }

    /// Convert sheet text into a batch; bad rows are logged and counted
    pub fn parse(&self, content: &str, source: &str, logger: &SeedLogger) -> Result<SeedBatch> {
        let mut batch = SeedBatch::default();

        for row in self.rows(content)? {
            match row.to_seed(&self.table, logger) {
                Ok(seed) => batch.seeds.push(seed),
                Err(error) => {
                    logger.warn(
                        "sheet",
                        &format!("{source} row {}: rejected: {error}", row.number),
                    );
                    batch.rejected_rows += 1;
                }
            }
        }

        logger.normal(
            "sheet",
            &format!(
                "{source}: {} cards read, {} rows rejected",
                batch.seeds.len(),
                batch.rejected_rows
            ),
        );
        Ok(batch)
    }

    /// Load one CSV file
    pub async fn load_file(&self, path: &Path, logger: &SeedLogger) -> Result<SeedBatch> {
        let content = tokio::fs::read_to_string(path).await?;
        self.parse(&content, &path.display().to_string(), logger)
    }

    /// Load a CSV file, or every `.csv` file under a directory in path order
    pub async fn load_path(&self, path: &Path, logger: &SeedLogger) -> Result<SeedBatch> {
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_dir() {
            return self.load_file(path, logger).await;
        }

        let sheets = discover_sheets(path).await?;
        if sheets.is_empty() {
            logger.warn(
                "sheet",
                &format!("No .csv files found under {}", path.display()),
            );
        }

        let mut batch = SeedBatch::default();
        for sheet in sheets {
            batch.extend(self.load_file(&sheet, logger).await?);
        }
        Ok(batch)
    }
}

/// Find every `.csv` file under `dir`, sorted by path
pub async fn discover_sheets(dir: &Path) -> Result<Vec<PathBuf>> {
    let dir = dir.to_path_buf();

    // jwalk walks on its own thread pool
    let walked = tokio::task::spawn_blocking(move || -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        for entry in jwalk::WalkDir::new(&dir).sort(true) {
            let entry = entry.map_err(|e| walk_error(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            {
                found.push(path);
            }
        }
        Ok(found)
    })
    .await
    .map_err(|e| walk_error(e.to_string()))?;

    let mut sheets = walked?;
    sheets.sort();
    Ok(sheets)
}

fn walk_error(message: String) -> SeedError {
    SeedError::IoError(std::io::Error::new(std::io::ErrorKind::Other, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardType, EffectInput, EffectKind, Nation, Rarity};

    const SHEET: &str = "\
Dusane,,,,,,,,,
Name,Effect,Mana Cost,Rarity,Nation,Type,Damage,Health,URL,Deck Limit
Warg Rider,\"Poison, 2\",5,EPIC,Ironmark,Minion,7,5,https://img/warg.png,2
Blizzard,\"Damage, 4, Minion, Spell
Damage, 2, Hero, Spell\",4,common,Dusane,Spell,,,,
,,,,,,,,,
Broken,,,rare,Dusane,Minion,,,,
";

    #[test]
    fn test_row_to_seed() {
        let logger = SeedLogger::capturing();
        let row = SheetRow::new(
            3,
            ["Warg Rider", "Poison, 2", "5", "epic", "ironmark", "minion", "7", "5"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );

        let seed = row.to_seed(&EffectKindTable::default(), &logger).unwrap();
        assert_eq!(seed.card.name, "Warg Rider");
        assert_eq!(seed.card.rarity, Rarity::Epic);
        assert_eq!(seed.card.nation, Nation::Ironmark);
        assert_eq!(seed.card.card_type, CardType::Minion);
        assert_eq!(seed.card.mana_cost, 5);
        assert_eq!(seed.card.damage, Some(7));
        assert_eq!(seed.card.health, Some(5));
        assert_eq!(seed.card.img_url, None);
        assert_eq!(seed.card.deck_limit, None);
        assert_eq!(
            seed.effects,
            vec![EffectInput::with_amount(EffectKind::Poison, 2)]
        );
    }

    #[test]
    fn test_parse_sheet() {
        let logger = SeedLogger::capturing();
        let loader = SheetLoader::new(EffectKindTable::default());
        let batch = loader.parse(SHEET, "dusane.csv", &logger).unwrap();

        assert_eq!(batch.seeds.len(), 2);
        assert_eq!(batch.rejected_rows, 1);
        assert_eq!(
            batch.seeds[0].card.img_url.as_deref(),
            Some("https://img/warg.png")
        );
        assert_eq!(batch.seeds[0].card.deck_limit, Some(2));
        assert_eq!(batch.seeds[1].effects.len(), 2);
        assert_eq!(batch.seeds[1].card.health, None);

        let warnings = logger.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("row 6"));
        assert!(warnings[0].message.contains("mana_cost"));
    }

    #[test]
    fn test_header_rows_configurable() {
        let loader = SheetLoader::new(EffectKindTable::default()).with_header_rows(0);
        let rows = loader.rows("a,b\nc,d\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[1].cell(5), "");
    }

    #[tokio::test]
    async fn test_load_directory() {
        let dir = std::env::temp_dir().join(format!("card-seeder-sheets-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(dir.join("nested")).await.unwrap();
        tokio::fs::write(dir.join("a.csv"), SHEET).await.unwrap();
        tokio::fs::write(
            dir.join("nested").join("b.CSV"),
            "t\nh\nShieldwall,\"Armor, 2\",2,Common,Dusane,Spell,,,,\n",
        )
        .await
        .unwrap();
        tokio::fs::write(dir.join("notes.txt"), "ignored").await.unwrap();

        let found = discover_sheets(&dir).await.unwrap();
        assert_eq!(found.len(), 2);

        let logger = SeedLogger::capturing();
        let loader = SheetLoader::new(EffectKindTable::default());
        let batch = loader.load_path(&dir, &logger).await.unwrap();
        assert_eq!(batch.seeds.len(), 3);
        assert_eq!(batch.rejected_rows, 1);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let logger = SeedLogger::capturing();
        let loader = SheetLoader::new(EffectKindTable::default());
        let result = loader
            .load_path(Path::new("/nonexistent/cards.csv"), &logger)
            .await;
        assert!(matches!(result, Err(SeedError::IoError(_))));
    }
}
