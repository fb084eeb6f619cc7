use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::{FsError, FsResult},
    utils::text::normalize_key,
};

/// Each entry lists the accepted spellings of one required column.
pub const INDEX_REQUIRED_COLUMNS: &[&[&str]] =
    &[&["Index"], &["Exchange", "Market"], &["Description"]];

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Market {
    India,

    #[strum(to_string = "US", serialize = "USA")]
    #[serde(rename = "US")]
    Us,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IndexRecord {
    pub name: String,
    pub market: Market,
    pub description: String,
}

#[derive(Deserialize)]
pub struct IndexRow {
    #[serde(rename = "Index")]
    name: String,

    #[serde(rename = "Exchange", alias = "Market")]
    market: String,

    #[serde(rename = "Description")]
    description: String,
}

impl TryFrom<IndexRow> for IndexRecord {
    type Error = FsError;

    fn try_from(row: IndexRow) -> FsResult<Self> {
        let name = row.name.trim().to_string();
        if normalize_key(&name).is_empty() {
            return Err(FsError::Invalid {
                code: "EMPTY_INDEX",
                message: "Index row has an empty name".to_string(),
            });
        }

        Ok(Self {
            market: Market::from_str(row.market.trim())?,
            name,
            description: row.description,
        })
    }
}
