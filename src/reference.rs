use std::{collections::HashMap, fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::{
    error::{FsError, FsResult},
    reference::{
        index::{INDEX_REQUIRED_COLUMNS, IndexRecord, IndexRow, Market},
        stock::{STOCK_REQUIRED_COLUMNS, StockRecord, StockRow},
    },
    utils::text::normalize_key,
};

pub mod index;
pub mod stock;

pub const STOCKS_FILE: &str = "stocks.csv";
pub const INDICES_FILE: &str = "indices.csv";

static BUNDLED_STOCKS: &str = include_str!("../data/stocks.csv");
static BUNDLED_INDICES: &str = include_str!("../data/indices.csv");

/// Stock and index listings, immutable once loaded. Records keep dataset file order.
#[derive(Debug)]
pub struct ReferenceData {
    stocks: Vec<StockRecord>,
    stock_positions: HashMap<String, usize>,
    indices: Vec<IndexRecord>,
    index_positions: HashMap<String, usize>,
}

impl ReferenceData {
    /// Loads `stocks.csv` and `indices.csv` from `data_dir`, or the bundled copies when `None`.
    pub fn load(data_dir: Option<&Path>) -> FsResult<Self> {
        match data_dir {
            Some(dir) => {
                let stocks_path = dir.join(STOCKS_FILE);
                let indices_path = dir.join(INDICES_FILE);
                debug!("Loading reference data from '{}'", dir.display());

                Self::parse(
                    open_file(&stocks_path)?,
                    &stocks_path.display().to_string(),
                    open_file(&indices_path)?,
                    &indices_path.display().to_string(),
                )
            }
            None => Self::bundled(),
        }
    }

    pub fn bundled() -> FsResult<Self> {
        Self::parse(
            BUNDLED_STOCKS.as_bytes(),
            STOCKS_FILE,
            BUNDLED_INDICES.as_bytes(),
            INDICES_FILE,
        )
    }

    pub fn from_readers<S: Read, I: Read>(stocks: S, indices: I) -> FsResult<Self> {
        Self::parse(stocks, STOCKS_FILE, indices, INDICES_FILE)
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.stock_positions.contains_key(&normalize_key(symbol))
    }

    pub fn contains_index(&self, name: &str) -> bool {
        self.index_positions.contains_key(&normalize_key(name))
    }

    pub fn stock(&self, symbol: &str) -> Option<&StockRecord> {
        self.stock_positions
            .get(&normalize_key(symbol))
            .map(|&i| &self.stocks[i])
    }

    pub fn index(&self, name: &str) -> Option<&IndexRecord> {
        self.index_positions
            .get(&normalize_key(name))
            .map(|&i| &self.indices[i])
    }

    pub fn stocks(&self) -> &[StockRecord] {
        &self.stocks
    }

    pub fn indices(&self) -> &[IndexRecord] {
        &self.indices
    }

    pub fn indices_in(&self, market: Market) -> impl Iterator<Item = &IndexRecord> {
        self.indices.iter().filter(move |index| index.market == market)
    }

    fn parse<S: Read, I: Read>(
        stocks: S,
        stocks_origin: &str,
        indices: I,
        indices_origin: &str,
    ) -> FsResult<Self> {
        let stocks = read_records::<StockRecord, StockRow, _>(
            stocks,
            stocks_origin,
            STOCK_REQUIRED_COLUMNS,
        )?;
        let (stocks, stock_positions) =
            dedup_by_key(stocks, stocks_origin, |stock| stock.symbol.clone());

        let indices = read_records::<IndexRecord, IndexRow, _>(
            indices,
            indices_origin,
            INDEX_REQUIRED_COLUMNS,
        )?;
        let (indices, index_positions) =
            dedup_by_key(indices, indices_origin, |index| normalize_key(&index.name));

        debug!(
            "Loaded {} stocks and {} indices",
            stocks.len(),
            indices.len()
        );

        Ok(Self {
            stocks,
            stock_positions,
            indices,
            index_positions,
        })
    }
}

fn open_file(path: &Path) -> FsResult<File> {
    File::open(path).map_err(|err| FsError::DataLoadError {
        origin: path.display().to_string(),
        message: err.to_string(),
    })
}

fn read_records<T, Row, R>(
    reader: R,
    origin: &str,
    required_columns: &[&[&str]],
) -> FsResult<Vec<T>>
where
    T: TryFrom<Row, Error = FsError>,
    Row: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|err| FsError::DataLoadError {
            origin: origin.to_string(),
            message: err.to_string(),
        })?
        .clone();
    for aliases in required_columns {
        if !headers.iter().any(|header| aliases.contains(&header)) {
            return Err(FsError::DataLoadError {
                origin: origin.to_string(),
                message: format!("Missing required column '{}'", aliases.join("' or '")),
            });
        }
    }

    let mut records: Vec<T> = vec![];
    for (i, row) in csv_reader.deserialize::<Row>().enumerate() {
        match row.map_err(FsError::from).and_then(T::try_from) {
            Ok(record) => records.push(record),
            Err(err) => warn!("[{origin}] Skip malformed row {}: {err}", i + 1),
        }
    }

    if records.is_empty() {
        return Err(FsError::DataLoadError {
            origin: origin.to_string(),
            message: "No valid rows".to_string(),
        });
    }

    Ok(records)
}

fn dedup_by_key<T>(
    records: Vec<T>,
    origin: &str,
    key: impl Fn(&T) -> String,
) -> (Vec<T>, HashMap<String, usize>) {
    let mut kept: Vec<T> = Vec::with_capacity(records.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let k = key(&record);
        if positions.contains_key(&k) {
            warn!("[{origin}] Skip duplicated key '{k}'");
            continue;
        }

        positions.insert(k, kept.len());
        kept.push(record);
    }

    (kept, positions)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const INDICES: &str = "Index,Exchange,Description\nNIFTY 50,India,Top 50\nS&P 500,US,Top 500\n";

    #[test]
    fn test_bundled() {
        let data = ReferenceData::bundled().unwrap();

        assert!(data.contains_symbol("AAPL"));
        assert!(data.contains_symbol("reliance"));
        assert!(!data.contains_symbol("NOTASYMBOL"));
        assert!(data.contains_index("NIFTY 50"));
        assert!(data.contains_index("s&p 500"));

        let apple = data.stock("aapl").unwrap();
        assert_eq!(apple.symbol, "AAPL");
        assert_eq!(apple.company, "Apple Inc");
        assert_eq!(apple.face_value, None);

        let reliance = data.stock("RELIANCE").unwrap();
        assert_eq!(reliance.face_value, Some(10.0));
        assert_eq!(reliance.snapshot.curr_market_price, Some(2884.55));
    }

    #[test]
    fn test_bundled_markets_partition_indices() {
        let data = ReferenceData::bundled().unwrap();

        let india: Vec<_> = data.indices_in(Market::India).map(|i| &i.name).collect();
        let us: Vec<_> = data.indices_in(Market::Us).map(|i| &i.name).collect();

        assert!(!india.is_empty());
        assert!(!us.is_empty());
        assert!(india.iter().all(|name| !us.contains(name)));
        assert_eq!(india.len() + us.len(), data.indices().len());
        assert_eq!(data.indices()[0].name, "NIFTY 50");
    }

    #[test]
    fn test_skip_malformed_rows() {
        let stocks = "symbol,name,market_cap,face_value\n\
                      AAA,Alpha Ltd,100,1\n\
                      BBB,Beta Ltd,not-a-number,1\n\
                      CCC,Gamma Ltd\n\
                      ,Nameless Ltd,10,1\n\
                      ddd,Delta Ltd,,\n";
        let indices = "Index,Exchange,Description\n\
                       NIFTY 50,India,Top 50\n\
                       MOON 10,Moon,Lunar stocks\n";

        let data = ReferenceData::from_readers(stocks.as_bytes(), indices.as_bytes()).unwrap();

        let symbols: Vec<_> = data.stocks().iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, ["AAA", "DDD"]);
        assert_eq!(data.stock("ddd").unwrap().snapshot.market_cap_crores, None);
        assert_eq!(data.indices().len(), 1);
    }

    #[test]
    fn test_duplicated_keys_keep_first() {
        let stocks = "symbol,name\nAAA,First\naaa,Second\n";
        let indices = "Index,Exchange,Description\nNIFTY 50,India,First\nnifty 50,India,Second\n";

        let data = ReferenceData::from_readers(stocks.as_bytes(), indices.as_bytes()).unwrap();

        assert_eq!(data.stocks().len(), 1);
        assert_eq!(data.stock("AAA").unwrap().company, "First");
        assert_eq!(data.indices().len(), 1);
        assert_eq!(data.index("NIFTY 50").unwrap().description, "First");
    }

    #[test]
    fn test_missing_column() {
        let stocks = "ticker,name\nAAA,Alpha Ltd\n";

        let err = ReferenceData::from_readers(stocks.as_bytes(), INDICES.as_bytes()).unwrap_err();
        assert!(matches!(err, FsError::DataLoadError { .. }));
        assert!(err.to_string().contains("symbol"));
    }

    #[test]
    fn test_market_column_alias() {
        let stocks = "symbol,name\nAAA,Alpha Ltd\n";
        let indices = "Index,Market,Description\nNIFTY 50,India,Top 50\nS&P 500,USA,Top 500\n";

        let data = ReferenceData::from_readers(stocks.as_bytes(), indices.as_bytes()).unwrap();
        assert_eq!(data.index("nifty 50").unwrap().market, Market::India);
        assert_eq!(data.index("S&P 500").unwrap().market, Market::Us);

        let indices = "Index,Region,Description\nNIFTY 50,India,Top 50\n";
        let err = ReferenceData::from_readers(stocks.as_bytes(), indices.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'Exchange' or 'Market'"));
    }

    #[test]
    fn test_no_valid_rows() {
        let stocks = "symbol,name\n";

        let err = ReferenceData::from_readers(stocks.as_bytes(), INDICES.as_bytes()).unwrap_err();
        assert!(matches!(err, FsError::DataLoadError { .. }));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = std::env::temp_dir().join(format!("finsolve-reference-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(STOCKS_FILE), "symbol,name\nAAA,Alpha Ltd\n").unwrap();
        fs::write(dir.join(INDICES_FILE), INDICES).unwrap();

        let data = ReferenceData::load(Some(&dir)).unwrap();
        assert!(data.contains_symbol("aaa"));
        assert!(data.contains_index("S&P 500"));

        fs::remove_file(dir.join(INDICES_FILE)).unwrap();
        let err = ReferenceData::load(Some(&dir)).unwrap_err();
        assert!(matches!(err, FsError::DataLoadError { .. }));

        let _ = fs::remove_dir_all(&dir);
    }
}
