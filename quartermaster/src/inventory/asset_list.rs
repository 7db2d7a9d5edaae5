use crate::config::QuartermasterConfig;
use crate::errors::{ErrorKind, QuartermasterError, QuartermasterResult};
use crate::filter::{FilterSequence, UnknownOperatorPolicy};
use crate::inventory::{Page, Paginator};
use crate::record::{AssetType, Record};

/// The homogeneous list of records of one asset type that a filter runs over.
///
/// Filtering preserves the original order of the records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssetList {
    asset_type: AssetType,
    records: Vec<Record>,
}

impl AssetList {
    pub fn new(asset_type: AssetType, records: Vec<Record>) -> Self {
        AssetList {
            asset_type,
            records,
        }
    }

    /// Parses a JSON array of record objects.
    pub fn from_json(asset_type: AssetType, json: &str) -> QuartermasterResult<AssetList> {
        match serde_json::from_str::<serde_json::Value>(json)? {
            serde_json::Value::Array(values) => {
                let mut records = Vec::with_capacity(values.len());
                for (index, value) in values.into_iter().enumerate() {
                    match value {
                        serde_json::Value::Object(map) => records.push(Record::from(map)),
                        other => {
                            log::error!("Asset {} is not a JSON object: {}", index, other);
                            return Err(QuartermasterError::new(
                                &format!("Asset {} is not a JSON object", index),
                                ErrorKind::InvalidDataType,
                            ));
                        }
                    }
                }
                Ok(AssetList::new(asset_type, records))
            }
            other => {
                log::error!("Expected a JSON array of assets, found {}", other);
                Err(QuartermasterError::new(
                    "Expected a JSON array of assets",
                    ErrorKind::InvalidDataType,
                ))
            }
        }
    }

    pub fn asset_type(&self) -> AssetType {
        self.asset_type
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Records matching `sequence`, unknown operators passing.
    pub fn filter(&self, sequence: &FilterSequence) -> Vec<&Record> {
        self.filter_with(sequence, UnknownOperatorPolicy::default())
    }

    pub fn filter_with(&self, sequence: &FilterSequence, policy: UnknownOperatorPolicy) -> Vec<&Record> {
        let matches: Vec<&Record> = self
            .records
            .iter()
            .filter(|record| sequence.evaluate_with(record, policy))
            .collect();

        log::debug!(
            "Filter {} matched {} of {} {} records",
            sequence,
            matches.len(),
            self.records.len(),
            self.asset_type
        );
        matches
    }

    /// Filters with the configured policy and returns page `page` of the
    /// matches.
    pub fn search(
        &self,
        sequence: &FilterSequence,
        page: usize,
        config: &QuartermasterConfig,
    ) -> QuartermasterResult<Page<Record>> {
        let paginator = Paginator::new(config.page_size())?;
        let matches = self.filter_with(sequence, config.unknown_operator_policy());
        let page = paginator.page(&matches, page);

        Ok(Page {
            number: page.number,
            items: page.items.into_iter().cloned().collect(),
            total_items: page.total_items,
            total_pages: page.total_pages,
        })
    }
}

impl FromIterator<Record> for AssetList {
    /// Collects into an item list; use [`AssetList::new`] for other asset types.
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        AssetList::new(AssetType::Item, iter.into_iter().collect())
    }
}
