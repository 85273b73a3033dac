use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// The watch list shipped with the binary, used when no other list is supplied.
const DEFAULT_WATCH_LIST: &str = include_str!("../../data/watched_items.csv");

/// A single row of a watch list CSV file.
///
/// The file must have a header row of `name,item_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WatchedItem {
    /// The human-readable name of the item, as it appears on the market.
    pub name: String,

    /// The Torn item ID. This is the ID used in `/market/{id}` requests, and can be
    /// found on the item's page in game.
    pub item_id: u64,
}

/// The set of items whose bazaar listings are fetched and summarized.
///
/// Names are unique. Item IDs are _expected_ to be unique as well, but that is not
/// enforced at load time; use [`ensure_invertible`](`Self::ensure_invertible`) or rely on
/// [`name_for`](`Self::name_for`) to reject a list where two names share an ID.
///
/// Entries keep the order they were loaded in, which is also the order of the report.
#[derive(Debug, Clone)]
pub struct WatchList {
    items: Vec<WatchedItem>,
}

impl WatchList {
    /// Builds a watch list from already parsed entries.
    ///
    /// Returns [`Error::Config`] if two entries share a name.
    pub fn new(items: Vec<WatchedItem>) -> Result<Self> {
        let mut names = HashSet::new();
        for item in &items {
            if !names.insert(item.name.as_str()) {
                return Err(Error::Config(format!(
                    "watch list contains {:?} more than once",
                    item.name
                )));
            }
        }
        Ok(WatchList { items })
    }

    /// Deserializes a CSV string with a `name,item_id` header.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tornwatch::torn::WatchList;
    ///
    /// let list = WatchList::from_csv("name,item_id\nXanax,206\n").unwrap();
    /// assert_eq!("Xanax", list.name_for(206).unwrap());
    /// ```
    pub fn from_csv(csv: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());

        let items = reader
            .deserialize::<WatchedItem>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Self::new(items)
    }

    /// Reads and deserializes a watch list CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "could not read watch list {}: {}",
                path.display(),
                e
            ))
        })?;
        debug!("Loaded watch list from {}", path.display());
        Self::from_csv(&contents)
    }

    /// The watch list compiled into the binary.
    pub fn default_list() -> Result<Self> {
        Self::from_csv(DEFAULT_WATCH_LIST)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct item IDs, in the order they first appear in the list.
    pub fn item_ids(&self) -> Vec<u64> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|item| item.item_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Resolves an item ID back to the name it is watched under.
    ///
    /// Returns [`Error::Lookup`] if no name, or more than one name, maps to `item_id`.
    pub fn name_for(&self, item_id: u64) -> Result<&str> {
        let mut matches = self.items.iter().filter(|item| item.item_id == item_id);

        match (matches.next(), matches.next()) {
            (Some(item), None) => Ok(item.name.as_str()),
            (None, _) => Err(Error::Lookup {
                item_id,
                names: Vec::new(),
            }),
            (Some(first), Some(second)) => {
                let mut names = vec![first.name.clone(), second.name.clone()];
                names.extend(matches.map(|item| item.name.clone()));
                Err(Error::Lookup { item_id, names })
            }
        }
    }

    /// Checks that every item ID maps back to exactly one name.
    pub fn ensure_invertible(&self) -> Result<()> {
        for item_id in self.item_ids() {
            self.name_for(item_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_loads() {
        let list = WatchList::default_list().unwrap();
        assert!(!list.is_empty());
        assert!(list.ensure_invertible().is_ok());
    }

    #[test]
    fn from_csv_keeps_file_order() {
        let list = WatchList::from_csv("name,item_id\nZ Item,3\nA Item,1\nM Item,2\n").unwrap();
        assert_eq!(vec![3, 1, 2], list.item_ids());
        assert_eq!("A Item", list.name_for(1).unwrap());
    }

    #[test]
    fn from_csv_trims_whitespace() {
        let list = WatchList::from_csv("name, item_id\n Xanax , 206\n").unwrap();
        assert_eq!("Xanax", list.name_for(206).unwrap());
    }

    #[test]
    fn from_csv_rejects_non_numeric_id() {
        let err = WatchList::from_csv("name,item_id\nXanax,abc\n").unwrap_err();
        assert_eq!(crate::ErrorKind::Config, err.kind());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = WatchList::from_csv("name,item_id\nXanax,206\nXanax,207\n").unwrap_err();
        assert_eq!(crate::ErrorKind::Config, err.kind());
    }

    #[test]
    fn duplicate_ids_load_but_do_not_resolve() {
        let list = WatchList::from_csv("name,item_id\nXanax,206\nXan,206\n").unwrap();
        assert_eq!(vec![206], list.item_ids());

        match list.name_for(206) {
            Err(Error::Lookup { item_id, names }) => {
                assert_eq!(206, item_id);
                assert_eq!(vec!["Xanax".to_string(), "Xan".to_string()], names);
            }
            _ => panic!("expected a lookup error"),
        }
        assert!(list.ensure_invertible().is_err());
    }

    #[test]
    fn unknown_id_does_not_resolve() {
        let list = WatchList::from_csv("name,item_id\nXanax,206\n").unwrap();
        assert!(matches!(
            list.name_for(1),
            Err(Error::Lookup { item_id: 1, ref names }) if names.is_empty()
        ));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = WatchList::from_path("/definitely/not/here.csv").unwrap_err();
        assert_eq!(crate::ErrorKind::Config, err.kind());
    }
}
