//! Pool snapshots read from a JSON file
//!
//! The file maps hex pool ids to raw accounts, in the ledger's field names:
//!
//! ```json
//! {
//!   "pools": {
//!     "0202…02": {
//!       "owner": "0101…01",
//!       "totalSupply": 1000000,
//!       "supplyRemaining": 966667,
//!       "virtualSolReserve": 1500000000,
//!       "virtualTokenReserve": 66667
//!     }
//!   }
//! }
//! ```
//!
//! The file is re-read on every fetch, like a ledger read. Read and parse
//! failures surface as [`LedgerError::Unavailable`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use types::{LedgerError, PoolId, PoolSource, RawPoolAccount};

/// On-disk layout of a snapshot file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolFile {
    pub pools: BTreeMap<PoolId, RawPoolAccount>,
}

/// [`PoolSource`] backed by a [`PoolFile`]
#[derive(Debug, Clone)]
pub struct JsonPoolSource {
    path: PathBuf,
}

impl JsonPoolSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ids of every pool in the file, in ascending order
    pub fn pool_ids(&self) -> Result<Vec<PoolId>, LedgerError> {
        Ok(self.read()?.pools.into_keys().collect())
    }

    fn read(&self) -> Result<PoolFile, LedgerError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| LedgerError::Unavailable(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Unavailable(format!("{}: {}", self.path.display(), e)))
    }
}

impl PoolSource for JsonPoolSource {
    fn fetch_pool(&self, id: &PoolId) -> Result<Option<RawPoolAccount>, LedgerError> {
        Ok(self.read()?.pools.get(id).copied())
    }
}
