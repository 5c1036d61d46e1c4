use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

pub const SCREEN_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Versioned wrapper around one screen's snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenSnapshotJsonContractV1<T> {
    pub schema_version: u32,
    pub screen: String,
    pub snapshot: T,
}

/// JSON export/import of a screen snapshot.
///
/// `from_json_compat_str` accepts either the bare snapshot or the v1
/// wrapper, so older dumps keep loading.
pub trait SnapshotContract: Serialize + DeserializeOwned + Clone {
    /// Screen identifier written into the wrapper.
    const SCREEN: &'static str;

    fn to_json_contract_v1_pretty(&self) -> GraphResult<String> {
        let payload = ScreenSnapshotJsonContractV1 {
            schema_version: SCREEN_SNAPSHOT_JSON_SCHEMA_V1,
            screen: Self::SCREEN.to_owned(),
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            GraphError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    fn from_json_compat_str(input: &str) -> GraphResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<Self>(input) {
            return Ok(snapshot);
        }
        let payload: ScreenSnapshotJsonContractV1<Self> =
            serde_json::from_str(input).map_err(|e| {
                GraphError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != SCREEN_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(GraphError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        if payload.screen != Self::SCREEN {
            return Err(GraphError::InvalidData(format!(
                "snapshot is for screen `{}`, expected `{}`",
                payload.screen,
                Self::SCREEN
            )));
        }
        Ok(payload.snapshot)
    }
}
