use crate::utils::error::{ProbeError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Procedure status the JSON API reports for a successful call.
pub const STATUS_SUCCESS: i64 = 1;

/// Body of a procedure call made through the HTTP JSON API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureResponse {
    pub status: i64,
    #[serde(default)]
    pub statusstring: Option<String>,
    #[serde(default)]
    pub results: serde_json::Value,
}

impl ProcedureResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| ProbeError::parse(format!("unexpected procedure response: {}", e)))
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// `<status> <statusstring>` on one line, the way operators are used to reading it.
    pub fn status_line(&self) -> String {
        match self.statusstring.as_deref() {
            Some(text) if !text.is_empty() => format!("{} {}", self.status, text),
            _ => self.status.to_string(),
        }
    }

    /// Flattens every row of every result table, in table index order.
    ///
    /// API 2.0 returns `results` as an object keyed by table index, each table an
    /// array of row objects. API 1.0 returns an array of `{schema, data}` tables whose
    /// rows are positional; those rows are keyed by the schema column names.
    pub fn rows<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let tables: Vec<&serde_json::Value> = match &self.results {
            serde_json::Value::Null => return Ok(Vec::new()),
            serde_json::Value::Object(map) => {
                let mut entries: Vec<(&String, &serde_json::Value)> = map.iter().collect();
                // "10" sorts before "2" as text
                entries.sort_by(|(a, _), (b, _)| {
                    match (a.parse::<u64>(), b.parse::<u64>()) {
                        (Ok(a), Ok(b)) => a.cmp(&b),
                        _ => a.cmp(b),
                    }
                });
                entries.into_iter().map(|(_, table)| table).collect()
            }
            serde_json::Value::Array(items) => items.iter().collect(),
            other => {
                return Err(ProbeError::parse(format!(
                    "results must be a table collection, got {}",
                    other
                )))
            }
        };

        let mut rows = Vec::new();
        for table in tables {
            for row in table_rows(table)? {
                rows.push(serde_json::from_value(row)?);
            }
        }
        Ok(rows)
    }
}

fn table_rows(table: &serde_json::Value) -> Result<Vec<serde_json::Value>> {
    match table {
        serde_json::Value::Array(items) => Ok(items.clone()),
        serde_json::Value::Object(fields) => {
            let columns: Vec<&str> = fields
                .get("schema")
                .and_then(|schema| schema.as_array())
                .ok_or_else(|| ProbeError::parse("result table has no schema"))?
                .iter()
                .map(|column| column.get("name").and_then(|name| name.as_str()).unwrap_or(""))
                .collect();
            let data = fields
                .get("data")
                .and_then(|data| data.as_array())
                .ok_or_else(|| ProbeError::parse("result table has no data"))?;

            data.iter()
                .map(|row| {
                    let values = row
                        .as_array()
                        .ok_or_else(|| ProbeError::parse("result row is not an array"))?;
                    if values.len() != columns.len() {
                        return Err(ProbeError::parse(format!(
                            "result row has {} values for {} columns",
                            values.len(),
                            columns.len()
                        )));
                    }
                    let object: serde_json::Map<String, serde_json::Value> = columns
                        .iter()
                        .map(|name| name.to_string())
                        .zip(values.iter().cloned())
                        .collect();
                    Ok(serde_json::Value::Object(object))
                })
                .collect()
        }
        _ => Err(ProbeError::parse("result table is not an array of rows")),
    }
}

/// One row of `@Statistics DRROLE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrRoleRow {
    #[serde(rename = "ROLE")]
    pub role: String,
    #[serde(rename = "STATE")]
    pub state: String,
    #[serde(rename = "REMOTE_CLUSTER_ID", default)]
    pub remote_cluster_id: Option<i64>,
}

impl DrRoleRow {
    pub fn is_configured(&self) -> bool {
        !self.role.eq_ignore_ascii_case("NONE")
    }

    pub fn is_active(&self) -> bool {
        self.state.eq_ignore_ascii_case("ACTIVE")
    }
}

impl std::fmt::Display for DrRoleRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.remote_cluster_id {
            Some(id) => write!(f, "role={} state={} remote_cluster_id={}", self.role, self.state, id),
            None => write!(f, "role={} state={}", self.role, self.state),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ProbeMode {
    /// `@PingPartitions` only.
    #[default]
    Partitions,
    /// `@PingPartitions`, then DR replication state.
    Replication,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady { diagnostic: String },
}

impl Readiness {
    pub fn not_ready(diagnostic: impl Into<String>) -> Self {
        Readiness::NotReady {
            diagnostic: diagnostic.into(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Readiness::Ready => 0,
            Readiness::NotReady { .. } => 1,
        }
    }
}
