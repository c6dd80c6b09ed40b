use async_trait::async_trait;
use regieleki_application::ports::{RecordRepository, Resolution};
use regieleki_domain::{DomainError, Record, RecordType, QTYPE_ANY};
use rustc_hash::FxHashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// In-memory record set persisted as a tab-separated file.
///
/// File format, one record per line: `id\tdomain\ttype\tvalue\n`, in store
/// order. Every mutation rewrites the whole file through a temporary file in
/// the same directory followed by a rename, so the file on disk is always
/// either the old or the new record set.
pub struct TsvRecordStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    records: Vec<Record>,
    /// Lower-cased domain → positions in `records`, in insertion order.
    index: FxHashMap<String, Vec<usize>>,
    /// `None` once the id space is used up.
    next_id: Option<i64>,
}

impl StoreState {
    fn new(records: Vec<Record>) -> Self {
        let next_id = records.iter().map(|r| r.id).fold(0, i64::max).checked_add(1);
        let mut state = Self {
            records,
            index: FxHashMap::default(),
            next_id,
        };
        state.rebuild_index();
        state
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (pos, record) in self.records.iter().enumerate() {
            self.index
                .entry(record.domain.clone())
                .or_default()
                .push(pos);
        }
    }

    fn resolve(&self, domain: &str, qtype: u16) -> Resolution {
        let Some(positions) = self.index.get(domain) else {
            return Resolution::not_ours();
        };
        let all = positions.iter().map(|&pos| &self.records[pos]);

        if qtype == QTYPE_ANY {
            return Resolution::authoritative(all.cloned().collect());
        }

        let matched: Vec<Record> = all
            .clone()
            .filter(|r| r.record_type.matches_qtype(qtype))
            .cloned()
            .collect();
        if !matched.is_empty() {
            return Resolution::authoritative(matched);
        }

        let cname = all
            .filter(|r| r.record_type == RecordType::CNAME)
            .take(1)
            .cloned()
            .collect();
        Resolution::authoritative(cname)
    }

    fn position(&self, id: i64) -> Result<usize, DomainError> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or(DomainError::NotFound(id))
    }
}

impl TsvRecordStore {
    /// Loads the store from `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(DomainError::IoError(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let state = StoreState::new(parse_records(&content, &path));

        info!(
            path = %path.display(),
            records = state.records.len(),
            next_id = ?state.next_id,
            "Record store loaded"
        );

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Applies `op` under the write lock, then persists. If persisting fails
    /// the previous state is restored before the error is returned.
    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut StoreState) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut state = self.state.write().await;
        let previous = state.clone();

        let out = op(&mut state)?;
        state.rebuild_index();

        if let Err(e) = self.persist(&state.records).await {
            *state = previous;
            return Err(e);
        }
        Ok(out)
    }

    async fn persist(&self, records: &[Record]) -> Result<(), DomainError> {
        let content = serialize_records(records);
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomically(&path, content.as_bytes()))
            .await
            .map_err(|e| DomainError::Persistence(format!("write task failed: {}", e)))?
            .map_err(|e| DomainError::Persistence(format!("{}: {}", self.path.display(), e)))?;

        debug!(path = %self.path.display(), records = records.len(), "Record store saved");
        Ok(())
    }
}

#[async_trait]
impl RecordRepository for TsvRecordStore {
    async fn list(&self) -> Vec<Record> {
        self.state.read().await.records.clone()
    }

    async fn resolve(&self, domain: &str, qtype: u16) -> Resolution {
        let domain = domain.to_lowercase();
        self.state.read().await.resolve(&domain, qtype)
    }

    async fn add(
        &self,
        domain: &str,
        record_type: RecordType,
        value: &str,
    ) -> Result<Record, DomainError> {
        self.mutate(|state| {
            let id = state.next_id.ok_or_else(|| {
                DomainError::Persistence("record id space exhausted".to_string())
            })?;
            let record = Record::new(id, domain, record_type, value);
            state.next_id = id.checked_add(1);
            state.records.push(record.clone());
            Ok(record)
        })
        .await
    }

    async fn update(
        &self,
        id: i64,
        domain: &str,
        record_type: RecordType,
        value: &str,
    ) -> Result<Record, DomainError> {
        self.mutate(|state| {
            let pos = state.position(id)?;
            let record = Record::new(id, domain, record_type, value);
            state.records[pos] = record.clone();
            Ok(record)
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.mutate(|state| {
            let pos = state.position(id)?;
            state.records.remove(pos);
            Ok(())
        })
        .await
    }
}

/// Parses the store file. Blank lines are ignored; malformed lines are
/// logged and skipped without aborting the load.
pub fn parse_records(content: &str, source: &Path) -> Vec<Record> {
    let mut records = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!(
                    file = %source.display(),
                    line = line_num + 1,
                    reason = %reason,
                    "Skipping malformed record"
                );
            }
        }
    }

    records
}

fn parse_line(line: &str) -> Result<Record, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    let &[id, domain, record_type, value] = fields.as_slice() else {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    };

    let id: i64 = id
        .parse()
        .map_err(|e| format!("invalid id {:?}: {}", id, e))?;
    let record_type: RecordType = record_type.parse()?;

    Ok(Record::new(id, domain, record_type, value))
}

pub fn serialize_records(records: &[Record]) -> String {
    let mut out = String::new();
    for r in records {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            r.id, r.domain, r.record_type, r.value
        ));
    }
    out
}

fn write_atomically(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".regieleki-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
