use crate::errors::StoreError;
use crate::models::{ChecklistEntry, Status};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Column layout every row is written with.
pub const HEADER: [&str; 6] = ["Date", "Time", "Operator", "Activity", "Status", "Note"];

/// Column from an older layout; dropped on load and never written back.
pub const LEGACY_COLUMN: &str = "Tarefa";

/// Portuguese names the first version of the store used, per canonical column.
const LEGACY_NAMES: [&str; 6] = ["Data", "Hora", "Operador", "Atividade", "Status", "Observação"];

static SCRATCH_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub entries: Vec<ChecklistEntry>,
    /// Rows that could not be parsed and were left out of `entries`.
    pub skipped: usize,
}

#[derive(Debug, PartialEq, Eq)]
enum Layout {
    Missing,
    Empty,
    Canonical { needs_newline: bool },
    Legacy,
}

/// Flat CSV file holding every checklist row ever submitted.
///
/// Rows are only ever added. `append` writes the new batch at the end of the
/// file in one write instead of rewriting the whole file, so a concurrent
/// writer cannot wipe out another one's rows.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<ChecklistEntry>, StoreError> {
        Ok(self.load_report()?.entries)
    }

    pub fn load_report(&self) -> Result<LoadReport, StoreError> {
        match File::open(&self.path) {
            Ok(file) => read_entries(file),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(LoadReport::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn append(&self, entries: &[ChecklistEntry]) -> Result<(), StoreError> {
        if entries.is_empty() {
            return Ok(());
        }

        let (write_header, needs_newline) = match self.layout()? {
            Layout::Missing => {
                self.create_with_header()?;
                (false, false)
            }
            Layout::Empty => (true, false),
            Layout::Canonical { needs_newline } => (false, needs_newline),
            Layout::Legacy => {
                self.normalize()?;
                (false, false)
            }
        };

        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
        if write_header {
            wtr.write_record(HEADER)?;
        }
        for entry in entries {
            wtr.serialize(entry)?;
        }
        let mut payload = wtr.into_inner().map_err(|err| err.into_error())?;
        if needs_newline {
            payload.insert(0, b'\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&payload)?;
        file.sync_data()?;

        debug!(rows = entries.len(), path = %self.path.display(), "appended checklist rows");
        Ok(())
    }

    /// Rewrites a store with an older header into the current column layout,
    /// keeping every row in its original order.
    pub fn normalize(&self) -> Result<(), StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(file);
        let headers = rdr.headers()?.clone();

        let columns: Vec<Option<usize>> = HEADER
            .iter()
            .zip(LEGACY_NAMES)
            .map(|(name, legacy)| {
                headers
                    .iter()
                    .position(|h| h.trim() == *name || h.trim() == legacy)
            })
            .collect();

        let tmp_path = self.path.with_extension("csv.tmp");
        let mut wtr = WriterBuilder::new().from_path(&tmp_path)?;
        wtr.write_record(HEADER)?;

        let mut rows = 0usize;
        for record in rdr.records() {
            let record = record?;
            let row: Vec<&str> = columns
                .iter()
                .enumerate()
                .map(|(idx, column)| {
                    let value = column.and_then(|i| record.get(i)).unwrap_or("");
                    if HEADER[idx] == "Status" {
                        value.parse::<Status>().map(Status::name).unwrap_or(value)
                    } else {
                        value
                    }
                })
                .collect();
            wtr.write_record(&row)?;
            rows += 1;
        }
        wtr.flush()?;
        drop(wtr);

        fs::rename(&tmp_path, &self.path)?;
        info!(rows, path = %self.path.display(), "normalized legacy record store header");
        Ok(())
    }

    /// Creates the file holding only the header. The header is written to a
    /// scratch file first and hard-linked into place, so racing writers never
    /// see a half-written header and only one of them wins.
    fn create_with_header(&self) -> Result<(), StoreError> {
        let scratch = self.path.with_extension(format!(
            "csv.{}.{}.new",
            std::process::id(),
            SCRATCH_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        let mut wtr = WriterBuilder::new().from_path(&scratch)?;
        wtr.write_record(HEADER)?;
        wtr.flush()?;
        drop(wtr);

        let linked = fs::hard_link(&scratch, &self.path);
        fs::remove_file(&scratch)?;
        match linked {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn layout(&self) -> Result<Layout, StoreError> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Layout::Missing),
            Err(err) => return Err(err.into()),
        };
        let len = file.metadata()?.len();
        if len == 0 {
            return Ok(Layout::Empty);
        }

        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        file.seek(SeekFrom::Start(0))?;

        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(file);
        let headers = rdr.headers()?;
        if is_canonical(headers) {
            Ok(Layout::Canonical {
                needs_newline: last[0] != b'\n',
            })
        } else {
            Ok(Layout::Legacy)
        }
    }
}

fn is_canonical(headers: &StringRecord) -> bool {
    headers.len() == HEADER.len() && headers.iter().zip(HEADER).all(|(h, c)| h == c)
}

fn read_entries<R: Read>(reader: R) -> Result<LoadReport, StoreError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let keep: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| name.trim() != LEGACY_COLUMN)
        .map(|(idx, _)| idx)
        .collect();
    if keep.len() != headers.len() {
        debug!("dropping legacy {LEGACY_COLUMN} column");
    }
    let headers = project(&headers, &keep);

    let mut report = LoadReport::default();
    for record in rdr.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                warn!("skipping unreadable checklist row: {err}");
                report.skipped += 1;
                continue;
            }
        };
        // a second header can only come from two writers racing on an empty file
        if is_canonical(&record) {
            continue;
        }
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        match project(&record, &keep).deserialize::<ChecklistEntry>(Some(&headers)) {
            Ok(entry) => report.entries.push(entry),
            Err(err) => {
                warn!(line, "skipping malformed checklist row: {err}");
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

fn project(record: &StringRecord, keep: &[usize]) -> StringRecord {
    keep.iter().filter_map(|&idx| record.get(idx)).collect()
}
