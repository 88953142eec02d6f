use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::GenerationError;
use crate::records::TableRecord;

/// A fully written CSV file waiting under a temporary name.
///
/// The destination is only touched by [`StagedFile::commit`]; dropping an
/// uncommitted stage removes the temporary file.
#[derive(Debug)]
pub struct StagedFile {
    table: &'static str,
    tmp_path: PathBuf,
    path: PathBuf,
    rows: u64,
    bytes: u64,
    committed: bool,
}

impl StagedFile {
    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }

    /// Move the temporary file over the destination.
    pub fn commit(mut self) -> Result<PathBuf, GenerationError> {
        std::fs::rename(&self.tmp_path, &self.path)?;
        self.committed = true;
        Ok(self.path.clone())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_file(&self.tmp_path);
        }
    }
}

/// Write a table as CSV into `dir` under a temporary name, with the header and
/// column order taken from the record's table definition.
pub fn stage_table_csv<R: TableRecord>(
    dir: &Path,
    rows: &[R],
) -> Result<StagedFile, GenerationError> {
    let table = R::TABLE;
    let path = dir.join(table.file_name);
    let tmp_path = dir.join(format!("{}.tmp", table.file_name));

    let mut staged = StagedFile {
        table: table.name,
        tmp_path,
        path,
        rows: 0,
        bytes: 0,
        committed: false,
    };

    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&staged.tmp_path)?;
    let counting = CountingWriter::new(BufWriter::new(file));
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(table.column_names())?;

    for row in rows {
        let mut record = Vec::with_capacity(table.columns.len());
        for column in table.columns {
            let value = row.field(column.name).ok_or_else(|| {
                GenerationError::integrity(
                    table.name,
                    format!("record has no value for column '{}'", column.name),
                )
            })?;
            record.push(value);
        }
        writer.write_record(&record)?;
        staged.rows += 1;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    staged.bytes = counting.bytes_written();
    let file: File = counting
        .into_inner()
        .into_inner()
        .map_err(|err| err.into_error())?;
    file.sync_all()?;

    Ok(staged)
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }

    fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
