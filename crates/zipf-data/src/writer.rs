//! CSV output of word counts.

use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use tracing::debug;
use zipf_core::models::WordCounts;
use zipf_core::{Result, ZipfError};

/// Write `counts` as `word,count` rows, most frequent first.
///
/// `num` limits the output to the first `num` rows.
pub fn write_counts<W: Write>(counts: &WordCounts, num: Option<usize>, writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    for row in counts.most_common(num) {
        csv_writer.serialize(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `counts` to `outfile`, or to stdout when it is `None`.
pub fn collection_to_csv(
    counts: &WordCounts,
    num: Option<usize>,
    outfile: Option<&Path>,
) -> Result<()> {
    match outfile {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| ZipfError::from_io(parent, e))?;
            }
            let file = std::fs::File::create(path).map_err(|e| ZipfError::from_io(path, e))?;
            write_counts(counts, num, std::io::BufWriter::new(file))?;
            let rows = num.map_or(counts.len(), |n| n.min(counts.len()));
            debug!("Wrote {} rows to {}", rows, path.display());
        }
        None => write_counts(counts, num, std::io::stdout().lock())?,
    }
    Ok(())
}
