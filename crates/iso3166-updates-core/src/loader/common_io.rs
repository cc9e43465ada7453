// crates/iso3166-updates-core/src/loader/common_io.rs
use crate::error::{Result, UpdatesError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Open a dataset file, transparently gunzipping `.gz` paths.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        UpdatesError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    let gzipped = path.extension().is_some_and(|ext| ext == "gz");

    if !gzipped {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        use flate2::read::GzDecoder;
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(UpdatesError::InvalidDataset(format!(
            "{} is gzipped; enable the 'compact' feature",
            path.display()
        )))
    }
}

/// `data/updates.json.gz` -> `data/updates.json.gz.bin`
pub fn get_cache_path(source: &Path, suffix: &str) -> PathBuf {
    let filename = source
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{filename}.{suffix}"))
}

/// `true` when `cache` exists and is at least as new as `source`.
pub fn is_fresh(cache: &Path, source: &Path) -> bool {
    let modified = |p: &Path| std::fs::metadata(p).and_then(|m| m.modified()).ok();
    match (modified(cache), modified(source)) {
        (Some(c), Some(s)) => c >= s,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_path_appends_suffix() {
        let p = get_cache_path(Path::new("data/updates.json.gz"), "bin");
        assert_eq!(p, PathBuf::from("data/updates.json.gz.bin"));
    }

    #[test]
    fn missing_file_is_not_found() {
        match open_stream(Path::new("/nonexistent/updates.json")) {
            Err(UpdatesError::NotFound(msg)) => assert!(msg.contains("/nonexistent/updates.json")),
            Err(other) => panic!("unexpected {other:?}"),
            Ok(_) => panic!("expected an error"),
        }
    }
}
