//! Tile put/get/delete/path commands.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use tilecache::cache::{TileCache, TileFileStore};
use tilecache::coord::TileKey;
use tracing::info;

use crate::error::CliError;

/// Path argument meaning stdin/stdout.
const STDIO: &str = "-";

/// Store the contents of `input` (or stdin for `-`) under `key`.
pub fn put(store: &TileFileStore, key: TileKey, input: &Path) -> Result<(), CliError> {
    let payload = read_input(input)?;
    if store_tile(store, &key, &payload)? {
        info!(tile = %key, bytes = payload.len(), "Stored tile");
    } else {
        info!(tile = %key, "Tile already cached, left unchanged");
    }
    Ok(())
}

/// Put `payload` under `key`, returning whether a new tile file was written.
fn store_tile(store: &TileFileStore, key: &TileKey, payload: &[u8]) -> Result<bool, CliError> {
    let writes_before = store.stats().writes;
    store.put(key, payload)?;
    Ok(store.stats().writes > writes_before)
}

/// Write the tile to `output`, or to `stdout` when no output path is given.
pub fn get(
    store: &TileFileStore,
    key: TileKey,
    output: Option<&Path>,
    stdout: &mut dyn Write,
) -> Result<(), CliError> {
    let data = store.get(&key)?.ok_or(CliError::NotCached(key))?;

    match output {
        Some(path) if path != Path::new(STDIO) => {
            fs::write(path, &data).map_err(|error| CliError::WriteOutput {
                path: path.display().to_string(),
                error,
            })?;
            info!(tile = %key, bytes = data.len(), path = %path.display(), "Wrote tile");
        }
        _ => {
            stdout
                .write_all(&data)
                .and_then(|()| stdout.flush())
                .map_err(|error| CliError::WriteOutput {
                    path: STDIO.to_string(),
                    error,
                })?;
        }
    }
    Ok(())
}

/// Remove the tile stored under `key`, reporting whether anything was removed.
pub fn delete(store: &TileFileStore, key: TileKey, out: &mut dyn Write) -> Result<(), CliError> {
    let message = if store.delete(&key)? {
        format!("Deleted tile {}", key)
    } else {
        format!("Tile {} was not cached", key)
    };
    writeln!(out, "{}", message).map_err(|error| CliError::WriteOutput {
        path: STDIO.to_string(),
        error,
    })
}

/// Print the file path a tile maps to.
pub fn path(store: &TileFileStore, key: TileKey, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "{}", store.layout().tile_path(&key).display()).map_err(|error| {
        CliError::WriteOutput {
            path: STDIO.to_string(),
            error,
        }
    })
}

fn read_input(input: &Path) -> Result<Vec<u8>, CliError> {
    let read_error = |error| CliError::ReadInput {
        path: input.display().to_string(),
        error,
    };

    if input == Path::new(STDIO) {
        let mut payload = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut payload)
            .map_err(read_error)?;
        Ok(payload)
    } else {
        fs::read(input).map_err(read_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, TileFileStore) {
        let temp = TempDir::new().unwrap();
        let store = TileFileStore::new(temp.path().join("tiles"), "png").unwrap();
        (temp, store)
    }

    #[test]
    fn test_put_from_file_then_get_to_writer() {
        let (temp, store) = setup();
        let input = temp.path().join("input.png");
        fs::write(&input, b"png data").unwrap();
        let key = TileKey::new(3, 5, 7);

        put(&store, key, &input).unwrap();

        let mut out = Vec::new();
        get(&store, key, None, &mut out).unwrap();
        assert_eq!(out, b"png data");
    }

    #[test]
    fn test_store_tile_reports_duplicates() {
        let (_temp, store) = setup();
        let key = TileKey::new(3, 5, 7);

        assert!(store_tile(&store, &key, b"first").unwrap());
        assert!(!store_tile(&store, &key, b"second").unwrap());
        assert_eq!(store.get(&key).unwrap(), Some(b"first".to_vec()));
    }

    #[test]
    fn test_get_to_file() {
        let (temp, store) = setup();
        let key = TileKey::new(1, 2, 3);
        store.put(&key, b"bytes").unwrap();
        let output = temp.path().join("out.png");

        let mut out = Vec::new();
        get(&store, key, Some(output.as_path()), &mut out).unwrap();

        assert!(out.is_empty());
        assert_eq!(fs::read(&output).unwrap(), b"bytes");
    }

    #[test]
    fn test_get_missing_is_not_cached() {
        let (_temp, store) = setup();
        let mut out = Vec::new();

        let err = get(&store, TileKey::new(9, 9, 9), None, &mut out).unwrap_err();
        assert!(matches!(err, CliError::NotCached(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_put_missing_input() {
        let (temp, store) = setup();
        let err = put(&store, TileKey::new(1, 1, 1), &temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, CliError::ReadInput { .. }));
    }

    #[test]
    fn test_delete_reports_outcome() {
        let (_temp, store) = setup();
        let key = TileKey::new(4, 5, 6);
        store.put(&key, b"x").unwrap();

        let mut out = Vec::new();
        delete(&store, key, &mut out).unwrap();
        delete(&store, key, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Deleted tile 4/5/6"));
        assert!(text.contains("Tile 4/5/6 was not cached"));
    }

    #[test]
    fn test_path_prints_layout() {
        let (temp, store) = setup();
        let mut out = Vec::new();

        path(&store, TileKey::new(3, 5, 7), &mut out).unwrap();

        let expected = temp.path().join("tiles").join("3").join("5").join("7.png");
        assert_eq!(
            String::from_utf8(out).unwrap().trim_end(),
            expected.display().to_string()
        );
    }

    #[test]
    fn test_path_with_negative_column() {
        let (temp, store) = setup();
        let mut out = Vec::new();

        path(&store, "3/-1/5".parse().unwrap(), &mut out).unwrap();

        let expected = temp.path().join("tiles").join("3").join("-1").join("5.png");
        assert_eq!(
            String::from_utf8(out).unwrap().trim_end(),
            expected.display().to_string()
        );
    }
}
