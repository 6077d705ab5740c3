//! Key/value text storage
//!
//! On the web each key is a LocalStorage item. Natively each key is a file
//! in the data directory (`SNACKLOTL_DATA_DIR`, or the working directory).
//! Failures are logged and reported as missing values or `false`; nothing
//! here is fatal.

/// Read the value stored under `key`
#[cfg(target_arch = "wasm32")]
pub fn read(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(key).ok()?
}

/// Store `value` under `key`, returning whether it was written
#[cfg(target_arch = "wasm32")]
pub fn write(key: &str, value: &str) -> bool {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    match storage {
        Some(storage) => match storage.set_item(key, value) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("LocalStorage write for {} failed: {:?}", key, e);
                false
            }
        },
        None => {
            log::warn!("LocalStorage unavailable, {} not saved", key);
            false
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{data_dir, read_from, write_to};

#[cfg(not(target_arch = "wasm32"))]
pub fn read(key: &str) -> Option<String> {
    read_from(&data_dir(), key)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write(key: &str, value: &str) -> bool {
    write_to(&data_dir(), key, value)
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    /// Directory holding one file per storage key
    pub fn data_dir() -> PathBuf {
        std::env::var_os("SNACKLOTL_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn read_from(dir: &Path, key: &str) -> Option<String> {
        let path = dir.join(key);
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn write_to(dir: &Path, key: &str, value: &str) -> bool {
        if let Err(e) = fs::create_dir_all(dir) {
            log::warn!("Failed to create {}: {}", dir.display(), e);
            return false;
        }
        let path = dir.join(key);
        // Sibling temp file, then rename over the old value
        let tmp = dir.join(format!("{}.tmp", key));
        let result = fs::write(&tmp, value).and_then(|_| fs::rename(&tmp, &path));
        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to write {}: {}", path.display(), e);
                false
            }
        }
    }
}
