//! The process-wide key file.
//!
//! Every record file on disk is encrypted a second time with key material
//! read from a single text file (by default `config/encflekey.txt`).
//! The file is required: without it no store can be opened.

use std::fs;
use std::path::Path;

use zeroize::Zeroizing;

use super::keys::generate_key_material;
use crate::errors::{CredVaultError, Result};

/// Size of freshly generated key material in bits.
const KEY_FILE_BITS: usize = 256;

/// Generate new key material and write it to `path`.
///
/// Refuses to overwrite an existing key file: losing it makes every
/// stored record unreadable.  The file is written with owner-only
/// permissions on Unix.
pub fn generate_key_file(path: &Path) -> Result<Zeroizing<String>> {
    if path.exists() {
        return Err(CredVaultError::KeyFileError(format!(
            "key file already exists at {}",
            path.display()
        )));
    }

    let material = Zeroizing::new(generate_key_material(KEY_FILE_BITS)?);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                CredVaultError::KeyFileError(format!("cannot create key file directory: {e}"))
            })?;
        }
    }

    fs::write(path, material.as_bytes())
        .map_err(|e| CredVaultError::KeyFileError(format!("failed to write key file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(path, perms).map_err(|e| {
            CredVaultError::KeyFileError(format!("failed to set key file permissions: {e}"))
        })?;
    }

    tracing::info!(path = %path.display(), "generated encryption key file");
    Ok(material)
}

/// Read the key material from `path`.
///
/// Trailing whitespace is dropped so an editor-added newline does not
/// change the key.
pub fn load_key_file(path: &Path) -> Result<Zeroizing<String>> {
    if !path.exists() {
        tracing::error!(path = %path.display(), "encryption key file not found");
        return Err(CredVaultError::KeyFileMissing(path.to_path_buf()));
    }

    let mut contents = Zeroizing::new(
        fs::read_to_string(path)
            .map_err(|e| CredVaultError::KeyFileError(format!("failed to read key file: {e}")))?,
    );

    let trimmed_len = contents.trim_end().len();
    contents.truncate(trimmed_len);

    if contents.trim().is_empty() {
        return Err(CredVaultError::KeyFileError(format!(
            "key file at {} is empty",
            path.display()
        )));
    }

    tracing::debug!(path = %path.display(), "encryption key loaded");
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn generate_and_load_key_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config").join("encflekey.txt");

        let generated = generate_key_file(&path).unwrap();
        let loaded = load_key_file(&path).unwrap();
        assert_eq!(*generated, *loaded);
    }

    #[test]
    fn generate_key_file_fails_if_exists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.txt");

        generate_key_file(&path).unwrap();
        assert!(generate_key_file(&path).is_err());
    }

    #[test]
    fn load_key_file_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.txt");

        assert!(matches!(
            load_key_file(&path),
            Err(CredVaultError::KeyFileMissing(p)) if p == path
        ));
    }

    #[test]
    fn load_key_file_trims_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.txt");
        fs::write(&path, "my key material\n").unwrap();

        assert_eq!(load_key_file(&path).unwrap().as_str(), "my key material");
    }

    #[test]
    fn load_key_file_rejects_blank_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.txt");
        fs::write(&path, "  \n").unwrap();

        assert!(matches!(
            load_key_file(&path),
            Err(CredVaultError::KeyFileError(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn generated_key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.txt");
        generate_key_file(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
