use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::{
    fs::File,
    io::{self},
    path::Path,
};

/// SHA-256 of an uploaded source file, recorded in the upload report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    value: String,
}

impl Checksum {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn create(mut file: &File) -> Result<Self> {
        let mut hasher = Sha256::new();
        let _ = io::copy(&mut file, &mut hasher)?;
        let hash = hasher.finalize();

        let encoded = hex::encode(hash);

        Ok(Checksum { value: encoded })
    }

    pub fn of_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;

        Checksum::create(&file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempdir::TempDir;

    #[test]
    fn should_create_checksum() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("checksum")?;

        let file_path = dir.path().join("alex-rivera.png");
        File::create(&file_path)?.write_all(b"Hello, world!")?;

        let checksum = Checksum::of_path(&file_path)?;

        assert_eq!(
            checksum.value(),
            "315f5bdb76d078c43b8ac0064e4a0164612b1fce77c869345bfc94c75894edd3"
        );

        dir.close()?;
        Ok(())
    }

    #[test]
    fn should_fail_for_missing_file() {
        assert!(Checksum::of_path("/definitely/not/here.png").is_err());
    }
}
