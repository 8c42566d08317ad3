#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// SHA-256 of `hello`
pub const HELLO_HEX: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

/// SHA-256 of `world`
pub const WORLD_HEX: &str = "486ea46224d1bb4fb680f34f7c9ad96a8f24ec88be73ea8e5a6c65260e9cb8a7";

/// Directory fixture: `<tmp>/data/{a.txt: "hello", b.txt: "world"}` with
/// the integrity list at `<tmp>/list.txt`, outside the scanned directory.
pub struct TestDir {
    pub temp_dir: TempDir,
    pub data: PathBuf,
    pub list: PathBuf,
}

impl TestDir {
    /// Create the fixture with `a.txt` and `b.txt`
    pub fn new() -> Result<Self> {
        let fixture = Self::empty()?;
        fixture.write("a.txt", "hello")?;
        fixture.write("b.txt", "world")?;
        Ok(fixture)
    }

    /// Create the fixture with an empty data directory
    pub fn empty() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let data = temp_dir.path().join("data");
        fs::create_dir(&data)?;
        let list = temp_dir.path().join("list.txt");
        Ok(Self {
            temp_dir,
            data,
            list,
        })
    }

    /// The data directory as passed on the command line
    pub fn dir(&self) -> String {
        self.data.to_string_lossy().into_owned()
    }

    /// The manifest path of a file in the data directory
    pub fn entry(&self, name: &str) -> String {
        format!("{}/{name}", self.dir())
    }

    /// Write a file in the data directory
    pub fn write(&self, name: &str, content: &str) -> Result<()> {
        fs::write(self.data.join(name), content)?;
        Ok(())
    }

    /// Remove a file from the data directory
    pub fn remove(&self, name: &str) -> Result<()> {
        fs::remove_file(self.data.join(name))?;
        Ok(())
    }

    /// Temporary root
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}
