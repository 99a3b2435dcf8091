use std::path::PathBuf;

/// Core configuration for opening a [`PermitStore`](crate::PermitStore).
#[derive(Clone, Debug)]
pub struct Config {
    pub base_path: PathBuf,
}

impl Config {
    pub fn db_path(&self) -> PathBuf {
        self.base_path.join("permits.redb")
    }
}
