use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const COMMS_DIR: &str = ".comms";
pub const CONFIG_FILE: &str = ".comms/config.yaml";
pub const DEFAULT_DATA_FILE: &str = "data/projects.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn comms_dir(root: &Path) -> PathBuf {
    root.join(COMMS_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve the project data file. Relative paths are taken from `root`.
pub fn data_path(root: &Path, data_file: &Path) -> PathBuf {
    if data_file.is_absolute() {
        data_file.to_path_buf()
    } else {
        root.join(data_file)
    }
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// `"{prefix}_"` followed by the first 8 hex characters of a v4 UUID.
pub fn short_id(prefix: &str) -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &uuid[..8])
}

pub fn new_project_id() -> String {
    short_id("proj")
}

pub fn new_comm_id() -> String {
    short_id("comm")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_data_file_joins_root() {
        let p = data_path(Path::new("/srv/app"), Path::new("data/projects.json"));
        assert_eq!(p, PathBuf::from("/srv/app/data/projects.json"));
    }

    #[test]
    fn absolute_data_file_is_kept() {
        let p = data_path(Path::new("/srv/app"), Path::new("/var/lib/comms.json"));
        assert_eq!(p, PathBuf::from("/var/lib/comms.json"));
    }

    #[test]
    fn ids_have_prefix_and_eight_hex_chars() {
        for id in [new_project_id(), new_comm_id()] {
            let (prefix, hex) = id.split_once('_').unwrap();
            assert!(prefix == "proj" || prefix == "comm");
            assert_eq!(hex.len(), 8);
            assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        }
        assert_ne!(new_project_id(), new_project_id());
    }
}
