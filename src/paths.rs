use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::LazyLock;

pub static PATH_HOME: LazyLock<PathBuf> = LazyLock::new(|| {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir())
});

pub static PATH_LOCAL_SHARE: LazyLock<PathBuf> = LazyLock::new(|| PATH_HOME.join(".local/share"));

pub static PATH_DATA: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Ok(xdg_data_home) = env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home).join("cavelaunch");
    }
    PATH_LOCAL_SHARE.join("cavelaunch")
});

/// One directory per installed cave, each holding a `cave.yaml` record
pub static PATH_CAVES: LazyLock<PathBuf> = LazyLock::new(|| PATH_DATA.join("caves"));

/// Cached game metadata, one `<game_id>.json` per game
pub static PATH_GAME_CACHE: LazyLock<PathBuf> = LazyLock::new(|| PATH_DATA.join("games"));

pub static BIN_BWRAP: LazyLock<PathBuf> = LazyLock::new(|| {
    let bin_candidates = [PathBuf::from("/usr/bin"), PathBuf::from("/usr/local/bin")];

    for candidate in &bin_candidates {
        let bin = candidate.join("bwrap");
        if bin.exists() {
            return bin;
        }
    }

    env::var_os("PATH")
        .and_then(|path| find_in_path("bwrap", &path))
        .unwrap_or_else(|| PathBuf::from("bwrap"))
});

/// First `name` found in the directories of a `$PATH`-style list
pub fn find_in_path(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    env::split_paths(path_var)
        .map(|dir| dir.join(name))
        .find(|bin| bin.is_file())
}
