use std::path::PathBuf;

pub const CASE_FILE_NAME: &str = "case.json";

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

pub fn cases_root() -> PathBuf {
    workspace_root().join("cases")
}

pub fn case_dir(name: &str) -> PathBuf {
    cases_root().join(name)
}

pub fn case_path(name: &str) -> PathBuf {
    case_dir(name).join(CASE_FILE_NAME)
}
