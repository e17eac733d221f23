//! Built-in defaults for a run. Every value here can be overridden from the
//! command line and is passed explicitly into the stages that use it.

/// Identifier the tool searches for and replaces.
pub const OLD_IDENTIFIER: &str = "e3871e85-7a12-4fff-9f5a-5cefd3593a5a";

/// Config file, relative to the scan root.
pub const CONFIG_FILE: &str = ".infisical.json";

/// Key holding the replacement identifier.
pub const CONFIG_KEY: &str = "workspaceId";

/// Directory names pruned at any depth.
pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    ".next",
    "dist",
    "build",
    ".infisical.json",
    ".venv",
    "venv",
];

pub fn excluded_dirs() -> Vec<String> {
    EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect()
}
