//! External processes: package manager detection and dependency installation

pub mod check;
pub mod install;

pub use check::{check_bun, check_tool, RuntimeInfo};
pub use install::{install_dependencies, InstallOutcome, PackageManager, INSTALL_TIMEOUT};
