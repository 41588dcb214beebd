//! Bootstrapping libclustalo from its bundled source archive.
//!
//! The sequence is:
//! 1. Make sure the argtable system package is installed
//! 2. Unpack the source archive into a fresh temporary directory
//! 3. `configure --with-pic [--with-openmp]`, `make`, `make install`
//!
//! Steps 2 and 3 are skipped when libclustalo is already found in the
//! configured search paths. Any failing command aborts the bootstrap; nothing
//! is rolled back.

use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::archive::{extract_tarball, find_configure_root};
use crate::builder::errors::ProvisionError;
use crate::builder::probe::list_installed;
use crate::builder::run_checked;
use crate::core::descriptor::{INCLUDE_DIRS, LIBRARY_DIRS};
use crate::core::platform::{PackageManager, Platform};
use crate::util::process::{CommandExecutor, ProcessBuilder};

/// Substring identifying argtable in package listings.
pub const SYSTEM_PACKAGE_MARKER: &str = "argtable";

/// Header installed by `make install`.
pub const NATIVE_HEADER: &str = "clustal-omega.h";

/// Library file names accepted as an installed libclustalo.
pub const NATIVE_LIBRARY_FILES: &[&str] = &["libclustalo.a", "libclustalo.so", "libclustalo.dylib"];

/// Default location of the bundled source archive, relative to the project.
pub const DEFAULT_ARCHIVE: &str = "third_party/clustal-omega.tar.gz";

/// Argtable package name for a package manager.
pub fn system_package_name(manager: PackageManager) -> &'static str {
    match manager {
        PackageManager::Homebrew => "argtable",
        PackageManager::Apt => "libargtable2",
    }
}

/// Settings for [`Bootstrapper`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOptions {
    /// The gzip tarball holding the libclustalo sources.
    pub archive: PathBuf,
    /// Run privileged steps (`apt`, `make install`) through `sudo`.
    pub use_sudo: bool,
    /// Rebuild even when libclustalo is already installed.
    pub force: bool,
    /// Pass `--with-openmp` to `configure`.
    pub openmp: bool,
    /// The make program.
    pub make: String,
    /// Where to look for an installed `clustal-omega.h`.
    pub include_dirs: Vec<PathBuf>,
    /// Where to look for an installed libclustalo.
    pub library_dirs: Vec<PathBuf>,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        BootstrapOptions {
            archive: PathBuf::from(DEFAULT_ARCHIVE),
            use_sudo: true,
            force: false,
            openmp: true,
            make: "make".to_string(),
            include_dirs: INCLUDE_DIRS.iter().map(PathBuf::from).collect(),
            library_dirs: LIBRARY_DIRS.iter().map(PathBuf::from).collect(),
        }
    }
}

/// What the bootstrap ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// libclustalo was already installed at this path; nothing was built.
    AlreadyInstalled(PathBuf),
    /// libclustalo was built from the archive and installed.
    Built,
}

/// Whether the argtable system package had to be installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPackageStatus {
    Present,
    Installed,
    /// The platform has no known package manager.
    Unmanaged,
}

/// Installs the native prerequisites of the extension module.
pub struct Bootstrapper<'a> {
    executor: &'a dyn CommandExecutor,
    options: BootstrapOptions,
}

impl<'a> Bootstrapper<'a> {
    /// Create a new bootstrapper.
    pub fn new(executor: &'a dyn CommandExecutor, options: BootstrapOptions) -> Self {
        Bootstrapper { executor, options }
    }

    /// Ensure argtable and libclustalo are installed.
    pub fn ensure_native_library(
        &self,
        platform: Platform,
    ) -> Result<BootstrapOutcome, ProvisionError> {
        self.ensure_system_package(platform)?;

        if !self.options.force {
            if let Some(path) = self.installed_library() {
                tracing::info!("libclustalo already installed at {}", path.display());
                return Ok(BootstrapOutcome::AlreadyInstalled(path));
            }
        }

        let (_tmp, src_root) = self.materialize_source()?;
        self.build_and_install(&src_root)?;

        tracing::info!("libclustalo installed");
        Ok(BootstrapOutcome::Built)
    }

    /// Install argtable through the platform's package manager if it is missing.
    pub fn ensure_system_package(
        &self,
        platform: Platform,
    ) -> Result<SystemPackageStatus, ProvisionError> {
        let Some(manager) = platform.package_manager() else {
            tracing::warn!(
                "no package manager known for platform `{}`; argtable must already be installed",
                platform
            );
            return Ok(SystemPackageStatus::Unmanaged);
        };

        let listing = list_installed(self.executor, manager)?;
        if listing.contains(SYSTEM_PACKAGE_MARKER) {
            tracing::debug!("argtable is installed");
            return Ok(SystemPackageStatus::Present);
        }

        let package = system_package_name(manager);
        tracing::info!("Installing {} with {}", package, manager);
        for cmd in manager.install_commands(package, self.options.use_sudo) {
            run_checked(self.executor, &cmd)?;
        }

        Ok(SystemPackageStatus::Installed)
    }

    /// Unpack the source archive into a fresh temporary directory.
    ///
    /// Returns the directory guard together with the directory holding
    /// `configure`. The sources are deleted when the guard is dropped.
    pub fn materialize_source(&self) -> Result<(tempfile::TempDir, PathBuf), ProvisionError> {
        let archive = &self.options.archive;
        if !archive.is_file() {
            return Err(ProvisionError::ArchiveNotFound {
                path: archive.clone(),
            });
        }

        let data = fs::read(archive).map_err(|source| ProvisionError::Archive {
            path: archive.clone(),
            source,
        })?;

        let tmp = tempfile::Builder::new()
            .prefix("clustalo-build-")
            .tempdir()
            .map_err(ProvisionError::TempDir)?;

        tracing::info!(
            "Unpacking {} into {}",
            archive.display(),
            tmp.path().display()
        );
        extract_tarball(&data, tmp.path()).map_err(|source| ProvisionError::Archive {
            path: archive.clone(),
            source,
        })?;

        let src_root = find_configure_root(tmp.path())
            .map_err(|source| ProvisionError::Archive {
                path: archive.clone(),
                source,
            })?
            .ok_or_else(|| ProvisionError::ConfigureNotFound {
                dir: tmp.path().to_path_buf(),
            })?;

        Ok((tmp, src_root))
    }

    /// Run configure, make, and make install inside `src_root`.
    pub fn build_and_install(&self, src_root: &Path) -> Result<(), ProvisionError> {
        for cmd in self.build_commands(src_root) {
            tracing::info!("Running `{}`", cmd.display_command());
            run_checked(self.executor, &cmd)?;
        }
        Ok(())
    }

    /// The native build sequence, in order.
    pub fn build_commands(&self, src_root: &Path) -> Vec<ProcessBuilder> {
        let mut configure = ProcessBuilder::new(src_root.join("configure")).arg("--with-pic");
        if self.options.openmp {
            configure = configure.arg("--with-openmp");
        }

        vec![
            configure.cwd(src_root),
            ProcessBuilder::new(&self.options.make).cwd(src_root),
            ProcessBuilder::privileged(&self.options.make, self.options.use_sudo)
                .arg("install")
                .cwd(src_root),
        ]
    }

    /// Path of the installed library, if header and library are both present.
    pub fn installed_library(&self) -> Option<PathBuf> {
        let has_header = self
            .options
            .include_dirs
            .iter()
            .any(|dir| dir.join(NATIVE_HEADER).is_file());
        if !has_header {
            return None;
        }

        self.options.library_dirs.iter().find_map(|dir| {
            NATIVE_LIBRARY_FILES
                .iter()
                .map(|name| dir.join(name))
                .find(|path| path.is_file())
        })
    }
}
