use larder_core::{database::models::PackageRecord, error::LarderError, LarderResult};
use nu_ansi_term::Color::Yellow;
use tracing::info;

use crate::{
    state::AppState,
    utils::{package_block, Colored},
};

#[allow(clippy::too_many_arguments)]
pub fn insert_package(
    state: &AppState,
    name: Option<String>,
    version: Option<String>,
    homepage: Option<String>,
    maintainer: Option<String>,
    email: Option<String>,
    as_dependency: bool,
    is_installed: bool,
    dry_run: bool,
) -> LarderResult<()> {
    let (name, version) = match (name, version) {
        (Some(name), Some(version)) => (name, version),
        (name, version) => {
            let mut missing = Vec::new();
            if name.is_none() {
                missing.push("NAME");
            }
            if version.is_none() {
                missing.push("VERSION");
            }
            return Err(LarderError::InvalidArgument(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }
    };

    let package = PackageRecord {
        name,
        version,
        homepage,
        maintainer,
        email,
        as_dependency,
        is_installed,
        ..Default::default()
    };

    let store = state.store()?;

    if store.exists(&package.name, &package.version)? {
        return Err(LarderError::PackageExists(format!(
            "{}-{}",
            package.name, package.version
        )));
    }

    if dry_run {
        info!(
            name = package.name,
            version = package.version,
            "{}\n{}",
            Colored(Yellow, "Dry run, nothing inserted. Would insert:"),
            package_block(&package)
        );
        return Ok(());
    }

    let id = store.insert(&package)?;
    info!(
        package_id = id,
        name = package.name,
        version = package.version,
        "Added {}#{}-{}",
        package.name,
        id,
        package.version
    );

    Ok(())
}
