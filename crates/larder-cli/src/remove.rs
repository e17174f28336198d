use larder_core::{error::LarderError, LarderResult};
use nu_ansi_term::Color::Yellow;
use tracing::info;

use crate::{state::AppState, utils::Colored};

pub fn remove_packages(
    state: &AppState,
    id: Option<i64>,
    name: Option<String>,
    version: Option<String>,
    dry_run: bool,
) -> LarderResult<()> {
    let store = state.store()?;

    let (matches, target) = match (id, name) {
        (Some(id), _) => {
            let matches = store.find_by_id(id)?.into_iter().collect::<Vec<_>>();
            (matches, format!("#{id}"))
        }
        (None, Some(name)) => {
            let matches = store.find_by_name_version(&name, version.as_deref(), None)?;
            (matches, name)
        }
        (None, None) => {
            return Err(LarderError::InvalidArgument(
                "remove needs a package NAME pattern or --id".into(),
            ))
        }
    };

    if matches.is_empty() {
        return Err(LarderError::PackageNotFound(target));
    }

    if dry_run {
        info!("{}", Colored(Yellow, "Dry run, nothing removed. Would remove:"));
        for package in &matches {
            info!(
                package_id = package.package_id,
                name = package.name,
                version = package.version,
                "{}#{}-{}",
                package.name,
                package.package_id,
                package.version
            );
        }
        return Ok(());
    }

    let mut removed = 0;
    for package in &matches {
        removed += store.remove_by_id(package.package_id)?;
        info!(
            package_id = package.package_id,
            name = package.name,
            version = package.version,
            "Removed {}#{}",
            package.name,
            package.package_id
        );
    }

    info!("Removed {removed} package(s) from the registry");
    Ok(())
}
