use larder_core::{database::models::PackageRecord, error::LarderError, LarderResult};
use tracing::{info, warn};

use crate::{
    state::AppState,
    utils::{package_block, select_package_interactively},
};

/// Field overrides collected from the command line. `None` leaves the stored
/// value untouched.
pub struct UpdateFields {
    pub name: Option<String>,
    pub version: Option<String>,
    pub homepage: Option<String>,
    pub maintainer: Option<String>,
    pub email: Option<String>,
    pub as_dependency: Option<bool>,
    pub is_installed: Option<bool>,
}

impl UpdateFields {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.version.is_none()
            && self.homepage.is_none()
            && self.maintainer.is_none()
            && self.email.is_none()
            && self.as_dependency.is_none()
            && self.is_installed.is_none()
    }

    fn apply(self, package: &mut PackageRecord) {
        if let Some(name) = self.name {
            package.name = name;
        }
        if let Some(version) = self.version {
            package.version = version;
        }
        if let Some(homepage) = self.homepage {
            package.homepage = Some(homepage);
        }
        if let Some(maintainer) = self.maintainer {
            package.maintainer = Some(maintainer);
        }
        if let Some(email) = self.email {
            package.email = Some(email);
        }
        if let Some(as_dependency) = self.as_dependency {
            package.as_dependency = as_dependency;
        }
        if let Some(is_installed) = self.is_installed {
            package.is_installed = is_installed;
        }
    }
}

pub fn update_package(
    state: &AppState,
    id: Option<i64>,
    name: Option<String>,
    version: Option<String>,
    fields: UpdateFields,
) -> LarderResult<()> {
    if fields.is_empty() {
        warn!("No fields given, nothing to update.");
        return Ok(());
    }

    let store = state.store()?;

    let mut package = match id {
        Some(id) => store
            .find_by_id(id)?
            .ok_or_else(|| LarderError::PackageNotFound(format!("#{id}")))?,
        None => {
            let name = name.ok_or_else(|| {
                LarderError::InvalidArgument("update needs a package NAME pattern or --id".into())
            })?;

            let matches = store.find_by_name_version(&name, version.as_deref(), None)?;
            match matches.len() {
                0 => return Err(LarderError::PackageNotFound(name)),
                1 => matches.into_iter().next().unwrap(),
                _ => select_package_interactively(matches, &name)?
                    .ok_or_else(|| LarderError::PackageNotFound(name))?,
            }
        }
    };

    fields.apply(&mut package);
    store.update(&package)?;

    info!(
        package_id = package.package_id,
        name = package.name,
        version = package.version,
        "Updated {}#{}\n{}",
        package.name,
        package.package_id,
        package_block(&package)
    );

    Ok(())
}
