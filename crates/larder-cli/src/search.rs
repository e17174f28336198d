use larder_core::LarderResult;
use nu_ansi_term::Color::{Blue, Cyan, Magenta, Red};
use tracing::info;

use crate::{state::AppState, utils::Colored};

pub fn search_packages(
    state: &AppState,
    query: String,
    version: Option<String>,
    limit: Option<usize>,
) -> LarderResult<()> {
    let store = state.store()?;

    let limit = limit.or(state.config().search_limit).unwrap_or(20);

    let packages = store.find_by_name_version(&query, version.as_deref(), Some(limit as u32))?;
    let total = store.count_by_name_version(&query, version.as_deref())?;

    for package in &packages {
        let install_state = if package.is_installed { "+" } else { "-" };

        info!(
            package_id = package.package_id,
            name = package.name,
            version = package.version,
            homepage = package.homepage,
            maintainer = package.maintainer,
            email = package.email,
            as_dependency = package.as_dependency,
            is_installed = package.is_installed,
            "[{}] {}#{}-{}{}",
            install_state,
            Colored(Blue, &package.name),
            Colored(Cyan, package.package_id),
            Colored(Magenta, &package.version),
            package
                .maintainer
                .as_ref()
                .map(|maintainer| format!(" ({maintainer})"))
                .unwrap_or_default()
        );
    }

    info!(
        "{}",
        Colored(
            Red,
            format!(
                "Showing {} of {}",
                std::cmp::min(packages.len() as u64, total),
                total
            )
        )
    );

    Ok(())
}
