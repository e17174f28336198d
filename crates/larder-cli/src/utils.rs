use std::{
    fmt::Display,
    io::Write,
    sync::{LazyLock, RwLock},
};

use larder_core::{
    database::models::PackageRecord,
    error::ErrorContext,
    LarderResult,
};
use nu_ansi_term::Color::{self, Blue, Cyan, Magenta, Purple};
use tracing::{error, info};

pub static COLOR: LazyLock<RwLock<bool>> = LazyLock::new(|| RwLock::new(true));

pub fn interactive_ask(ques: &str) -> LarderResult<String> {
    print!("{ques}");

    std::io::stdout()
        .flush()
        .with_context(|| "flushing stdout stream".to_string())?;

    let mut response = String::new();
    std::io::stdin()
        .read_line(&mut response)
        .with_context(|| "reading input from stdin".to_string())?;

    Ok(response.trim().to_owned())
}

pub struct Colored<T: Display>(pub Color, pub T);

impl<T: Display> Display for Colored<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let color = COLOR.read().unwrap();
        if *color {
            write!(f, "{}", self.0.prefix())?;
            self.1.fmt(f)?;
            write!(f, "{}", self.0.suffix())
        } else {
            self.1.fmt(f)
        }
    }
}

fn get_valid_selection(max: usize) -> LarderResult<usize> {
    loop {
        let response = interactive_ask("Select a package: ")?;
        match response.parse::<usize>() {
            Ok(n) if n > 0 && n <= max => return Ok(n - 1),
            _ => error!("Invalid selection, please try again."),
        }
    }
}

pub fn select_package_interactively(
    pkgs: Vec<PackageRecord>,
    package_name: &str,
) -> LarderResult<Option<PackageRecord>> {
    info!("Multiple packages found for {package_name}");
    for (idx, pkg) in pkgs.iter().enumerate() {
        info!(
            "[{}] {}#{}-{}",
            idx + 1,
            pkg.name,
            pkg.package_id,
            pkg.version
        );
    }

    let selection = get_valid_selection(pkgs.len())?;
    Ok(pkgs.into_iter().nth(selection))
}

/// Renders a record as labeled lines, one field per line. Optional fields
/// only show up when they hold a value; the id only once the engine assigned
/// one.
pub fn package_block(package: &PackageRecord) -> String {
    let mut fields = Vec::new();

    if package.package_id != 0 {
        fields.push(format!(
            "{}: {}",
            Colored(Purple, "Id"),
            Colored(Cyan, package.package_id)
        ));
    }
    fields.push(format!(
        "{}: {}",
        Colored(Purple, "Name"),
        Colored(Cyan, &package.name)
    ));
    fields.push(format!(
        "{}: {}",
        Colored(Purple, "Version"),
        Colored(Cyan, &package.version)
    ));
    if let Some(ref homepage) = package.homepage {
        fields.push(format!(
            "{}: {}",
            Colored(Purple, "Homepage"),
            Colored(Blue, homepage)
        ));
    }
    if let Some(ref maintainer) = package.maintainer {
        fields.push(format!(
            "{}: {}",
            Colored(Purple, "Maintainer"),
            Colored(Cyan, maintainer)
        ));
    }
    if let Some(ref email) = package.email {
        fields.push(format!(
            "{}: {}",
            Colored(Purple, "Email"),
            Colored(Cyan, email)
        ));
    }
    fields.push(format!(
        "{}: {}",
        Colored(Purple, "Dependency"),
        Colored(Magenta, package.as_dependency)
    ));
    fields.push(format!(
        "{}: {}",
        Colored(Purple, "Installed"),
        Colored(Magenta, package.is_installed)
    ));

    fields.join("\n")
}
