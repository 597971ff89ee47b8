//! Repository matching.
//!
//! Each unmanaged app is looked up in the Chocolatey repository by its
//! display name, exact search first and substring search second. The first
//! line of the first search that returns one wins. There is no scoring and
//! no caching, so every app costs up to two `choco search` calls.

use crate::config::Settings;
use crate::inventory::parse_package_line;
use crate::reconcile::UnmanagedApp;
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

/// A repository package believed to correspond to an unmanaged app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub app_name: String,
    pub app_version: String,
    pub package_id: String,
    pub package_version: String,
}

/// How a repository search is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// `--exact`: the name must equal a package id.
    Exact,
    /// Substring search over ids, titles and descriptions.
    Fuzzy,
}

impl SearchMode {
    fn args(self, name: &str) -> Vec<&str> {
        match self {
            Self::Exact => vec!["search", name, "--exact", "--limit-output"],
            Self::Fuzzy => vec!["search", name, "--limit-output"],
        }
    }
}

/// Run one search and return the `(id, version)` from its first line.
///
/// A first line with a blank id counts as a miss.
pub fn search_repository(
    runner: &dyn CommandRunner,
    settings: &Settings,
    name: &str,
    mode: SearchMode,
) -> Option<(String, String)> {
    let result = runner.run(&settings.choco, &mode.args(name));

    if !result.success || result.stdout.trim().is_empty() {
        return None;
    }

    let first = result.stdout.trim().lines().next()?;
    parse_package_line(first)
        .map(|(id, version)| (id.trim().to_string(), version.trim().to_string()))
        .filter(|(id, _)| !id.is_empty())
}

/// Find a repository package for one app, exact search first.
pub fn match_app(
    runner: &dyn CommandRunner,
    settings: &Settings,
    app: &UnmanagedApp,
) -> Option<Match> {
    let (package_id, package_version) =
        search_repository(runner, settings, &app.name, SearchMode::Exact)
            .or_else(|| search_repository(runner, settings, &app.name, SearchMode::Fuzzy))?;

    tracing::debug!("Matched '{}' to {} {}", app.name, package_id, package_version);

    Some(Match {
        app_name: app.name.clone(),
        app_version: app.version.clone(),
        package_id,
        package_version,
    })
}

/// Match every unmanaged app in order, reporting progress as it goes.
///
/// Progress is shown every `settings.progress_every` apps and after the
/// last one. An empty result means nothing could be matched.
pub fn find_matches(
    runner: &dyn CommandRunner,
    settings: &Settings,
    apps: &[UnmanagedApp],
    ui: &mut dyn UserInterface,
) -> Vec<Match> {
    let total = apps.len();
    let every = settings.progress_every.max(1);
    let mut matches = Vec::new();

    for (i, app) in apps.iter().enumerate() {
        let current = i + 1;
        if current % every == 0 || current == total {
            ui.show_progress(current, total);
        }

        match match_app(runner, settings, app) {
            Some(found) => matches.push(found),
            None => tracing::debug!("No repository package for '{}'", app.name),
        }
    }

    matches
}
