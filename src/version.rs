//! Build metadata stamped in by `build.rs`

use std::fmt;

/// Where and from what this binary was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub commit: &'static str,
    pub branch: &'static str,
    /// `None` when git was unavailable at build time
    pub dirty: Option<bool>,
    pub built_at: &'static str,
    pub profile: &'static str,
    pub target: &'static str,
    pub host: &'static str,
    pub rustc: &'static str,
}

impl BuildInfo {
    /// Semver with the commit as build metadata, e.g. `0.1.0+1a2b3c4d`.
    pub fn tag(&self) -> String {
        match self.dirty {
            Some(true) => format!("{}+{}.dirty", self.version, self.commit),
            _ => format!("{}+{}", self.version, self.commit),
        }
    }

    /// The target triple, noting the host when cross-compiled.
    fn platform(&self) -> String {
        if self.target == self.host {
            self.target.to_string()
        } else {
            format!("{} (cross-built on {})", self.target, self.host)
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = match self.dirty {
            Some(true) => ", uncommitted changes",
            Some(false) => "",
            None => ", tree state unknown",
        };

        writeln!(f, "{} {}", self.name, self.tag())?;
        writeln!(f, "  commit    {} on {}{}", self.commit, self.branch, tree)?;
        writeln!(f, "  built     {} [{}]", self.built_at, self.profile)?;
        writeln!(f, "  platform  {}", self.platform())?;
        writeln!(f, "  compiler  {}", self.rustc)
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        commit: env!("RAID_ROSTER_GIT_HASH"),
        branch: env!("RAID_ROSTER_GIT_BRANCH"),
        dirty: match env!("RAID_ROSTER_GIT_DIRTY") {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        built_at: env!("RAID_ROSTER_BUILD_TIMESTAMP"),
        profile: env!("RAID_ROSTER_PROFILE"),
        target: env!("RAID_ROSTER_TARGET"),
        host: env!("RAID_ROSTER_HOST"),
        rustc: env!("RAID_ROSTER_RUSTC_VERSION"),
    }
}

pub fn print_version() {
    print!("{}", build_info());
}
