// CLI argument parsing and definitions

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use orrery_workspace::{ResetMode, ResetScope};

use crate::orchestrator::Actions;

#[derive(Debug, Clone, Parser)]
#[command(name = "orrery")]
#[command(about = "Fetch, convert, build and run the solar system renderer workspace")]
#[command(version)]
pub struct Args {
    /// Remove generated workspace state, then exit
    #[arg(long, alias = "cleanse")]
    pub clear: bool,

    /// Remove generated workspace state, then continue with the pipeline
    #[arg(long)]
    pub reset: bool,

    /// Parts removed by --clear / --reset (default: all)
    #[arg(long, value_enum, value_delimiter = ',', value_name = "PART")]
    pub scope: Vec<ResetPart>,

    /// Build every declared dependency
    #[arg(long, alias = "build-freeglut")]
    pub build_depend: bool,

    /// Generate and build the renderer project
    #[arg(long)]
    pub build_proj: bool,

    /// Launch the built renderer
    #[arg(long)]
    pub run: bool,

    /// Planetary system under the data directory passed to the renderer
    #[arg(long, value_name = "NAME")]
    pub planets: Option<String>,

    /// Workspace root (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Path to the workspace configuration file (default: <root>/orrery.yaml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResetPart {
    /// Dependency cache
    Deps,
    /// Editor settings directory
    Editor,
    /// Build output directory
    Build,
    /// Textures produced by conversion
    Textures,
}

impl Args {
    /// Parse from legacy-style arguments such as `-clear` or `/planets:sol`.
    pub fn parse_legacy<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// `-clear` wins over `-reset` when both are given.
    pub fn reset_mode(&self) -> Option<ResetMode> {
        if self.clear {
            Some(ResetMode::ClearAndExit)
        } else if self.reset {
            Some(ResetMode::ResetThenContinue)
        } else {
            None
        }
    }

    pub fn reset_scope(&self) -> ResetScope {
        if self.scope.is_empty() {
            return ResetScope::all();
        }
        let mut scope = ResetScope::none();
        for part in &self.scope {
            match part {
                ResetPart::Deps => scope.dependencies = true,
                ResetPart::Editor => scope.editor = true,
                ResetPart::Build => scope.build = true,
                ResetPart::Textures => scope.textures = true,
            }
        }
        scope
    }

    pub fn actions(&self) -> Actions {
        Actions {
            reset: self.reset_mode(),
            scope: self.reset_scope(),
            build_dependencies: self.build_depend,
            build_project: self.build_proj,
            run: self.run,
            system: self.planets.clone(),
        }
    }
}

/// Flags historically spelled with a single dash.
const LEGACY_FLAGS: &[&str] = &[
    "help",
    "clear",
    "cleanse",
    "reset",
    "build-depend",
    "build-freeglut",
    "build-proj",
    "run",
];

const LEGACY_PLANETS_PREFIX: &str = "/planets:";

/// Rewrite legacy spellings into the long-flag form clap understands:
/// `-clear` becomes `--clear` and `/planets:sol` becomes `--planets=sol`.
/// The program name and anything unrecognised pass through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            let arg = arg.into();
            if index == 0 {
                return arg;
            }
            match arg.to_str() {
                Some(text) => normalize_one(text).map(OsString::from).unwrap_or(arg),
                None => arg,
            }
        })
        .collect()
}

fn normalize_one(arg: &str) -> Option<String> {
    if let Some(system) = arg.strip_prefix(LEGACY_PLANETS_PREFIX) {
        return Some(format!("--planets={system}"));
    }
    let name = arg.strip_prefix('-').filter(|rest| !rest.starts_with('-'))?;
    LEGACY_FLAGS
        .contains(&name)
        .then(|| format!("--{name}"))
}
