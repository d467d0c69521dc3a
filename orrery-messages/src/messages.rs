//! Central registry for all user-facing message templates.
//!
//! Templates use `{variable}` syntax for runtime values, which are
//! substituted by the `MessageBuilder` through `msg!`.
//!
//! ```rust
//! use orrery_messages::messages::MESSAGES;
//!
//! let msg = MESSAGES.reset.complete;
//! let msg = MESSAGES.assets.summary;
//! ```

pub struct CommonMessages {
    pub help_hint: &'static str,
    pub platform_detected: &'static str,
    pub platform_no_build: &'static str,
    pub pipeline_complete: &'static str,
}

pub struct ResetMessages {
    pub clearing: &'static str,
    pub complete: &'static str,
    pub removed: &'static str,
    pub textures_removed: &'static str,
}

pub struct AssetMessages {
    pub converted: &'static str,
    pub converting: &'static str,
    pub data_root_missing: &'static str,
    pub failed: &'static str,
    pub summary: &'static str,
}

pub struct ProvisionMessages {
    pub already: &'static str,
    pub fetching: &'static str,
    pub ready: &'static str,
    pub resuming: &'static str,
    pub revision_drift: &'static str,
    pub tool_missing: &'static str,
}

pub struct BuildMessages {
    pub dependency_building: &'static str,
    pub dependency_built: &'static str,
    pub dependency_failed: &'static str,
    pub project_building: &'static str,
    pub project_built: &'static str,
    pub project_failed: &'static str,
    pub toolchain_found: &'static str,
}

pub struct RunMessages {
    pub binary_missing: &'static str,
    pub launching: &'static str,
    pub no_system: &'static str,
}

pub struct Messages {
    pub common: CommonMessages,
    pub reset: ResetMessages,
    pub assets: AssetMessages,
    pub provision: ProvisionMessages,
    pub build: BuildMessages,
    pub run: RunMessages,
}

pub const MESSAGES: Messages = Messages {
    common: CommonMessages {
        help_hint: "Run with -help for usage",
        platform_detected: "Operating System family: {platform}",
        platform_no_build: "No build actions on {platform}; build and run steps skipped",
        pipeline_complete: "Workspace is up to date",
    },
    reset: ResetMessages {
        clearing: "Clearing workspace ({scope})...",
        complete: "Workspace cleared",
        removed: "Removed {path}",
        textures_removed: "Removed {count} generated texture(s)",
    },
    assets: AssetMessages {
        converted: "Converted {target}",
        converting: "Converting textures under {root}...",
        data_root_missing: "Data directory {root} not found; texture conversion skipped",
        failed: "Could not convert {source}: {error}",
        summary: "Textures: {converted} converted, {skipped} already present, {failed} failed",
    },
    provision: ProvisionMessages {
        already: "{name} already provisioned ({status})",
        fetching: "Fetching {name} at {revision}...",
        ready: "{name} is ready",
        resuming: "Resuming {name} from {status}",
        revision_drift: "{name} was provisioned at {recorded} but {revision} is pinned; run -reset to refetch",
        tool_missing: "{tool} was not found on PATH; {name} cannot be provisioned without it",
    },
    build: BuildMessages {
        dependency_building: "Building dependency {name}...",
        dependency_built: "Built {name}",
        dependency_failed: "Compilation of the {name} library was unsuccessful.",
        project_building: "Building {name}...",
        project_built: "Built {name}",
        project_failed: "Compilation of {name} was unsuccessful.",
        toolchain_found: "Using toolchain {version} ({script})",
    },
    run: RunMessages {
        binary_missing: "Renderer binary not found at {path}; build it with -build-proj",
        launching: "Launching {binary} with system '{system}'",
        no_system: "No planetary system found under {root}",
    },
};
