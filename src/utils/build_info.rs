/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    pub fn lines(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("Version", self.version),
            ("Commit", self.git_hash),
            ("Tree", self.git_status),
            ("Built", self.timestamp),
            ("Target", self.target),
            ("Profile", self.profile),
            ("Compiler", self.rustc),
        ]
    }
}

pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: CLI_VERSION,
        git_hash: option_env!("HOTEL_INTAKE_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("HOTEL_INTAKE_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("HOTEL_INTAKE_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("HOTEL_INTAKE_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("HOTEL_INTAKE_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("HOTEL_INTAKE_BUILD_RUSTC").unwrap_or("unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matches_manifest() {
        let meta = current();
        assert_eq!(meta.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(meta.lines().len(), 7);
    }
}
