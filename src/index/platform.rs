use std::fmt;

/// Operating system and architecture a source is built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Platform {
    Unknown,
    #[default]
    Generic,
    Windows,
    Win32,
    Win64,
    Darwin,
    Darwin32,
    Darwin64,
    Linux,
    Linux32,
    Linux64,
}

impl Platform {
    /// Parse a platform tag. Unrecognized text maps to `Unknown`.
    pub fn parse(text: &str) -> Self {
        match text {
            "all" => Platform::Generic,
            "windows" => Platform::Windows,
            "win32" => Platform::Win32,
            "win64" => Platform::Win64,
            "darwin" => Platform::Darwin,
            "darwin32" => Platform::Darwin32,
            "darwin64" => Platform::Darwin64,
            "linux" => Platform::Linux,
            "linux32" => Platform::Linux32,
            "linux64" => Platform::Linux64,
            _ => Platform::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Unknown => "unknown",
            Platform::Generic => "all",
            Platform::Windows => "windows",
            Platform::Win32 => "win32",
            Platform::Win64 => "win64",
            Platform::Darwin => "darwin",
            Platform::Darwin32 => "darwin32",
            Platform::Darwin64 => "darwin64",
            Platform::Linux => "linux",
            Platform::Linux32 => "linux32",
            Platform::Linux64 => "linux64",
        }
    }

    /// Whether files built for this platform can be installed on the
    /// running host.
    pub fn matches_host(self) -> bool {
        const BITS32: bool = cfg!(target_pointer_width = "32");
        const BITS64: bool = cfg!(target_pointer_width = "64");
        const WINDOWS: bool = cfg!(windows);
        const DARWIN: bool = cfg!(target_os = "macos");
        const LINUX: bool = cfg!(target_os = "linux");

        match self {
            Platform::Unknown => false,
            Platform::Generic => true,
            Platform::Windows => WINDOWS,
            Platform::Win32 => WINDOWS && BITS32,
            Platform::Win64 => WINDOWS && BITS64,
            Platform::Darwin => DARWIN,
            Platform::Darwin32 => DARWIN && BITS32,
            Platform::Darwin64 => DARWIN && BITS64,
            Platform::Linux => LINUX,
            Platform::Linux32 => LINUX && BITS32,
            Platform::Linux64 => LINUX && BITS64,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
