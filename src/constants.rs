// src/constants.rs

/// Repository API base used when none is given.
pub const DEFAULT_REPO_API: &str = "https://api.github.com/repos/MetaCubeX/meta-rules-dat";

/// Branch whose tip is listed by default.
pub const DEFAULT_BRANCH: &str = "meta";

/// Directory segments descended from the repository root by default.
pub const DEFAULT_SEGMENTS: &[&str] = &["geo", "geosite"];

/// Directory the output files land in by default.
pub const DEFAULT_OUTPUT_DIR: &str = "geosite_files_output";

/// Primary output filename (text format).
pub const DEFAULT_TEXT_FILENAME: &str = "complete_geosite_files.txt";

/// Primary output filename (JSON format).
pub const DEFAULT_JSON_FILENAME: &str = "complete_geosite_files.json";

/// Suffix subsets written next to the primary file in text mode: (suffix, filename).
pub const SUBSET_FILES: &[(&str, &str)] = &[
    (".yaml", "yaml_files_complete.txt"),
    (".list", "list_files_complete.txt"),
    (".mrs", "mrs_files_complete.txt"),
];

/// Accept header for the GitHub REST API.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Environment variable holding an optional GitHub token.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Default number of attempts per request (first try included).
pub const DEFAULT_RETRIES: u32 = 3;

/// Default base delay for exponential backoff, in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of file names echoed after the report.
pub const DEFAULT_PREVIEW: usize = 30;

/// How many providers the report lists.
pub const TOP_PROVIDERS: usize = 20;

/// The contents endpoint stops at this many entries per directory.
pub const CONTENTS_API_LIMIT: usize = 1000;

/// Provider names matched as substrings of each file's base name.
pub const KNOWN_PROVIDERS: &[&str] = &[
    "google",
    "apple",
    "microsoft",
    "amazon",
    "baidu",
    "alibaba",
    "tencent",
    "bytedance",
    "netflix",
    "youtube",
    "facebook",
    "twitter",
    "instagram",
    "telegram",
    "whatsapp",
    "discord",
    "spotify",
    "steam",
    "epic",
    "github",
    "gitlab",
    "docker",
    "kubernetes",
];
