/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_ENDPOINT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_ENDPOINT_PATH: &str = "/api/predict";

// Timeouts
pub const HEALTH_CHECK_TIMEOUT_MS: u64 = 3000;
pub const DEMO_LATENCY_MS: u64 = 1500;

// Input limits
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024; // 10MB, matches the upload hints

// UI Configuration
pub const UI_REFRESH_INTERVAL_MS: u64 = 50;
pub const UI_SCROLL_LINES: u16 = 3;
pub const UI_EVENT_CHANNEL_CAPACITY: usize = 16;
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// User-facing messages
pub const VERIFICATION_FAILED_MESSAGE: &str =
    "Verification failed. Please check the backend connection or console for details.";

// Accepted file extensions per media slot
pub const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("bmp", "image/bmp"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
];

pub const AUDIO_EXTENSIONS: &[(&str, &str)] = &[
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("m4a", "audio/mp4"),
    ("flac", "audio/flac"),
    ("webm", "audio/webm"),
];
