//! Test logging for integration test binaries.
//!
//! Call [`init`] from a `#[ctor::ctor]` in `tests/common/mod.rs`. Repeated
//! calls are no-ops.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install the test subscriber.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `"warn"`. Setting
/// `TEST_LOG_FORMAT=json` switches to one JSON object per line, which is
/// easier to grep when a long self-play run fails.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        let json = std::env::var("TEST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

        let builder = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time();
        if json {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
