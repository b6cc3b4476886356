/// Session pacing configuration constants.
///
/// The core executes turns synchronously; these values only affect how the
/// runner schedules queued commands for presentation.
pub const COMMAND_DELAY_MS: u64 = 500; // Delay between two queued commands (in milliseconds).

/// Environment variable read for a fixed generator seed.
pub const SEED_ENV_VAR: &str = "DUNGEON_SEED";

/// Environment variable selecting the console output format (`text` or `json`).
pub const OUTPUT_ENV_VAR: &str = "DUNGEON_OUTPUT";

/// Whether the demo should print JSON lines instead of the text grid.
pub fn json_output_from_env() -> bool {
    std::env::var(OUTPUT_ENV_VAR).is_ok_and(|value| value.eq_ignore_ascii_case("json"))
}

/// Returns the seed from `DUNGEON_SEED`, if set and parseable.
pub fn seed_from_env() -> Option<u64> {
    let raw = std::env::var(SEED_ENV_VAR).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(_) => {
            log::warn!("[Config] Ignoring {}={:?}: not an unsigned integer", SEED_ENV_VAR, raw);
            None
        }
    }
}
