//! Environment overrides for replay configuration
//!
//! Kept in its own test binary since it mutates the process environment.

use lectern_replay::AppConfig;

#[test]
fn environment_overrides_file_defaults() {
    std::env::set_var("LECTERN_RESOLVER__MEDIA_AUDIO_BASE", "/static/audio");
    std::env::set_var("LECTERN_PLAYER__SKIP_SECONDS", "30");

    let config = AppConfig::load(None).expect("Failed to load config");

    std::env::remove_var("LECTERN_RESOLVER__MEDIA_AUDIO_BASE");
    std::env::remove_var("LECTERN_PLAYER__SKIP_SECONDS");

    assert_eq!(config.resolver.media_audio_base, "/static/audio");
    assert_eq!(config.player.skip_seconds, 30.0);
    assert_eq!(config.player.keyboard_step_seconds, 5.0);
    assert!(config.validate().is_ok());
}
