#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(windows)]
fn main() -> anyhow::Result<()> {
    use audio_widget::audio::{ComGuard, DeviceEnumerator};
    use audio_widget::platform::{settings, RunKeyRegistry, SettingsStore};
    use audio_widget::ui::AudioWidget;
    use audio_widget::{logging, AppState};
    use tracing::{error, warn};

    // The widget still runs without a log file
    let _log_guard = match logging::init_logging(&settings::app_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging unavailable: {:#}", e);
            None
        }
    };

    // COM stays initialized for the whole event loop
    let _com = match ComGuard::new() {
        Ok(com) => Some(com),
        Err(e) => {
            warn!("{}", e);
            None
        }
    };
    let audio = DeviceEnumerator::lazy();

    let state = AppState::new(audio, SettingsStore::default_location(), RunKeyRegistry::new());
    let options = AudioWidget::native_options(state.initial_position());

    eframe::run_native(
        "Audio Widget",
        options,
        Box::new(move |_cc| Ok(Box::new(AudioWidget::new(state)))),
    )
    .map_err(|e| {
        error!("Event loop failed: {}", e);
        anyhow::anyhow!("Event loop failed: {}", e)
    })?;

    tracing::info!("Audio Widget exited");
    Ok(())
}

#[cfg(not(windows))]
fn main() {
    eprintln!("audio-widget only runs on Windows");
    std::process::exit(1);
}
