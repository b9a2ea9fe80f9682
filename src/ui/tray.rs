//! System tray icon management.
//!
//! Manages the system tray icon, tooltip, and context menu.

use crate::app::WidgetAction;
use crate::platform::icons::{generate_speaker_icon, ICON_SIZE};
use thiserror::Error;
use tray_icon::{
    menu::{CheckMenuItem, Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem},
    Icon, TrayIcon, TrayIconBuilder, TrayIconEvent,
};

/// Initial state for tray icon.
#[derive(Debug, Clone)]
pub struct TrayState {
    /// Tooltip text (levels + mute state)
    pub tooltip: String,

    /// Whether the speaker is muted
    pub muted: bool,

    /// Whether autostart is enabled
    pub autostart: bool,
}

/// Tray service error types.
#[derive(Debug, Error)]
pub enum TrayError {
    #[error("Failed to create tray icon: {0}")]
    CreateFailed(String),

    #[error("Failed to load icon resource")]
    IconLoadFailed,

    #[error("Tray icon not initialized")]
    NotInitialized,

    #[error("Failed to create menu: {0}")]
    MenuFailed(String),
}

/// System tray manager.
pub struct TrayManager {
    tray_icon: Option<TrayIcon>,
    customize_menu_id: Option<MenuId>,
    autostart_menu_id: Option<MenuId>,
    quit_menu_id: Option<MenuId>,
    autostart_item: Option<CheckMenuItem>,
    muted: bool,
    tooltip: String,
}

impl TrayManager {
    /// Create a new TrayManager.
    pub fn new() -> Self {
        Self {
            tray_icon: None,
            customize_menu_id: None,
            autostart_menu_id: None,
            quit_menu_id: None,
            autostart_item: None,
            muted: false,
            tooltip: String::new(),
        }
    }

    /// Create and show the tray icon.
    pub fn create(&mut self, initial_state: TrayState) -> Result<(), TrayError> {
        let icon = Self::create_icon(initial_state.muted)?;

        let menu = Menu::new();

        let customize_item = MenuItem::new("Customize", true, None);
        self.customize_menu_id = Some(customize_item.id().clone());
        menu.append(&customize_item)
            .map_err(|e| TrayError::MenuFailed(e.to_string()))?;

        let autostart_item = CheckMenuItem::new("Autostart", true, initial_state.autostart, None);
        self.autostart_menu_id = Some(autostart_item.id().clone());
        self.autostart_item = Some(autostart_item.clone());
        menu.append(&autostart_item)
            .map_err(|e| TrayError::MenuFailed(e.to_string()))?;

        menu.append(&PredefinedMenuItem::separator())
            .map_err(|e| TrayError::MenuFailed(e.to_string()))?;

        let quit_item = MenuItem::new("Quit", true, None);
        self.quit_menu_id = Some(quit_item.id().clone());
        menu.append(&quit_item)
            .map_err(|e| TrayError::MenuFailed(e.to_string()))?;

        let tray_icon = TrayIconBuilder::new()
            .with_icon(icon)
            .with_tooltip(&initial_state.tooltip)
            .with_menu(Box::new(menu))
            .build()
            .map_err(|e| TrayError::CreateFailed(e.to_string()))?;

        self.tray_icon = Some(tray_icon);
        self.muted = initial_state.muted;
        self.tooltip = initial_state.tooltip;

        Ok(())
    }

    /// Drain pending tray and menu events. Call this from the event loop.
    pub fn process_events(&self) -> Vec<WidgetAction> {
        let mut actions = Vec::new();

        // Clicks on the icon itself are not used; drain them
        while TrayIconEvent::receiver().try_recv().is_ok() {}

        while let Ok(event) = MenuEvent::receiver().try_recv() {
            if Some(&event.id) == self.customize_menu_id.as_ref() {
                actions.push(WidgetAction::OpenCustomize);
            } else if Some(&event.id) == self.autostart_menu_id.as_ref() {
                // The check item has already flipped itself
                let checked = self
                    .autostart_item
                    .as_ref()
                    .map(|item| item.is_checked())
                    .unwrap_or(false);
                actions.push(WidgetAction::SetAutostart(checked));
            } else if Some(&event.id) == self.quit_menu_id.as_ref() {
                actions.push(WidgetAction::Quit);
            }
        }

        actions
    }

    /// Update the tray icon based on speaker mute state.
    pub fn set_muted(&mut self, muted: bool) -> Result<(), TrayError> {
        if muted == self.muted {
            return Ok(());
        }
        let icon = Self::create_icon(muted)?;
        let tray = self.tray_icon.as_mut().ok_or(TrayError::NotInitialized)?;
        tray.set_icon(Some(icon))
            .map_err(|e| TrayError::CreateFailed(e.to_string()))?;
        self.muted = muted;
        Ok(())
    }

    /// Update the tooltip text.
    pub fn set_tooltip(&mut self, text: &str) -> Result<(), TrayError> {
        if text == self.tooltip {
            return Ok(());
        }
        let tray = self.tray_icon.as_mut().ok_or(TrayError::NotInitialized)?;
        tray.set_tooltip(Some(text))
            .map_err(|e| TrayError::CreateFailed(e.to_string()))?;
        self.tooltip = text.to_string();
        Ok(())
    }

    /// Update the "Autostart" menu item checkmark.
    pub fn set_autostart_checked(&mut self, checked: bool) {
        if let Some(ref item) = self.autostart_item {
            item.set_checked(checked);
        }
    }

    fn create_icon(muted: bool) -> Result<Icon, TrayError> {
        let rgba = generate_speaker_icon(muted);
        Icon::from_rgba(rgba, ICON_SIZE, ICON_SIZE).map_err(|_| TrayError::IconLoadFailed)
    }
}

impl Default for TrayManager {
    fn default() -> Self {
        Self::new()
    }
}
