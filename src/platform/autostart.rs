//! "Run at login" registration.
//!
//! On Windows this is a value under
//! `HKCU\Software\Microsoft\Windows\CurrentVersion\Run`.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Name of the registry value holding the executable path.
pub const APP_NAME: &str = "AudioWidget";

/// Autostart error types.
#[derive(Debug, Error)]
pub enum AutostartError {
    #[error("Failed to register {app_name} for autostart: {reason}")]
    RegistrationFailed { app_name: String, reason: String },
}

/// Capability to register and unregister a program run at login.
pub trait AutostartRegistry {
    fn set(&self, app_name: &str, exec_path: &Path) -> Result<(), AutostartError>;

    /// Removing a registration that does not exist succeeds.
    fn remove(&self, app_name: &str) -> Result<(), AutostartError>;
}

/// Make the registry match `enabled`. Best effort: failures are logged and
/// swallowed. Returns whether the registry now matches.
pub fn apply_autostart<R: AutostartRegistry + ?Sized>(
    registry: &R,
    enabled: bool,
    exec_path: Option<PathBuf>,
) -> bool {
    let result = if enabled {
        match exec_path {
            Some(path) => registry.set(APP_NAME, &path),
            None => Err(AutostartError::RegistrationFailed {
                app_name: APP_NAME.to_string(),
                reason: "executable path unknown".to_string(),
            }),
        }
    } else {
        registry.remove(APP_NAME)
    };

    match result {
        Ok(()) => {
            info!("Autostart {}", if enabled { "enabled" } else { "disabled" });
            true
        }
        Err(e) => {
            warn!("{}", e);
            false
        }
    }
}

/// Path of the running executable, as registered for autostart.
pub fn current_exe_path() -> Option<PathBuf> {
    std::env::current_exe().ok()
}

#[cfg(windows)]
pub use windows_registry::RunKeyRegistry;

#[cfg(windows)]
mod windows_registry {
    use super::{AutostartError, AutostartRegistry};
    use std::path::Path;
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::ERROR_FILE_NOT_FOUND;
    use windows::Win32::System::Registry::{
        RegCloseKey, RegDeleteValueW, RegOpenKeyExW, RegSetValueExW, HKEY, HKEY_CURRENT_USER,
        KEY_WRITE, REG_SZ,
    };

    /// Registry-based autostart under the current user's `Run` key.
    #[derive(Debug, Default)]
    pub struct RunKeyRegistry;

    impl RunKeyRegistry {
        const RUN_KEY: &'static str = r"Software\Microsoft\Windows\CurrentVersion\Run";

        pub fn new() -> Self {
            Self
        }

        fn to_wide(s: &str) -> Vec<u16> {
            s.encode_utf16().chain(std::iter::once(0)).collect()
        }

        fn failed(app_name: &str, reason: impl Into<String>) -> AutostartError {
            AutostartError::RegistrationFailed {
                app_name: app_name.to_string(),
                reason: reason.into(),
            }
        }

        fn open_run_key(app_name: &str) -> Result<HKEY, AutostartError> {
            let run_key_path = Self::to_wide(Self::RUN_KEY);
            let mut hkey = HKEY::default();
            let result = unsafe {
                RegOpenKeyExW(
                    HKEY_CURRENT_USER,
                    PCWSTR::from_raw(run_key_path.as_ptr()),
                    0,
                    KEY_WRITE,
                    &mut hkey,
                )
            };

            if result.is_err() {
                return Err(Self::failed(app_name, "Failed to open Run key"));
            }
            Ok(hkey)
        }
    }

    impl AutostartRegistry for RunKeyRegistry {
        fn set(&self, app_name: &str, exec_path: &Path) -> Result<(), AutostartError> {
            let hkey = Self::open_run_key(app_name)?;
            let value_name = Self::to_wide(app_name);
            let exe_path_wide = Self::to_wide(&exec_path.to_string_lossy());

            let result = unsafe {
                let result = RegSetValueExW(
                    hkey,
                    PCWSTR::from_raw(value_name.as_ptr()),
                    0,
                    REG_SZ,
                    Some(std::slice::from_raw_parts(
                        exe_path_wide.as_ptr() as *const u8,
                        exe_path_wide.len() * 2,
                    )),
                );
                let _ = RegCloseKey(hkey);
                result
            };

            if result.is_err() {
                Err(Self::failed(app_name, format!("RegSetValueExW: {:?}", result)))
            } else {
                Ok(())
            }
        }

        fn remove(&self, app_name: &str) -> Result<(), AutostartError> {
            let hkey = Self::open_run_key(app_name)?;
            let value_name = Self::to_wide(app_name);

            let result = unsafe {
                let result = RegDeleteValueW(hkey, PCWSTR::from_raw(value_name.as_ptr()));
                let _ = RegCloseKey(hkey);
                result
            };

            if result.is_err() && result != ERROR_FILE_NOT_FOUND {
                Err(Self::failed(app_name, format!("RegDeleteValueW: {:?}", result)))
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
pub mod mock {
    use super::{AutostartError, AutostartRegistry};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    /// In-memory `Run` key.
    #[derive(Debug, Clone, Default)]
    pub struct MockRegistry {
        pub entries: Rc<RefCell<HashMap<String, PathBuf>>>,
        pub fail: Rc<RefCell<bool>>,
    }

    impl MockRegistry {
        pub fn get(&self, app_name: &str) -> Option<PathBuf> {
            self.entries.borrow().get(app_name).cloned()
        }

        pub fn set_failing(&self, fail: bool) {
            *self.fail.borrow_mut() = fail;
        }

        fn check(&self, app_name: &str) -> Result<(), AutostartError> {
            if *self.fail.borrow() {
                return Err(AutostartError::RegistrationFailed {
                    app_name: app_name.to_string(),
                    reason: "access denied".to_string(),
                });
            }
            Ok(())
        }
    }

    impl AutostartRegistry for MockRegistry {
        fn set(&self, app_name: &str, exec_path: &Path) -> Result<(), AutostartError> {
            self.check(app_name)?;
            self.entries
                .borrow_mut()
                .insert(app_name.to_string(), exec_path.to_path_buf());
            Ok(())
        }

        fn remove(&self, app_name: &str) -> Result<(), AutostartError> {
            self.check(app_name)?;
            self.entries.borrow_mut().remove(app_name);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockRegistry;
    use super::*;

    #[test]
    fn test_enable_registers_exe() {
        let registry = MockRegistry::default();
        let exe = PathBuf::from(r"C:\Tools\audio-widget.exe");

        assert!(apply_autostart(&registry, true, Some(exe.clone())));

        assert_eq!(registry.get(APP_NAME), Some(exe));
    }

    #[test]
    fn test_disable_removes_entry() {
        let registry = MockRegistry::default();
        apply_autostart(&registry, true, Some(PathBuf::from("a.exe")));

        assert!(apply_autostart(&registry, false, None));
        assert_eq!(registry.get(APP_NAME), None);

        // Removing again is fine
        assert!(apply_autostart(&registry, false, None));
    }

    #[test]
    fn test_failure_is_swallowed() {
        let registry = MockRegistry::default();
        registry.set_failing(true);

        assert!(!apply_autostart(&registry, true, Some(PathBuf::from("a.exe"))));
        assert!(!apply_autostart(&registry, false, None));
    }

    #[test]
    fn test_enable_without_exe_path_fails() {
        let registry = MockRegistry::default();
        assert!(!apply_autostart(&registry, true, None));
        assert_eq!(registry.get(APP_NAME), None);
    }
}
