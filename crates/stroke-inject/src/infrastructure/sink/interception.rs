//! Interception driver sink.
//!
//! `interception.dll` is loaded at runtime and its five exports used here are
//! resolved with `GetProcAddress`.  Strokes are passed to `interception_send`
//! as the `#[repr(C)]` records from `stroke_core`, which share the library's
//! `InterceptionKeyStroke` / `InterceptionMouseStroke` layouts.
//!
//! Device numbering follows the driver: keyboards are devices 1–10, mice
//! 11–20.  The first device of each kind that reports a hardware id is used
//! for the lifetime of the sink.

#![cfg(target_os = "windows")]

use std::ffi::c_void;
use std::ops::RangeInclusive;
use std::path::Path;

use stroke_core::{KeyStroke, MouseStroke};
use tracing::debug;
use windows::core::{HSTRING, PCSTR};
use windows::Win32::Foundation::{FreeLibrary, HMODULE};
use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};

use super::StartupError;
use crate::application::sequencer::{EventSink, SinkError};

type CreateContextFn = unsafe extern "C" fn() -> *mut c_void;
type DestroyContextFn = unsafe extern "C" fn(*mut c_void);
type SendFn = unsafe extern "C" fn(*mut c_void, i32, *const c_void, u32) -> i32;
type GetHardwareIdFn = unsafe extern "C" fn(*mut c_void, i32, *mut c_void, u32) -> u32;

const FIRST_KEYBOARD: i32 = 1;
const LAST_KEYBOARD: i32 = 10;
const FIRST_MOUSE: i32 = 11;
const LAST_MOUSE: i32 = 20;

/// Resolved library exports.
struct InterceptionApi {
    module: HMODULE,
    create_context: CreateContextFn,
    destroy_context: DestroyContextFn,
    send: SendFn,
    get_hardware_id: GetHardwareIdFn,
}

impl InterceptionApi {
    fn load(library: &Path) -> Result<Self, StartupError> {
        let load_error = |reason: String| StartupError::LibraryLoad {
            library: library.to_path_buf(),
            reason,
        };

        // SAFETY: LoadLibraryW receives a valid, NUL-terminated wide string.
        let module = unsafe { LoadLibraryW(&HSTRING::from(library)) }
            .map_err(|e| load_error(e.to_string()))?;

        // SAFETY: each name is NUL-terminated and the target types match the
        // prototypes in interception.h.
        match unsafe { Self::resolve_exports(module) } {
            Ok(api) => Ok(api),
            Err(reason) => {
                // SAFETY: the module was loaded above and none of its exports are kept.
                let _ = unsafe { FreeLibrary(module) };
                Err(load_error(reason))
            }
        }
    }

    /// # Safety
    ///
    /// `module` must be a loaded Interception library.
    unsafe fn resolve_exports(module: HMODULE) -> Result<Self, String> {
        Ok(Self {
            module,
            create_context: export(module, "interception_create_context\0")?,
            destroy_context: export(module, "interception_destroy_context\0")?,
            send: export(module, "interception_send\0")?,
            get_hardware_id: export(module, "interception_get_hardware_id\0")?,
        })
    }
}

/// Looks up one export and reinterprets it as the function pointer type `F`.
///
/// # Safety
///
/// `name` must be NUL-terminated and `F` must be a function pointer type
/// matching the export's real signature.
unsafe fn export<F: Copy>(module: HMODULE, name: &'static str) -> Result<F, String> {
    let proc = GetProcAddress(module, PCSTR::from_raw(name.as_ptr()))
        .ok_or_else(|| format!("missing export {}", name.trim_end_matches('\0')))?;
    Ok(std::mem::transmute_copy(&proc))
}

/// [`EventSink`] backed by one keyboard and one mouse device of the driver.
pub struct InterceptionSink {
    api: InterceptionApi,
    context: *mut c_void,
    keyboard: i32,
    mouse: i32,
}

// SAFETY: the context is an opaque table of device handles; interception_send
// issues one DeviceIoControl per call and keeps no per-thread state.
unsafe impl Send for InterceptionSink {}
unsafe impl Sync for InterceptionSink {}

impl InterceptionSink {
    /// Loads the library, creates a context and acquires both devices.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] if any step fails.
    pub fn open(library: &Path) -> Result<Self, StartupError> {
        let api = InterceptionApi::load(library)?;

        // SAFETY: create_context takes no arguments and returns NULL on failure.
        let context = unsafe { (api.create_context)() };
        let mut sink = Self {
            api,
            context,
            keyboard: 0,
            mouse: 0,
        };
        if sink.context.is_null() {
            return Err(StartupError::ContextCreation);
        }

        sink.keyboard = sink
            .first_device(FIRST_KEYBOARD..=LAST_KEYBOARD)
            .ok_or(StartupError::NoKeyboardDevice)?;
        sink.mouse = sink
            .first_device(FIRST_MOUSE..=LAST_MOUSE)
            .ok_or(StartupError::NoMouseDevice)?;
        Ok(sink)
    }

    pub fn keyboard_device(&self) -> i32 {
        self.keyboard
    }

    pub fn mouse_device(&self) -> i32 {
        self.mouse
    }

    /// First device in `devices` that reports a hardware id.
    fn first_device(&self, devices: RangeInclusive<i32>) -> Option<i32> {
        devices.into_iter().find(|&device| {
            let mut hardware_id = [0u16; 500];
            // SAFETY: the buffer is valid for the byte length passed alongside it.
            let len = unsafe {
                (self.api.get_hardware_id)(
                    self.context,
                    device,
                    hardware_id.as_mut_ptr().cast(),
                    std::mem::size_of_val(&hardware_id) as u32,
                )
            };
            len > 0
        })
    }

    fn send(&self, device: i32, stroke: *const c_void, kind: &'static str) -> Result<(), SinkError> {
        if self.context.is_null() || device == 0 {
            return Err(SinkError::DeviceUnavailable(kind));
        }
        // SAFETY: `stroke` points to one live record with the driver's layout.
        let sent = unsafe { (self.api.send)(self.context, device, stroke, 1) };
        if sent < 1 {
            return Err(SinkError::Rejected(format!(
                "{kind} device {device} accepted {sent} strokes"
            )));
        }
        Ok(())
    }
}

impl EventSink for InterceptionSink {
    fn send_keyboard_stroke(&self, stroke: KeyStroke) -> Result<(), SinkError> {
        debug!(code = stroke.code, state = stroke.state, "keyboard stroke");
        self.send(
            self.keyboard,
            (&stroke as *const KeyStroke).cast(),
            "keyboard",
        )
    }

    fn send_mouse_stroke(&self, stroke: MouseStroke) -> Result<(), SinkError> {
        debug!(state = stroke.state, flags = stroke.flags, "mouse stroke");
        self.send(self.mouse, (&stroke as *const MouseStroke).cast(), "mouse")
    }
}

impl Drop for InterceptionSink {
    fn drop(&mut self) {
        // SAFETY: the context came from create_context and is destroyed once;
        // the module stays loaded until after the last call into it.
        unsafe {
            if !self.context.is_null() {
                (self.api.destroy_context)(self.context);
            }
            let _ = FreeLibrary(self.api.module);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_library_without_exports_reports_missing_export() {
        // Arrange: a system library that is always present but is not Interception
        let library = Path::new("kernel32.dll");

        // Act
        let result = InterceptionSink::open(library);

        // Assert
        match result {
            Err(StartupError::LibraryLoad { reason, .. }) => {
                assert!(reason.contains("interception_create_context"), "got {reason}");
            }
            Err(other) => panic!("expected LibraryLoad, got {other:?}"),
            Ok(_) => panic!("kernel32.dll must not open as an interception sink"),
        }
    }

    #[test]
    fn test_open_missing_library_reports_load_failure() {
        let result = InterceptionSink::open(Path::new("no-such-interception-build.dll"));

        assert!(matches!(result, Err(StartupError::LibraryLoad { .. })));
    }
}
