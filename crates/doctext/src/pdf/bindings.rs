use super::error::PdfError;
use once_cell::sync::Lazy;
use pdfium_render::prelude::*;
use std::sync::Mutex;

/// Outcome of the first binding attempt.
enum InitializationState {
    Uninitialized,
    Initialized,
    Failed(String),
}

static PDFIUM_STATE: Lazy<Mutex<InitializationState>> = Lazy::new(|| Mutex::new(InitializationState::Uninitialized));

/// Bind to the system pdfium library.
///
/// The first call records whether binding works; a failed first attempt is
/// reported again on later calls without retrying.
pub(crate) fn bind_pdfium(
    map_err: fn(String) -> PdfError,
    context: &'static str,
) -> Result<Box<dyn PdfiumLibraryBindings>, PdfError> {
    let mut state = PDFIUM_STATE
        .lock()
        .map_err(|e| map_err(format!("Failed to acquire lock on Pdfium state ({}): {}", context, e)))?;

    match &*state {
        InitializationState::Failed(err) => Err(map_err(format!(
            "Pdfium initialization previously failed ({}): {}",
            context, err
        ))),
        InitializationState::Initialized => Pdfium::bind_to_system_library()
            .map_err(|e| map_err(format!("Failed to create Pdfium bindings ({}): {}", context, e))),
        InitializationState::Uninitialized => match Pdfium::bind_to_system_library() {
            Ok(bindings) => {
                tracing::debug!(context, "Bound system Pdfium library");
                *state = InitializationState::Initialized;
                Ok(bindings)
            }
            Err(e) => {
                let message = e.to_string();
                *state = InitializationState::Failed(message.clone());
                Err(map_err(format!("Pdfium initialization failed ({}): {}", context, message)))
            }
        },
    }
}
