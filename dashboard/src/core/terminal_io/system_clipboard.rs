// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::DEBUG_DASHBOARD_COPY_PASTE;

/// Read the system clipboard with the best provider `copypasta_ext` can find for this
/// platform. Any failure (no display server, no provider, non text content) yields an
/// empty string.
#[must_use]
pub fn get_system_clipboard_text() -> String {
    let Some(mut ctx) = copypasta_ext::try_context() else {
        DEBUG_DASHBOARD_COPY_PASTE.then(|| {
            tracing::debug!(message = "📋 No clipboard provider available");
        });
        return String::new();
    };

    match ctx.get_contents() {
        Ok(content) => {
            DEBUG_DASHBOARD_COPY_PASTE.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(
                    message = "📋📋📋 Read text from clipboard",
                    chars = %content.chars().count(),
                );
            });
            content
        }
        Err(error) => {
            DEBUG_DASHBOARD_COPY_PASTE.then(|| {
                tracing::debug!(message = "📋 Clipboard read failed", %error);
            });
            String::new()
        }
    }
}
