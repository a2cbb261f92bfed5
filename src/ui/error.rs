use krnr::domain::ports::{ExecError, RepositoryError};
use krnr::KrnrError;

use crate::ui::json::events::ErrorEvent;
use crate::ui::theme;

/// Stable machine-readable category for `--json` errors.
pub fn error_kind(err: &anyhow::Error) -> Option<&'static str> {
    let krnr = err.downcast_ref::<KrnrError>()?;
    Some(match krnr {
        KrnrError::NotFound(_) | KrnrError::VersionNotFound { .. } => "not_found",
        KrnrError::InvalidName(_) => "invalid_name",
        KrnrError::Repository(RepositoryError::InvalidName(_)) => "invalid_name",
        KrnrError::Repository(RepositoryError::NameInUse(_)) => "name_in_use",
        KrnrError::Repository(_) => "storage",
        KrnrError::MissingParams(_)
        | KrnrError::MissingParamValue(_)
        | KrnrError::InvalidParamFlag(_) => "params",
        KrnrError::Refused { .. } => "refused",
        KrnrError::Exec(ExecError::TimedOut(_)) => "timeout",
        KrnrError::Exec(_) => "exec",
        KrnrError::Interrupted | KrnrError::Aborted => "aborted",
        KrnrError::UnknownPolicy(_)
        | KrnrError::DestinationExists
        | KrnrError::SourceNotFound { .. } => "transfer",
        KrnrError::Install(_) => "install",
        _ => return None,
    })
}

/// Human form: `✗ message`, with `anyhow` context chained by `: `.
pub fn format_error(err: &anyhow::Error, color: bool, unicode: bool) -> String {
    let icon = theme::paint(theme::Icon::Error.glyph(unicode), theme::colors::ERROR, color);
    format!("{} {:#}\n", icon, err)
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let mut event = ErrorEvent::new(format!("{:#}", err));
        if let Some(kind) = error_kind(err) {
            event = event.with_kind(kind);
        }
        let _ = crate::ui::json::emit_event(&event);
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    eprint!(
        "{}",
        format_error(err, caps.supports_color && !caps.is_ci, caps.supports_unicode)
    );
}
