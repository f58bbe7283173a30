//! User-Friendly Error Formatting
//!
//! Turns errors from the replay binary into messages with troubleshooting
//! hints.

use std::fmt::Write;

use crate::input::error::{classify_error, EngineError, ErrorType};

/// Format error for user consumption
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "╔════════════════════════════════════════════════════════════╗"
    )
    .ok();
    writeln!(
        &mut output,
        "║                     ERROR                                  ║"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();
    writeln!(&mut output).ok();

    match error_type(error) {
        Some(ErrorType::Template) => format_template_error(&mut output),
        Some(ErrorType::Event) => format_event_error(&mut output),
        Some(ErrorType::Dispatch) => format_dispatch_error(&mut output),
        Some(ErrorType::Io) => format_io_error(&mut output),
        None if error.to_string().contains("config") => format_config_error(&mut output),
        None => {
            writeln!(&mut output, "An unexpected error occurred.").ok();
        }
    }

    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Technical Details:").ok();
    writeln!(&mut output).ok();
    writeln!(&mut output, "{:#}", error).ok();
    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "  Run with --verbose for detailed logs: keystroke-engine -vv"
    )
    .ok();

    output
}

/// Classification of the first engine error in the chain
fn error_type(error: &anyhow::Error) -> Option<ErrorType> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<EngineError>())
        .map(classify_error)
}

fn format_template_error(output: &mut String) {
    writeln!(output, "Template Error").ok();
    writeln!(output).ok();
    writeln!(output, "The action template could not be decoded.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Button or encoder id outside 0-255").ok();
    writeln!(
        output,
        "  2. Keystroke written as a string instead of {{ keycode = N }}"
    )
    .ok();
    writeln!(
        output,
        "  3. Encoder direction other than clockwise / counter_clockwise"
    )
    .ok();
}

fn format_event_error(output: &mut String) {
    writeln!(output, "Event Script Error").ok();
    writeln!(output).ok();
    writeln!(output, "Each line must be one of:").ok();
    writeln!(output).ok();
    writeln!(output, "  button <id> press|release").ok();
    writeln!(output, "  encoder <id> <count>      (count -128..127)").ok();
}

fn format_dispatch_error(output: &mut String) {
    writeln!(output, "Keystroke Dispatch Error").ok();
    writeln!(output).ok();
    writeln!(
        output,
        "The keystroke dispatch thread could not be started or stopped cleanly."
    )
    .ok();
    writeln!(output, "  → Try dispatch = \"inline\" in the [engine] section").ok();
}

fn format_io_error(output: &mut String) {
    writeln!(output, "File Error").ok();
    writeln!(output).ok();
    writeln!(output, "  → Check that the template and script paths exist").ok();
    writeln!(output, "  → Check file permissions").ok();
}

fn format_config_error(output: &mut String) {
    writeln!(output, "Configuration Error").ok();
    writeln!(output).ok();
    writeln!(output, "  → dispatch must be \"inline\" or \"queued\"").ok();
    writeln!(
        output,
        "  → level must be trace, debug, info, warn or error"
    )
    .ok();
}
