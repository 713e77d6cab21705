/// Entering and restoring the terminal around the render loop
use crossterm::{
    cursor,
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};
use std::io::{self, stdout};
use tracing::warn;
use wire3d_core::{DeviceError, Error};

/// A terminal state that can be switched into and back out of.
pub trait TerminalMode {
    fn enter(&mut self) -> io::Result<()>;

    /// Undo `enter`. Must be safe to call after a partial or failed `enter`.
    fn leave(&mut self) -> io::Result<()>;
}

/// Raw mode on the alternate screen with mouse, focus and (optionally)
/// key release reporting.
pub struct RawTerminal {
    release_events: bool,
}

impl RawTerminal {
    pub fn new(release_events: bool) -> Self {
        Self { release_events }
    }
}

impl TerminalMode for RawTerminal {
    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture,
            EnableFocusChange
        )?;
        if self.release_events {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )?;
        }
        Ok(())
    }

    /// Every step runs even if an earlier one fails; the first error wins.
    fn leave(&mut self) -> io::Result<()> {
        let mut first = Ok(());
        if self.release_events {
            keep_first(&mut first, execute!(stdout(), PopKeyboardEnhancementFlags));
        }
        keep_first(
            &mut first,
            execute!(
                stdout(),
                DisableFocusChange,
                DisableMouseCapture,
                cursor::Show,
                terminal::LeaveAlternateScreen
            ),
        );
        keep_first(&mut first, terminal::disable_raw_mode());
        first
    }
}

fn keep_first(first: &mut io::Result<()>, next: io::Result<()>) {
    if first.is_ok() {
        *first = next;
    }
}

/// Run `body` inside `mode`, always leaving it afterwards.
///
/// An error from `enter` skips the body. An error from `enter` or the body
/// takes precedence over one from `leave`, which is then only logged.
pub fn with_restored<M, T>(
    mode: &mut M,
    body: impl FnOnce() -> Result<T, Error>,
) -> Result<T, Error>
where
    M: TerminalMode,
{
    let result = match mode.enter() {
        Ok(()) => body(),
        Err(e) => Err(DeviceError::from(e).into()),
    };

    match (result, mode.leave()) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(DeviceError::from(e).into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(restore)) => {
            warn!(error = %restore, "terminal restore failed");
            Err(e)
        }
    }
}
