//! Timed playback driver for the `play` command.

use std::io::Write;
use std::time::Duration;

use spanstep_core::{Clock, PlaybackController};
use tracing::{debug, instrument};

use super::CliError;

/// Runs autoplay to completion, writing each step as it fires.
///
/// `sleep` is called with the time remaining until the next scheduled
/// advance; the `play` command passes [`std::thread::sleep`]. Playback stops
/// after `max_steps` applied steps when a limit is given. Returns the number of
/// steps applied.
///
/// # Errors
/// Returns [`CliError::Output`] when writing to `writer` fails.
///
/// # Examples
/// ```
/// use spanstep_cli::cli::drive_playback;
/// use spanstep_core::{Graph, ManualClock, PlaybackBuilder};
///
/// let run = Graph::sample().run_kruskal().expect("sample graph is valid");
/// let clock = ManualClock::new();
/// let mut playback = PlaybackBuilder::new()
///     .build_with_clock(run.shared_steps(), clock.clone())
///     .expect("default configuration is valid");
/// let mut out = Vec::new();
/// let applied = drive_playback(&mut playback, Some(3), &mut out, |wait| clock.advance(wait))
///     .expect("writing to a Vec cannot fail");
/// assert_eq!(applied, 3);
/// assert_eq!(playback.cursor(), 3);
/// ```
#[instrument(name = "cli.play", err, skip_all, fields(total = playback.len(), speed = playback.speed()))]
pub fn drive_playback<C: Clock>(
    playback: &mut PlaybackController<C>,
    max_steps: Option<usize>,
    mut writer: impl Write,
    mut sleep: impl FnMut(Duration),
) -> Result<usize, CliError> {
    let total = playback.len();
    let mut applied = 0_usize;
    if max_steps == Some(0) || !playback.play() {
        return Ok(applied);
    }

    while let Some(wait) = playback.time_until_next_advance() {
        sleep(wait);
        let Some(index) = playback.poll() else {
            continue;
        };
        applied += 1;
        let message = playback.message();
        let cost = playback.visible_cost();
        writeln!(writer, "[{}/{total}] {message} [cost {cost}]", index + 1)?;
        writer.flush()?;
        if max_steps.is_some_and(|limit| applied >= limit) {
            playback.pause();
            debug!(applied, "step limit reached");
        }
    }

    Ok(applied)
}
