use anyhow::{Context, Result};

use clockface_engine::logging::{init_logging, LoggingConfig};
use clockface_ui::prelude::*;

/// Environment variable consulted when no timezone argument is given.
const TZ_ENV: &str = "CLOCKFACE_TZ";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let zone = resolve_timezone(std::env::args().nth(1), std::env::var(TZ_ENV).ok())
        .context("invalid timezone")?;

    println!();
    println!("  clockface  ·  {zone} time  ·  Esc to quit");
    println!();

    let mut app = Application::new()
        .title("Clockface")
        .size(480.0, 480.0)
        .timezone(zone);

    match load_font() {
        Some(font) => app = app.font(font),
        None => log::warn!("no system font found; numerals disabled"),
    }

    app.run()
}

/// Picks the timezone from the first CLI argument, then `CLOCKFACE_TZ`,
/// then falls back to the local zone. Blank values count as absent.
fn resolve_timezone(
    arg: Option<String>,
    env: Option<String>,
) -> Result<TimeZoneSetting, TimeZoneError> {
    match arg.or(env).filter(|s| !s.trim().is_empty()) {
        Some(name) => name.parse(),
        None => Ok(TimeZoneSetting::Local),
    }
}

fn load_font() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_wins_over_environment() {
        assert_eq!(
            resolve_timezone(Some("UTC".into()), Some("Asia/Tokyo".into())),
            Ok(TimeZoneSetting::Utc)
        );
    }

    #[test]
    fn environment_used_without_argument() {
        assert_eq!(
            resolve_timezone(None, Some("local".into())),
            Ok(TimeZoneSetting::Local)
        );
    }

    #[test]
    fn nothing_configured_is_local() {
        assert_eq!(resolve_timezone(None, None), Ok(TimeZoneSetting::Local));
        assert_eq!(resolve_timezone(None, Some("  ".into())), Ok(TimeZoneSetting::Local));
    }

    #[test]
    fn bad_name_is_reported() {
        let err = resolve_timezone(Some("Nowhere/Special".into()), None).unwrap_err();
        assert_eq!(err.input, "Nowhere/Special");
    }
}
