//! Typing effect
//!
//! Reveals painted assistant text one visible character at a time. ANSI
//! escape sequences are never split, so partial output is always well formed.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Per-character delay of the web widget
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(30);

const ESC: char = '\x1b';

/// Byte offsets at which `text` may be cut, one per visible character.
/// The last offset is always `text.len()`.
pub fn reveal_steps(text: &str) -> Vec<usize> {
    let mut steps = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if ch == ESC {
            // CSI: ESC [ params final, final byte in 0x40..=0x7e
            if chars.next_if(|&(_, c)| c == '[').is_some() {
                for (_, c) in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        steps.push(i + ch.len_utf8());
    }

    // Trailing escapes (usually a reset) ride with the last character
    if let Some(last) = steps.last_mut() {
        *last = text.len();
    } else if !text.is_empty() {
        steps.push(text.len());
    }
    steps
}

#[derive(Debug, Clone, Copy)]
pub struct Typewriter {
    interval: Duration,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl Typewriter {
    /// A zero interval prints everything at once
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn is_instant(&self) -> bool {
        self.interval.is_zero()
    }

    /// Write `text` to `out` gradually. Setting `skip` flushes the rest at once.
    pub async fn type_out<W: Write>(
        &self,
        out: &mut W,
        text: &str,
        skip: &AtomicBool,
    ) -> io::Result<()> {
        if self.is_instant() {
            out.write_all(text.as_bytes())?;
            return out.flush();
        }

        let mut shown = 0;
        for end in reveal_steps(text) {
            if skip.load(Ordering::SeqCst) {
                break;
            }
            out.write_all(&text.as_bytes()[shown..end])?;
            out.flush()?;
            shown = end;
            tokio::time::sleep(self.interval).await;
        }

        out.write_all(&text.as_bytes()[shown..])?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_steps() {
        assert_eq!(reveal_steps("abc"), vec![1, 2, 3]);
        assert!(reveal_steps("").is_empty());
    }

    #[test]
    fn test_multibyte_steps() {
        let text = "é💰";
        assert_eq!(reveal_steps(text), vec![2, 6]);
    }

    #[test]
    fn test_escapes_are_atomic() {
        let text = "\x1b[1mab\x1b[0m";
        let steps = reveal_steps(text);
        assert_eq!(steps.len(), 2);
        // First cut lands after the bold code and one character
        assert_eq!(&text[..steps[0]], "\x1b[1ma");
        assert_eq!(*steps.last().unwrap(), text.len());
    }

    #[test]
    fn test_only_escapes() {
        assert_eq!(reveal_steps("\x1b[0m"), vec![4]);
    }

    #[tokio::test]
    async fn test_type_out_writes_everything() {
        let typer = Typewriter::new(Duration::from_millis(1));
        let mut out = Vec::new();
        typer
            .type_out(&mut out, "hi **there**", &AtomicBool::new(false))
            .await
            .unwrap();
        assert_eq!(out, b"hi **there**");
    }

    #[tokio::test]
    async fn test_skip_flushes_remainder() {
        let typer = Typewriter::new(Duration::from_secs(60));
        let mut out = Vec::new();
        typer
            .type_out(&mut out, "long text", &AtomicBool::new(true))
            .await
            .unwrap();
        assert_eq!(out, b"long text");
    }

    #[tokio::test]
    async fn test_instant() {
        let typer = Typewriter::new(Duration::ZERO);
        assert!(typer.is_instant());
        let mut out = Vec::new();
        typer
            .type_out(&mut out, "now", &AtomicBool::new(false))
            .await
            .unwrap();
        assert_eq!(out, b"now");
    }
}
