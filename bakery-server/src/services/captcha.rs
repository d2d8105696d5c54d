//! Captcha service
//!
//! A bounded in-memory challenge store: entries expire after a TTL and the
//! map is capped, evicting the oldest entries when full. Sweeping happens
//! on access — no background timer. Challenges are single-use on success.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use rand::Rng;
use shared::CaptchaChallenge;

/// Challenge lifetime
const CAPTCHA_TTL: Duration = Duration::from_secs(10 * 60);
/// Maximum live challenges
const CAPTCHA_MAX_ITEMS: usize = 200;
/// Characters used in challenge texts (no easily-confused glyphs)
const CHALLENGE_CHARS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz23456789";
/// Challenge length
const CHALLENGE_LEN: usize = 5;

#[derive(Debug)]
struct CaptchaEntry {
    text: String,
    created_at: Instant,
    expires_at: Instant,
}

/// Verification result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptchaOutcome {
    /// Challenge passed and was consumed
    Ok,
    /// Unknown id or already consumed
    Missing,
    /// Challenge existed but its TTL elapsed
    Expired,
    /// Wrong answer; the challenge stays live for a retry
    Mismatch,
}

/// Bounded TTL captcha store
#[derive(Debug)]
pub struct CaptchaStore {
    entries: DashMap<String, CaptchaEntry>,
    ttl: Duration,
    capacity: usize,
}

impl CaptchaStore {
    pub fn new() -> Self {
        Self::with_limits(CAPTCHA_TTL, CAPTCHA_MAX_ITEMS)
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            capacity,
        }
    }

    /// Drop expired entries, then evict oldest entries down to capacity.
    fn sweep(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.expires_at > now);

        while self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|e| e.value().created_at)
                .map(|e| e.key().clone());
            match oldest {
                Some(key) => {
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }

    /// Issue a new challenge.
    pub fn issue(&self) -> CaptchaChallenge {
        self.sweep();

        let text = random_text();
        let id = uuid::Uuid::new_v4().simple().to_string();
        let now = Instant::now();
        self.entries.insert(
            id.clone(),
            CaptchaEntry {
                text: text.clone(),
                created_at: now,
                expires_at: now + self.ttl,
            },
        );

        CaptchaChallenge {
            id,
            data: render_svg(&text),
        }
    }

    /// Verify an answer. Comparison is case-insensitive, matching what the
    /// distorted rendering allows a human to read reliably.
    pub fn verify(&self, id: &str, value: &str) -> CaptchaOutcome {
        let Some(entry) = self.entries.get(id) else {
            return CaptchaOutcome::Missing;
        };

        if entry.expires_at <= Instant::now() {
            drop(entry);
            self.entries.remove(id);
            return CaptchaOutcome::Expired;
        }

        if !entry.text.eq_ignore_ascii_case(value.trim()) {
            return CaptchaOutcome::Mismatch;
        }

        drop(entry);
        self.entries.remove(id);
        CaptchaOutcome::Ok
    }

    /// Number of live challenges (test hook)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CaptchaStore {
    fn default() -> Self {
        Self::new()
    }
}

fn random_text() -> String {
    let mut rng = rand::thread_rng();
    (0..CHALLENGE_LEN)
        .map(|_| CHALLENGE_CHARS[rng.gen_range(0..CHALLENGE_CHARS.len())] as char)
        .collect()
}

/// Render the challenge as a small self-contained SVG: jittered glyphs
/// plus a few noise strokes.
fn render_svg(text: &str) -> String {
    let mut rng = rand::thread_rng();
    let width = 150;
    let height = 50;

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\"><rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>"
    );

    for _ in 0..3 {
        let (x1, y1) = (rng.gen_range(0..width), rng.gen_range(0..height));
        let (x2, y2) = (rng.gen_range(0..width), rng.gen_range(0..height));
        let hue = rng.gen_range(0..360);
        svg.push_str(&format!(
            "<line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" \
             stroke=\"hsl({hue},60%,60%)\" stroke-width=\"1\"/>"
        ));
    }

    for (i, c) in text.chars().enumerate() {
        let x = 15 + i as i32 * 25 + rng.gen_range(-3..4);
        let y = 32 + rng.gen_range(-6..7);
        let rotate = rng.gen_range(-20..21);
        let hue = rng.gen_range(0..360);
        svg.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" font-family=\"monospace\" font-size=\"28\" \
             fill=\"hsl({hue},70%,40%)\" transform=\"rotate({rotate} {x} {y})\">{c}</text>"
        ));
    }

    svg.push_str("</svg>");
    svg
}
