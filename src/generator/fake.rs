//! Synthetic field values: short codes, slugs, IPv4 addresses, user agents.
//!
//! Every function takes the caller's RNG so output is reproducible.

use std::net::Ipv4Addr;

use rand::Rng;
use rand::seq::IndexedRandom;
use uuid::Uuid;

use crate::utils::ip::is_public_v4;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

/// Short code pattern: `?` is an ASCII letter, `#` is a digit.
pub const SHORT_CODE_PATTERN: &str = "????##";

/// Number of distinct codes [`SHORT_CODE_PATTERN`] can produce (52^4 * 10^2).
pub const SHORT_CODE_SPACE: u64 = 52 * 52 * 52 * 52 * 10 * 10;

const SLUG_WORDS: [&str; 48] = [
    "about", "action", "answer", "around", "better", "budget", "build", "career", "change",
    "church", "common", "course", "degree", "design", "detail", "energy", "every", "example",
    "family", "figure", "future", "garden", "ground", "growth", "health", "history", "itself",
    "leader", "letter", "market", "member", "method", "moment", "nature", "office", "people",
    "period", "person", "policy", "public", "reason", "record", "report", "result", "season",
    "simple", "source", "system",
];

const DESKTOP_PLATFORMS: [&str; 5] = [
    "Windows NT 10.0; Win64; x64",
    "Windows NT 6.1; WOW64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "X11; Linux x86_64",
    "X11; Ubuntu; Linux i686",
];

const ANDROID_DEVICES: [&str; 6] = [
    "SM-G991B", "Pixel 7", "Pixel 6a", "SM-A536B", "Redmi Note 11", "CPH2213",
];

/// 按模板生成随机字符串（`?` 字母，`#` 数字，其余字符原样保留）
pub fn bothify<R: Rng + ?Sized>(rng: &mut R, pattern: &str) -> String {
    pattern
        .chars()
        .map(|c| match c {
            '?' => LETTERS[rng.random_range(0..LETTERS.len())] as char,
            '#' => DIGITS[rng.random_range(0..DIGITS.len())] as char,
            other => other,
        })
        .collect()
}

pub fn short_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    bothify(rng, SHORT_CODE_PATTERN)
}

/// Three lowercase words joined by `-`.
pub fn slug<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..3)
        .filter_map(|_| SLUG_WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn original_url<R: Rng + ?Sized>(rng: &mut R, domains: &[String]) -> Option<String> {
    let domain = domains.choose(rng)?;
    Some(format!("https://{}/{}", domain, slug(rng)))
}

/// UUID v4 built from RNG bytes.
pub fn uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.random()).into_uuid()
}

/// A random public unicast IPv4 address.
pub fn public_ipv4<R: Rng + ?Sized>(rng: &mut R) -> Ipv4Addr {
    loop {
        let candidate = Ipv4Addr::from(rng.random::<u32>());
        if is_public_v4(candidate) {
            return candidate;
        }
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, options: &[&'static str]) -> &'static str {
    options.choose(rng).copied().unwrap_or_default()
}

fn chrome<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{}.0.{}.{} Safari/537.36",
        pick(rng, &DESKTOP_PLATFORMS),
        rng.random_range(100..=131),
        rng.random_range(4000..=6800),
        rng.random_range(0..=200)
    )
}

fn firefox<R: Rng + ?Sized>(rng: &mut R) -> String {
    let version = rng.random_range(90..=133);
    format!(
        "Mozilla/5.0 ({}; rv:{}.0) Gecko/20100101 Firefox/{}.0",
        pick(rng, &DESKTOP_PLATFORMS),
        version,
        version
    )
}

fn mobile_safari<R: Rng + ?Sized>(rng: &mut R) -> String {
    let major = rng.random_range(14..=18);
    let minor = rng.random_range(0..=7);
    let device = if rng.random_bool(0.8) { "iPhone" } else { "iPad" };
    let os = if device == "iPhone" { "iPhone OS" } else { "OS" };
    format!(
        "Mozilla/5.0 ({}; CPU {} {}_{} like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/{}.0 Mobile/15E148 Safari/604.1",
        device, os, major, minor, major
    )
}

fn android_chrome<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "Mozilla/5.0 (Linux; Android {}; {}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{}.0.{}.{} Mobile Safari/537.36",
        rng.random_range(10..=15),
        pick(rng, &ANDROID_DEVICES),
        rng.random_range(100..=131),
        rng.random_range(4000..=6800),
        rng.random_range(0..=200)
    )
}

fn opera<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "Opera/9.80 ({}) Presto/2.12.{} Version/12.{}",
        pick(rng, &DESKTOP_PLATFORMS),
        rng.random_range(300..=400),
        rng.random_range(10..=18)
    )
}

/// A plausible browser user-agent string.
pub fn user_agent<R: Rng + ?Sized>(rng: &mut R) -> String {
    match rng.random_range(0..5) {
        0 => chrome(rng),
        1 => firefox(rng),
        2 => mobile_safari(rng),
        3 => android_chrome(rng),
        _ => opera(rng),
    }
}
