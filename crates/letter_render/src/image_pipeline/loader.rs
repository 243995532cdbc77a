use std::fmt;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use log::debug;

use crate::LetterError;

/// Numeric image selector carried by the routing signal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selector(pub f64);

impl Default for Selector {
    fn default() -> Self {
        Selector(1.0)
    }
}

impl Selector {
    /// Parse `"#3"`, `"3"` or `"# 3 "` as a number literal. Empty, non-numeric
    /// and zero selectors are invalid; negative and fractional ones are kept.
    pub fn parse(signal: &str) -> Result<Selector, LetterError> {
        let literal = signal.replacen('#', "", 1);
        let value = number(literal.trim());
        if value.is_nan() || value == 0.0 {
            return Err(LetterError::SelectorInvalid(signal.to_owned()));
        }
        Ok(Selector(value))
    }

    /// Like [`Selector::parse`], falling back to the first image.
    pub fn from_route(signal: Option<&str>) -> Selector {
        let Some(signal) = signal else {
            return Selector::default();
        };

        Selector::parse(signal).unwrap_or_else(|err| {
            debug!("{err}, using the default image");
            Selector::default()
        })
    }

    /// `<dir>/image-<n>.<extension>`
    pub fn image_path(&self, dir: &Path, extension: &str) -> PathBuf {
        dir.join(format!("image-{self}.{extension}"))
    }
}

/// Integral selectors print without a fractional part.
impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            n if n == f64::INFINITY => f.write_str("Infinity"),
            n if n == f64::NEG_INFINITY => f.write_str("-Infinity"),
            n => write!(f, "{n}"),
        }
    }
}

/// Value of a trimmed number literal, NaN when it is not one. The empty
/// literal is zero.
fn number(literal: &str) -> f64 {
    if literal.is_empty() {
        return 0.0;
    }

    match literal {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {},
    }

    let prefixed = match literal.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = prefixed {
        let digits = &literal[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return u128::from_str_radix(digits, radix).map_or(f64::INFINITY, |n| n as f64);
    }

    // `f64::from_str` also takes "inf" and "nan", which are not literals here.
    let decimal = literal
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal {
        return f64::NAN;
    }
    literal.parse().unwrap_or(f64::NAN)
}

/// Image handed over by the file picker.
#[derive(Clone, Debug)]
pub enum UserFile {
    Path(PathBuf),
    Blob(Vec<u8>),
}

/// What a pipeline run should display.
#[derive(Clone, Debug)]
pub enum ImageRequest {
    /// Routing signal such as `"#3"`; `None` when the route carries none.
    Route(Option<String>),
    /// File picker result; `None` when the picker produced no file.
    File(Option<UserFile>),
}

pub async fn read_bytes(path: &Path) -> Result<Vec<u8>, LetterError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| LetterError::Read { path: path.to_path_buf(), source })
}

pub async fn read_user_file(file: UserFile) -> Result<Vec<u8>, LetterError> {
    match file {
        UserFile::Path(path) => read_bytes(&path).await,
        UserFile::Blob(bytes) => {
            tokio::task::yield_now().await;
            Ok(bytes)
        },
    }
}

/// Decode an encoded image, yielding to other runs first.
pub async fn decode(bytes: &[u8]) -> Result<DynamicImage, LetterError> {
    tokio::task::yield_now().await;

    let image = image::load_from_memory(bytes)?;
    let (w, h) = image.dimensions();
    debug!("decoded source image {}x{}", w, h);
    Ok(image)
}
