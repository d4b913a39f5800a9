// ABOUTME: Display hints describing the requested on-screen size of an image
// ABOUTME: Parses and renders dimensions in cells, pixels, percent of window, or auto

use crate::error::ImgcatError;
use std::fmt;
use std::str::FromStr;

/// One axis of a display hint.
///
/// Zero in any unit means the same as `Auto`; the constructors normalize it
/// so that `Cells(0)` never reaches the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    #[default]
    Auto,
    Cells(u32),
    Pixels(u32),
    Percent(u32),
}

impl Dimension {
    pub fn cells(n: u32) -> Self {
        if n == 0 { Self::Auto } else { Self::Cells(n) }
    }

    pub fn pixels(n: u32) -> Self {
        if n == 0 { Self::Auto } else { Self::Pixels(n) }
    }

    pub fn percent(n: u32) -> Result<Self, ImgcatError> {
        let dimension = Self::Percent(n);
        dimension.validate()?;
        Ok(dimension.normalized())
    }

    pub fn is_auto(&self) -> bool {
        matches!(self.normalized(), Self::Auto)
    }

    /// Cell count, if this dimension is expressed in cells
    pub fn as_cells(&self) -> Option<u32> {
        match self.normalized() {
            Self::Cells(n) => Some(n),
            _ => None,
        }
    }

    /// Collapse explicit zeros built through the enum variants directly
    pub fn normalized(self) -> Self {
        match self {
            Self::Cells(0) | Self::Pixels(0) | Self::Percent(0) => Self::Auto,
            other => other,
        }
    }

    /// Reject values no terminal can honour, such as more than 100 percent
    pub fn validate(&self) -> Result<(), ImgcatError> {
        match self {
            Self::Percent(n) if *n > 100 => Err(ImgcatError::InvalidHint(format!(
                "percentage {}% exceeds 100%",
                n
            ))),
            _ => Ok(()),
        }
    }

    /// Attribute value as the iTerm2 protocol expects it, `None` for auto
    pub fn attribute_value(&self) -> Option<String> {
        match self.normalized() {
            Self::Auto => None,
            Self::Cells(n) => Some(n.to_string()),
            Self::Pixels(n) => Some(format!("{}px", n)),
            Self::Percent(n) => Some(format!("{}%", n)),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attribute_value() {
            Some(value) => f.write_str(&value),
            None => f.write_str("auto"),
        }
    }
}

impl FromStr for Dimension {
    type Err = ImgcatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }

        let (digits, unit) = if let Some(n) = s.strip_suffix("px") {
            (n, "px")
        } else if let Some(n) = s.strip_suffix('%') {
            (n, "%")
        } else {
            (s, "")
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ImgcatError::InvalidHint(format!(
                "'{}' is not a non-negative integer with an optional px or % suffix",
                s
            )));
        }

        let value: u32 = digits
            .parse()
            .map_err(|_| ImgcatError::InvalidHint(format!("'{}' is out of range", s)))?;

        match unit {
            "px" => Ok(Self::pixels(value)),
            "%" => Self::percent(value),
            _ => Ok(Self::cells(value)),
        }
    }
}

/// Caller-declared target size, independent of the image's intrinsic size.
///
/// Both axes unset is valid and lets the terminal size the image itself.
/// Zero dimensions are stored as `Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayHint {
    width: Dimension,
    height: Dimension,
}

impl DisplayHint {
    pub fn auto() -> Self {
        Self::default()
    }

    /// Validated hint from two dimensions
    pub fn new(width: Dimension, height: Dimension) -> Result<Self, ImgcatError> {
        width.validate()?;
        height.validate()?;
        Ok(Self::auto().with_width(width).with_height(height))
    }

    pub fn width(&self) -> Dimension {
        self.width
    }

    pub fn height(&self) -> Dimension {
        self.height
    }

    pub fn validate(&self) -> Result<(), ImgcatError> {
        self.width.validate()?;
        self.height.validate()
    }

    pub fn with_width(mut self, width: Dimension) -> Self {
        self.width = width.normalized();
        self
    }

    pub fn with_height(mut self, height: Dimension) -> Self {
        self.height = height.normalized();
        self
    }

    /// Build a hint from optional text values such as `"10"`, `"640px"`, `"50%"`
    pub fn parse(width: Option<&str>, height: Option<&str>) -> Result<Self, ImgcatError> {
        let width = width.map(str::parse).transpose()?.unwrap_or_default();
        let height = height.map(str::parse).transpose()?.unwrap_or_default();
        Self::new(width, height)
    }
}
