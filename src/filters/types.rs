//! Filter selection and parsing
//!
//! Filters are named on the command line with a small string syntax:
//! `"blur"`, `"mosaic:500"`, `"crop:0,0,64,32"`.

use std::fmt;

/// Errors that can occur while parsing a filter name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FilterParseError {
    /// Unknown filter name
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    /// Invalid parameter value
    #[error("invalid parameter for {op}: {message}")]
    InvalidParameter { op: String, message: String },

    /// Missing required parameter
    #[error("missing required parameter for {op}: {param}")]
    MissingParameter { op: String, param: String },
}

/// One filter operation with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Blur,
    Sharpen,
    Greyscale,
    Sepia,
    Dither,
    /// Mosaic with an explicit seed count, or the configured default when `None`
    Mosaic {
        seeds: Option<usize>,
    },
    EdgeDetection,
    HistogramEqualization,
    Crop {
        start_x: usize,
        start_y: usize,
        end_x: usize,
        end_y: usize,
    },
}

impl Filter {
    /// Short human-readable name, as used in progress messages.
    pub fn label(&self) -> &'static str {
        match self {
            Filter::Blur => "blur",
            Filter::Sharpen => "sharpen",
            Filter::Greyscale => "greyscale",
            Filter::Sepia => "sepia",
            Filter::Dither => "dithering",
            Filter::Mosaic { .. } => "mosaic",
            Filter::EdgeDetection => "edge detection",
            Filter::HistogramEqualization => "histogram equalization",
            Filter::Crop { .. } => "crop",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Mosaic { seeds: Some(seeds) } => write!(f, "mosaic:{}", seeds),
            Filter::Crop { start_x, start_y, end_x, end_y } => {
                write!(f, "crop:{},{},{},{}", start_x, start_y, end_x, end_y)
            }
            Filter::EdgeDetection => write!(f, "edge-detection"),
            Filter::HistogramEqualization => write!(f, "histogram-equalization"),
            Filter::Dither => write!(f, "dither"),
            other => write!(f, "{}", other.label()),
        }
    }
}

/// Parse a filter from string syntax: `"sepia"`, `"mosaic:200"`, `"crop:x0,y0,x1,y1"`
///
/// # Alias Resolution
/// - `grayscale`, `grey`, `gray` → `Greyscale`
/// - `edges`, `edgedetection`, `sobel` → `EdgeDetection`
/// - `equalize`, `histogramequalization` → `HistogramEqualization`
pub fn parse_filter_str(s: &str) -> Result<Filter, FilterParseError> {
    let s = s.trim();

    // Split on colon to get operation and params
    let (op, params) =
        if let Some(idx) = s.find(':') { (&s[..idx], Some(&s[idx + 1..])) } else { (s, None) };

    match op.to_lowercase().as_str() {
        "blur" => Ok(Filter::Blur),
        "sharpen" => Ok(Filter::Sharpen),
        "greyscale" | "grayscale" | "grey" | "gray" => Ok(Filter::Greyscale),
        "sepia" => Ok(Filter::Sepia),
        "dither" | "floyd-steinberg" => Ok(Filter::Dither),
        "mosaic" => {
            let seeds = params.map(|p| parse_count("mosaic", p)).transpose()?;
            Ok(Filter::Mosaic { seeds })
        }
        "edge-detection" | "edgedetection" | "edges" | "sobel" => Ok(Filter::EdgeDetection),
        "histogram-equalization" | "histogramequalization" | "equalize" => {
            Ok(Filter::HistogramEqualization)
        }
        "crop" => {
            let region = params.ok_or_else(|| FilterParseError::MissingParameter {
                op: "crop".to_string(),
                param: "X0,Y0,X1,Y1".to_string(),
            })?;
            let (start_x, start_y, end_x, end_y) = parse_crop_region(region)?;
            Ok(Filter::Crop { start_x, start_y, end_x, end_y })
        }
        _ => Err(FilterParseError::UnknownFilter(op.to_string())),
    }
}

fn parse_count(op: &str, s: &str) -> Result<usize, FilterParseError> {
    s.trim().parse::<usize>().map_err(|_| FilterParseError::InvalidParameter {
        op: op.to_string(),
        message: format!("cannot parse '{}' as a count", s),
    })
}

/// Parse `"x0,y0,x1,y1"`.
fn parse_crop_region(s: &str) -> Result<(usize, usize, usize, usize), FilterParseError> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 4 {
        return Err(FilterParseError::InvalidParameter {
            op: "crop".to_string(),
            message: format!("expected X0,Y0,X1,Y1, got '{}'", s),
        });
    }

    let mut values = [0usize; 4];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = parse_count("crop", part)?;
    }
    Ok((values[0], values[1], values[2], values[3]))
}
