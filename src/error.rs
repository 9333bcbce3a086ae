use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error("page {0} is listed in the page order but missing from the document")]
    /// The document's page order refers to a page that no longer exists
    PageMissing(usize),

    #[error("no PDF object was generated for {0}")]
    /// An object was referenced before it was written
    MissingReference(String),

    #[error("grid dimensions must be at least 1x1, got {width}x{height}")]
    /// A rainbow grid was requested with a zero dimension
    InvalidDimensions { width: usize, height: usize },

    #[error("lightness must be within [0, 1], got {0}")]
    /// The blend fraction toward white was outside [0, 1] or not a number
    LightnessOutOfRange(f32),

    #[error("grey level must be within [0, 100] percent black, got {0}")]
    /// A grey level was outside [0, 100]
    GreyOutOfRange(f32),

    #[error("no palette colour left for cell ({x}, {y})")]
    /// Every palette entry was excluded by a cell's neighbours
    PaletteExhausted { x: usize, y: usize },

    #[error("specified dimensions do not fit on page: {0}")]
    /// The requested layout leaves no room for its contents
    DoesNotFit(String),

    #[error("the specified area does not fit any lines")]
    /// A ruled section is too short for at least two lines
    NoLines,

    #[error("grid pattern cannot be both rainbow and checkered")]
    /// Two mutually exclusive cell patterns were requested
    ConflictingPattern,

    #[error("the topic '{topic}' is {len} characters but should be under {max} characters")]
    /// A planner topic will not fit in its rotated label
    TopicTooLong {
        topic: String,
        len: usize,
        max: usize,
    },

    #[error("quadrant must be within 1..=4, got {0}")]
    /// A logo was placed in a quadrant that doesn't exist
    InvalidQuadrant(u8),
}
