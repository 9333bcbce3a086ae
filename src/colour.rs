use crate::PDFError;
use serde::{Deserialize, Serialize};

/// A colour, expressed in RGB or CMYK colour spaces
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new RGB colour from a `0xRRGGBB` literal
    pub fn from_hex(hex: u32) -> Colour {
        Colour::RGB {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Create a new colour in the CMYK space. c, m, y, and k range from 0.0 to 1.0
    pub fn new_cmyk(c: f32, m: f32, y: f32, k: f32) -> Colour {
        Colour::CMYK { c, m, y, k }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Blend the colour toward white by `fraction`, staying in the colour's own colour space.
    /// A fraction of 0.0 leaves the colour untouched and 1.0 yields white. The fraction is not
    /// validated here; see [crate::rainbow] for the checked entry points.
    pub fn whiter(self, fraction: f32) -> Colour {
        let keep = 1.0 - fraction;
        match self {
            Colour::RGB { r, g, b } => Colour::RGB {
                r: r * keep + fraction,
                g: g * keep + fraction,
                b: b * keep + fraction,
            },
            Colour::CMYK { c, m, y, k } => Colour::CMYK {
                c: c * keep,
                m: m * keep,
                y: y * keep,
                k: k * keep,
            },
            Colour::Grey { g } => Colour::Grey {
                g: g * keep + fraction,
            },
        }
    }

    /// Whether this is white in its colour space
    pub fn is_white(&self) -> bool {
        match *self {
            Colour::RGB { r, g, b } => r >= 1.0 && g >= 1.0 && b >= 1.0,
            Colour::CMYK { c, m, y, k } => c <= 0.0 && m <= 0.0 && y <= 0.0 && k <= 0.0,
            Colour::Grey { g } => g >= 1.0,
        }
    }
}

/// A CMYK grey holding `percent_black` percent of black ink. Template options express all
/// their greys this way, so `0` is paper white and `100` is solid black.
pub fn grey(percent_black: f32) -> Result<Colour, PDFError> {
    if !(0.0..=100.0).contains(&percent_black) {
        return Err(PDFError::GreyOutOfRange(percent_black));
    }
    Ok(Colour::CMYK {
        c: 0.0,
        m: 0.0,
        y: 0.0,
        k: percent_black / 100.0,
    })
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

impl<T: Into<f32>> From<[T; 4]> for Colour {
    fn from(c: [T; 4]) -> Self {
        let [c, m, y, k] = c;
        Colour::CMYK {
            c: c.into(),
            m: m.into(),
            y: y.into(),
            k: k.into(),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };

    pub const FIREBRICK: Colour = Colour::RGB {
        r: 0.698,
        g: 0.1333,
        b: 0.1333,
    };
    pub const ORANGE_RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.2706,
        b: 0.0,
    };
    pub const GOLD: Colour = Colour::RGB {
        r: 1.0,
        g: 0.8431,
        b: 0.0,
    };
    pub const OLIVE_DRAB: Colour = Colour::RGB {
        r: 0.4196,
        g: 0.5569,
        b: 0.1373,
    };
    pub const REPORTLAB_BLUE: Colour = Colour::RGB {
        r: 0.3059,
        g: 0.3373,
        b: 0.5333,
    };
    pub const PURPLE: Colour = Colour::RGB {
        r: 0.502,
        g: 0.0,
        b: 0.502,
    };

    /// The palette rainbow colouring falls back to
    pub const DEFAULT_SCHEME: [Colour; 6] =
        [FIREBRICK, ORANGE_RED, GOLD, OLIVE_DRAB, REPORTLAB_BLUE, PURPLE];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literals_split_into_channels() {
        assert_eq!(Colour::from_hex(0xff0000), Colour::new_rgb(1.0, 0.0, 0.0));
        assert_eq!(Colour::from_hex(0x00ff00), Colour::new_rgb_bytes(0, 255, 0));
    }

    #[test]
    fn whiter_endpoints() {
        for colour in colours::DEFAULT_SCHEME
            .into_iter()
            .chain([Colour::new_cmyk(0.2, 0.4, 0.6, 0.8), Colour::new_grey(0.3)])
        {
            assert_eq!(colour.whiter(0.0), colour);
            assert!(colour.whiter(1.0).is_white(), "{colour:?} did not blend to white");
        }
    }

    #[test]
    fn whiter_stays_in_colour_space() {
        let half = Colour::new_cmyk(0.0, 0.0, 0.0, 1.0).whiter(0.5);
        assert_eq!(half, Colour::new_cmyk(0.0, 0.0, 0.0, 0.5));
        let half = Colour::new_grey(0.0).whiter(0.5);
        assert_eq!(half, Colour::new_grey(0.5));
    }

    #[test]
    fn grey_is_percent_black() {
        assert_eq!(grey(20.0).unwrap(), Colour::new_cmyk(0.0, 0.0, 0.0, 0.2));
        assert!(grey(0.0).unwrap().is_white());
        assert!(matches!(grey(101.0), Err(PDFError::GreyOutOfRange(_))));
        assert!(matches!(grey(-1.0), Err(PDFError::GreyOutOfRange(_))));
    }
}
