use crate::easing::Ease;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    X,
    Y,
    Scale,
    Opacity,
    BackgroundColor,
    BorderColor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Accepts hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), `rgb()`/`rgba()`
    /// and `hsl()`/`hsla()` in comma or space syntax (percent channels and a
    /// `/ alpha` included), and `transparent`. Keywords such as `white` are
    /// resolved by the browser before they get here.
    pub fn parse(value: &str) -> Result<Self, &'static str> {
        let value = value.trim();

        if value.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }
        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        let (function, body) = value.split_once('(').ok_or("unsupported color syntax")?;
        let body = body.strip_suffix(')').ok_or("unterminated color function")?;
        let (channels, alpha) = split_channels(body)?;
        let a = alpha.map(parse_alpha).transpose()?.unwrap_or(1.0);

        match (function.trim().to_ascii_lowercase().as_str(), channels.as_slice()) {
            ("rgb" | "rgba", [r, g, b]) => Ok(Self {
                a,
                ..Self::opaque(rgb_channel(r)?, rgb_channel(g)?, rgb_channel(b)?)
            }),
            ("hsl" | "hsla", [h, s, l]) => {
                let (r, g, b) = hsl_to_rgb(hue(h)?, percentage(s)?, percentage(l)?);
                Ok(Self { a, ..Self::opaque(r, g, b) })
            }
            ("rgb" | "rgba" | "hsl" | "hsla", _) => Err("wrong number of color channels"),
            _ => Err("unsupported color syntax"),
        }
    }

    fn parse_hex(hex: &str) -> Result<Self, &'static str> {
        if !hex.is_ascii() {
            return Err("invalid hex digit");
        }
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16)
                .map(f64::from)
                .map_err(|_| "invalid hex digit")
        };

        match hex.len() {
            3 | 4 => {
                let mut expanded = String::with_capacity(hex.len() * 2);
                for digit in hex.chars() {
                    expanded.push(digit);
                    expanded.push(digit);
                }
                Self::parse_hex(&expanded)
            }
            6 => Ok(Self::opaque(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Ok(Self {
                a: channel(&hex[6..8])? / 255.0,
                ..Self::opaque(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                )
            }),
            _ => Err("hex colors need 3, 4, 6 or 8 digits"),
        }
    }

    fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0.0, 255.0),
            g: g.clamp(0.0, 255.0),
            b: b.clamp(0.0, 255.0),
            a: 1.0,
        }
    }

    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r.round() as u8,
            self.g.round() as u8,
            self.b.round() as u8,
            self.a
        )
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Splits a color function body into its channels and optional alpha.
fn split_channels(body: &str) -> Result<(Vec<&str>, Option<&str>), &'static str> {
    if body.contains(',') {
        let mut parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let alpha = if parts.len() == 4 { parts.pop() } else { None };
        return Ok((parts, alpha));
    }

    let (channels, alpha) = match body.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (body, None),
    };
    if alpha == Some("") {
        return Err("missing alpha after '/'");
    }
    Ok((channels.split_whitespace().collect(), alpha))
}

fn number(value: &str) -> Result<f64, &'static str> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or("invalid color channel")
}

/// `50%` and `0.5` both mean one half.
fn fraction(value: &str) -> Result<f64, &'static str> {
    match value.strip_suffix('%') {
        Some(percent) => Ok(number(percent)? / 100.0),
        None => number(value),
    }
}

fn rgb_channel(value: &str) -> Result<f64, &'static str> {
    match value.strip_suffix('%') {
        Some(percent) => Ok(number(percent)? / 100.0 * 255.0),
        None => number(value),
    }
}

fn parse_alpha(value: &str) -> Result<f64, &'static str> {
    fraction(value).map(|alpha| alpha.clamp(0.0, 1.0))
}

fn percentage(value: &str) -> Result<f64, &'static str> {
    let percent = value.strip_suffix('%').unwrap_or(value);
    Ok((number(percent)? / 100.0).clamp(0.0, 1.0))
}

fn hue(value: &str) -> Result<f64, &'static str> {
    number(value.strip_suffix("deg").unwrap_or(value))
}

/// Hue in degrees, saturation and lightness in `0..=1`; channels in `0..=255`.
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (f64, f64, f64) {
    let chroma = saturation * lightness.min(1.0 - lightness);
    let channel = |n: f64| {
        let k = (n + hue / 30.0).rem_euclid(12.0);
        let level = lightness - chroma * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
        level * 255.0
    };
    (channel(0.0), channel(8.0), channel(4.0))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Color(Rgba),
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Rgba> for Value {
    fn from(value: Rgba) -> Self {
        Self::Color(value)
    }
}

impl Value {
    /// Interpolates between two values of the same kind; mismatched kinds
    /// snap to `to` once the tween is past its start.
    pub fn lerp(self, to: Self, t: f64) -> Self {
        if t >= 1.0 {
            return to;
        }
        match (self, to) {
            (Self::Number(a), Self::Number(b)) => Self::Number(a + (b - a) * t),
            (Self::Color(a), Self::Color(b)) => Self::Color(a.lerp(b, t)),
            (from, to) => {
                if t > 0.0 {
                    to
                } else {
                    from
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Block,
    None,
}

impl Display {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::None => "none",
        }
    }
}

/// Description of a single tween: destination values, optional explicit
/// starting values, and timing.
#[derive(Clone, Debug, PartialEq)]
pub struct TweenSpec {
    pub to: Vec<(Property, Value)>,
    pub from: Vec<(Property, Value)>,
    pub duration: f64,
    pub delay: f64,
    pub ease: Ease,
    /// `Block` is applied when the tween starts, `None` when it completes.
    pub display: Option<Display>,
}

impl TweenSpec {
    pub fn new(duration: f64) -> Self {
        Self {
            to: Vec::new(),
            from: Vec::new(),
            duration: duration.max(0.0),
            delay: 0.0,
            ease: Ease::Linear,
            display: None,
        }
    }

    pub fn to(mut self, property: Property, value: impl Into<Value>) -> Self {
        self.to.push((property, value.into()));
        self
    }

    pub fn from(mut self, property: Property, value: impl Into<Value>) -> Self {
        self.from.push((property, value.into()));
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.to
            .iter()
            .chain(self.from.iter())
            .map(|(property, _)| *property)
    }

    /// Copies of this spec for a batch of `count` elements, each delayed by
    /// `each` seconds more than the previous one.
    pub fn staggered(&self, count: usize, each: f64) -> Vec<TweenSpec> {
        (0..count)
            .map(|index| {
                let mut spec = self.clone();
                spec.delay += each * index as f64;
                spec
            })
            .collect()
    }

    /// Seconds from the batch start until the last staggered element settles.
    pub fn batch_span(&self, count: usize, each: f64) -> f64 {
        let extra = each * count.saturating_sub(1) as f64;
        self.delay + self.duration + extra
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Starts when everything placed so far has finished.
    Append,
    /// Offset in seconds from the current end of the timeline.
    Relative(f64),
}

impl Position {
    /// Parses `"-=0.5"` / `"+=0.2"`; an empty string appends.
    pub fn parse(value: &str) -> Result<Self, &'static str> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Self::Append);
        }

        let (sign, amount) = if let Some(amount) = value.strip_prefix("-=") {
            (-1.0, amount)
        } else if let Some(amount) = value.strip_prefix("+=") {
            (1.0, amount)
        } else {
            return Err("timeline position must start with -= or +=");
        };

        let amount = amount
            .trim()
            .parse::<f64>()
            .map_err(|_| "timeline offset is not a number")?;
        Ok(Self::Relative(sign * amount))
    }
}

/// Sequencer that converts relative positions into absolute start offsets.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    end: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(&self) -> f64 {
        self.end
    }

    /// Reserves `span` seconds at `position` and returns the absolute start.
    pub fn place(&mut self, span: f64, position: Position) -> f64 {
        let start = match position {
            Position::Append => self.end,
            Position::Relative(offset) => (self.end + offset).max(0.0),
        };
        self.end = self.end.max(start + span.max(0.0));
        start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_color_syntaxes() {
        assert_eq!(Rgba::parse("#fff"), Rgba::parse("#ffffff"));
        let teal = Rgba::parse("#1a8c7f").expect("hex");
        assert_eq!((teal.r, teal.g, teal.b, teal.a), (26.0, 140.0, 127.0, 1.0));

        let rgb = Rgba::parse("rgb(10, 20, 30)").expect("rgb");
        assert_eq!(rgb.a, 1.0);
        let rgba = Rgba::parse(" rgba(10, 20, 30, 0.5) ").expect("rgba");
        assert_eq!(rgba.a, 0.5);
        assert_eq!(Rgba::parse("transparent"), Ok(Rgba::TRANSPARENT));
    }

    #[test]
    fn parses_modern_and_computed_color_forms() {
        let channels = |value: &str| {
            let color = Rgba::parse(value).expect(value);
            (
                color.r.round() as u8,
                color.g.round() as u8,
                color.b.round() as u8,
                (color.a * 100.0).round() as u8,
            )
        };

        assert_eq!(channels("rgb(10 20 30)"), (10, 20, 30, 100));
        assert_eq!(channels("rgb(10 20 30 / 50%)"), (10, 20, 30, 50));
        assert_eq!(channels("rgba(10, 20, 30)"), (10, 20, 30, 100));
        assert_eq!(channels("rgb(10%, 20%, 30%)"), (26, 51, 77, 100));
        assert_eq!(channels("#ff000080"), (255, 0, 0, 50));
        assert_eq!(channels("#f008"), (255, 0, 0, 53));
        assert_eq!(channels("hsl(0, 100%, 50%)"), (255, 0, 0, 100));
        assert_eq!(channels("hsl(120deg 100% 25% / 0.5)"), (0, 128, 0, 50));
        assert_eq!(channels("HSLA(240, 100%, 50%, 1)"), (0, 0, 255, 100));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(Rgba::parse("teal").is_err());
        assert!(Rgba::parse("#12345").is_err());
        assert!(Rgba::parse("#zzzzzz").is_err());
        assert!(Rgba::parse("#ééé").is_err());
        assert!(Rgba::parse("rgb(1, 2)").is_err());
        assert!(Rgba::parse("rgb(1, 2, 3, 4, 5)").is_err());
        assert!(Rgba::parse("rgb(1 2 3 /)").is_err());
        assert!(Rgba::parse("rgb(1, 2, 3").is_err());
        assert!(Rgba::parse("hsl(red, 10%, 10%)").is_err());
    }

    #[test]
    fn colors_interpolate_per_channel() {
        let black = Value::Color(Rgba::parse("#000000").expect("hex"));
        let white = Value::Color(Rgba::parse("#ffffff").expect("hex"));
        let Value::Color(mid) = black.lerp(white, 0.5) else {
            panic!("expected color");
        };
        assert_eq!(mid.r, 127.5);
        assert_eq!(mid.to_css(), "rgba(128, 128, 128, 1.000)");
    }

    #[test]
    fn stagger_offsets_each_copy() {
        let spec = TweenSpec::new(1.0).delay(0.5).to(Property::Opacity, 1.0);
        let delays: Vec<f64> = spec.staggered(3, 0.2).iter().map(|s| s.delay).collect();
        assert_eq!(delays.len(), 3);
        assert!((delays[2] - 0.9).abs() < 1e-9);
        assert!((spec.batch_span(3, 0.2) - 1.9).abs() < 1e-9);
        assert_eq!(spec.batch_span(0, 0.2), 1.5);
    }

    #[test]
    fn positions_parse_relative_offsets() {
        assert_eq!(Position::parse("-=0.5"), Ok(Position::Relative(-0.5)));
        assert_eq!(Position::parse("+=1"), Ok(Position::Relative(1.0)));
        assert_eq!(Position::parse(""), Ok(Position::Append));
        assert!(Position::parse("0.5").is_err());
        assert!(Position::parse("-=soon").is_err());
    }

    #[test]
    fn timeline_overlaps_entries_like_an_intro_sequence() {
        let mut timeline = Timeline::new();
        let title = timeline.place(2.1, Position::Append);
        let subtitle = timeline.place(1.0, Position::Relative(-0.5));
        let cta = timeline.place(1.0, Position::Relative(-0.8));

        assert_eq!(title, 0.0);
        assert!((subtitle - 1.6).abs() < 1e-9);
        assert!((cta - 1.8).abs() < 1e-9);
        assert!((timeline.duration() - 2.8).abs() < 1e-9);
    }

    #[test]
    fn relative_position_never_starts_before_zero() {
        let mut timeline = Timeline::new();
        assert_eq!(timeline.place(1.0, Position::Relative(-3.0)), 0.0);
    }
}
