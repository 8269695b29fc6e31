//! Colors for the hierarchy canvas.

/// An sRGB color with straight alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

const WHITE: Color = Color::rgb(255, 255, 255);
const BLACK: Color = Color::rgb(0, 0, 0);

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Blends the RGB channels `t` of the way towards `other`, keeping alpha.
	pub fn mix(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let channel = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
		Self {
			r: channel(self.r, other.r),
			g: channel(self.g, other.g),
			b: channel(self.b, other.b),
			a: self.a,
		}
	}

	pub fn lighten(self, t: f64) -> Self {
		self.mix(WHITE, t)
	}

	pub fn darken(self, t: f64) -> Self {
		self.mix(BLACK, t)
	}

	pub fn to_css(self) -> String {
		let Color { r, g, b, a } = self;
		if a >= 0.999 {
			format!("#{r:02x}{g:02x}{b:02x}")
		} else {
			format!("rgba({r}, {g}, {b}, {a:.3})")
		}
	}

	/// Parses `#RRGGBB`, `#RGB` or `rgb()`/`rgba()` notation.
	///
	/// Anything else yields `None` so callers can fall back to a palette color.
	pub fn parse(s: &str) -> Option<Self> {
		let s = s.trim();
		if let Some(hex) = s.strip_prefix('#') {
			let channel =
				|range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
			return match hex.len() {
				6 => Some(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
				3 => {
					let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
					Some(Color::rgb(short(0)?, short(1)?, short(2)?))
				}
				_ => None,
			};
		}
		let inner = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let nums: Vec<&str> = inner.split(',').map(str::trim).collect();
		let r = nums.first()?.parse().ok()?;
		let g = nums.get(1)?.parse().ok()?;
		let b = nums.get(2)?.parse().ok()?;
		let a = nums.get(3).and_then(|a| a.parse().ok()).unwrap_or(1.0);
		Some(Color::rgba(r, g, b, a))
	}
}

impl Default for Color {
	fn default() -> Self {
		Color::rgb(128, 128, 128)
	}
}

/// Branch colors used when the data does not name one.
#[derive(Clone, Debug)]
pub struct BranchPalette {
	pub colors: Vec<Color>,
}

impl BranchPalette {
	pub fn study() -> Self {
		Self {
			colors: vec![
				Color::rgb(37, 99, 235),  // Blue
				Color::rgb(16, 185, 129), // Emerald
				Color::rgb(245, 158, 11), // Amber
				Color::rgb(139, 92, 246), // Violet
				Color::rgb(236, 72, 153), // Pink
				Color::rgb(20, 184, 166), // Teal
				Color::rgb(249, 115, 22), // Orange
				Color::rgb(100, 116, 139), // Slate
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Complete visual theme for the tree.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub background_secondary: Color,
	pub edge: Color,
	pub label: Color,
	pub root: Color,
	pub selection_ring: Color,
	/// How much lighter leaves are than their branch.
	pub leaf_lighten: f64,
	pub palette: BranchPalette,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(248, 250, 252),
			background_secondary: Color::rgb(255, 255, 255),
			edge: Color::rgba(100, 116, 139, 0.6),
			label: Color::rgb(30, 41, 59),
			root: Color::rgb(30, 58, 138),
			selection_ring: Color::rgb(234, 88, 12),
			leaf_lighten: 0.35,
			palette: BranchPalette::study(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_css_colors() {
		assert_eq!(Color::parse("#2563EB"), Some(Color::rgb(37, 99, 235)));
		assert_eq!(Color::parse("#fff"), Some(Color::rgb(255, 255, 255)));
		assert_eq!(
			Color::parse("rgba(10, 20, 30, 0.5)"),
			Some(Color::rgba(10, 20, 30, 0.5))
		);
		assert_eq!(Color::parse("tomato"), None);
		assert_eq!(Color::parse("#12"), None);
	}

	#[test]
	fn lighten_and_darken_keep_alpha() {
		let c = Color::rgba(100, 0, 200, 0.5);
		assert_eq!(c.lighten(1.0), Color::rgba(255, 255, 255, 0.5));
		assert_eq!(c.darken(0.5), Color::rgba(50, 0, 100, 0.5));
		assert_eq!(c.to_css(), "rgba(100, 0, 200, 0.500)");
	}

	#[test]
	fn palette_wraps() {
		let palette = BranchPalette::study();
		assert_eq!(palette.get(0), palette.get(palette.colors.len()));
	}
}
