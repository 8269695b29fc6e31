//! Zoom-dependent sizes for the hierarchy canvas.
//!
//! A [`ZoomStyle`] states every size once, at zoom 1. [`FrameMetrics`]
//! resolves it into world units for the zoom of the frame being drawn.

/// How a length follows the zoom level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sizing {
	/// World units, but never drawn smaller than this many pixels.
	AtLeastPixels(f64),
	/// World units, but never drawn larger than this many pixels.
	AtMostPixels(f64),
}

impl Sizing {
	/// World-space length for `base` at zoom `k`.
	pub fn world(self, base: f64, k: f64) -> f64 {
		match self {
			Sizing::AtLeastPixels(px) => base.max(px / k),
			Sizing::AtMostPixels(px) => base.min(px / k),
		}
	}
}

/// Zoom band over which a decoration fades in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeBand {
	pub hidden_below: f64,
	pub shown_above: f64,
}

impl FadeBand {
	pub fn alpha(self, k: f64) -> f64 {
		if self.shown_above <= self.hidden_below {
			return 1.0;
		}
		((k - self.hidden_below) / (self.shown_above - self.hidden_below)).clamp(0.0, 1.0)
	}
}

#[derive(Clone, Debug)]
pub struct ZoomStyle {
	pub node_radius: f64,
	pub node_sizing: Sizing,
	/// Pointer tolerance around a node, in world units.
	pub hit_radius: f64,
	/// Caption font size in pixels. Captions stop shrinking below `caption_min_zoom`.
	pub caption_px: f64,
	pub caption_min_zoom: f64,
	pub edge_px: f64,
	/// Dash and gap lengths of the animated edges, in world units.
	pub dash: (f64, f64),
	pub dash_fade: FadeBand,
	/// World units per second the dashes travel toward the child.
	pub flow_speed: f64,
	pub arrow: f64,
	pub arrow_sizing: Sizing,
	pub ring_px: f64,
	pub ring_gap_px: f64,
}

impl Default for ZoomStyle {
	fn default() -> Self {
		Self {
			node_radius: 16.0,
			node_sizing: Sizing::AtLeastPixels(6.0),
			hit_radius: 18.0,
			caption_px: 12.0,
			caption_min_zoom: 0.5,
			edge_px: 1.5,
			dash: (8.0, 4.0),
			dash_fade: FadeBand {
				hidden_below: 0.4,
				shown_above: 0.9,
			},
			flow_speed: 12.0,
			arrow: 7.0,
			arrow_sizing: Sizing::AtMostPixels(18.0),
			ring_px: 2.5,
			ring_gap_px: 3.0,
		}
	}
}

/// A [`ZoomStyle`] resolved for one frame, in world units.
#[derive(Clone, Debug)]
pub struct FrameMetrics {
	pub node_radius: f64,
	pub caption_size: f64,
	pub caption_font: String,
	pub edge_width: f64,
	pub dash: (f64, f64),
	pub dash_alpha: f64,
	pub dash_offset: f64,
	pub arrow: f64,
	pub arrow_alpha: f64,
	pub ring_width: f64,
	pub ring_gap: f64,
}

impl FrameMetrics {
	pub fn new(style: &ZoomStyle, zoom: f64, flow_time: f64) -> Self {
		let caption_size = style.caption_px / zoom.max(style.caption_min_zoom);
		Self {
			node_radius: style.node_sizing.world(style.node_radius, zoom),
			caption_size,
			caption_font: format!("{caption_size}px sans-serif"),
			edge_width: style.edge_px / zoom,
			dash: style.dash,
			dash_alpha: style.dash_fade.alpha(zoom),
			dash_offset: -flow_time * style.flow_speed,
			arrow: style.arrow_sizing.world(style.arrow, zoom),
			arrow_alpha: zoom.min(1.0),
			ring_width: style.ring_px / zoom,
			ring_gap: style.ring_gap_px / zoom,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nodes_keep_a_minimum_screen_size() {
		let style = ZoomStyle::default();
		let far = FrameMetrics::new(&style, 0.25, 0.0);
		assert_eq!(far.node_radius * 0.25, 6.0);
		let near = FrameMetrics::new(&style, 2.0, 0.0);
		assert_eq!(near.node_radius, style.node_radius);
	}

	#[test]
	fn dashes_fade_out_when_zoomed_out() {
		let style = ZoomStyle::default();
		assert_eq!(FrameMetrics::new(&style, 0.3, 0.0).dash_alpha, 0.0);
		assert_eq!(FrameMetrics::new(&style, 1.0, 0.0).dash_alpha, 1.0);
	}

	#[test]
	fn arrows_stop_growing_past_their_pixel_cap() {
		let style = ZoomStyle::default();
		let m = FrameMetrics::new(&style, 4.0, 0.0);
		assert_eq!(m.arrow * 4.0, 18.0);
	}

	#[test]
	fn sizing_bounds_apply_on_screen() {
		assert_eq!(Sizing::AtLeastPixels(6.0).world(16.0, 0.25), 24.0);
		assert_eq!(Sizing::AtLeastPixels(6.0).world(16.0, 1.0), 16.0);
		assert_eq!(Sizing::AtMostPixels(18.0).world(7.0, 4.0), 4.5);
	}

	#[test]
	fn dashes_travel_with_time() {
		let style = ZoomStyle::default();
		assert_eq!(FrameMetrics::new(&style, 1.0, 2.0).dash_offset, -24.0);
	}
}
