//! Region registry: where each administrative division is drawn.
//!
//! Two sources back the registry. A vector map asset, parsed into shapes
//! keyed by element id, gives the real map. When the asset is unavailable, a
//! fixed table places each known state or union territory at a normalized
//! coordinate and the map is drawn as markers instead.
//!
//! Ids are matched loosely: `IN-MH`, `in_mh` and `MH` all name Maharashtra, and
//! the synthetic table also answers to full names (`Tamil Nadu`).

use std::collections::HashMap;

use thiserror::Error;

/// One entry of the fallback coordinate table.
#[derive(Clone, Copy, Debug)]
pub struct RegionPoint {
	pub code: &'static str,
	pub name: &'static str,
	pub lon: f64,
	pub lat: f64,
}

// Geographic bounds the synthetic map is normalized against.
const LON_WEST: f64 = 68.0;
const LON_EAST: f64 = 98.0;
const LAT_NORTH: f64 = 37.5;
const LAT_SOUTH: f64 = 6.5;

impl RegionPoint {
	/// Position in `[0, 1] x [0, 1]`, origin top-left.
	pub fn normalized(&self) -> (f64, f64) {
		(
			(self.lon - LON_WEST) / (LON_EAST - LON_WEST),
			(LAT_NORTH - self.lat) / (LAT_NORTH - LAT_SOUTH),
		)
	}
}

const fn point(code: &'static str, name: &'static str, lon: f64, lat: f64) -> RegionPoint {
	RegionPoint {
		code,
		name,
		lon,
		lat,
	}
}

/// States and union territories of India, placed near their centroids.
pub const INDIA_REGIONS: &[RegionPoint] = &[
	point("JK", "Jammu and Kashmir", 74.8, 33.8),
	point("LA", "Ladakh", 77.6, 34.2),
	point("HP", "Himachal Pradesh", 77.2, 31.9),
	point("PB", "Punjab", 75.3, 30.9),
	point("CH", "Chandigarh", 76.8, 30.7),
	point("UT", "Uttarakhand", 79.0, 30.1),
	point("HR", "Haryana", 76.1, 29.1),
	point("DL", "Delhi", 77.2, 28.6),
	point("RJ", "Rajasthan", 74.2, 26.6),
	point("UP", "Uttar Pradesh", 80.9, 26.8),
	point("BR", "Bihar", 85.3, 25.6),
	point("SK", "Sikkim", 88.5, 27.5),
	point("AR", "Arunachal Pradesh", 94.7, 28.2),
	point("AS", "Assam", 92.9, 26.2),
	point("NL", "Nagaland", 94.6, 26.1),
	point("MN", "Manipur", 93.9, 24.7),
	point("MZ", "Mizoram", 92.9, 23.2),
	point("TR", "Tripura", 91.7, 23.9),
	point("ML", "Meghalaya", 91.4, 25.5),
	point("WB", "West Bengal", 87.9, 22.9),
	point("JH", "Jharkhand", 85.3, 23.6),
	point("OR", "Odisha", 84.8, 20.9),
	point("CT", "Chhattisgarh", 81.9, 21.3),
	point("MP", "Madhya Pradesh", 78.7, 23.5),
	point("GJ", "Gujarat", 71.2, 22.3),
	point("DH", "Dadra and Nagar Haveli and Daman and Diu", 73.0, 20.3),
	point("MH", "Maharashtra", 75.7, 19.7),
	point("TG", "Telangana", 79.0, 18.1),
	point("AP", "Andhra Pradesh", 79.7, 15.9),
	point("KA", "Karnataka", 75.7, 15.3),
	point("GA", "Goa", 74.1, 15.3),
	point("KL", "Kerala", 76.3, 10.5),
	point("TN", "Tamil Nadu", 78.7, 11.1),
	point("PY", "Puducherry", 79.8, 11.9),
	point("AN", "Andaman and Nicobar Islands", 92.7, 11.7),
	point("LD", "Lakshadweep", 72.6, 10.6),
];

/// Alternate codes in circulation for the same division.
const CODE_ALIASES: &[(&str, &str)] = &[
	("UK", "UT"),
	("OD", "OR"),
	("CG", "CT"),
	("TS", "TG"),
	("DN", "DH"),
	("DD", "DH"),
	("NCT", "DL"),
];

/// Canonical lookup key for a region id or name.
pub fn region_key(id: &str) -> String {
	let upper = id.trim().to_ascii_uppercase();
	let stripped = upper
		.strip_prefix("IN-")
		.or_else(|| upper.strip_prefix("IN_"))
		.unwrap_or(&upper);
	let key: String = stripped
		.chars()
		.filter(|c| c.is_ascii_alphanumeric())
		.collect();
	CODE_ALIASES
		.iter()
		.find(|(alias, _)| *alias == key)
		.map(|(_, code)| code.to_string())
		.unwrap_or(key)
}

/// A drawable primitive from the map asset.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
	Path(String),
	Polygon(String),
	Circle { cx: f64, cy: f64, r: f64 },
	Rect { x: f64, y: f64, width: f64, height: f64 },
}

/// A primitive plus the transforms between it and its region element.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
	pub kind: ShapeKind,
	pub transform: Option<String>,
}

/// How a resolved region is drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum RegionGeometry {
	/// Normalized marker position (synthetic map).
	Marker { x: f64, y: f64 },
	/// Shapes from the vector asset. `transform` composes every ancestor's
	/// transform with the region element's own.
	Shapes {
		shapes: Vec<Shape>,
		transform: Option<String>,
	},
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegionEntry {
	pub id: String,
	pub name: String,
	pub geometry: RegionGeometry,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
	pub min_x: f64,
	pub min_y: f64,
	pub width: f64,
	pub height: f64,
}

impl ViewBox {
	pub fn to_attr(self) -> String {
		format!("{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
	}
}

/// Which source the registry was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapMode {
	Real,
	Synthetic,
}

#[derive(Debug, Error)]
pub enum MapAssetError {
	#[error("map asset is not valid SVG: {0}")]
	Parse(#[from] roxmltree::Error),
	#[error("map asset contains no identifiable regions")]
	NoRegions,
}

/// Resolves region ids to drawable geometry.
#[derive(Clone, Debug)]
pub struct RegionRegistry {
	mode: MapMode,
	view_box: ViewBox,
	entries: Vec<RegionEntry>,
	index: HashMap<String, usize>,
}

/// Drawing area of the synthetic map, in SVG user units.
pub const SYNTHETIC_VIEW_BOX: ViewBox = ViewBox {
	min_x: 0.0,
	min_y: 0.0,
	width: 600.0,
	height: 640.0,
};

impl RegionRegistry {
	/// Registry backed by the static coordinate table.
	pub fn synthetic() -> Self {
		let mut registry = Self {
			mode: MapMode::Synthetic,
			view_box: SYNTHETIC_VIEW_BOX,
			entries: Vec::with_capacity(INDIA_REGIONS.len()),
			index: HashMap::new(),
		};
		for region in INDIA_REGIONS {
			let (x, y) = region.normalized();
			let idx = registry.push(RegionEntry {
				id: region.code.to_string(),
				name: region.name.to_string(),
				geometry: RegionGeometry::Marker { x, y },
			});
			registry.index.entry(region_key(region.name)).or_insert(idx);
		}
		registry
	}

	/// Registry backed by a parsed SVG map asset.
	pub fn from_svg(svg: &str) -> Result<Self, MapAssetError> {
		let doc = roxmltree::Document::parse(svg)?;
		let root = doc.root_element();
		let view_box = parse_view_box(root).unwrap_or(SYNTHETIC_VIEW_BOX);

		let mut registry = Self {
			mode: MapMode::Real,
			view_box,
			entries: Vec::new(),
			index: HashMap::new(),
		};
		for node in root.descendants().filter(|n| n.is_element() && *n != root) {
			let Some(id) = node.attribute("id") else {
				continue;
			};
			let shapes = match node.tag_name().name() {
				// Layer groups wrap the regions rather than being one.
				"g" if node
					.descendants()
					.skip(1)
					.any(|d| d.is_element() && d.has_attribute("id")) =>
				{
					continue;
				}
				"g" => node
					.descendants()
					.skip(1)
					.filter_map(|d| {
						Some(Shape {
							kind: shape_of(d)?,
							transform: transform_chain(d, node),
						})
					})
					.collect(),
				_ => shape_of(node)
					.map(|kind| Shape {
						kind,
						transform: None,
					})
					.into_iter()
					.collect::<Vec<_>>(),
			};
			if shapes.is_empty() {
				continue;
			}
			let name = node
				.attribute("name")
				.or_else(|| node.attribute("title"))
				.or_else(|| node.attribute("data-name"))
				.unwrap_or(id)
				.to_string();
			if registry.index.contains_key(&region_key(id)) {
				continue;
			}
			let idx = registry.push(RegionEntry {
				id: id.to_string(),
				name: name.clone(),
				geometry: RegionGeometry::Shapes {
					shapes,
					transform: transform_chain(node, root),
				},
			});
			registry.index.entry(region_key(&name)).or_insert(idx);
		}

		if registry.entries.is_empty() {
			return Err(MapAssetError::NoRegions);
		}
		Ok(registry)
	}

	fn push(&mut self, entry: RegionEntry) -> usize {
		let idx = self.entries.len();
		self.index.insert(region_key(&entry.id), idx);
		self.entries.push(entry);
		idx
	}

	pub fn mode(&self) -> MapMode {
		self.mode
	}

	pub fn view_box(&self) -> ViewBox {
		self.view_box
	}

	/// The entry `id` names, if the active map can draw it.
	pub fn resolve(&self, id: &str) -> Option<&RegionEntry> {
		self.index.get(&region_key(id)).map(|&idx| &self.entries[idx])
	}

	pub fn entries(&self) -> &[RegionEntry] {
		&self.entries
	}
}

fn parse_view_box(root: roxmltree::Node<'_, '_>) -> Option<ViewBox> {
	if let Some(vb) = root.attribute("viewBox") {
		let nums: Vec<f64> = vb
			.split(|c: char| c.is_whitespace() || c == ',')
			.filter(|s| !s.is_empty())
			.filter_map(|s| s.parse().ok())
			.collect();
		if let [min_x, min_y, width, height] = nums[..] {
			return Some(ViewBox {
				min_x,
				min_y,
				width,
				height,
			});
		}
	}
	let width = root.attribute("width").and_then(parse_length)?;
	let height = root.attribute("height").and_then(parse_length)?;
	Some(ViewBox {
		min_x: 0.0,
		min_y: 0.0,
		width,
		height,
	})
}

fn parse_length(s: &str) -> Option<f64> {
	s.trim().trim_end_matches("px").parse().ok()
}

/// Transforms of `node` and its ancestors below `stop`, outermost first.
fn transform_chain(node: roxmltree::Node<'_, '_>, stop: roxmltree::Node<'_, '_>) -> Option<String> {
	let mut chain: Vec<&str> = node
		.ancestors()
		.take_while(|n| *n != stop)
		.filter_map(|n| n.attribute("transform"))
		.collect();
	if chain.is_empty() {
		return None;
	}
	chain.reverse();
	Some(chain.join(" "))
}

fn shape_of(node: roxmltree::Node<'_, '_>) -> Option<ShapeKind> {
	let num = |name: &str| node.attribute(name).and_then(parse_length);
	match node.tag_name().name() {
		"path" => node.attribute("d").map(|d| ShapeKind::Path(d.to_string())),
		"polygon" => node.attribute("points").map(|p| ShapeKind::Polygon(p.to_string())),
		"circle" => Some(ShapeKind::Circle {
			cx: num("cx").unwrap_or(0.0),
			cy: num("cy").unwrap_or(0.0),
			r: num("r")?,
		}),
		"rect" => Some(ShapeKind::Rect {
			x: num("x").unwrap_or(0.0),
			y: num("y").unwrap_or(0.0),
			width: num("width")?,
			height: num("height")?,
		}),
		_ => None,
	}
}
