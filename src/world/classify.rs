/// Closed set of semantic object categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
	/// Trees of any species.
	Tree,
	/// Bushes and shrubs.
	Bush,
	/// Ground clutter; recognized but never exported.
	Clutter,
	/// Rocks, stones, cliffs.
	Rock,
	/// Structures and buildings.
	Building,
	/// Walls, fences, gates.
	Wall,
	/// Vehicles and wrecks.
	Vehicle,
	/// Roads and bridges.
	Road,
	/// Poles, signs, lamps, tanks.
	Infrastructure,
	/// Anything no rule matched.
	Other,
}

impl Category {
	/// Every category in rule priority order, `Other` last.
	pub const ALL: [Self; 10] = [
		Self::Tree,
		Self::Bush,
		Self::Clutter,
		Self::Rock,
		Self::Building,
		Self::Wall,
		Self::Vehicle,
		Self::Road,
		Self::Infrastructure,
		Self::Other,
	];

	/// Stable lowercase tag.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Tree => "tree",
			Self::Bush => "bush",
			Self::Clutter => "clutter",
			Self::Rock => "rock",
			Self::Building => "building",
			Self::Wall => "wall",
			Self::Vehicle => "vehicle",
			Self::Road => "road",
			Self::Infrastructure => "infrastructure",
			Self::Other => "other",
		}
	}

	/// Return `true` for categories dropped from output.
	pub fn is_excluded(self) -> bool {
		matches!(self, Self::Clutter)
	}

	/// Number of `f32` values per output record.
	pub fn stride(self) -> usize {
		if self == Self::Tree { 5 } else { 4 }
	}
}

/// Tree species sub-classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
	/// Needle-leaved trees.
	Conifer = 0,
	/// Deciduous broadleaf trees.
	Broadleaf = 1,
	/// Unrecognized species.
	Other = 2,
}

impl Species {
	/// Every species in code order.
	pub const ALL: [Self; 3] = [Self::Conifer, Self::Broadleaf, Self::Other];

	/// Numeric code written into tree buffers.
	pub fn code(self) -> u8 {
		self as u8
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Conifer => "conifer",
			Self::Broadleaf => "broadleaf",
			Self::Other => "other",
		}
	}
}

/// Substring matcher over a lower-cased model path.
///
/// Covers the small regex subset the rule table needs: `anchor.*needle`,
/// a word boundary before the needle, a negative lookahead, and a negated
/// single-byte class after the needle.
///
/// Word-start patterns such as `c_` or `p_` match after a path separator, so
/// `dz\structures\x\p_crate.p3d` is clutter rather than a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
	needle: &'static str,
	anchor: Option<&'static str>,
	word_start: bool,
	not_before: Option<&'static str>,
	next_byte_not: Option<u8>,
}

impl Pattern {
	/// Match `needle` anywhere.
	pub const fn contains(needle: &'static str) -> Self {
		Self {
			needle,
			anchor: None,
			word_start: false,
			not_before: None,
			next_byte_not: None,
		}
	}

	/// Match `needle` where it starts a word.
	pub const fn word(needle: &'static str) -> Self {
		let mut pattern = Self::contains(needle);
		pattern.word_start = true;
		pattern
	}

	/// Require `anchor` to occur somewhere before the needle.
	pub const fn after(mut self, anchor: &'static str) -> Self {
		self.anchor = Some(anchor);
		self
	}

	/// Reject occurrences immediately followed by `suffix`.
	pub const fn not_before(mut self, suffix: &'static str) -> Self {
		self.not_before = Some(suffix);
		self
	}

	/// Require one more byte after the needle that is not `byte`.
	pub const fn next_byte_not(mut self, byte: u8) -> Self {
		self.next_byte_not = Some(byte);
		self
	}

	/// Test an already lower-cased path.
	pub fn matches(&self, lower: &str) -> bool {
		let from = match self.anchor {
			Some(anchor) => match lower.find(anchor) {
				Some(at) => at + anchor.len(),
				None => return false,
			},
			None => 0,
		};

		let bytes = lower.as_bytes();
		lower[from..].match_indices(self.needle).any(|(rel, _)| {
			let at = from + rel;
			let end = at + self.needle.len();
			if self.word_start && at > 0 && is_word_byte(bytes[at - 1]) {
				return false;
			}
			if let Some(suffix) = self.not_before
				&& lower[end..].starts_with(suffix)
			{
				return false;
			}
			if let Some(byte) = self.next_byte_not {
				return bytes.get(end).is_some_and(|next| *next != byte);
			}
			true
		})
	}
}

fn is_word_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_'
}

const fn c(needle: &'static str) -> Pattern {
	Pattern::contains(needle)
}

const fn w(needle: &'static str) -> Pattern {
	Pattern::word(needle)
}

const TREE: &[Pattern] = &[
	c("tree").after("plants"),
	w("t_").after("plants"),
	w("tree"),
	c("picea"),
	c("spruce"),
	c("pinus"),
	c("birch"),
	c("betula"),
	c("oak"),
	c("quercus"),
	c("beech"),
	c("fagus"),
	c("alder"),
	c("alnus"),
	c("willow"),
	c("poplar"),
	c("linden"),
	c("tilia"),
	c("maple"),
	c("ash_tree"),
	c("cherry_t"),
	c("fir"),
	c("cedar"),
	c("larch"),
	c("larix"),
	c("abies"),
	c("sorbus"),
	c("fraxinus"),
];

const BUSH: &[Pattern] = &[
	c("bush").after("plants"),
	w("b_").after("plants"),
	w("bush"),
	c("shrub"),
	c("bramble"),
	c("rhamnus"),
	c("hazel"),
	c("juniper"),
	c("cornus"),
	c("prunus"),
	c("sambucus"),
	c("buxus"),
	c("caragana"),
	c("corylus"),
	c("rosa").next_byte_not(b'_'),
];

const CLUTTER: &[Pattern] = &[
	c("clutter"),
	w("c_"),
	w("l_"),
	w("p_"),
	c("grass"),
	c("weed"),
	c("flower"),
	c("ivy"),
	c("fern"),
	c("moss"),
	c("mushroom"),
	c("nettle"),
	c("lichen"),
	c("stubble"),
	c("stump"),
	c("fallen"),
	c("debris"),
	c("leaf"),
	c("dead_"),
	c("hay"),
	c("helianthus"),
	c("streambed"),
	c("pond"),
	c("waterclear"),
	c("waterseagreen"),
];

const ROCK: &[Pattern] = &[c("rock"), w("stone"), c("boulder"), c("cliff"), c("bluff"), w("rocks\\")];

const BUILDING: &[Pattern] = &[
	c("structures"),
	c("house"),
	c("barn"),
	c("church"),
	c("castle"),
	c("tower"),
	c("hospital"),
	c("school"),
	c("shop"),
	c("store"),
	c("garage"),
	c("hangar"),
	c("factory"),
	c("warehouse"),
	c("shed"),
	c("cottage"),
	c("cabin"),
	c("hut"),
	c("building"),
	c("office"),
	c("hotel"),
	c("pub_"),
	c("station"),
	c("barrack"),
	c("bunker"),
	c("prison"),
	c("police"),
	c("lighthouse"),
	c("chapel"),
	c("powerplant"),
	c("power_plant"),
	c("land_"),
	c("floor"),
	c("ruin"),
	c("fort"),
	c("dungeon"),
	c("skeleton"),
	c("tomb"),
	c("cemetery"),
	c("altar"),
	c("mine_"),
	c("pier"),
	c("dock"),
	c("jail"),
	c("cave"),
];

const WALL: &[Pattern] = &[
	c("wall"),
	c("fence"),
	c("gate").not_before("way"),
	c("hedgehog"),
	c("barrier"),
	c("railing"),
];

const VEHICLE: &[Pattern] = &[
	c("wreck"),
	c("vehicle"),
	w("car_"),
	c("truck"),
	c("boat").not_before("_r"),
	c("ship"),
	c("heli").not_before("anthus"),
	w("plane").not_before("t"),
	c("xplane"),
	c("uaz"),
	c("lada"),
	c("datsun"),
	c("ural"),
	c("v3s"),
	c("bmp"),
	c("t72"),
	w("bus_"),
	c("bilboard"),
];

const ROAD: &[Pattern] = &[c("road"), c("bridge"), c("runway"), c("helipad"), c("sidewalk"), c("crossing")];

const INFRASTRUCTURE: &[Pattern] = &[
	c("pole"),
	w("pipe"),
	c("sign"),
	c("lamp"),
	c("lightpost"),
	c("light_post"),
	c("antenna"),
	c("transformer"),
	c("pump"),
	w("tank_"),
	c("silo"),
	c("crane"),
	c("container"),
	c("pallet"),
	c("barrel"),
	c("basement"),
];

/// Category rules in priority order; the first rule with a matching pattern wins.
pub const CATEGORY_RULES: &[(Category, &[Pattern])] = &[
	(Category::Tree, TREE),
	(Category::Bush, BUSH),
	(Category::Clutter, CLUTTER),
	(Category::Rock, ROCK),
	(Category::Building, BUILDING),
	(Category::Wall, WALL),
	(Category::Vehicle, VEHICLE),
	(Category::Road, ROAD),
	(Category::Infrastructure, INFRASTRUCTURE),
];

const CONIFER: &[&str] = &["picea", "pinus", "abies", "larix", "fir", "spruce", "larch", "cedar"];

const BROADLEAF: &[&str] = &[
	"betula", "fagus", "quercus", "alnus", "poplar", "willow", "tilia", "maple", "fraxinus", "prunus", "sorbus", "cherry", "oak", "beech",
	"birch",
];

/// Category and species resolved for one model path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelClass {
	/// Resolved category.
	pub category: Category,
	/// Species, set only for trees.
	pub species: Option<Species>,
}

/// Classify a model path by the first matching rule.
pub fn classify_path(path: &str) -> Category {
	let lower = path.to_ascii_lowercase();
	CATEGORY_RULES
		.iter()
		.find(|(_, patterns)| patterns.iter().any(|pattern| pattern.matches(&lower)))
		.map_or(Category::Other, |(category, _)| *category)
}

/// Classify a tree model path into a species by its basename.
pub fn classify_species(path: &str) -> Species {
	let name = basename(path).to_ascii_lowercase();
	if CONIFER.iter().any(|needle| name.contains(needle)) {
		Species::Conifer
	} else if BROADLEAF.iter().any(|needle| name.contains(needle)) {
		Species::Broadleaf
	} else {
		Species::Other
	}
}

/// Resolve category, and species for trees.
pub fn classify_model(path: &str) -> ModelClass {
	let category = classify_path(path);
	let species = (category == Category::Tree).then(|| classify_species(path));
	ModelClass { category, species }
}

/// Final path component, splitting on both `\` and `/`.
pub fn basename(path: &str) -> &str {
	path.rsplit(['\\', '/']).next().unwrap_or(path)
}

/// Rotation about the vertical axis, in degrees, from the right vector.
pub fn yaw_degrees(right: [f32; 3]) -> f32 {
	right[0].atan2(right[2]).to_degrees()
}

#[cfg(test)]
mod tests;
